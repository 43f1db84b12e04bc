//! The internal impl.

use crate::error::{Error, Kind};
use python_syntax::SyntaxKind as SK;
use str_process::St;
use token::Token;

const TAB_SIZE: usize = 8;
const MAX_INDENT: usize = 100;
const MAX_PARENS: usize = 200;

pub(crate) fn get(s: &str) -> Result<Vec<Token<'_, SK>>, Error> {
  let lexer = Lexer {
    s,
    st: St::new(s),
    tokens: Vec::new(),
    indents: vec![0],
    parens: 0,
    line_start: true,
  };
  lexer.run()
}

struct Lexer<'a> {
  s: &'a str,
  st: St<'a>,
  tokens: Vec<Token<'a, SK>>,
  /// the columns of the enclosing indented blocks. the first is always 0.
  indents: Vec<usize>,
  parens: usize,
  line_start: bool,
}

impl<'a> Lexer<'a> {
  fn run(mut self) -> Result<Vec<Token<'a, SK>>, Error> {
    loop {
      if self.line_start && self.parens == 0 {
        self.indentation()?;
      }
      let Some(b) = self.st.cur() else { break };
      let start = self.st.mark();
      let kind = self.token(b);
      let text = as_str(self.st.since(start));
      let kind = kind?;
      debug_assert!(!text.is_empty(), "{kind:?} should be non-empty");
      self.push(kind, text);
    }
    self.finish()
  }

  fn push(&mut self, kind: SK, text: &'a str) {
    self.tokens.push(Token { kind, text });
  }

  fn err(&self, kind: Kind) -> Error {
    Error { idx: self.st.cur_idx(), kind }
  }

  fn peek(&self, n: usize) -> Option<u8> {
    self.s.as_bytes().get(self.st.cur_idx() + n).copied()
  }

  /// the char starting at the current index, if the index is at a char boundary.
  fn cur_char(&self) -> Option<char> {
    self.s.get(self.st.cur_idx()..)?.chars().next()
  }

  /// handles the whitespace at the start of a line when not in parentheses.
  fn indentation(&mut self) -> Result<(), Error> {
    let start = self.st.mark();
    let mut col = 0usize;
    while let Some(b) = self.st.cur() {
      match b {
        b' ' => col += 1,
        b'\t' => col = (col / TAB_SIZE + 1) * TAB_SIZE,
        b'\x0c' => col = 0,
        _ => break,
      }
      self.st.bump();
    }
    let ws = as_str(self.st.since(start));
    // blank lines and comment-only lines do not count for indentation.
    if matches!(self.st.cur(), None | Some(b'#' | b'\n' | b'\r')) {
      self.trivia(SK::Whitespace, ws);
      if self.st.cur() == Some(b'#') {
        let start = self.st.mark();
        self.comment();
        let text = as_str(self.st.non_empty_since(start));
        self.push(SK::Comment, text);
      }
      let start = self.st.mark();
      self.eat_newline();
      let text = as_str(self.st.since(start));
      self.trivia(SK::Nl, text);
      return Ok(());
    }
    self.line_start = false;
    let top = self.indents.last().copied().unwrap_or_default();
    if col > top {
      if self.indents.len() > MAX_INDENT {
        return Err(self.err(Kind::TooDeepIndent));
      }
      self.indents.push(col);
      self.push(SK::Indent, ws);
      return Ok(());
    }
    self.trivia(SK::Whitespace, ws);
    while self.indents.last().is_some_and(|&x| col < x) {
      self.indents.pop();
      self.push(SK::Dedent, "");
    }
    if self.indents.last().is_some_and(|&x| col == x) {
      Ok(())
    } else {
      Err(self.err(Kind::Unindent))
    }
  }

  fn trivia(&mut self, kind: SK, text: &'a str) {
    if !text.is_empty() {
      self.push(kind, text);
    }
  }

  fn comment(&mut self) {
    self.st.bump_while(|b| b != b'\n' && b != b'\r');
  }

  fn eat_newline(&mut self) -> bool {
    self.st.eat_prefix(b"\r\n") || self.st.eat_prefix(b"\n") || self.st.eat_prefix(b"\r")
  }

  fn token(&mut self, b: u8) -> Result<SK, Error> {
    match b {
      b' ' | b'\t' | b'\x0c' => {
        self.st.bump_while(|b| matches!(b, b' ' | b'\t' | b'\x0c'));
        Ok(SK::Whitespace)
      }
      b'#' => {
        self.comment();
        Ok(SK::Comment)
      }
      b'\n' | b'\r' => {
        self.eat_newline();
        if self.parens == 0 {
          self.line_start = true;
          Ok(SK::Newline)
        } else {
          Ok(SK::Nl)
        }
      }
      b'\\' => {
        self.st.bump();
        if self.eat_newline() {
          Ok(SK::LineContinuation)
        } else if self.st.cur().is_none() {
          Err(self.err(Kind::UnexpectedEof))
        } else {
          Err(self.err(Kind::CharAfterContinuation))
        }
      }
      b'"' | b'\'' => {
        self.string(b)?;
        Ok(SK::String)
      }
      b'0'..=b'9' => {
        self.number()?;
        Ok(SK::Number)
      }
      b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
        self.number()?;
        Ok(SK::Number)
      }
      _ => {
        if let Some(&(_, sk)) = SK::PUNCTUATION.iter().find(|&&(bs, _)| self.st.eat_prefix(bs)) {
          self.paren(sk)?;
          return Ok(sk);
        }
        self.name_or_string()
      }
    }
  }

  fn paren(&mut self, sk: SK) -> Result<(), Error> {
    match sk {
      SK::LRound | SK::LSquare | SK::LCurly => {
        self.parens += 1;
        if self.parens > MAX_PARENS {
          return Err(self.err(Kind::TooManyParens));
        }
      }
      SK::RRound | SK::RSquare | SK::RCurly => self.parens = self.parens.saturating_sub(1),
      _ => {}
    }
    Ok(())
  }

  fn name_or_string(&mut self) -> Result<SK, Error> {
    let Some(c) = self.cur_char() else {
      self.st.next_str();
      return Ok(SK::Invalid);
    };
    if !is_ident_start(c) {
      if c.is_ascii() {
        self.st.bump();
        return Ok(SK::Invalid);
      }
      return Err(self.err(Kind::InvalidCharInIdent));
    }
    let start = self.st.mark();
    while self.cur_char().is_some_and(is_ident_continue) {
      self.st.next_str();
    }
    let text = as_str(self.st.non_empty_since(start));
    if let Some(q @ (b'"' | b'\'')) = self.st.cur() {
      if is_string_prefix(text) {
        self.string(q)?;
        return Ok(SK::String);
      }
    }
    Ok(SK::keyword(text).unwrap_or(SK::Name))
  }

  /// the cursor is at the opening quote.
  fn string(&mut self, q: u8) -> Result<(), Error> {
    let start = self.st.cur_idx();
    let triple = [q, q, q];
    let is_triple = self.st.eat_prefix(&triple);
    if !is_triple {
      self.st.bump();
    }
    loop {
      let Some(b) = self.st.cur() else {
        let kind = if is_triple { Kind::EofInTripleString } else { Kind::EolInString };
        return Err(Error { idx: start, kind });
      };
      if b == b'\\' {
        self.st.bump();
        if !self.eat_newline() && self.st.cur().is_some() {
          self.st.next_str();
        }
        continue;
      }
      if b == q {
        if !is_triple {
          self.st.bump();
          return Ok(());
        }
        if self.st.eat_prefix(&triple) {
          return Ok(());
        }
        self.st.bump();
        continue;
      }
      if !is_triple && (b == b'\n' || b == b'\r') {
        return Err(Error { idx: start, kind: Kind::EolInString });
      }
      self.st.next_str();
    }
  }

  fn number(&mut self) -> Result<(), Error> {
    if self.st.cur() == Some(b'0') {
      let radix = match self.peek(1) {
        Some(b'x' | b'X') => Some((16, "hexadecimal")),
        Some(b'o' | b'O') => Some((8, "octal")),
        Some(b'b' | b'B') => Some((2, "binary")),
        _ => None,
      };
      if let Some((radix, name)) = radix {
        self.st.bump();
        self.st.bump();
        if self.st.cur() == Some(b'_') {
          self.st.bump();
        }
        let is_digit = |b: u8| char::from(b).is_digit(radix);
        if !self.digits(is_digit, name)? || self.st.cur().is_some_and(|b| b.is_ascii_alphanumeric())
        {
          return Err(self.err(Kind::InvalidLiteral(name)));
        }
        return Ok(());
      }
    }
    let int_start = self.st.cur_idx();
    self.digits(|b| b.is_ascii_digit(), "decimal")?;
    let int_end = self.st.cur_idx();
    let mut is_int = true;
    if self.st.cur() == Some(b'.') {
      self.st.bump();
      is_int = false;
      self.digits(|b| b.is_ascii_digit(), "decimal")?;
    }
    if matches!(self.st.cur(), Some(b'e' | b'E')) {
      // `1else` is the number `1` and then `else`.
      let digit_at = if matches!(self.peek(1), Some(b'+' | b'-')) { 2 } else { 1 };
      if self.peek(digit_at).is_some_and(|b| b.is_ascii_digit()) {
        for _ in 0..digit_at {
          self.st.bump();
        }
        self.digits(|b| b.is_ascii_digit(), "decimal")?;
        is_int = false;
      }
    }
    if matches!(self.st.cur(), Some(b'j' | b'J')) {
      self.st.bump();
      is_int = false;
    }
    if is_int {
      let mut int = self.s.as_bytes()[int_start..int_end].iter().copied().filter(|&b| b != b'_');
      if int.next() == Some(b'0') && int.any(|b| b != b'0') {
        return Err(Error { idx: int_start, kind: Kind::LeadingZeros });
      }
    }
    Ok(())
  }

  /// returns whether there were any digits. underscores must be between digits.
  fn digits<F>(&mut self, is_digit: F, name: &'static str) -> Result<bool, Error>
  where
    F: Fn(u8) -> bool,
  {
    let mut any = false;
    loop {
      match self.st.cur() {
        Some(b) if is_digit(b) => {
          self.st.bump();
          any = true;
        }
        Some(b'_') if any && self.peek(1).is_some_and(&is_digit) => self.st.bump(),
        Some(b'_') => return Err(self.err(Kind::InvalidLiteral(name))),
        _ => return Ok(any),
      }
    }
  }

  fn finish(mut self) -> Result<Vec<Token<'a, SK>>, Error> {
    if self.parens != 0 {
      return Err(self.err(Kind::UnexpectedEof));
    }
    if !self.line_start {
      self.push(SK::Newline, "");
    }
    while self.indents.len() > 1 {
      self.indents.pop();
      self.push(SK::Dedent, "");
    }
    self.push(SK::EndMarker, "");
    Ok(self.tokens)
  }
}

fn as_str(bs: &[u8]) -> &str {
  std::str::from_utf8(bs).expect("each token should be a str")
}

fn is_ident_start(c: char) -> bool {
  c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

fn is_ident_continue(c: char) -> bool {
  c == '_' || c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_string_prefix(s: &str) -> bool {
  matches!(s.to_ascii_lowercase().as_str(), "r" | "u" | "f" | "b" | "br" | "rb" | "fr" | "rf")
}
