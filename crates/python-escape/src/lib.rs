//! Dealing with string literals: their prefixes, quotes, and escapes.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]


use std::fmt;

/// A string literal token, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Literal<'a> {
  /// Whether there was an `r` prefix.
  pub raw: bool,
  /// Whether there was a `b` prefix.
  pub bytes: bool,
  /// Whether there was an `f` prefix.
  pub fmt: bool,
  /// Whether there was a `u` prefix.
  pub unicode: bool,
  /// The text between the quotes.
  pub content: &'a str,
  /// Where `content` starts in the token.
  pub offset: usize,
}

/// Splits the token into its prefix, quotes, and content. Returns `None` if the token is not a
/// well-formed string literal.
#[must_use]
pub fn literal(token: &str) -> Option<Literal<'_>> {
  let mut ret =
    Literal { raw: false, bytes: false, fmt: false, unicode: false, content: "", offset: 0 };
  let quote_idx = token.find(['\'', '"'])?;
  for c in token[..quote_idx].chars() {
    match c.to_ascii_lowercase() {
      'r' => ret.raw = true,
      'b' => ret.bytes = true,
      'f' => ret.fmt = true,
      'u' => ret.unicode = true,
      _ => return None,
    }
  }
  let quote = token.as_bytes()[quote_idx];
  let rest = &token[quote_idx..];
  let quote_len = if rest.len() >= 6 && rest.bytes().take(3).all(|b| b == quote) { 3 } else { 1 };
  if rest.len() < 2 * quote_len || !rest.bytes().rev().take(quote_len).all(|b| b == quote) {
    return None;
  }
  ret.offset = quote_idx + quote_len;
  ret.content = &token[ret.offset..token.len() - quote_len];
  Some(ret)
}

/// An error when interpreting escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  start: usize,
  end: usize,
  kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
  TruncatedX,
  TruncatedSmallU,
  TruncatedBigU,
  IllegalChar,
  MalformedName,
  UnknownName,
  TrailingBackslash,
  BytesInvalidX,
  BytesTrailingBackslash,
  NonAscii,
}

/// What kind of error an [`Error`] is, which decides how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  /// A failure decoding a text literal.
  Unicode,
  /// A failure decoding a bytes literal.
  Value,
  /// A problem with the literal itself.
  Syntax,
}

impl Error {
  /// Returns the category.
  #[must_use]
  pub fn category(&self) -> Category {
    match self.kind {
      Kind::TruncatedX
      | Kind::TruncatedSmallU
      | Kind::TruncatedBigU
      | Kind::IllegalChar
      | Kind::MalformedName
      | Kind::UnknownName
      | Kind::TrailingBackslash => Category::Unicode,
      Kind::BytesInvalidX | Kind::BytesTrailingBackslash => Category::Value,
      Kind::NonAscii => Category::Syntax,
    }
  }

  /// Returns the byte index in the content where the problem starts.
  #[must_use]
  pub fn start(&self) -> usize {
    self.start
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let reason = match self.kind {
      Kind::TruncatedX => "truncated \\xXX escape",
      Kind::TruncatedSmallU => "truncated \\uXXXX escape",
      Kind::TruncatedBigU => "truncated \\UXXXXXXXX escape",
      Kind::IllegalChar => "illegal Unicode character",
      Kind::MalformedName => "malformed \\N character escape",
      Kind::UnknownName => "unknown Unicode character name",
      Kind::TrailingBackslash => {
        return write!(
          f,
          "'unicodeescape' codec can't decode byte 0x5c in position {}: \\ at end of string",
          self.start
        );
      }
      Kind::BytesInvalidX => return write!(f, "invalid \\x escape at position {}", self.start),
      Kind::BytesTrailingBackslash => return f.write_str("Trailing \\ in string"),
      Kind::NonAscii => return f.write_str("bytes can only contain ASCII literal characters."),
    };
    write!(
      f,
      "'unicodeescape' codec can't decode bytes in position {}-{}: {reason}",
      self.start,
      self.end.saturating_sub(1)
    )
  }
}

impl std::error::Error for Error {}

/// The state for turning escaped text into interpreted text or bytes.
trait Output {
  /// Outputs a character written literally in the source.
  fn char(&mut self, c: char);
  /// Outputs the value of a numeric escape. Returns whether the value was in range.
  fn code(&mut self, n: u32) -> bool;
}

impl Output for String {
  fn char(&mut self, c: char) {
    self.push(c);
  }

  fn code(&mut self, n: u32) -> bool {
    match char::from_u32(n) {
      Some(c) => {
        self.push(c);
        true
      }
      None => false,
    }
  }
}

impl Output for Vec<u8> {
  fn char(&mut self, c: char) {
    let mut buf = [0u8; 4];
    self.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
  }

  fn code(&mut self, n: u32) -> bool {
    // octal escapes past \377 wrap
    self.push(n.to_le_bytes()[0]);
    true
  }
}

/// Interprets the escapes in the content of a text literal.
///
/// # Errors
///
/// On the first invalid escape.
pub fn text(s: &str) -> Result<String, Error> {
  let mut ret = String::with_capacity(s.len());
  slash(s, &mut ret, false)?;
  Ok(ret)
}

/// Returns the content of a raw text literal.
#[must_use]
pub fn raw_text(s: &str) -> String {
  let mut ret = String::with_capacity(s.len());
  let mut chars = s.chars().peekable();
  while let Some(c) = chars.next() {
    newline(&mut ret, c, &mut chars);
  }
  ret
}

/// Interprets the content of a bytes literal, raw or not.
///
/// # Errors
///
/// If the content is not all ASCII, or on the first invalid escape.
pub fn bytes(s: &str, raw: bool) -> Result<Vec<u8>, Error> {
  if let Some(idx) = s.bytes().position(|b| !b.is_ascii()) {
    return Err(Error { start: idx, end: idx + 1, kind: Kind::NonAscii });
  }
  let mut ret = Vec::with_capacity(s.len());
  if raw {
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
      newline(&mut ret, c, &mut chars);
    }
  } else {
    slash(s, &mut ret, true)?;
  }
  Ok(ret)
}

/// outputs the char, translating `\r\n` and a lone `\r` into `\n`.
fn newline<O, I>(out: &mut O, c: char, chars: &mut std::iter::Peekable<I>)
where
  O: Output,
  I: Iterator<Item = char>,
{
  if c == '\r' {
    chars.next_if_eq(&'\n');
    out.char('\n');
  } else {
    out.char(c);
  }
}

fn slash<O>(s: &str, out: &mut O, is_bytes: bool) -> Result<(), Error>
where
  O: Output,
{
  let mut chars = s.char_indices().peekable();
  while let Some((start, c)) = chars.next() {
    if c != '\\' {
      if c == '\r' {
        chars.next_if(|&(_, c)| c == '\n');
        out.char('\n');
      } else {
        out.char(c);
      }
      continue;
    }
    let Some((_, e)) = chars.next() else {
      let kind = if is_bytes { Kind::BytesTrailingBackslash } else { Kind::TrailingBackslash };
      return Err(Error { start, end: start + 1, kind });
    };
    match e {
      '\n' => {}
      '\r' => {
        chars.next_if(|&(_, c)| c == '\n');
      }
      '\\' => out.char('\\'),
      '\'' => out.char('\''),
      '"' => out.char('"'),
      'a' => out.char('\u{7}'),
      'b' => out.char('\u{8}'),
      'f' => out.char('\u{c}'),
      'n' => out.char('\n'),
      'r' => out.char('\r'),
      't' => out.char('\t'),
      'v' => out.char('\u{b}'),
      '0'..='7' => {
        let mut n = e.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
          let Some((_, d)) = chars.next_if(|&(_, c)| c.is_digit(8)) else { break };
          n = n * 8 + d.to_digit(8).unwrap_or_default();
        }
        let ok = out.code(n);
        debug_assert!(ok, "octal escapes are always in range");
      }
      'x' => {
        let kind = if is_bytes { Kind::BytesInvalidX } else { Kind::TruncatedX };
        hex(&mut chars, out, start, 2, kind)?;
      }
      'u' if !is_bytes => hex(&mut chars, out, start, 4, Kind::TruncatedSmallU)?,
      'U' if !is_bytes => hex(&mut chars, out, start, 8, Kind::TruncatedBigU)?,
      'N' if !is_bytes => {
        let end = match chars.next_if(|&(_, c)| c == '{') {
          None => None,
          Some(_) => chars.by_ref().find(|&(_, c)| c == '}').map(|(i, _)| i + 1),
        };
        match end {
          // `\N{` is 3 bytes and `}` is 1
          Some(end) if end > start + 4 => match unicode_names2::character(&s[start + 3..end - 1]) {
            Some(c) => out.char(c),
            None => return Err(Error { start, end, kind: Kind::UnknownName }),
          },
          Some(end) => return Err(Error { start, end, kind: Kind::MalformedName }),
          None => return Err(Error { start, end: s.len(), kind: Kind::MalformedName }),
        }
      }
      _ => {
        log::warn!("invalid escape sequence '\\{e}'");
        out.char('\\');
        out.char(e);
      }
    }
  }
  Ok(())
}

fn hex<O, I>(
  chars: &mut std::iter::Peekable<I>,
  out: &mut O,
  start: usize,
  digits: usize,
  kind: Kind,
) -> Result<(), Error>
where
  O: Output,
  I: Iterator<Item = (usize, char)>,
{
  let mut n = 0u32;
  // the index just past the escape so far
  let mut end = start + 2;
  for _ in 0..digits {
    let Some((i, d)) = chars.next_if(|&(_, c)| c.is_ascii_hexdigit()) else {
      return Err(Error { start, end, kind });
    };
    n = n * 16 + d.to_digit(16).unwrap_or_default();
    end = i + 1;
  }
  if out.code(n) { Ok(()) } else { Err(Error { start, end, kind: Kind::IllegalChar }) }
}
