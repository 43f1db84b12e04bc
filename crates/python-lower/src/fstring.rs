//! String atoms: adjacent literals joined together, with the replacement fields of interpolated
//! literals scanned out and compiled.

use crate::error::{Error, Feature, Kind};
use crate::remap::Remap;
use crate::st::{Result, St};
use diagnostic::{Pos, Span};
use python_ast::{Constant, Conversion, Expr, ExprKind};
use python_syntax::Node;

/// Builds a string atom, which is one or more string tokens.
pub(crate) fn atom(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let span = node.span();
  let mut pieces = Vec::<Expr>::new();
  let mut fmode = false;
  for token in node.children() {
    let text = token.text();
    let Some(lit) = python_escape::literal(text) else { unreachable!("bad string: {text:?}") };
    let escape_err = |e| Error { pos: token.start(), kind: Kind::Escape(e) };
    if lit.fmt {
      fmode = true;
      let mut scan = Scan {
        s: lit.content,
        idx: 0,
        raw: lit.raw,
        token: text,
        token_start: token.start(),
        offset: lit.offset,
        span,
      };
      scan.f_string(st, &mut pieces, 0)?;
      continue;
    }
    let value = if lit.bytes {
      Constant::Bytes(python_escape::bytes(lit.content, lit.raw).map_err(escape_err)?)
    } else if lit.raw {
      Constant::Str(python_escape::raw_text(lit.content))
    } else {
      Constant::Str(python_escape::text(lit.content).map_err(escape_err)?)
    };
    let kind = lit.unicode.then(|| "u".to_owned());
    push_constant(&mut pieces, value, kind, span);
  }
  if !fmode && pieces.len() == 1 {
    if let Some(ret) = pieces.pop() {
      return Ok(ret);
    }
  }
  st.check_feature(fmode, Feature::FStrings, &node)?;
  let is_bytes =
    |e: &Expr| matches!(e.kind, ExprKind::Constant { value: Constant::Bytes(_), .. });
  if pieces.iter().any(is_bytes) {
    return Err(st.err(&node, Kind::MixBytes));
  }
  Ok(joined(pieces, span))
}

/// Pushes the constant, or appends it to the constant before it if they are both text or both
/// bytes. The joined constant has the kind of the later one.
fn push_constant(pieces: &mut Vec<Expr>, value: Constant, kind: Option<String>, span: Span) {
  if let Some(ExprKind::Constant { value: prev, kind: prev_kind }) =
    pieces.last_mut().map(|x| &mut x.kind)
  {
    match (prev, &value) {
      (Constant::Str(prev), Constant::Str(s)) => {
        prev.push_str(s);
        *prev_kind = kind;
        return;
      }
      (Constant::Bytes(prev), Constant::Bytes(b)) => {
        prev.extend_from_slice(b);
        *prev_kind = kind;
        return;
      }
      _ => {}
    }
  }
  pieces.push(Expr::new(ExprKind::Constant { value, kind }, span));
}

/// Empty text is dropped.
fn joined(pieces: Vec<Expr>, span: Span) -> Expr {
  let values = pieces
    .into_iter()
    .filter(|x| {
      !matches!(&x.kind, ExprKind::Constant { value: Constant::Str(s), .. } if s.is_empty())
    })
    .collect();
  Expr::new(ExprKind::JoinedStr(values), span)
}

/// The state of scanning the content of one interpolated literal.
struct Scan<'a> {
  /// The content between the quotes.
  s: &'a str,
  /// Where we are in `s`.
  idx: usize,
  raw: bool,
  /// The whole token.
  token: &'a str,
  token_start: Pos,
  /// Where `s` starts in `token`.
  offset: usize,
  /// The span of the whole atom, which everything built here gets.
  span: Span,
}

impl Scan<'_> {
  fn err(&self, kind: Kind) -> Error {
    Error { pos: self.span.start, kind }
  }

  fn at(&self, idx: usize) -> Option<u8> {
    self.s.as_bytes().get(idx).copied()
  }

  /// Scans alternating literal text and replacement fields. When `rec` is not 0, this is a format
  /// spec, which ends at the `}` closing its field.
  fn f_string(&mut self, st: &mut St<'_>, pieces: &mut Vec<Expr>, rec: u8) -> Result<()> {
    loop {
      let lit = self.literal(rec)?;
      push_constant(pieces, Constant::Str(lit), None, self.span);
      match self.at(self.idx) {
        None | Some(b'}') => break,
        Some(_) => {}
      }
      let (value, debug_text) = self.field(st, rec)?;
      if let Some(text) = debug_text {
        push_constant(pieces, Constant::Str(text), None, self.span);
      }
      pieces.push(value);
    }
    if rec == 0 && self.idx + 1 < self.s.len() {
      return Err(self.err(Kind::FStringUnexpectedEnd));
    }
    if rec != 0 && self.at(self.idx) != Some(b'}') {
      return Err(self.err(Kind::FStringExpectingBrace));
    }
    Ok(())
  }

  /// Scans literal text up to the next replacement field, the `}` ending a format spec, or the
  /// end. Returns the decoded text.
  fn literal(&mut self, rec: u8) -> Result<String> {
    let s = self.s;
    let bs = s.as_bytes();
    let mut start = self.idx;
    let mut idx = self.idx;
    let mut buf = String::new();
    while idx < bs.len() {
      let mut c = bs[idx];
      idx += 1;
      if !self.raw && c == b'\\' && idx < bs.len() {
        c = bs[idx];
        idx += 1;
        if c == b'N' && bs.get(idx) == Some(&b'{') {
          // `\N{...}` is a named character, not a field
          while idx < bs.len() && bs[idx] != b'}' {
            idx += 1;
          }
          idx = (idx + 1).min(bs.len());
          continue;
        }
        if c == b'{' {
          log::warn!("invalid escape sequence '\\{{'");
          // keep the backslash, escaped so decoding leaves it alone
          buf.push_str(&s[start..idx - 1]);
          buf.push('\\');
          start = idx - 1;
        }
      }
      if c == b'{' || c == b'}' {
        if rec == 0 && bs.get(idx) == Some(&c) {
          buf.push_str(&s[start..idx]);
          idx += 1;
          start = idx;
        } else if rec == 0 && c == b'}' {
          return Err(self.err(Kind::FStringSingleBrace));
        } else {
          idx -= 1;
          break;
        }
      }
    }
    buf.push_str(&s[start..idx]);
    self.idx = idx;
    if self.raw {
      return Ok(python_escape::raw_text(&buf));
    }
    python_escape::text(&buf).map_err(|e| Error { pos: self.token_start, kind: Kind::Escape(e) })
  }

  /// Scans a replacement field starting at its `{`. Returns the formatted value, and the text of
  /// the expression if it ended with `=`.
  fn field(&mut self, st: &mut St<'_>, rec: u8) -> Result<(Expr, Option<String>)> {
    if rec >= 2 {
      return Err(self.err(Kind::FStringTooDeep));
    }
    let s = self.s;
    let bs = s.as_bytes();
    let expr_start = self.idx + 1;
    let mut idx = self.expr_end(expr_start)?;
    let value = self.compile(st, expr_start, idx)?;
    let mut debug_text = None;
    if bs[idx] == b'=' {
      st.check_feature_at(Feature::FStringDebug, self.span.start)?;
      idx += 1;
      while bs.get(idx).is_some_and(|c| c.is_ascii() && char::from(*c).is_whitespace()) {
        idx += 1;
      }
      debug_text = Some(s[expr_start..idx].to_owned());
    }
    let mut conversion = None;
    if bs.get(idx) == Some(&b'!') {
      idx += 1;
      let Some(c) = s.get(idx..).and_then(|x| x.chars().next()) else {
        return Err(self.err(Kind::FStringExpectingBrace));
      };
      idx += c.len_utf8();
      match Conversion::from_char(c) {
        Some(c) => conversion = Some(c),
        None => return Err(self.err(Kind::FStringConversion)),
      }
    }
    let mut format_spec = None;
    if bs.get(idx) == Some(&b':') {
      self.idx = idx + 1;
      let mut spec = Vec::new();
      self.f_string(st, &mut spec, rec + 1)?;
      format_spec = Some(Box::new(joined(spec, self.span)));
      idx = self.idx;
    }
    if bs.get(idx) != Some(&b'}') {
      return Err(self.err(Kind::FStringExpectingBrace));
    }
    self.idx = idx + 1;
    if debug_text.is_some() && conversion.is_none() && format_spec.is_none() {
      conversion = Some(Conversion::Repr);
    }
    let kind = ExprKind::FormattedValue { value: Box::new(value), conversion, format_spec };
    Ok((Expr::new(kind, self.span), debug_text))
  }

  /// Returns where the expression starting at `start` ends: at a `=`, `!`, `:`, or `}` outside
  /// of brackets and strings.
  fn expr_end(&self, start: usize) -> Result<usize> {
    let bs = self.s.as_bytes();
    let mut idx = start;
    let mut quote: Option<(u8, bool)> = None;
    let mut parens = Vec::<u8>::new();
    while let Some(&c) = bs.get(idx) {
      if c == b'\\' {
        return Err(self.err(Kind::FStringBackslash));
      }
      let is_triple = |q: u8| bs.get(idx + 1) == Some(&q) && bs.get(idx + 2) == Some(&q);
      if let Some((q, triple)) = quote {
        if c == q {
          if !triple {
            quote = None;
          } else if is_triple(q) {
            quote = None;
            idx += 2;
          }
        }
      } else if c == b'\'' || c == b'"' {
        let triple = is_triple(c);
        if triple {
          idx += 2;
        }
        quote = Some((c, triple));
      } else if matches!(c, b'[' | b'{' | b'(') {
        parens.push(c);
      } else if c == b'#' {
        return Err(self.err(Kind::FStringHash));
      } else if parens.is_empty() && matches!(c, b':' | b'}' | b'!' | b'=' | b'<' | b'>') {
        let next = bs.get(idx + 1).copied();
        if matches!(c, b'!' | b'=' | b'<' | b'>') && next == Some(b'=') {
          idx += 2;
          continue;
        }
        if matches!(c, b'<' | b'>') && next.is_some() {
          idx += 1;
          continue;
        }
        break;
      } else if matches!(c, b']' | b'}' | b')') {
        let Some(open) = parens.pop() else {
          return Err(self.err(Kind::FStringUnmatched(char::from(c))));
        };
        if !matches!((open, c), (b'[', b']') | (b'{', b'}') | (b'(', b')')) {
          let kind = Kind::FStringMismatch { close: char::from(c), open: char::from(open) };
          return Err(self.err(kind));
        }
      }
      idx += 1;
    }
    if quote.is_some() {
      return Err(self.err(Kind::FStringUnterminated));
    }
    if let Some(&open) = parens.last() {
      return Err(self.err(Kind::FStringUnmatched(char::from(open))));
    }
    if idx >= bs.len() {
      return Err(self.err(Kind::FStringExpectingBrace));
    }
    Ok(idx)
  }

  /// Compiles the expression between the indices and moves it to where it is in the source.
  fn compile(&self, st: &St<'_>, start: usize, end: usize) -> Result<Expr> {
    let text = &self.s[start..end];
    if text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')) {
      return Err(self.err(Kind::FStringEmpty));
    }
    let mut remap = Remap::new(self.token, self.token_start, self.offset + start);
    let source = format!("({text})");
    log::debug!("compile fragment {source:?}");
    match st.fragments().compile_fragment(&source) {
      Ok(mut e) => {
        python_ast::walk::walk_expr(&mut remap, &mut e);
        Ok(e)
      }
      Err(e) => Err(Error { pos: remap.pos(e.pos), kind: Kind::Fragment(e.message) }),
    }
  }
}
