use core::fmt;

/// A lex error.
#[derive(Debug)]
pub struct Error {
  pub(crate) idx: usize,
  pub(crate) kind: Kind,
}

impl Error {
  /// The byte offset of the error.
  #[must_use]
  pub fn idx(&self) -> usize {
    self.idx
  }
}

#[derive(Debug)]
pub(crate) enum Kind {
  EolInString,
  EofInTripleString,
  UnexpectedEof,
  InvalidCharInIdent,
  CharAfterContinuation,
  LeadingZeros,
  InvalidLiteral(&'static str),
  Unindent,
  TooDeepIndent,
  TooManyParens,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      Kind::EolInString => f.write_str("EOL while scanning string literal"),
      Kind::EofInTripleString => f.write_str("EOF while scanning triple-quoted string literal"),
      Kind::UnexpectedEof => f.write_str("unexpected EOF while parsing"),
      Kind::InvalidCharInIdent => f.write_str("invalid character in identifier"),
      Kind::CharAfterContinuation => {
        f.write_str("unexpected character after line continuation character")
      }
      Kind::LeadingZeros => f.write_str(
        "leading zeros in decimal integer literals are not permitted; \
         use an 0o prefix for octal integers",
      ),
      Kind::InvalidLiteral(s) => write!(f, "invalid {s} literal"),
      Kind::Unindent => f.write_str("unindent does not match any outer indentation level"),
      Kind::TooDeepIndent => f.write_str("too many levels of indentation"),
      Kind::TooManyParens => f.write_str("too many nested parentheses"),
    }
  }
}
