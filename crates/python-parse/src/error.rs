use std::fmt;

/// A parse error.
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
  InvalidSyntax,
  UnexpectedIndent,
  ExpectedIndent,
  MultipleStatements,
  TooDeep,
}

impl event_parse::Expected<python_syntax::SyntaxKind> for Kind {
  fn expected(_: python_syntax::SyntaxKind) -> Self {
    Kind::InvalidSyntax
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      Kind::InvalidSyntax => f.write_str("invalid syntax"),
      Kind::UnexpectedIndent => f.write_str("unexpected indent"),
      Kind::ExpectedIndent => f.write_str("expected an indented block"),
      Kind::MultipleStatements => {
        f.write_str("multiple statements found while compiling a single statement")
      }
      Kind::TooDeep => f.write_str("too many nested expressions"),
    }
  }
}
