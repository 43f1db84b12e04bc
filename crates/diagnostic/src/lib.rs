//! See [`SyntaxError`].

use std::fmt;

/// A position in a file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
  /// The line number, starting at 1.
  pub line: u32,
  /// The column, as a count of UTF-8 bytes from the start of the line, starting at 0.
  pub col: u32,
}

impl Pos {
  /// Returns a new position.
  #[must_use]
  pub const fn new(line: u32, col: u32) -> Self {
    Self { line, col }
  }
}

impl fmt::Display for Pos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.col)
  }
}

/// A region of a file, from `start` to `end` inclusive of `start` and exclusive of `end`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  /// The start.
  pub start: Pos,
  /// The end. Never before the start.
  pub end: Pos,
}

impl Span {
  /// Returns a new span.
  #[must_use]
  pub const fn new(start: Pos, end: Pos) -> Self {
    Self { start, end }
  }

  /// Returns a span from the start of `self` to the end of `other`.
  #[must_use]
  pub fn to(self, other: Span) -> Self {
    Self { start: self.start, end: other.end }
  }
}

impl fmt::Display for Span {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

/// A syntax error. This is the only kind of error reported to users of the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
  /// The message.
  pub message: String,
  /// Where the error happened.
  pub pos: Pos,
  /// The name of the file, if known.
  pub filename: Option<String>,
  /// The text of the line containing `pos`, if known.
  pub text: Option<String>,
}

impl SyntaxError {
  /// Returns a new error with no file name or line text.
  #[must_use]
  pub fn new(message: String, pos: Pos) -> Self {
    Self { message, pos, filename: None, text: None }
  }
}

impl fmt::Display for SyntaxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(filename) = &self.filename {
      write!(f, "{filename}:")?;
    }
    write!(f, "{}: {}", self.pos, self.message)
  }
}

impl std::error::Error for SyntaxError {}
