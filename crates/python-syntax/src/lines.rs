//! Translating byte offsets into lines and columns.

use always::always;
use diagnostic::Pos;
use text_size::TextSize;

/// The source text and where each of its lines starts.
#[derive(Debug, Clone)]
pub struct Lines {
  text: String,
  starts: Vec<TextSize>,
}

impl Lines {
  /// Returns the line index for the text.
  #[must_use]
  pub fn new(text: &str) -> Self {
    let mut starts = vec![TextSize::from(0)];
    let bs = text.as_bytes();
    let mut idx = 0usize;
    while let Some(&b) = bs.get(idx) {
      idx += 1;
      // a lone \r also ends a line
      if b == b'\n' || (b == b'\r' && bs.get(idx) != Some(&b'\n')) {
        starts.push(size(idx));
      }
    }
    Self { text: text.to_owned(), starts }
  }

  /// Returns the position of the offset.
  #[must_use]
  pub fn pos(&self, offset: TextSize) -> Pos {
    always!(usize::from(offset) <= self.text.len(), "offset {offset:?} out of bounds");
    let line = match self.starts.binary_search(&offset) {
      Ok(line) => line,
      Err(line) => line - 1,
    };
    let col = offset - self.starts[line];
    Pos::new(always::convert::usize_to_u32(line + 1), u32::from(col))
  }

  /// Returns the position of the byte index.
  #[must_use]
  pub fn pos_at(&self, idx: usize) -> Pos {
    self.pos(size(idx.min(self.text.len())))
  }

  /// Returns the text of the line, without its line terminator.
  #[must_use]
  pub fn line(&self, line: u32) -> Option<&str> {
    let idx = usize::try_from(line).ok()?.checked_sub(1)?;
    let start = usize::from(*self.starts.get(idx)?);
    let end = self.starts.get(idx + 1).map_or(self.text.len(), |&x| usize::from(x));
    let s = self.text.get(start..end)?;
    Some(s.trim_end_matches(['\n', '\r']))
  }

  /// Returns the whole text.
  #[must_use]
  pub fn text(&self) -> &str {
    &self.text
  }
}

fn size(n: usize) -> TextSize {
  TextSize::from(always::convert::usize_to_u32(n))
}

#[cfg(test)]
mod tests {
  use super::Lines;
  use diagnostic::Pos;
  use text_size::TextSize;

  #[test]
  fn pos() {
    let lines = Lines::new("ab\ncd\r\ne");
    assert_eq!(lines.pos(TextSize::from(0)), Pos::new(1, 0));
    assert_eq!(lines.pos(TextSize::from(2)), Pos::new(1, 2));
    assert_eq!(lines.pos(TextSize::from(3)), Pos::new(2, 0));
    assert_eq!(lines.pos(TextSize::from(4)), Pos::new(2, 1));
    assert_eq!(lines.pos(TextSize::from(7)), Pos::new(3, 0));
    assert_eq!(lines.pos(TextSize::from(8)), Pos::new(3, 1));
  }

  #[test]
  fn line() {
    let lines = Lines::new("ab\ncd\r\ne");
    assert_eq!(lines.line(1), Some("ab"));
    assert_eq!(lines.line(2), Some("cd"));
    assert_eq!(lines.line(3), Some("e"));
    assert_eq!(lines.line(0), None);
    assert_eq!(lines.line(4), None);
  }
}
