//! Moving positions in a tree compiled from a fragment of a string token to where the fragment
//! appears in the whole source.

use always::convert::usize_to_u32;
use diagnostic::{Pos, Span};
use python_ast::walk::SpanVisitor;

/// Only positions on the first line of the fragment move across columns, since later lines of
/// the fragment are later lines of the token too.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Remap {
  lines: u32,
  cols: u32,
}

impl Remap {
  /// The fragment is `(` followed by the text starting at `offset` in the token. The token's text
  /// is `token`, and it starts at `start`.
  pub(crate) fn new(token: &str, start: Pos, offset: usize) -> Self {
    let before = &token[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let newlines = usize_to_u32(before[..line_start].matches('\n').count());
    let mut col = usize_to_u32(offset - line_start);
    if line_start == 0 {
      col += start.col;
    }
    // minus one for the `(`
    Self { lines: start.line - 1 + newlines, cols: col.saturating_sub(1) }
  }

  pub(crate) fn pos(self, pos: Pos) -> Pos {
    let col = if pos.line == 1 { pos.col + self.cols } else { pos.col };
    Pos::new(pos.line + self.lines, col)
  }
}

impl SpanVisitor for Remap {
  fn span(&mut self, span: &mut Span) {
    span.start = self.pos(span.start);
    span.end = self.pos(span.end);
  }
}

#[cfg(test)]
mod tests {
  use super::Remap;
  use diagnostic::Pos;

  #[test]
  fn same_line() {
    // x = f'ab{y}'
    let r = Remap::new("f'ab{y}'", Pos::new(3, 4), 5);
    assert_eq!(r.pos(Pos::new(1, 1)), Pos::new(3, 9));
    assert_eq!(r.pos(Pos::new(1, 2)), Pos::new(3, 10));
  }

  #[test]
  fn later_line() {
    let r = Remap::new("f'''a\n  {y}'''", Pos::new(2, 0), 9);
    assert_eq!(r.pos(Pos::new(1, 1)), Pos::new(3, 3));
    assert_eq!(r.pos(Pos::new(2, 5)), Pos::new(4, 5));
  }
}
