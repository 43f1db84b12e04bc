//! A read-only view of the tree in the shape of the grammar.

use crate::{Lines, SyntaxKind as SK, SyntaxNode, SyntaxToken};
use diagnostic::{Pos, Span};
use rowan::{NodeOrToken, TextRange};
use token::Triviable as _;

type Elem = NodeOrToken<SyntaxNode, SyntaxToken>;

/// A node or token in the tree.
///
/// Trivia tokens are not visible through this. Layout tokens (newlines, indents, dedents, the end
/// marker) are, since the grammar mentions them.
#[derive(Debug, Clone)]
pub struct Node<'a> {
  elem: Elem,
  lines: &'a Lines,
}

impl<'a> Node<'a> {
  pub(crate) fn root(node: &SyntaxNode, lines: &'a Lines) -> Self {
    Self { elem: NodeOrToken::Node(node.clone()), lines }
  }

  /// Returns the kind.
  #[must_use]
  pub fn kind(&self) -> SK {
    self.elem.kind()
  }

  /// Returns whether this is a token.
  #[must_use]
  pub fn is_token(&self) -> bool {
    self.elem.as_token().is_some()
  }

  /// Returns the non-trivia children.
  pub fn children(&self) -> impl Iterator<Item = Node<'a>> + '_ {
    let lines = self.lines;
    self
      .elem
      .as_node()
      .into_iter()
      .flat_map(SyntaxNode::children_with_tokens)
      .filter(|x| !x.kind().is_trivia())
      .map(move |elem| Node { elem, lines })
  }

  /// Returns the number of non-trivia children.
  #[must_use]
  pub fn num_children(&self) -> usize {
    self.children().count()
  }

  /// Returns the child at the index.
  ///
  /// # Panics
  ///
  /// If there is no such child. A well-formed tree never has this happen.
  #[must_use]
  pub fn child(&self, idx: usize) -> Node<'a> {
    match self.children().nth(idx) {
      Some(x) => x,
      None => panic!("{:?} has no child {idx}", self.kind()),
    }
  }

  /// Returns the child at the index counting from the back, where 1 is the last child.
  ///
  /// # Panics
  ///
  /// If there is no such child.
  #[must_use]
  pub fn child_rev(&self, idx: usize) -> Node<'a> {
    let n = self.num_children();
    match n.checked_sub(idx) {
      Some(i) if idx != 0 => self.child(i),
      _ => panic!("{:?} has no child {idx} from the back", self.kind()),
    }
  }

  /// Returns the text of this token.
  ///
  /// # Panics
  ///
  /// If this is not a token.
  #[must_use]
  pub fn text(&self) -> &str {
    match &self.elem {
      NodeOrToken::Token(tok) => tok.text(),
      NodeOrToken::Node(node) => panic!("{:?} is not a token", node.kind()),
    }
  }

  /// Returns every non-trivia token in this, in order.
  pub fn tokens(&self) -> impl Iterator<Item = Node<'a>> + '_ {
    let lines = self.lines;
    let ret: Box<dyn Iterator<Item = SyntaxToken>> = match &self.elem {
      NodeOrToken::Token(tok) => Box::new(std::iter::once(tok.clone())),
      NodeOrToken::Node(node) => {
        Box::new(node.descendants_with_tokens().filter_map(NodeOrToken::into_token))
      }
    };
    ret
      .filter(|x| !x.kind().is_trivia())
      .map(move |tok| Node { elem: NodeOrToken::Token(tok), lines })
  }

  /// Returns the span, from the start of the first significant token to the end of the last one.
  ///
  /// Layout tokens are not significant, so a statement ends before its newline and a block ends
  /// at the end of its last statement.
  #[must_use]
  pub fn span(&self) -> Span {
    let node = match &self.elem {
      NodeOrToken::Token(tok) => return self.range_span(tok.text_range()),
      NodeOrToken::Node(node) => node,
    };
    let first = node
      .descendants_with_tokens()
      .filter_map(NodeOrToken::into_token)
      .find(|tok| is_significant(tok.kind()));
    match (first, last_significant(node)) {
      (Some(first), Some(last)) => Span::new(
        self.lines.pos(first.text_range().start()),
        self.lines.pos(last.text_range().end()),
      ),
      _ => self.range_span(node.text_range()),
    }
  }

  /// Returns the start of the span.
  #[must_use]
  pub fn start(&self) -> Pos {
    self.span().start
  }

  /// Returns the text of the line this starts on.
  #[must_use]
  pub fn line_text(&self) -> Option<&'a str> {
    self.lines.line(self.start().line)
  }

  /// Returns the line index of the tree this is in.
  #[must_use]
  pub fn lines(&self) -> &'a Lines {
    self.lines
  }

  fn range_span(&self, range: TextRange) -> Span {
    Span::new(self.lines.pos(range.start()), self.lines.pos(range.end()))
  }
}

fn is_significant(kind: SK) -> bool {
  !kind.is_trivia() && !kind.is_layout()
}

fn last_significant(node: &SyntaxNode) -> Option<SyntaxToken> {
  let start = node.text_range().start();
  let mut cur = node.last_token();
  while let Some(tok) = cur {
    if tok.text_range().start() < start {
      break;
    }
    if is_significant(tok.kind()) {
      return Some(tok);
    }
    cur = tok.prev_token();
  }
  None
}
