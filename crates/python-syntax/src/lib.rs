//! Concrete syntax for Python.
//!
//! The tree is lossless: every byte of the source lives in some token, including whitespace and
//! comments. Consumers generally go through [`Node`], which hides trivia and exposes the tree in
//! the shape of the grammar, one node per nonterminal, even for nonterminals that only wrap a
//! single child.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod kind;
mod lines;
mod node;

pub use kind::{Python, SyntaxKind, SyntaxNode, SyntaxToken};
pub use lines::Lines;
pub use node::Node;

/// A concrete syntax tree together with what is needed to report positions in it.
#[derive(Debug, Clone)]
pub struct Tree {
  root: SyntaxNode,
  lines: Lines,
}

impl Tree {
  /// Returns a new tree. The text of `root` must be the text `lines` was built from.
  #[must_use]
  pub fn new(root: SyntaxNode, lines: Lines) -> Self {
    Self { root, lines }
  }

  /// Returns the root of the tree.
  #[must_use]
  pub fn root(&self) -> Node<'_> {
    Node::root(&self.root, &self.lines)
  }

  /// Returns the underlying rowan node.
  #[must_use]
  pub fn syntax(&self) -> &SyntaxNode {
    &self.root
  }

  /// Returns the line index.
  #[must_use]
  pub fn lines(&self) -> &Lines {
    &self.lines
  }
}
