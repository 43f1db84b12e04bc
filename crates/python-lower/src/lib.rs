//! Building the abstract syntax tree from the concrete syntax tree.
//!
//! The tree the parser produces has one node per nonterminal of the grammar. This walks it,
//! checks what the grammar alone cannot (assignment targets, argument order, feature versions,
//! and so on), and produces a [`python_ast::Mod`].
//!
//! String literals are interpreted here too. The expressions inside interpolated strings are
//! handed back to the caller through [`CompileFragment`] to be compiled from scratch, then moved
//! to where they appear in the enclosing source.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]
#![allow(clippy::needless_pass_by_value)]

mod args;
mod ctx;
mod cx;
mod error;
mod expr;
mod fstring;
mod number;
mod remap;
mod st;
mod stmt;

pub use cx::{CompileFragment, CompileInfo};

use diagnostic::SyntaxError;
use python_syntax::Node;

/// Builds the tree for the root, which must be one of the four start symbols.
///
/// # Errors
///
/// On the first construct that is not allowed. No partial tree is returned.
///
/// # Panics
///
/// If the tree is not one the parser could have produced.
pub fn build(
  root: Node<'_>,
  info: &CompileInfo,
  fragments: &dyn CompileFragment,
) -> Result<python_ast::Mod, SyntaxError> {
  log::trace!("build {:?}", root.kind());
  let mut st = st::St::new(cx::Cx { info, fragments }, root.lines());
  let ret = stmt::root(&mut st, root);
  ret.map_err(|e| st.finish_error(e))
}
