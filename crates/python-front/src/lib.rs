//! The whole front end: from source text to abstract syntax tree.
//!
//! This lexes, parses, and builds, stopping at the first error. It also compiles the expressions
//! inside interpolated strings for the builder, by running itself again on each one.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

use diagnostic::{Pos, SyntaxError};
use python_ast::{Expr, Mod};

pub use python_lower::CompileInfo;
pub use python_parse::Mode;

/// Compiles the source.
///
/// # Errors
///
/// On the first error from any stage. The error always has the file name from `info`.
pub fn compile(source: &str, mode: Mode, info: &CompileInfo) -> Result<Mod, SyntaxError> {
  compile_at(source, mode, info, 0)
}

/// `depth` is how many interpolated strings we are inside of.
fn compile_at(
  source: &str,
  mode: Mode,
  info: &CompileInfo,
  depth: usize,
) -> Result<Mod, SyntaxError> {
  log::debug!("compile {} as {mode:?} at depth {depth}", info.filename);
  run(source, mode, info, depth).map_err(|mut e| {
    if e.filename.is_none() {
      e.filename = Some(info.filename.clone());
    }
    log::debug!("failed: {e}");
    e
  })
}

fn run(source: &str, mode: Mode, info: &CompileInfo, depth: usize) -> Result<Mod, SyntaxError> {
  let lex = python_lex::get(source)?;
  let tree = python_parse::get(&lex.tokens, mode)?;
  let fragments = Reentry { info, depth };
  python_lower::build(tree.root(), info, &fragments)
}

/// Compiles fragments by going through the whole front end again.
#[derive(Debug)]
struct Reentry<'a> {
  info: &'a CompileInfo,
  depth: usize,
}

impl python_lower::CompileFragment for Reentry<'_> {
  fn compile_fragment(&self, text: &str) -> Result<Expr, SyntaxError> {
    let depth = self.depth + 1;
    if depth > self.info.max_nesting {
      return Err(SyntaxError::new("too many nested expressions".to_owned(), Pos::new(1, 0)));
    }
    match compile_at(text, Mode::Eval, self.info, depth)? {
      Mod::Expression(e) => Ok(*e),
      m => unreachable!("eval mode gave {m:?}"),
    }
  }
}
