//! Parse a sequence of tokens into a concrete syntax tree.
//!
//! The shape of the tree follows the grammar exactly: every nonterminal gets a node, so an
//! expression like `x` is a `Test` containing an `OrTest` containing an `AndTest` and so on, down
//! to an `Atom` containing the name token. Parsing stops at the first error.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod expr;
mod parser;
mod stmt;

use python_syntax::SyntaxKind as SK;
use token::Token;

pub use error::Error;

/// What the tokens should be parsed as.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// A module, like a file.
  #[default]
  Exec,
  /// A single expression.
  Eval,
  /// A single interactive statement.
  Single,
  /// A function signature type, like `(int, str) -> bool`.
  FuncType,
}

impl std::str::FromStr for Mode {
  type Err = ParseModeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let ret = match s {
      "exec" => Self::Exec,
      "eval" => Self::Eval,
      "single" => Self::Single,
      "func_type" => Self::FuncType,
      _ => return Err(ParseModeError),
    };
    Ok(ret)
  }
}

/// An error when parsing a [`Mode`] from a string.
#[derive(Debug)]
pub struct ParseModeError;

impl std::fmt::Display for ParseModeError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("mode must be one of 'exec', 'eval', 'single', 'func_type'")
  }
}

/// Parses the tokens.
///
/// # Errors
///
/// On the first parse error.
pub fn get(
  tokens: &[Token<'_, SK>],
  mode: Mode,
) -> Result<python_syntax::Tree, diagnostic::SyntaxError> {
  let text: String = tokens.iter().map(|t| t.text).collect();
  let lines = python_syntax::Lines::new(&text);
  let mut p = parser::Parser::new(tokens);
  let res = match mode {
    Mode::Exec => stmt::file_input(&mut p),
    Mode::Eval => stmt::eval_input(&mut p),
    Mode::Single => stmt::single_input(&mut p),
    Mode::FuncType => stmt::func_type_input(&mut p),
  };
  match res {
    Ok(()) => {
      let root = p.finish();
      log::trace!("parsed {:?} root", root.kind());
      debug_assert_eq!(root.kind(), root_kind(mode));
      Ok(python_syntax::Tree::new(root, lines))
    }
    Err(e) => {
      p.discard();
      let pos = lines.pos_at(e.idx());
      let mut ret = diagnostic::SyntaxError::new(e.to_string(), pos);
      ret.text = lines.line(pos.line).map(ToOwned::to_owned);
      Err(ret)
    }
  }
}

fn root_kind(mode: Mode) -> SK {
  match mode {
    Mode::Exec => SK::FileInput,
    Mode::Eval => SK::EvalInput,
    Mode::Single => SK::SingleInput,
    Mode::FuncType => SK::FuncTypeInput,
  }
}
