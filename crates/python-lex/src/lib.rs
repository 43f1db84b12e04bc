//! Lexing a string into a sequence of tokens.
//!
//! Along with the tokens for the source text itself, this emits the zero-width layout tokens the
//! grammar needs: a `Dedent` for each closed block, a `Newline` at the end of a last line that had
//! none, and a final `EndMarker`. Concatenating the text of every token yields the input.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod internal;


use python_syntax::{Lines, SyntaxKind as SK};
use token::Token;

pub use error::Error;

/// The result of lexing.
#[derive(Debug, Default)]
pub struct Lex<'a> {
  /// The tokens.
  pub tokens: Vec<Token<'a, SK>>,
}

/// Lexes the string.
///
/// # Errors
///
/// On the first lex error.
pub fn get(s: &str) -> Result<Lex<'_>, diagnostic::SyntaxError> {
  match internal::get(s) {
    Ok(tokens) => {
      log::trace!("lexed {} tokens", tokens.len());
      Ok(Lex { tokens })
    }
    Err(e) => {
      let lines = Lines::new(s);
      let pos = lines.pos_at(e.idx());
      let mut ret = diagnostic::SyntaxError::new(e.to_string(), pos);
      ret.text = lines.line(pos.line).map(ToOwned::to_owned);
      Err(ret)
    }
  }
}
