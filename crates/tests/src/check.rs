//! Helpers for checking what the front end builds.
//!
//! An error's position may be given by a comment in the source like this:
//!
//! ```text
//! f(a=1, b)
//! ##     ^ err: positional argument follows keyword argument
//! ```
//!
//! The `^` points at the column of the line above where the error is.

use diagnostic::{Pos, SyntaxError};
use python_ast::{Expr, Mod};
use python_front::{CompileInfo, Mode};

/// Some source to compile, with options.
pub(crate) struct Input<'a> {
  source: &'a str,
  mode: Mode,
  info: CompileInfo,
}

impl<'a> Input<'a> {
  pub(crate) fn new(source: &'a str) -> Self {
    Self { source, mode: Mode::Exec, info: CompileInfo::default() }
  }

  pub(crate) fn mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  pub(crate) fn version(mut self, minor: u32) -> Self {
    self.info.feature_version = minor;
    self
  }

  pub(crate) fn flufl(mut self) -> Self {
    self.info.barry_as_flufl = true;
    self
  }

  pub(crate) fn max_nesting(mut self, n: usize) -> Self {
    self.info.max_nesting = n;
    self
  }

  pub(crate) fn filename(mut self, name: &str) -> Self {
    name.clone_into(&mut self.info.filename);
    self
  }

  pub(crate) fn get(&self) -> Result<Mod, SyntaxError> {
    // ignore errors from initializing more than once
    _ = env_logger::builder().is_test(true).try_init();
    python_front::compile(self.source, self.mode, &self.info)
  }

  /// Checks that this compiles to a tree whose compact form is `want`.
  #[track_caller]
  pub(crate) fn ok(&self, want: &str) -> Mod {
    let got = match self.get() {
      Ok(x) => x,
      Err(e) => panic!("compile error: {e}"),
    };
    pretty_assertions::assert_eq!(want, got.to_string());
    got
  }

  /// Checks that this fails to compile with the message `want`, and at the position given by the
  /// expectation comment, if there is one.
  #[track_caller]
  pub(crate) fn err(&self, want: &str) -> SyntaxError {
    let got = match self.get() {
      Ok(x) => panic!("no error, got {x}"),
      Err(e) => e,
    };
    pretty_assertions::assert_eq!(want, got.message);
    if let Some((pos, msg)) = expectation(self.source) {
      assert_eq!(want, msg, "expectation comment disagrees");
      assert_eq!(pos, got.pos, "wrong position for: {want}");
    }
    got
  }
}

/// Checks that `source` compiles to a tree whose compact form is `want`.
#[track_caller]
pub(crate) fn ok(source: &str, want: &str) -> Mod {
  Input::new(source).ok(want)
}

/// Checks that `source` fails to compile with the message `want`.
#[track_caller]
pub(crate) fn err(source: &str, want: &str) -> SyntaxError {
  Input::new(source).err(want)
}

/// Compiles the expression `source`.
#[track_caller]
pub(crate) fn expr(source: &str) -> Expr {
  match Input::new(source).mode(Mode::Eval).get() {
    Ok(Mod::Expression(e)) => *e,
    Ok(m) => panic!("not an expression: {m}"),
    Err(e) => panic!("compile error: {e}"),
  }
}

/// Compiles the statements in `source`.
#[track_caller]
pub(crate) fn stmts(source: &str) -> Vec<python_ast::Stmt> {
  match Input::new(source).get() {
    Ok(Mod::Module(stmts)) => stmts,
    Ok(m) => panic!("not a module: {m}"),
    Err(e) => panic!("compile error: {e}"),
  }
}

/// Returns a position from a line starting at 1 and a column starting at 0.
pub(crate) fn pos(line: u32, col: u32) -> Pos {
  Pos::new(line, col)
}

/// See the module docs.
const COMMENT_START: &str = "##";

fn expectation(source: &str) -> Option<(Pos, &str)> {
  source.lines().enumerate().find_map(|(idx, line)| {
    let (before, inner) = line.split_once(COMMENT_START)?;
    let non_space_idx = inner.find(|c| c != ' ')?;
    let inner = &inner[non_space_idx..];
    let (arrow, msg) = inner.split_once(' ')?;
    assert!(arrow.chars().all(|c| c == '^'), "invalid arrow: {arrow}");
    let msg = msg.trim_end().strip_prefix("err: ")?;
    let col = before.len() + COMMENT_START.len() + non_space_idx;
    // `idx` starts at 0, and is one past the line pointed at, which starts at 1.
    let line = u32::try_from(idx).ok()?;
    Some((Pos::new(line, u32::try_from(col).ok()?), msg))
  })
}
