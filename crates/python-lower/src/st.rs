use crate::cx::{CompileFragment, CompileInfo, Cx};
use crate::error::{Error, Feature, Kind};
use diagnostic::{Pos, SyntaxError};
use python_syntax::{Lines, Node};

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) struct St<'a> {
  cx: Cx<'a>,
  lines: &'a Lines,
  depth: usize,
}

impl<'a> St<'a> {
  pub(crate) fn new(cx: Cx<'a>, lines: &'a Lines) -> Self {
    Self { cx, lines, depth: 0 }
  }

  pub(crate) fn info(&self) -> &'a CompileInfo {
    self.cx.info
  }

  pub(crate) fn fragments(&self) -> &'a dyn CompileFragment {
    self.cx.fragments
  }

  pub(crate) fn err(&self, node: &Node<'_>, kind: Kind) -> Error {
    self.err_at(node.start(), kind)
  }

  pub(crate) fn err_at(&self, pos: Pos, kind: Kind) -> Error {
    Error { pos, kind }
  }

  /// Errors if `used` and the feature is newer than the configured version.
  pub(crate) fn check_feature(&self, used: bool, feature: Feature, node: &Node<'_>) -> Result<()> {
    if used { self.check_feature_at(feature, node.start()) } else { Ok(()) }
  }

  /// Errors if the feature is newer than the configured version.
  pub(crate) fn check_feature_at(&self, feature: Feature, pos: Pos) -> Result<()> {
    if self.info().feature_version >= feature.min_version() {
      return Ok(());
    }
    log::debug!("rejecting {feature:?} for 3.{}", self.info().feature_version);
    Err(self.err_at(pos, Kind::Feature(feature)))
  }

  /// Errors if the name may not be bound.
  pub(crate) fn check_name(&self, name: &str, pos: Pos) -> Result<()> {
    if name == "__debug__" {
      return Err(self.err_at(pos, Kind::CannotAssign("__debug__")));
    }
    Ok(())
  }

  /// Runs `f` one level deeper, erroring instead if that is too deep.
  pub(crate) fn nest<'n, T, F>(&mut self, node: Node<'n>, f: F) -> Result<T>
  where
    F: FnOnce(&mut Self, Node<'n>) -> Result<T>,
  {
    if self.depth >= self.info().max_nesting {
      return Err(self.err(&node, Kind::TooDeep));
    }
    self.depth += 1;
    let ret = f(self, node);
    self.depth -= 1;
    ret
  }

  /// Runs `f` as deep as a chain of `levels` nodes folded one onto the next, erroring instead if
  /// that is too deep. Folding is a loop here, but the tree it makes is as deep as the chain.
  pub(crate) fn fold<T, F>(&mut self, levels: usize, node: &Node<'_>, f: F) -> Result<T>
  where
    F: FnOnce(&mut Self) -> Result<T>,
  {
    if self.depth + levels > self.info().max_nesting {
      log::debug!("rejecting a chain of {levels} at depth {}", self.depth);
      return Err(self.err(node, Kind::TooDeep));
    }
    self.depth += levels;
    let ret = f(self);
    self.depth -= levels;
    ret
  }

  pub(crate) fn finish_error(&self, e: Error) -> SyntaxError {
    let text = self.lines.line(e.pos.line).map(ToOwned::to_owned);
    SyntaxError {
      message: e.kind.to_string(),
      pos: e.pos,
      filename: Some(self.info().filename.clone()),
      text,
    }
  }
}
