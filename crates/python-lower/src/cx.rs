use diagnostic::SyntaxError;
use python_ast::Expr;

#[derive(Clone, Copy)]
pub(crate) struct Cx<'a> {
  pub(crate) info: &'a CompileInfo,
  pub(crate) fragments: &'a dyn CompileFragment,
}

/// What a compile may use and how errors are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInfo {
  /// The name reported in errors.
  pub filename: String,
  /// The minor version of Python 3 whose syntax is allowed. Constructs newer than this are
  /// errors.
  pub feature_version: u32,
  /// The declared source encoding. Only UTF-8 source is accepted, so this is informational.
  pub encoding: String,
  /// Whether `<>` is the inequality operator instead of `!=`.
  pub barry_as_flufl: bool,
  /// How deeply expressions and blocks may nest before the build gives up.
  pub max_nesting: usize,
}

impl Default for CompileInfo {
  fn default() -> Self {
    Self {
      filename: "<string>".to_owned(),
      feature_version: 8,
      encoding: "utf-8".to_owned(),
      barry_as_flufl: false,
      max_nesting: 1000,
    }
  }
}

/// Compiles the expressions found inside interpolated strings.
pub trait CompileFragment {
  /// Compiles the text, which is a single parenthesized expression, as if it were its own source
  /// in eval mode.
  ///
  /// Positions in the result and in an error are relative to the text, where the opening `(` is
  /// at line 1, column 0. The start line and column of the text in the enclosing source are not
  /// passed in: the builder moves the result and any error there itself.
  ///
  /// # Errors
  ///
  /// If the text is not a valid expression.
  fn compile_fragment(&self, text: &str) -> Result<Expr, SyntaxError>;
}
