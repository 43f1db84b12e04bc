//! The abstract syntax of Python 3.8.
//!
//! Every statement and expression carries a [`Span`]. Nodes own their children, so a whole tree
//! is a plain value that can be cloned, compared, and rewritten in place.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]
#![allow(missing_docs)]

pub mod display;
pub mod walk;

pub use diagnostic::{Pos, Span};
pub use num_bigint::BigInt;

/// The root of a tree. Which one is built depends on the compile mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Mod {
  Module(Vec<Stmt>),
  Interactive(Vec<Stmt>),
  Expression(Box<Expr>),
  FunctionType { argtypes: Vec<Expr>, returns: Box<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
  pub kind: StmtKind,
  pub span: Span,
}

impl Stmt {
  #[must_use]
  pub fn new(kind: StmtKind, span: Span) -> Self {
    Self { kind, span }
  }
}

/// Shared by the sync and async function definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
  pub name: String,
  pub args: Box<Arguments>,
  pub body: Vec<Stmt>,
  pub decorator_list: Vec<Expr>,
  pub returns: Option<Box<Expr>>,
}

/// Shared by the sync and async for loops.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
  pub target: Box<Expr>,
  pub iter: Box<Expr>,
  pub body: Vec<Stmt>,
  pub orelse: Vec<Stmt>,
}

/// Shared by the sync and async with statements.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
  pub items: Vec<WithItem>,
  pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
  FunctionDef(FunctionDef),
  AsyncFunctionDef(FunctionDef),
  ClassDef {
    name: String,
    bases: Vec<Expr>,
    keywords: Vec<Keyword>,
    body: Vec<Stmt>,
    decorator_list: Vec<Expr>,
  },
  Return(Option<Box<Expr>>),
  Delete(Vec<Expr>),
  Assign {
    targets: Vec<Expr>,
    value: Box<Expr>,
  },
  AugAssign {
    target: Box<Expr>,
    op: Operator,
    value: Box<Expr>,
  },
  /// `simple` is set when the target is a bare name not wrapped in parentheses.
  AnnAssign {
    target: Box<Expr>,
    annotation: Box<Expr>,
    value: Option<Box<Expr>>,
    simple: bool,
  },
  For(For),
  AsyncFor(For),
  While {
    test: Box<Expr>,
    body: Vec<Stmt>,
    orelse: Vec<Stmt>,
  },
  If {
    test: Box<Expr>,
    body: Vec<Stmt>,
    orelse: Vec<Stmt>,
  },
  With(With),
  AsyncWith(With),
  Raise {
    exc: Option<Box<Expr>>,
    cause: Option<Box<Expr>>,
  },
  Try {
    body: Vec<Stmt>,
    handlers: Vec<ExceptHandler>,
    orelse: Vec<Stmt>,
    finalbody: Vec<Stmt>,
  },
  Assert {
    test: Box<Expr>,
    msg: Option<Box<Expr>>,
  },
  Import(Vec<Alias>),
  ImportFrom {
    module: Option<String>,
    names: Vec<Alias>,
    level: u32,
  },
  Global(Vec<String>),
  Nonlocal(Vec<String>),
  Expr(Box<Expr>),
  Pass,
  Break,
  Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
  pub kind: ExprKind,
  pub span: Span,
}

impl Expr {
  #[must_use]
  pub fn new(kind: ExprKind, span: Span) -> Self {
    Self { kind, span }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
  BoolOp {
    op: BoolOp,
    values: Vec<Expr>,
  },
  NamedExpr {
    target: Box<Expr>,
    value: Box<Expr>,
  },
  BinOp {
    left: Box<Expr>,
    op: Operator,
    right: Box<Expr>,
  },
  UnaryOp {
    op: UnaryOp,
    operand: Box<Expr>,
  },
  Lambda {
    args: Box<Arguments>,
    body: Box<Expr>,
  },
  IfExp {
    test: Box<Expr>,
    body: Box<Expr>,
    orelse: Box<Expr>,
  },
  /// A `None` key is a `**` unpacking.
  Dict {
    keys: Vec<Option<Expr>>,
    values: Vec<Expr>,
  },
  Set(Vec<Expr>),
  ListComp {
    elt: Box<Expr>,
    generators: Vec<Comprehension>,
  },
  SetComp {
    elt: Box<Expr>,
    generators: Vec<Comprehension>,
  },
  DictComp {
    key: Box<Expr>,
    value: Box<Expr>,
    generators: Vec<Comprehension>,
  },
  GeneratorExp {
    elt: Box<Expr>,
    generators: Vec<Comprehension>,
  },
  Await(Box<Expr>),
  Yield(Option<Box<Expr>>),
  YieldFrom(Box<Expr>),
  Compare {
    left: Box<Expr>,
    ops: Vec<CmpOp>,
    comparators: Vec<Expr>,
  },
  Call {
    func: Box<Expr>,
    args: Vec<Expr>,
    keywords: Vec<Keyword>,
  },
  FormattedValue {
    value: Box<Expr>,
    conversion: Option<Conversion>,
    format_spec: Option<Box<Expr>>,
  },
  JoinedStr(Vec<Expr>),
  /// `kind` is `Some("u")` for strings with a `u` prefix.
  Constant {
    value: Constant,
    kind: Option<String>,
  },
  Attribute {
    value: Box<Expr>,
    attr: String,
    ctx: ExprContext,
  },
  Subscript {
    value: Box<Expr>,
    slice: Box<Slice>,
    ctx: ExprContext,
  },
  Starred {
    value: Box<Expr>,
    ctx: ExprContext,
  },
  Name {
    id: String,
    ctx: ExprContext,
  },
  List {
    elts: Vec<Expr>,
    ctx: ExprContext,
  },
  Tuple {
    elts: Vec<Expr>,
    ctx: ExprContext,
  },
}

impl ExprKind {
  /// Returns a constant with no kind.
  #[must_use]
  pub fn constant(value: Constant) -> Self {
    Self::Constant { value, kind: None }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
  Index(Box<Expr>),
  Slice { lower: Option<Box<Expr>>, upper: Option<Box<Expr>>, step: Option<Box<Expr>> },
  ExtSlice(Vec<Slice>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
  None,
  Bool(bool),
  Ellipsis,
  Int(BigInt),
  Float(f64),
  Complex { real: f64, imag: f64 },
  Str(String),
  Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprContext {
  Load,
  Store,
  Del,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
  And,
  Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
  Add,
  Sub,
  Mult,
  MatMult,
  Div,
  Mod,
  Pow,
  LShift,
  RShift,
  BitOr,
  BitXor,
  BitAnd,
  FloorDiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
  Invert,
  Not,
  UAdd,
  USub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
  Eq,
  NotEq,
  Lt,
  LtE,
  Gt,
  GtE,
  Is,
  IsNot,
  In,
  NotIn,
}

/// The `!s`, `!r`, `!a` of a replacement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
  Str,
  Repr,
  Ascii,
}

impl Conversion {
  /// Returns the conversion for the character after the `!`.
  #[must_use]
  pub fn from_char(c: char) -> Option<Self> {
    match c {
      's' => Some(Self::Str),
      'r' => Some(Self::Repr),
      'a' => Some(Self::Ascii),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_char(self) -> char {
    match self {
      Self::Str => 's',
      Self::Repr => 'r',
      Self::Ascii => 'a',
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
  pub target: Expr,
  pub iter: Expr,
  pub ifs: Vec<Expr>,
  pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptHandler {
  pub typ: Option<Box<Expr>>,
  pub name: Option<String>,
  pub body: Vec<Stmt>,
  pub span: Span,
}

/// The parameters of a function or lambda.
///
/// `defaults` line up with the tail of `posonlyargs` followed by `args`. `kw_defaults` line up
/// with `kwonlyargs` exactly, with `None` for parameters without a default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Arguments {
  pub posonlyargs: Vec<Arg>,
  pub args: Vec<Arg>,
  pub vararg: Option<Arg>,
  pub kwonlyargs: Vec<Arg>,
  pub kw_defaults: Vec<Option<Expr>>,
  pub kwarg: Option<Arg>,
  pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
  pub arg: String,
  pub annotation: Option<Box<Expr>>,
  pub span: Span,
}

/// A keyword argument. `arg` is `None` for a `**` unpacking.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
  pub arg: Option<String>,
  pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
  pub name: String,
  pub asname: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithItem {
  pub context_expr: Expr,
  pub optional_vars: Option<Expr>,
}
