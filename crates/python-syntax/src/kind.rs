//! Kinds of tokens and nodes.

#![allow(missing_docs)]

macro_rules! kinds {
  ($($name:ident,)*) => {
    /// The kind of a token or node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[repr(u16)]
    pub enum SyntaxKind {
      $($name,)*
    }

    impl SyntaxKind {
      /// Every kind, indexed by its discriminant.
      pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$name,)*];
    }
  };
}

kinds! {
  // trivia
  Whitespace,
  Comment,
  LineContinuation,
  Nl,
  // layout
  Newline,
  Indent,
  Dedent,
  EndMarker,
  // leaves
  Name,
  Number,
  String,
  Invalid,
  // keywords
  FalseKw,
  NoneKw,
  TrueKw,
  AndKw,
  AsKw,
  AssertKw,
  AsyncKw,
  AwaitKw,
  BreakKw,
  ClassKw,
  ContinueKw,
  DefKw,
  DelKw,
  ElifKw,
  ElseKw,
  ExceptKw,
  FinallyKw,
  ForKw,
  FromKw,
  GlobalKw,
  IfKw,
  ImportKw,
  InKw,
  IsKw,
  LambdaKw,
  NonlocalKw,
  NotKw,
  OrKw,
  PassKw,
  RaiseKw,
  ReturnKw,
  TryKw,
  WhileKw,
  WithKw,
  YieldKw,
  // punctuation
  LRound,
  RRound,
  LSquare,
  RSquare,
  LCurly,
  RCurly,
  Colon,
  Comma,
  Semi,
  Plus,
  Minus,
  Star,
  Slash,
  Bar,
  Amp,
  Lt,
  Gt,
  Eq,
  Dot,
  Percent,
  Tilde,
  Caret,
  At,
  EqEq,
  NotEq,
  LtGt,
  LtEq,
  GtEq,
  LtLt,
  GtGt,
  StarStar,
  SlashSlash,
  PlusEq,
  MinusEq,
  StarEq,
  SlashEq,
  PercentEq,
  AmpEq,
  BarEq,
  CaretEq,
  LtLtEq,
  GtGtEq,
  StarStarEq,
  SlashSlashEq,
  AtEq,
  Arrow,
  Ellipsis,
  ColonEq,
  // nodes
  FileInput,
  SingleInput,
  EvalInput,
  FuncTypeInput,
  FuncType,
  TypeList,
  Decorator,
  Decorators,
  Decorated,
  AsyncFuncdef,
  Funcdef,
  Parameters,
  TypedArgsList,
  Tfpdef,
  VarArgsList,
  Vfpdef,
  Stmt,
  SimpleStmt,
  SmallStmt,
  ExprStmt,
  AnnAssign,
  TestlistStarExpr,
  AugAssign,
  DelStmt,
  PassStmt,
  FlowStmt,
  BreakStmt,
  ContinueStmt,
  ReturnStmt,
  YieldStmt,
  RaiseStmt,
  ImportStmt,
  ImportName,
  ImportFrom,
  ImportAsName,
  DottedAsName,
  ImportAsNames,
  DottedAsNames,
  DottedName,
  GlobalStmt,
  NonlocalStmt,
  AssertStmt,
  CompoundStmt,
  AsyncStmt,
  IfStmt,
  WhileStmt,
  ForStmt,
  TryStmt,
  WithStmt,
  WithItem,
  ExceptClause,
  Suite,
  NamedexprTest,
  Test,
  TestNocond,
  Lambdef,
  LambdefNocond,
  OrTest,
  AndTest,
  NotTest,
  Comparison,
  CompOp,
  StarExpr,
  Expr,
  XorExpr,
  AndExpr,
  ShiftExpr,
  ArithExpr,
  Term,
  Factor,
  Power,
  AtomExpr,
  Atom,
  TestlistComp,
  Trailer,
  SubscriptList,
  Subscript,
  SliceOp,
  ExprList,
  Testlist,
  DictOrSetMaker,
  Classdef,
  ArgList,
  Argument,
  CompIter,
  SyncCompFor,
  CompFor,
  CompIf,
  YieldExpr,
  YieldArg,
}

impl token::Triviable for SyntaxKind {
  fn is_trivia(&self) -> bool {
    matches!(self, Self::Whitespace | Self::Comment | Self::LineContinuation | Self::Nl)
  }
}

impl SyntaxKind {
  /// Returns whether this is a token that only describes the layout of lines.
  #[must_use]
  pub fn is_layout(self) -> bool {
    matches!(self, Self::Newline | Self::Indent | Self::Dedent | Self::EndMarker)
  }

  /// Returns whether this is the kind of a token, as opposed to a node.
  #[must_use]
  pub fn is_token(self) -> bool {
    self < Self::FileInput
  }

  /// Returns the keyword kind for the text, if it is a keyword.
  #[must_use]
  pub fn keyword(s: &str) -> Option<Self> {
    let ret = match s {
      "False" => Self::FalseKw,
      "None" => Self::NoneKw,
      "True" => Self::TrueKw,
      "and" => Self::AndKw,
      "as" => Self::AsKw,
      "assert" => Self::AssertKw,
      "async" => Self::AsyncKw,
      "await" => Self::AwaitKw,
      "break" => Self::BreakKw,
      "class" => Self::ClassKw,
      "continue" => Self::ContinueKw,
      "def" => Self::DefKw,
      "del" => Self::DelKw,
      "elif" => Self::ElifKw,
      "else" => Self::ElseKw,
      "except" => Self::ExceptKw,
      "finally" => Self::FinallyKw,
      "for" => Self::ForKw,
      "from" => Self::FromKw,
      "global" => Self::GlobalKw,
      "if" => Self::IfKw,
      "import" => Self::ImportKw,
      "in" => Self::InKw,
      "is" => Self::IsKw,
      "lambda" => Self::LambdaKw,
      "nonlocal" => Self::NonlocalKw,
      "not" => Self::NotKw,
      "or" => Self::OrKw,
      "pass" => Self::PassKw,
      "raise" => Self::RaiseKw,
      "return" => Self::ReturnKw,
      "try" => Self::TryKw,
      "while" => Self::WhileKw,
      "with" => Self::WithKw,
      "yield" => Self::YieldKw,
      _ => return None,
    };
    Some(ret)
  }

  /// Punctuation, longest first, so the first prefix match is the right one.
  pub const PUNCTUATION: [(&'static [u8], Self); 48] = [
    (b"**=", Self::StarStarEq),
    (b"//=", Self::SlashSlashEq),
    (b"<<=", Self::LtLtEq),
    (b">>=", Self::GtGtEq),
    (b"...", Self::Ellipsis),
    (b"==", Self::EqEq),
    (b"!=", Self::NotEq),
    (b"<>", Self::LtGt),
    (b"<=", Self::LtEq),
    (b">=", Self::GtEq),
    (b"<<", Self::LtLt),
    (b">>", Self::GtGt),
    (b"**", Self::StarStar),
    (b"//", Self::SlashSlash),
    (b"+=", Self::PlusEq),
    (b"-=", Self::MinusEq),
    (b"*=", Self::StarEq),
    (b"/=", Self::SlashEq),
    (b"%=", Self::PercentEq),
    (b"&=", Self::AmpEq),
    (b"|=", Self::BarEq),
    (b"^=", Self::CaretEq),
    (b"@=", Self::AtEq),
    (b"->", Self::Arrow),
    (b":=", Self::ColonEq),
    (b"(", Self::LRound),
    (b")", Self::RRound),
    (b"[", Self::LSquare),
    (b"]", Self::RSquare),
    (b"{", Self::LCurly),
    (b"}", Self::RCurly),
    (b":", Self::Colon),
    (b",", Self::Comma),
    (b";", Self::Semi),
    (b"+", Self::Plus),
    (b"-", Self::Minus),
    (b"*", Self::Star),
    (b"/", Self::Slash),
    (b"|", Self::Bar),
    (b"&", Self::Amp),
    (b"<", Self::Lt),
    (b">", Self::Gt),
    (b"=", Self::Eq),
    (b".", Self::Dot),
    (b"%", Self::Percent),
    (b"~", Self::Tilde),
    (b"^", Self::Caret),
    (b"@", Self::At),
  ];
}

/// The rowan language for Python.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Python {}

impl rowan::Language for Python {
  type Kind = SyntaxKind;

  fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
    SyntaxKind::ALL[usize::from(raw.0)]
  }

  fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
    rowan::SyntaxKind(kind as u16)
  }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
  fn from(k: SyntaxKind) -> Self {
    rowan::SyntaxKind(k as u16)
  }
}

pub type SyntaxNode = rowan::SyntaxNode<Python>;
pub type SyntaxToken = rowan::SyntaxToken<Python>;

