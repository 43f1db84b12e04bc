//! Errors.

use diagnostic::Pos;
use std::fmt;

/// An error when building.
#[derive(Debug)]
pub(crate) struct Error {
  pub(crate) pos: Pos,
  pub(crate) kind: Kind,
}

#[derive(Debug)]
pub(crate) enum Kind {
  InvalidSyntax,
  TooDeep,
  Feature(Feature),
  CannotAssign(&'static str),
  CannotDelete(&'static str),
  NamedExprTarget(&'static str),
  IllegalAugAssign,
  AnnotateTuple,
  AnnotateList,
  AnnotateIllegal,
  AssignToYield,
  ImportTrailingComma,
  NonDefaultAfterDefault,
  BareStar,
  StarAfterDoubleStar,
  PositionalAfterDoubleStar,
  PositionalAfterKeyword,
  GenexpNotSole,
  GenexpBase,
  KeywordNotName,
  KeywordRepeated(String),
  DictUnpackInComp,
  StarredInComp,
  Flufl,
  MixBytes,
  Escape(python_escape::Error),
  FStringEmpty,
  FStringBackslash,
  FStringHash,
  FStringUnmatched(char),
  FStringMismatch { close: char, open: char },
  FStringUnterminated,
  FStringExpectingBrace,
  FStringTooDeep,
  FStringConversion,
  FStringSingleBrace,
  FStringUnexpectedEnd,
  /// An error from compiling an expression inside an interpolated string, already moved to its
  /// place in this source.
  Fragment(String),
}

/// A construct only allowed in some versions.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Feature {
  AsyncFunctions,
  MatMult,
  Await,
  VariableAnnotations,
  NumericUnderscores,
  AsyncComprehensions,
  FStrings,
  FStringDebug,
  NamedExpr,
  PositionalOnly,
}

impl Feature {
  /// The first minor version with the feature.
  pub(crate) fn min_version(self) -> u32 {
    match self {
      Feature::AsyncFunctions | Feature::MatMult | Feature::Await => 5,
      Feature::VariableAnnotations
      | Feature::NumericUnderscores
      | Feature::AsyncComprehensions
      | Feature::FStrings => 6,
      Feature::FStringDebug | Feature::NamedExpr | Feature::PositionalOnly => 8,
    }
  }
}

impl fmt::Display for Feature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let what = match self {
      Feature::AsyncFunctions => "Async functions are",
      Feature::MatMult => "The '@' operator is",
      Feature::Await => "Await expressions are",
      Feature::VariableAnnotations => "Variable annotation syntax is",
      Feature::NumericUnderscores => "Underscores in numeric literals are",
      Feature::AsyncComprehensions => "Async comprehensions are",
      Feature::FStrings => "Format strings are",
      Feature::FStringDebug => "f-string: self documenting expressions are",
      Feature::NamedExpr => "The ':=' operator is",
      Feature::PositionalOnly => "Positional-only parameters are",
    };
    write!(f, "{what} only supported in Python 3.{} and greater", self.min_version())
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Kind::InvalidSyntax => f.write_str("invalid syntax"),
      Kind::TooDeep => f.write_str("too many nested expressions"),
      Kind::Feature(feature) => fmt::Display::fmt(feature, f),
      Kind::CannotAssign(what) => write!(f, "cannot assign to {what}"),
      Kind::CannotDelete(what) => write!(f, "cannot delete {what}"),
      Kind::NamedExprTarget(what) => write!(f, "cannot use assignment expressions with {what}"),
      Kind::IllegalAugAssign => f.write_str("illegal expression for augmented assignment"),
      Kind::AnnotateTuple => f.write_str("only single target (not tuple) can be annotated"),
      Kind::AnnotateList => f.write_str("only single target (not list) can be annotated"),
      Kind::AnnotateIllegal => f.write_str("illegal target for annotation"),
      Kind::AssignToYield => f.write_str("assignment to yield expression not possible"),
      Kind::ImportTrailingComma => {
        f.write_str("trailing comma not allowed without surrounding parentheses")
      }
      Kind::NonDefaultAfterDefault => f.write_str("non-default argument follows default argument"),
      Kind::BareStar => f.write_str("named arguments must follow bare *"),
      Kind::StarAfterDoubleStar => {
        f.write_str("iterable argument unpacking follows keyword argument unpacking")
      }
      Kind::PositionalAfterDoubleStar => {
        f.write_str("positional argument follows keyword argument unpacking")
      }
      Kind::PositionalAfterKeyword => f.write_str("positional argument follows keyword argument"),
      Kind::GenexpNotSole => {
        f.write_str("Generator expression must be parenthesized if not sole argument")
      }
      Kind::GenexpBase => {
        f.write_str("generator expression can't be used as bases of class definition")
      }
      Kind::KeywordNotName => {
        f.write_str("expression cannot contain assignment, perhaps you meant \"==\"?")
      }
      Kind::KeywordRepeated(name) => write!(f, "keyword argument repeated: '{name}'"),
      Kind::DictUnpackInComp => f.write_str("dict unpacking cannot be used in dict comprehension"),
      Kind::StarredInComp => f.write_str("iterable unpacking cannot be used in comprehension"),
      Kind::Flufl => f.write_str("with Barry as BDFL, use '<>' instead of '!='"),
      Kind::MixBytes => f.write_str("cannot mix bytes and nonbytes literals"),
      Kind::Escape(e) => {
        let prefix = match e.category() {
          python_escape::Category::Unicode => "(unicode error) ",
          python_escape::Category::Value => "(value error) ",
          python_escape::Category::Syntax => "",
        };
        write!(f, "{prefix}{e}")
      }
      Kind::FStringEmpty => f.write_str("f-string: empty expression not allowed"),
      Kind::FStringBackslash => f.write_str("f-string expression part cannot include a backslash"),
      Kind::FStringHash => f.write_str("f-string expression part cannot include '#'"),
      Kind::FStringUnmatched(c) => write!(f, "f-string: unmatched '{c}'"),
      Kind::FStringMismatch { close, open } => write!(
        f,
        "f-string: closing parenthesis '{close}' does not match opening parenthesis '{open}'"
      ),
      Kind::FStringUnterminated => f.write_str("f-string: unterminated string"),
      Kind::FStringExpectingBrace => f.write_str("f-string: expecting '}'"),
      Kind::FStringTooDeep => f.write_str("f-string: expressions nested too deeply"),
      Kind::FStringConversion => {
        f.write_str("f-string: invalid conversion character: expected 's', 'r', or 'a'")
      }
      Kind::FStringSingleBrace => f.write_str("f-string: single '}' is not allowed"),
      Kind::FStringUnexpectedEnd => f.write_str("f-string: unexpected end of string"),
      Kind::Fragment(msg) => f.write_str(msg),
    }
  }
}
