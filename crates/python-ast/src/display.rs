//! Displaying trees compactly.
//!
//! Every node is written as its variant name followed by its fields in order, without field
//! names. Lists are in `[...]`, and a missing optional field is `None`, so the `None` constant
//! is written `Constant(None)`. Spans are not shown.

use crate::{
  Alias, Arg, Arguments, BoolOp, CmpOp, Comprehension, Constant, Conversion, ExceptHandler, Expr,
  ExprContext, ExprKind, For, FunctionDef, Keyword, Mod, Operator, Slice, Stmt, StmtKind, UnaryOp,
  With, WithItem,
};
use std::fmt;

struct List<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for List<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (idx, x) in self.0.iter().enumerate() {
      if idx != 0 {
        f.write_str(", ")?;
      }
      fmt::Display::fmt(x, f)?;
    }
    f.write_str("]")
  }
}

struct Opt<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0 {
      Some(x) => fmt::Display::fmt(x, f),
      None => f.write_str("None"),
    }
  }
}

fn opt<T>(x: Option<&T>) -> Opt<'_, T> {
  Opt(x)
}

fn list<T>(xs: &[T]) -> List<'_, T> {
  List(xs)
}

impl fmt::Display for Mod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mod::Module(stmts) => write!(f, "Module({})", list(stmts)),
      Mod::Interactive(stmts) => write!(f, "Interactive({})", list(stmts)),
      Mod::Expression(e) => write!(f, "Expression({e})"),
      Mod::FunctionType { argtypes, returns } => {
        write!(f, "FunctionType({}, {returns})", list(argtypes))
      }
    }
  }
}

impl fmt::Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      StmtKind::FunctionDef(def) => write!(f, "FunctionDef{def}"),
      StmtKind::AsyncFunctionDef(def) => write!(f, "AsyncFunctionDef{def}"),
      StmtKind::ClassDef { name, bases, keywords, body, decorator_list } => write!(
        f,
        "ClassDef({name}, {}, {}, {}, {})",
        list(bases),
        list(keywords),
        list(body),
        list(decorator_list)
      ),
      StmtKind::Return(e) => write!(f, "Return({})", opt(e.as_deref())),
      StmtKind::Delete(targets) => write!(f, "Delete({})", list(targets)),
      StmtKind::Assign { targets, value } => write!(f, "Assign({}, {value})", list(targets)),
      StmtKind::AugAssign { target, op, value } => write!(f, "AugAssign({target}, {op}, {value})"),
      StmtKind::AnnAssign { target, annotation, value, simple } => write!(
        f,
        "AnnAssign({target}, {annotation}, {}, {})",
        opt(value.as_deref()),
        u8::from(*simple)
      ),
      StmtKind::For(x) => write!(f, "For{x}"),
      StmtKind::AsyncFor(x) => write!(f, "AsyncFor{x}"),
      StmtKind::While { test, body, orelse } => {
        write!(f, "While({test}, {}, {})", list(body), list(orelse))
      }
      StmtKind::If { test, body, orelse } => {
        write!(f, "If({test}, {}, {})", list(body), list(orelse))
      }
      StmtKind::With(x) => write!(f, "With{x}"),
      StmtKind::AsyncWith(x) => write!(f, "AsyncWith{x}"),
      StmtKind::Raise { exc, cause } => {
        write!(f, "Raise({}, {})", opt(exc.as_deref()), opt(cause.as_deref()))
      }
      StmtKind::Try { body, handlers, orelse, finalbody } => write!(
        f,
        "Try({}, {}, {}, {})",
        list(body),
        list(handlers),
        list(orelse),
        list(finalbody)
      ),
      StmtKind::Assert { test, msg } => write!(f, "Assert({test}, {})", opt(msg.as_deref())),
      StmtKind::Import(names) => write!(f, "Import({})", list(names)),
      StmtKind::ImportFrom { module, names, level } => {
        write!(f, "ImportFrom({}, {}, {level})", opt(module.as_ref()), list(names))
      }
      StmtKind::Global(names) => write!(f, "Global({})", list(names)),
      StmtKind::Nonlocal(names) => write!(f, "Nonlocal({})", list(names)),
      StmtKind::Expr(e) => write!(f, "Expr({e})"),
      StmtKind::Pass => f.write_str("Pass"),
      StmtKind::Break => f.write_str("Break"),
      StmtKind::Continue => f.write_str("Continue"),
    }
  }
}

impl fmt::Display for FunctionDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "({}, {}, {}, {}, {})",
      self.name,
      self.args,
      list(&self.body),
      list(&self.decorator_list),
      opt(self.returns.as_deref())
    )
  }
}

impl fmt::Display for For {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {}, {}, {})", self.target, self.iter, list(&self.body), list(&self.orelse))
  }
}

impl fmt::Display for With {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", list(&self.items), list(&self.body))
  }
}

impl fmt::Display for WithItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "withitem({}, {})", self.context_expr, opt(self.optional_vars.as_ref()))
  }
}

impl fmt::Display for ExceptHandler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "ExceptHandler({}, {}, {})",
      opt(self.typ.as_deref()),
      opt(self.name.as_ref()),
      list(&self.body)
    )
  }
}

impl fmt::Display for Alias {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.asname {
      Some(asname) => write!(f, "alias({}, {asname})", self.name),
      None => write!(f, "alias({})", self.name),
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ExprKind::BoolOp { op, values } => write!(f, "BoolOp({op}, {})", list(values)),
      ExprKind::NamedExpr { target, value } => write!(f, "NamedExpr({target}, {value})"),
      ExprKind::BinOp { left, op, right } => write!(f, "BinOp({left}, {op}, {right})"),
      ExprKind::UnaryOp { op, operand } => write!(f, "UnaryOp({op}, {operand})"),
      ExprKind::Lambda { args, body } => write!(f, "Lambda({args}, {body})"),
      ExprKind::IfExp { test, body, orelse } => write!(f, "IfExp({test}, {body}, {orelse})"),
      ExprKind::Dict { keys, values } => {
        f.write_str("Dict([")?;
        for (idx, key) in keys.iter().enumerate() {
          if idx != 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}", opt(key.as_ref()))?;
        }
        write!(f, "], {})", list(values))
      }
      ExprKind::Set(elts) => write!(f, "Set({})", list(elts)),
      ExprKind::ListComp { elt, generators } => {
        write!(f, "ListComp({elt}, {})", list(generators))
      }
      ExprKind::SetComp { elt, generators } => write!(f, "SetComp({elt}, {})", list(generators)),
      ExprKind::DictComp { key, value, generators } => {
        write!(f, "DictComp({key}, {value}, {})", list(generators))
      }
      ExprKind::GeneratorExp { elt, generators } => {
        write!(f, "GeneratorExp({elt}, {})", list(generators))
      }
      ExprKind::Await(e) => write!(f, "Await({e})"),
      ExprKind::Yield(e) => write!(f, "Yield({})", opt(e.as_deref())),
      ExprKind::YieldFrom(e) => write!(f, "YieldFrom({e})"),
      ExprKind::Compare { left, ops, comparators } => {
        write!(f, "Compare({left}, {}, {})", list(ops), list(comparators))
      }
      ExprKind::Call { func, args, keywords } => {
        write!(f, "Call({func}, {}, {})", list(args), list(keywords))
      }
      ExprKind::FormattedValue { value, conversion, format_spec } => write!(
        f,
        "FormattedValue({value}, {}, {})",
        opt(conversion.as_ref()),
        opt(format_spec.as_deref())
      ),
      ExprKind::JoinedStr(values) => write!(f, "JoinedStr({})", list(values)),
      ExprKind::Constant { value, kind: None } => write!(f, "Constant({value})"),
      ExprKind::Constant { value, kind: Some(kind) } => write!(f, "Constant({value}, {kind})"),
      ExprKind::Attribute { value, attr, ctx } => write!(f, "Attribute({value}, {attr}, {ctx})"),
      ExprKind::Subscript { value, slice, ctx } => write!(f, "Subscript({value}, {slice}, {ctx})"),
      ExprKind::Starred { value, ctx } => write!(f, "Starred({value}, {ctx})"),
      ExprKind::Name { id, ctx } => write!(f, "Name({id}, {ctx})"),
      ExprKind::List { elts, ctx } => write!(f, "List({}, {ctx})", list(elts)),
      ExprKind::Tuple { elts, ctx } => write!(f, "Tuple({}, {ctx})", list(elts)),
    }
  }
}

impl fmt::Display for Slice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Slice::Index(e) => write!(f, "Index({e})"),
      Slice::Slice { lower, upper, step } => write!(
        f,
        "Slice({}, {}, {})",
        opt(lower.as_deref()),
        opt(upper.as_deref()),
        opt(step.as_deref())
      ),
      Slice::ExtSlice(dims) => write!(f, "ExtSlice({})", list(dims)),
    }
  }
}

impl fmt::Display for Constant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Constant::None => f.write_str("None"),
      Constant::Bool(true) => f.write_str("True"),
      Constant::Bool(false) => f.write_str("False"),
      Constant::Ellipsis => f.write_str("Ellipsis"),
      Constant::Int(n) => write!(f, "{n}"),
      Constant::Float(n) => write!(f, "{n:?}"),
      Constant::Complex { real, imag } if real.abs() > 0.0 => write!(f, "({real:?}+{imag:?}j)"),
      Constant::Complex { imag, .. } => write!(f, "{imag:?}j"),
      Constant::Str(s) => {
        f.write_str("'")?;
        for c in s.chars() {
          match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
            c => write!(f, "{c}")?,
          }
        }
        f.write_str("'")
      }
      Constant::Bytes(bs) => write!(f, "b'{}'", bs.escape_ascii()),
    }
  }
}

impl fmt::Display for Arguments {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("arguments(")?;
    write!(
      f,
      "{}, {}, {}, ",
      list(&self.posonlyargs),
      list(&self.args),
      opt(self.vararg.as_ref())
    )?;
    f.write_str("[")?;
    for (idx, default) in self.kw_defaults.iter().enumerate() {
      if idx != 0 {
        f.write_str(", ")?;
      }
      write!(f, "{}", opt(default.as_ref()))?;
    }
    write!(
      f,
      "], {}, {}, {})",
      list(&self.kwonlyargs),
      opt(self.kwarg.as_ref()),
      list(&self.defaults)
    )
  }
}

impl fmt::Display for Arg {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.annotation {
      Some(ann) => write!(f, "arg({}, {ann})", self.arg),
      None => write!(f, "arg({})", self.arg),
    }
  }
}

impl fmt::Display for Keyword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "keyword({}, {})", opt(self.arg.as_ref()), self.value)
  }
}

impl fmt::Display for Comprehension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "comprehension({}, {}, {}, {})",
      self.target,
      self.iter,
      list(&self.ifs),
      u8::from(self.is_async)
    )
  }
}

macro_rules! names {
  ($($ty:ident { $($variant:ident)* })*) => {
    $(
      impl fmt::Display for $ty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
          match self {
            $($ty::$variant => f.write_str(stringify!($variant)),)*
          }
        }
      }
    )*
  };
}

names! {
  ExprContext { Load Store Del }
  BoolOp { And Or }
  Operator { Add Sub Mult MatMult Div Mod Pow LShift RShift BitOr BitXor BitAnd FloorDiv }
  UnaryOp { Invert Not UAdd USub }
  CmpOp { Eq NotEq Lt LtE Gt GtE Is IsNot In NotIn }
}

impl fmt::Display for Conversion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

#[cfg(test)]
mod tests {
  use crate::{Constant, Expr, ExprContext, ExprKind, Operator, Span};

  fn e(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::default())
  }

  #[test]
  fn binop() {
    let one = e(ExprKind::constant(Constant::Int(1.into())));
    let name = e(ExprKind::Name { id: "x".to_owned(), ctx: ExprContext::Load });
    let add = e(ExprKind::BinOp { left: Box::new(one), op: Operator::Add, right: Box::new(name) });
    assert_eq!(add.to_string(), "BinOp(Constant(1), Add, Name(x, Load))");
  }

  #[test]
  fn constants() {
    assert_eq!(Constant::Str("it's\n".to_owned()).to_string(), r"'it\'s\n'");
    assert_eq!(Constant::Bytes(b"a\x00".to_vec()).to_string(), r"b'a\x00'");
    assert_eq!(Constant::Float(1.0).to_string(), "1.0");
    assert_eq!(Constant::Complex { real: 0.0, imag: 2.5 }.to_string(), "2.5j");
    assert_eq!(Constant::None.to_string(), "None");
  }
}
