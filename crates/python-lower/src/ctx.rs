//! Assigning the load, store, or delete context to expressions.

use crate::error::Kind;
use crate::st::{Result, St};
use python_ast::{Constant, Expr, ExprContext, ExprKind};

/// Sets the context of an expression that is being assigned to or deleted, recursing into
/// tuples, lists, and starred expressions.
pub(crate) fn set(st: &St<'_>, e: &mut Expr, ctx: ExprContext) -> Result<()> {
  let pos = e.span.start;
  match &mut e.kind {
    ExprKind::Name { id, ctx: c } => {
      st.check_name(id, pos)?;
      *c = ctx;
    }
    ExprKind::Attribute { attr, ctx: c, .. } => {
      if ctx == ExprContext::Store {
        st.check_name(attr, pos)?;
      }
      *c = ctx;
    }
    ExprKind::Subscript { ctx: c, .. } => *c = ctx,
    ExprKind::Starred { value, ctx: c } => {
      *c = ctx;
      set(st, value, ctx)?;
    }
    ExprKind::List { elts, ctx: c } | ExprKind::Tuple { elts, ctx: c } => {
      *c = ctx;
      for elt in elts {
        set(st, elt, ctx)?;
      }
    }
    kind => {
      let what = describe(kind);
      let kind =
        if ctx == ExprContext::Del { Kind::CannotDelete(what) } else { Kind::CannotAssign(what) };
      return Err(st.err_at(pos, kind));
    }
  }
  Ok(())
}

/// Returns how to refer to this kind of expression in an error.
pub(crate) fn describe(kind: &ExprKind) -> &'static str {
  match kind {
    ExprKind::BoolOp { .. } | ExprKind::BinOp { .. } | ExprKind::UnaryOp { .. } => "operator",
    ExprKind::NamedExpr { .. } => "named expression",
    ExprKind::Lambda { .. } => "lambda",
    ExprKind::IfExp { .. } => "conditional expression",
    ExprKind::Dict { .. } => "dict display",
    ExprKind::Set(_) => "set display",
    ExprKind::ListComp { .. } => "list comprehension",
    ExprKind::SetComp { .. } => "set comprehension",
    ExprKind::DictComp { .. } => "dict comprehension",
    ExprKind::GeneratorExp { .. } => "generator expression",
    ExprKind::Await(_) => "await expression",
    ExprKind::Yield(_) | ExprKind::YieldFrom(_) => "yield expression",
    ExprKind::Compare { .. } => "comparison",
    ExprKind::Call { .. } => "function call",
    ExprKind::FormattedValue { .. } | ExprKind::JoinedStr(_) => "f-string expression",
    ExprKind::Constant { value, .. } => match value {
      Constant::None => "None",
      Constant::Bool(true) => "True",
      Constant::Bool(false) => "False",
      Constant::Ellipsis => "Ellipsis",
      Constant::Int(_)
      | Constant::Float(_)
      | Constant::Complex { .. }
      | Constant::Str(_)
      | Constant::Bytes(_) => "literal",
    },
    ExprKind::Attribute { .. } => "attribute",
    ExprKind::Subscript { .. } => "subscript",
    ExprKind::Starred { .. } => "starred",
    ExprKind::Name { .. } => "name",
    ExprKind::List { .. } => "list",
    ExprKind::Tuple { .. } => "tuple",
  }
}
