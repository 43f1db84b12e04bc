//! Visiting every span in a tree.

use crate::{
  Arguments, Comprehension, Expr, ExprKind, For, FunctionDef, Keyword, Mod, Slice, Span, Stmt,
  StmtKind, With,
};

/// Something that looks at, and may change, spans.
pub trait SpanVisitor {
  /// Visits one span.
  fn span(&mut self, span: &mut Span);
}

/// Visits every span in the root.
pub fn walk_mod<V>(v: &mut V, m: &mut Mod)
where
  V: SpanVisitor + ?Sized,
{
  match m {
    Mod::Module(stmts) | Mod::Interactive(stmts) => walk_stmts(v, stmts),
    Mod::Expression(e) => walk_expr(v, e),
    Mod::FunctionType { argtypes, returns } => {
      walk_exprs(v, argtypes);
      walk_expr(v, returns);
    }
  }
}

fn walk_stmts<V>(v: &mut V, stmts: &mut [Stmt])
where
  V: SpanVisitor + ?Sized,
{
  for stmt in stmts {
    walk_stmt(v, stmt);
  }
}

fn walk_exprs<V>(v: &mut V, exprs: &mut [Expr])
where
  V: SpanVisitor + ?Sized,
{
  for e in exprs {
    walk_expr(v, e);
  }
}

fn walk_opt<V>(v: &mut V, e: Option<&mut Expr>)
where
  V: SpanVisitor + ?Sized,
{
  if let Some(e) = e {
    walk_expr(v, e);
  }
}

/// Visits the statement's span and every span inside it.
pub fn walk_stmt<V>(v: &mut V, stmt: &mut Stmt)
where
  V: SpanVisitor + ?Sized,
{
  v.span(&mut stmt.span);
  match &mut stmt.kind {
    StmtKind::FunctionDef(FunctionDef { args, body, decorator_list, returns, .. })
    | StmtKind::AsyncFunctionDef(FunctionDef { args, body, decorator_list, returns, .. }) => {
      walk_exprs(v, decorator_list);
      walk_arguments(v, args);
      walk_opt(v, returns.as_deref_mut());
      walk_stmts(v, body);
    }
    StmtKind::ClassDef { bases, keywords, body, decorator_list, .. } => {
      walk_exprs(v, decorator_list);
      walk_exprs(v, bases);
      walk_keywords(v, keywords);
      walk_stmts(v, body);
    }
    StmtKind::Return(e) => walk_opt(v, e.as_deref_mut()),
    StmtKind::Delete(targets) => walk_exprs(v, targets),
    StmtKind::Assign { targets, value } => {
      walk_exprs(v, targets);
      walk_expr(v, value);
    }
    StmtKind::AugAssign { target, value, .. } => {
      walk_expr(v, target);
      walk_expr(v, value);
    }
    StmtKind::AnnAssign { target, annotation, value, .. } => {
      walk_expr(v, target);
      walk_expr(v, annotation);
      walk_opt(v, value.as_deref_mut());
    }
    StmtKind::For(For { target, iter, body, orelse })
    | StmtKind::AsyncFor(For { target, iter, body, orelse }) => {
      walk_expr(v, target);
      walk_expr(v, iter);
      walk_stmts(v, body);
      walk_stmts(v, orelse);
    }
    StmtKind::While { test, body, orelse } | StmtKind::If { test, body, orelse } => {
      walk_expr(v, test);
      walk_stmts(v, body);
      walk_stmts(v, orelse);
    }
    StmtKind::With(With { items, body }) | StmtKind::AsyncWith(With { items, body }) => {
      for item in items {
        walk_expr(v, &mut item.context_expr);
        walk_opt(v, item.optional_vars.as_mut());
      }
      walk_stmts(v, body);
    }
    StmtKind::Raise { exc, cause } => {
      walk_opt(v, exc.as_deref_mut());
      walk_opt(v, cause.as_deref_mut());
    }
    StmtKind::Try { body, handlers, orelse, finalbody } => {
      walk_stmts(v, body);
      for handler in handlers {
        v.span(&mut handler.span);
        walk_opt(v, handler.typ.as_deref_mut());
        walk_stmts(v, &mut handler.body);
      }
      walk_stmts(v, orelse);
      walk_stmts(v, finalbody);
    }
    StmtKind::Assert { test, msg } => {
      walk_expr(v, test);
      walk_opt(v, msg.as_deref_mut());
    }
    StmtKind::Expr(e) => walk_expr(v, e),
    StmtKind::Import(_)
    | StmtKind::ImportFrom { .. }
    | StmtKind::Global(_)
    | StmtKind::Nonlocal(_)
    | StmtKind::Pass
    | StmtKind::Break
    | StmtKind::Continue => {}
  }
}

/// Visits the expression's span and every span inside it.
pub fn walk_expr<V>(v: &mut V, expr: &mut Expr)
where
  V: SpanVisitor + ?Sized,
{
  v.span(&mut expr.span);
  match &mut expr.kind {
    ExprKind::BoolOp { values, .. } => walk_exprs(v, values),
    ExprKind::NamedExpr { target, value } => {
      walk_expr(v, target);
      walk_expr(v, value);
    }
    ExprKind::BinOp { left, right, .. } => {
      walk_expr(v, left);
      walk_expr(v, right);
    }
    ExprKind::UnaryOp { operand, .. } => walk_expr(v, operand),
    ExprKind::Lambda { args, body } => {
      walk_arguments(v, args);
      walk_expr(v, body);
    }
    ExprKind::IfExp { test, body, orelse } => {
      walk_expr(v, test);
      walk_expr(v, body);
      walk_expr(v, orelse);
    }
    ExprKind::Dict { keys, values } => {
      for key in keys.iter_mut().flatten() {
        walk_expr(v, key);
      }
      walk_exprs(v, values);
    }
    ExprKind::Set(elts)
    | ExprKind::JoinedStr(elts)
    | ExprKind::List { elts, .. }
    | ExprKind::Tuple { elts, .. } => walk_exprs(v, elts),
    ExprKind::ListComp { elt, generators }
    | ExprKind::SetComp { elt, generators }
    | ExprKind::GeneratorExp { elt, generators } => {
      walk_expr(v, elt);
      walk_comprehensions(v, generators);
    }
    ExprKind::DictComp { key, value, generators } => {
      walk_expr(v, key);
      walk_expr(v, value);
      walk_comprehensions(v, generators);
    }
    ExprKind::Await(e)
    | ExprKind::YieldFrom(e)
    | ExprKind::Attribute { value: e, .. }
    | ExprKind::Starred { value: e, .. } => walk_expr(v, e),
    ExprKind::Yield(e) => walk_opt(v, e.as_deref_mut()),
    ExprKind::Compare { left, comparators, .. } => {
      walk_expr(v, left);
      walk_exprs(v, comparators);
    }
    ExprKind::Call { func, args, keywords } => {
      walk_expr(v, func);
      walk_exprs(v, args);
      walk_keywords(v, keywords);
    }
    ExprKind::FormattedValue { value, format_spec, .. } => {
      walk_expr(v, value);
      walk_opt(v, format_spec.as_deref_mut());
    }
    ExprKind::Subscript { value, slice, .. } => {
      walk_expr(v, value);
      walk_slice(v, slice);
    }
    ExprKind::Constant { .. } | ExprKind::Name { .. } => {}
  }
}

fn walk_slice<V>(v: &mut V, slice: &mut Slice)
where
  V: SpanVisitor + ?Sized,
{
  match slice {
    Slice::Index(e) => walk_expr(v, e),
    Slice::Slice { lower, upper, step } => {
      walk_opt(v, lower.as_deref_mut());
      walk_opt(v, upper.as_deref_mut());
      walk_opt(v, step.as_deref_mut());
    }
    Slice::ExtSlice(dims) => {
      for dim in dims {
        walk_slice(v, dim);
      }
    }
  }
}

fn walk_arguments<V>(v: &mut V, args: &mut Arguments)
where
  V: SpanVisitor + ?Sized,
{
  let params = args
    .posonlyargs
    .iter_mut()
    .chain(args.args.iter_mut())
    .chain(args.vararg.as_mut())
    .chain(args.kwonlyargs.iter_mut())
    .chain(args.kwarg.as_mut());
  for arg in params {
    v.span(&mut arg.span);
    walk_opt(v, arg.annotation.as_deref_mut());
  }
  walk_exprs(v, &mut args.defaults);
  for default in args.kw_defaults.iter_mut().flatten() {
    walk_expr(v, default);
  }
}

fn walk_keywords<V>(v: &mut V, keywords: &mut [Keyword])
where
  V: SpanVisitor + ?Sized,
{
  for kw in keywords {
    walk_expr(v, &mut kw.value);
  }
}

fn walk_comprehensions<V>(v: &mut V, generators: &mut [Comprehension])
where
  V: SpanVisitor + ?Sized,
{
  for comp in generators {
    walk_expr(v, &mut comp.target);
    walk_expr(v, &mut comp.iter);
    walk_exprs(v, &mut comp.ifs);
  }
}

#[cfg(test)]
mod tests {
  use super::{SpanVisitor, walk_expr};
  use crate::{Constant, Expr, ExprContext, ExprKind, Operator, Pos, Span};

  struct Count(usize);

  impl SpanVisitor for Count {
    fn span(&mut self, span: &mut Span) {
      self.0 += 1;
      span.start.line += 1;
    }
  }

  fn leaf(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::new(Pos::new(1, 0), Pos::new(1, 1)))
  }

  #[test]
  fn visits_all() {
    let left = leaf(ExprKind::Name { id: "a".to_owned(), ctx: ExprContext::Load });
    let right = leaf(ExprKind::constant(Constant::None));
    let mut e = leaf(ExprKind::BinOp {
      left: Box::new(left),
      op: Operator::Add,
      right: Box::new(right),
    });
    let mut count = Count(0);
    walk_expr(&mut count, &mut e);
    assert_eq!(count.0, 3);
    assert_eq!(e.span.start.line, 2);
    let ExprKind::BinOp { left, .. } = &e.kind else { unreachable!() };
    assert_eq!(left.span.start.line, 2);
  }
}
