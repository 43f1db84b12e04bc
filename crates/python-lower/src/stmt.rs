//! Statements and the roots of the tree.

use crate::error::{Feature, Kind};
use crate::st::{Result, St};
use crate::{args, ctx, expr};
use diagnostic::Span;
use python_ast::{self as ast, ExprContext, Mod, Stmt, StmtKind};
use python_syntax::{Node, SyntaxKind as SK};

pub(crate) fn root(st: &mut St<'_>, root: Node<'_>) -> Result<Mod> {
  match root.kind() {
    SK::FileInput => {
      let mut body = Vec::new();
      for child in root.children() {
        if child.kind() == SK::Stmt {
          stmt_into(st, child, &mut body)?;
        }
      }
      Ok(Mod::Module(body))
    }
    SK::EvalInput => {
      let Some(testlist) = root.children().find(|x| x.kind() == SK::Testlist) else {
        unreachable!("eval input without a testlist")
      };
      Ok(Mod::Expression(Box::new(expr::testlist(st, testlist)?)))
    }
    SK::SingleInput => {
      let mut body = Vec::new();
      let first = root.child(0);
      if first.kind() != SK::Newline {
        stmt_into(st, first, &mut body)?;
      }
      Ok(Mod::Interactive(body))
    }
    SK::FuncTypeInput => {
      let func_type = root.child(0);
      let argtypes = match func_type.children().find(|x| x.kind() == SK::TypeList) {
        None => Vec::new(),
        Some(types) => types
          .children()
          .filter(|x| x.kind() == SK::Test)
          .map(|x| expr::expr(st, x))
          .collect::<Result<Vec<_>>>()?,
      };
      let returns = expr::expr(st, func_type.child_rev(1))?;
      Ok(Mod::FunctionType { argtypes, returns: Box::new(returns) })
    }
    k => unreachable!("not a root: {k:?}"),
  }
}

/// Pushes the statements in a `Stmt`, `SimpleStmt`, or `CompoundStmt`. A simple statement may
/// hold many small statements separated by `;`.
fn stmt_into(st: &mut St<'_>, node: Node<'_>, out: &mut Vec<Stmt>) -> Result<()> {
  let node = if node.kind() == SK::Stmt { node.child(0) } else { node };
  match node.kind() {
    SK::SimpleStmt => {
      for small in node.children().filter(|x| x.kind() == SK::SmallStmt) {
        out.push(small_stmt(st, small)?);
      }
    }
    SK::CompoundStmt => out.push(compound_stmt(st, node.child(0))?),
    k => unreachable!("not a statement: {k:?}"),
  }
  Ok(())
}

fn suite(st: &mut St<'_>, node: Node<'_>) -> Result<Vec<Stmt>> {
  st.nest(node, |st, node| {
    let mut ret = Vec::new();
    for child in node.children() {
      if matches!(child.kind(), SK::SimpleStmt | SK::Stmt) {
        stmt_into(st, child, &mut ret)?;
      }
    }
    Ok(ret)
  })
}

fn small_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<Stmt> {
  let node = node.child(0);
  let span = node.span();
  let kind = match node.kind() {
    SK::ExprStmt => expr_stmt(st, node)?,
    SK::DelStmt => StmtKind::Delete(expr::exprlist(st, node.child(1), ExprContext::Del)?),
    SK::PassStmt => StmtKind::Pass,
    SK::FlowStmt => flow_stmt(st, node.child(0))?,
    SK::ImportStmt => import(st, node.child(0))?,
    SK::GlobalStmt => StmtKind::Global(names(&node)),
    SK::NonlocalStmt => StmtKind::Nonlocal(names(&node)),
    SK::AssertStmt => {
      let test = expr::expr(st, node.child(1))?;
      let msg = match node.children().nth(3) {
        None => None,
        Some(msg) => Some(Box::new(expr::expr(st, msg)?)),
      };
      StmtKind::Assert { test: Box::new(test), msg }
    }
    k => unreachable!("not a small statement: {k:?}"),
  };
  Ok(Stmt::new(kind, span))
}

fn names(node: &Node<'_>) -> Vec<String> {
  node.children().filter(|x| x.kind() == SK::Name).map(|x| x.text().to_owned()).collect()
}

fn expr_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<StmtKind> {
  let ch: Vec<_> = node.children().collect();
  if ch.len() == 1 {
    let e = expr::testlist(st, ch[0].clone())?;
    return Ok(StmtKind::Expr(Box::new(e)));
  }
  match ch[1].kind() {
    SK::AugAssign => {
      let mut target = expr::testlist(st, ch[0].clone())?;
      if !matches!(
        target.kind,
        ast::ExprKind::Name { .. }
          | ast::ExprKind::Attribute { .. }
          | ast::ExprKind::Subscript { .. }
      ) {
        return Err(st.err(&ch[0], Kind::IllegalAugAssign));
      }
      ctx::set(st, &mut target, ExprContext::Store)?;
      let op_tok = ch[1].child(0);
      let op = aug_op(op_tok.kind());
      st.check_feature(op == ast::Operator::MatMult, Feature::MatMult, &node)?;
      let value = expr::value(st, ch[2].clone())?;
      Ok(StmtKind::AugAssign { target: Box::new(target), op, value: Box::new(value) })
    }
    SK::AnnAssign => {
      st.check_feature(true, Feature::VariableAnnotations, &node)?;
      let mut target = expr::testlist(st, ch[0].clone())?;
      let simple = match &target.kind {
        ast::ExprKind::Name { .. } => {
          ch[0].tokens().next().is_none_or(|x| x.kind() != SK::LRound)
        }
        ast::ExprKind::Attribute { .. } | ast::ExprKind::Subscript { .. } => false,
        ast::ExprKind::Tuple { .. } => return Err(st.err(&ch[0], Kind::AnnotateTuple)),
        ast::ExprKind::List { .. } => return Err(st.err(&ch[0], Kind::AnnotateList)),
        _ => return Err(st.err(&ch[0], Kind::AnnotateIllegal)),
      };
      ctx::set(st, &mut target, ExprContext::Store)?;
      let ann: Vec<_> = ch[1].children().collect();
      let annotation = expr::expr(st, ann[1].clone())?;
      let value = match ann.get(3) {
        None => None,
        Some(value) => Some(Box::new(expr::value(st, value.clone())?)),
      };
      Ok(StmtKind::AnnAssign {
        target: Box::new(target),
        annotation: Box::new(annotation),
        value,
        simple,
      })
    }
    _ => {
      let (value_node, targets_nodes) = ch.split_last().expect("at least 3 children");
      let mut targets = Vec::with_capacity(targets_nodes.len() / 2);
      for target_node in targets_nodes.iter().step_by(2) {
        if target_node.kind() == SK::YieldExpr {
          return Err(st.err(target_node, Kind::AssignToYield));
        }
        let mut target = expr::testlist(st, target_node.clone())?;
        ctx::set(st, &mut target, ExprContext::Store)?;
        targets.push(target);
      }
      let value = expr::value(st, value_node.clone())?;
      Ok(StmtKind::Assign { targets, value: Box::new(value) })
    }
  }
}

fn aug_op(kind: SK) -> ast::Operator {
  match kind {
    SK::PlusEq => ast::Operator::Add,
    SK::MinusEq => ast::Operator::Sub,
    SK::StarEq => ast::Operator::Mult,
    SK::AtEq => ast::Operator::MatMult,
    SK::SlashEq => ast::Operator::Div,
    SK::PercentEq => ast::Operator::Mod,
    SK::StarStarEq => ast::Operator::Pow,
    SK::LtLtEq => ast::Operator::LShift,
    SK::GtGtEq => ast::Operator::RShift,
    SK::BarEq => ast::Operator::BitOr,
    SK::CaretEq => ast::Operator::BitXor,
    SK::AmpEq => ast::Operator::BitAnd,
    SK::SlashSlashEq => ast::Operator::FloorDiv,
    k => unreachable!("not an augmented assignment: {k:?}"),
  }
}

fn flow_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<StmtKind> {
  let ret = match node.kind() {
    SK::BreakStmt => StmtKind::Break,
    SK::ContinueStmt => StmtKind::Continue,
    SK::YieldStmt => StmtKind::Expr(Box::new(expr::expr(st, node.child(0))?)),
    SK::ReturnStmt => match node.children().nth(1) {
      None => StmtKind::Return(None),
      Some(value) => StmtKind::Return(Some(Box::new(expr::testlist(st, value)?))),
    },
    SK::RaiseStmt => {
      let mut ch = node.children().skip(1).step_by(2);
      let exc = match ch.next() {
        None => None,
        Some(exc) => Some(Box::new(expr::expr(st, exc)?)),
      };
      let cause = match ch.next() {
        None => None,
        Some(cause) => Some(Box::new(expr::expr(st, cause)?)),
      };
      StmtKind::Raise { exc, cause }
    }
    k => unreachable!("not a flow statement: {k:?}"),
  };
  Ok(ret)
}

fn import(st: &mut St<'_>, node: Node<'_>) -> Result<StmtKind> {
  match node.kind() {
    SK::ImportName => {
      let names = node.child(1);
      let aliases = names
        .children()
        .filter(|x| x.kind() == SK::DottedAsName)
        .map(|x| alias(st, x, true))
        .collect::<Result<Vec<_>>>()?;
      Ok(StmtKind::Import(aliases))
    }
    SK::ImportFrom => {
      let ch: Vec<_> = node.children().collect();
      let mut level = 0u32;
      let mut module = None;
      let mut idx = 1usize;
      while let Some(child) = ch.get(idx) {
        match child.kind() {
          SK::Dot => level += 1,
          SK::Ellipsis => level += 3,
          SK::DottedName => {
            module = Some(alias(st, child.clone(), false)?.name);
            idx += 1;
            break;
          }
          _ => break,
        }
        idx += 1;
      }
      // skip `import`
      let after = &ch[idx + 1];
      let names = match after.kind() {
        SK::Star => vec![ast::Alias { name: "*".to_owned(), asname: None }],
        SK::LRound | SK::ImportAsNames => {
          let names = if after.kind() == SK::LRound { ch[idx + 2].clone() } else { after.clone() };
          if after.kind() == SK::ImportAsNames && names.num_children() % 2 == 0 {
            return Err(st.err(&names, Kind::ImportTrailingComma));
          }
          names
            .children()
            .filter(|x| x.kind() == SK::ImportAsName)
            .map(|x| alias(st, x, true))
            .collect::<Result<Vec<_>>>()?
        }
        k => unreachable!("bad import from: {k:?}"),
      };
      Ok(StmtKind::ImportFrom { module, names, level })
    }
    k => unreachable!("not an import: {k:?}"),
  }
}

/// Returns the alias for an import. When `store`, the bound name is checked.
fn alias(st: &mut St<'_>, node: Node<'_>, store: bool) -> Result<ast::Alias> {
  match node.kind() {
    SK::ImportAsName => {
      let name = node.child(0);
      let asname = node.children().nth(2);
      let bound = asname.as_ref().unwrap_or(&name);
      if store {
        st.check_name(bound.text(), bound.start())?;
      }
      Ok(ast::Alias {
        name: name.text().to_owned(),
        asname: asname.as_ref().map(|x| x.text().to_owned()),
      })
    }
    SK::DottedAsName => {
      let Some(asname) = node.children().nth(2) else { return alias(st, node.child(0), store) };
      let mut ret = alias(st, node.child(0), false)?;
      st.check_name(asname.text(), asname.start())?;
      ret.asname = Some(asname.text().to_owned());
      Ok(ret)
    }
    SK::DottedName => {
      let parts: Vec<_> = node.children().filter(|x| x.kind() == SK::Name).collect();
      if let [name] = parts.as_slice() {
        if store {
          st.check_name(name.text(), name.start())?;
        }
        return Ok(ast::Alias { name: name.text().to_owned(), asname: None });
      }
      let name = parts.iter().map(Node::text).collect::<Vec<_>>().join(".");
      Ok(ast::Alias { name, asname: None })
    }
    k => unreachable!("not an import name: {k:?}"),
  }
}

fn compound_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<Stmt> {
  match node.kind() {
    SK::IfStmt => if_stmt(st, node),
    SK::WhileStmt => {
      let ch: Vec<_> = node.children().collect();
      let test = expr::expr(st, ch[1].clone())?;
      let body = suite(st, ch[3].clone())?;
      let orelse = match ch.get(6) {
        None => Vec::new(),
        Some(orelse) => suite(st, orelse.clone())?,
      };
      Ok(Stmt::new(StmtKind::While { test: Box::new(test), body, orelse }, node.span()))
    }
    SK::ForStmt => for_stmt(st, node.clone(), false, &node),
    SK::TryStmt => try_stmt(st, node),
    SK::WithStmt => with_stmt(st, node.clone(), false, &node),
    SK::Funcdef => funcdef(st, node.clone(), false, Vec::new(), &node),
    SK::Classdef => classdef(st, node, Vec::new()),
    SK::Decorated => decorated(st, node),
    SK::AsyncStmt => {
      let inner = node.child(1);
      match inner.kind() {
        SK::Funcdef => funcdef(st, inner, true, Vec::new(), &node),
        SK::WithStmt => with_stmt(st, inner, true, &node),
        SK::ForStmt => for_stmt(st, inner, true, &node),
        k => unreachable!("not an async statement: {k:?}"),
      }
    }
    k => unreachable!("not a compound statement: {k:?}"),
  }
}

/// Folds `elif`s right to left, so each becomes an `If` alone in the `orelse` of the one before.
/// An `elif` spans from its keyword to the end of everything it contains.
fn if_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<Stmt> {
  let ch: Vec<_> = node.children().collect();
  let elifs = ch.iter().filter(|x| x.kind() == SK::ElifKw).count();
  st.fold(elifs, &node, |st| if_clauses(st, &node, &ch))
}

/// Folds the clauses right to left, so each `elif` is the only statement in the `else` of the one
/// before.
fn if_clauses(st: &mut St<'_>, node: &Node<'_>, ch: &[Node<'_>]) -> Result<Stmt> {
  let mut clauses = Vec::new();
  let mut orelse = Vec::new();
  let mut idx = 0usize;
  while idx < ch.len() {
    match ch[idx].kind() {
      SK::IfKw | SK::ElifKw => {
        let test = expr::expr(st, ch[idx + 1].clone())?;
        let body = suite(st, ch[idx + 3].clone())?;
        clauses.push((ch[idx].start(), test, body));
        idx += 4;
      }
      SK::ElseKw => {
        orelse = suite(st, ch[idx + 2].clone())?;
        idx += 3;
      }
      k => unreachable!("bad if statement: {k:?}"),
    }
  }
  let mut clauses = clauses.into_iter().rev().peekable();
  loop {
    let Some((start, test, body)) = clauses.next() else { unreachable!("if without a test") };
    let span = if clauses.peek().is_none() {
      node.span()
    } else {
      let last = orelse.last().or(body.last()).expect("suites are never empty");
      Span::new(start, last.span.end)
    };
    let ret = Stmt::new(StmtKind::If { test: Box::new(test), body, orelse }, span);
    if clauses.peek().is_none() {
      return Ok(ret);
    }
    orelse = vec![ret];
  }
}

fn for_stmt(st: &mut St<'_>, node: Node<'_>, is_async: bool, pos: &Node<'_>) -> Result<Stmt> {
  st.check_feature(is_async, Feature::AsyncFunctions, &node)?;
  let ch: Vec<_> = node.children().collect();
  let target = expr::target_list(st, ch[1].clone())?;
  let iter = expr::testlist(st, ch[3].clone())?;
  let body = suite(st, ch[5].clone())?;
  let orelse = match ch.get(8) {
    None => Vec::new(),
    Some(orelse) => suite(st, orelse.clone())?,
  };
  let f = ast::For { target: Box::new(target), iter: Box::new(iter), body, orelse };
  let kind = if is_async { StmtKind::AsyncFor(f) } else { StmtKind::For(f) };
  Ok(Stmt::new(kind, pos.span()))
}

fn try_stmt(st: &mut St<'_>, node: Node<'_>) -> Result<Stmt> {
  let ch: Vec<_> = node.children().collect();
  let body = suite(st, ch[2].clone())?;
  let mut handlers = Vec::new();
  let mut orelse = Vec::new();
  let mut finalbody = Vec::new();
  let mut idx = 3usize;
  while idx < ch.len() {
    match ch[idx].kind() {
      SK::ExceptClause => {
        handlers.push(except_handler(st, ch[idx].clone(), ch[idx + 2].clone())?);
      }
      SK::ElseKw => orelse = suite(st, ch[idx + 2].clone())?,
      SK::FinallyKw => finalbody = suite(st, ch[idx + 2].clone())?,
      k => unreachable!("bad try statement: {k:?}"),
    }
    idx += 3;
  }
  Ok(Stmt::new(StmtKind::Try { body, handlers, orelse, finalbody }, node.span()))
}

fn except_handler(st: &mut St<'_>, clause: Node<'_>, body: Node<'_>) -> Result<ast::ExceptHandler> {
  let ch: Vec<_> = clause.children().collect();
  let typ = match ch.get(1) {
    None => None,
    Some(typ) => Some(Box::new(expr::expr(st, typ.clone())?)),
  };
  let name = match ch.get(3) {
    None => None,
    Some(name) => {
      st.check_name(name.text(), name.start())?;
      Some(name.text().to_owned())
    }
  };
  let body = suite(st, body)?;
  Ok(ast::ExceptHandler { typ, name, body, span: clause.span() })
}

fn with_stmt(st: &mut St<'_>, node: Node<'_>, is_async: bool, pos: &Node<'_>) -> Result<Stmt> {
  st.check_feature(is_async, Feature::AsyncFunctions, &node)?;
  let mut items = Vec::new();
  for item in node.children().filter(|x| x.kind() == SK::WithItem) {
    let context_expr = expr::expr(st, item.child(0))?;
    let optional_vars = match item.children().nth(2) {
      None => None,
      Some(target) => {
        let mut target = expr::expr(st, target)?;
        ctx::set(st, &mut target, ExprContext::Store)?;
        Some(target)
      }
    };
    items.push(ast::WithItem { context_expr, optional_vars });
  }
  let body = suite(st, node.child_rev(1))?;
  let w = ast::With { items, body };
  let kind = if is_async { StmtKind::AsyncWith(w) } else { StmtKind::With(w) };
  Ok(Stmt::new(kind, pos.span()))
}

/// `pos` is where the definition starts: the `def`, or the `async` before it.
fn funcdef(
  st: &mut St<'_>,
  node: Node<'_>,
  is_async: bool,
  decorator_list: Vec<ast::Expr>,
  pos: &Node<'_>,
) -> Result<Stmt> {
  st.check_feature(is_async, Feature::AsyncFunctions, &node)?;
  let ch: Vec<_> = node.children().collect();
  let name = ch[1].text().to_owned();
  st.check_name(&name, ch[1].start())?;
  let args = args::parameters(st, ch[2].clone())?;
  let returns = if ch[3].kind() == SK::Arrow {
    Some(Box::new(expr::expr(st, ch[4].clone())?))
  } else {
    None
  };
  let body = suite(st, node.child_rev(1))?;
  let end = body.last().expect("suites are never empty").span.end;
  let f = ast::FunctionDef { name, args: Box::new(args), body, decorator_list, returns };
  let kind = if is_async { StmtKind::AsyncFunctionDef(f) } else { StmtKind::FunctionDef(f) };
  Ok(Stmt::new(kind, Span::new(pos.start(), end)))
}

fn classdef(st: &mut St<'_>, node: Node<'_>, decorator_list: Vec<ast::Expr>) -> Result<Stmt> {
  let ch: Vec<_> = node.children().collect();
  let name = ch[1].text().to_owned();
  st.check_name(&name, ch[1].start())?;
  let (bases, keywords) = match ch.get(3) {
    Some(arglist) if arglist.kind() == SK::ArgList => {
      expr::call_args(st, arglist.clone(), None, false)?
    }
    _ => (Vec::new(), Vec::new()),
  };
  let body = suite(st, node.child_rev(1))?;
  Ok(Stmt::new(StmtKind::ClassDef { name, bases, keywords, body, decorator_list }, node.span()))
}

fn decorated(st: &mut St<'_>, node: Node<'_>) -> Result<Stmt> {
  let decorator_list = node
    .child(0)
    .children()
    .map(|x| decorator(st, x))
    .collect::<Result<Vec<_>>>()?;
  let def = node.child(1);
  match def.kind() {
    SK::Funcdef => funcdef(st, def.clone(), false, decorator_list, &def),
    SK::Classdef => classdef(st, def, decorator_list),
    SK::AsyncFuncdef => funcdef(st, def.child(1), true, decorator_list, &def),
    k => unreachable!("not decorated: {k:?}"),
  }
}

fn decorator(st: &mut St<'_>, node: Node<'_>) -> Result<ast::Expr> {
  let ch: Vec<_> = node.children().collect();
  let name = dotted_name(ch[1].clone());
  match ch.len() {
    3 => Ok(name),
    5 => {
      let span = Span::new(name.span.start, node.span().end);
      let kind =
        ast::ExprKind::Call { func: Box::new(name), args: Vec::new(), keywords: Vec::new() };
      Ok(ast::Expr::new(kind, span))
    }
    6 => {
      let arglist = ch[3].clone();
      let span = Span::new(name.span.start, arglist.span().end);
      let parens = (ch[2].clone(), ch[4].clone());
      let (args, keywords) = expr::call_args(st, arglist, Some(parens), true)?;
      let kind = ast::ExprKind::Call { func: Box::new(name), args, keywords };
      Ok(ast::Expr::new(kind, span))
    }
    n => unreachable!("decorator with {n} children"),
  }
}

/// The first name spans the whole dotted name. Each attribute spans from the start to its own
/// name.
fn dotted_name(node: Node<'_>) -> ast::Expr {
  let span = node.span();
  let mut parts = node.children().filter(|x| x.kind() == SK::Name);
  let Some(first) = parts.next() else { unreachable!("empty dotted name") };
  let load = ExprContext::Load;
  let mut ret =
    ast::Expr::new(ast::ExprKind::Name { id: first.text().to_owned(), ctx: load }, span);
  for part in parts {
    let kind =
      ast::ExprKind::Attribute { value: Box::new(ret), attr: part.text().to_owned(), ctx: load };
    ret = ast::Expr::new(kind, Span::new(span.start, part.span().end));
  }
  ret
}
