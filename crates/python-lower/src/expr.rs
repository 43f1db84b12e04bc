//! Expressions.

use crate::error::{Feature, Kind};
use crate::st::{Result, St};
use crate::{args, ctx, fstring, number};
use diagnostic::Span;
use python_ast::{
  Arguments, BoolOp, CmpOp, Comprehension, Constant, Expr, ExprContext, ExprKind, Keyword,
  Operator, Slice, UnaryOp,
};
use python_syntax::{Node, SyntaxKind as SK};
use rustc_hash::FxHashSet;

/// Builds any expression node, from `NamedexprTest` all the way down to `Atom`.
pub(crate) fn expr(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  st.nest(node, expr_inner)
}

fn expr_inner(st: &mut St<'_>, mut node: Node<'_>) -> Result<Expr> {
  loop {
    let n = node.num_children();
    match node.kind() {
      SK::Test | SK::TestNocond => {
        let first = node.child(0);
        if matches!(first.kind(), SK::Lambdef | SK::LambdefNocond) {
          return lambda(st, first);
        }
        if n == 1 {
          node = first;
          continue;
        }
        let ch: Vec<_> = node.children().collect();
        let body = expr(st, ch[0].clone())?;
        let test = expr(st, ch[2].clone())?;
        let orelse = expr(st, ch[4].clone())?;
        let kind =
          ExprKind::IfExp { test: Box::new(test), body: Box::new(body), orelse: Box::new(orelse) };
        return Ok(Expr::new(kind, node.span()));
      }
      SK::NamedexprTest => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        return named_expr(st, node);
      }
      SK::OrTest | SK::AndTest => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        let op = if node.kind() == SK::OrTest { BoolOp::Or } else { BoolOp::And };
        let values =
          node.children().step_by(2).map(|x| expr(st, x)).collect::<Result<Vec<_>>>()?;
        return Ok(Expr::new(ExprKind::BoolOp { op, values }, node.span()));
      }
      SK::NotTest => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        let operand = expr(st, node.child(1))?;
        let kind = ExprKind::UnaryOp { op: UnaryOp::Not, operand: Box::new(operand) };
        return Ok(Expr::new(kind, node.span()));
      }
      SK::Comparison => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        return comparison(st, node);
      }
      SK::StarExpr => {
        let value = expr(st, node.child(1))?;
        let kind = ExprKind::Starred { value: Box::new(value), ctx: ExprContext::Load };
        return Ok(Expr::new(kind, node.span()));
      }
      SK::Expr | SK::XorExpr | SK::AndExpr | SK::ShiftExpr | SK::ArithExpr | SK::Term => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        return binop(st, node);
      }
      SK::YieldExpr => return yield_expr(st, node),
      SK::Factor => {
        if n == 1 {
          node = node.child(0);
          continue;
        }
        let op = match node.child(0).kind() {
          SK::Plus => UnaryOp::UAdd,
          SK::Minus => UnaryOp::USub,
          SK::Tilde => UnaryOp::Invert,
          k => unreachable!("not a unary operator: {k:?}"),
        };
        let operand = expr(st, node.child(1))?;
        return Ok(Expr::new(ExprKind::UnaryOp { op, operand: Box::new(operand) }, node.span()));
      }
      SK::Power => {
        let left = atom_expr(st, node.child(0))?;
        if n == 1 {
          return Ok(left);
        }
        let right = expr(st, node.child_rev(1))?;
        let kind =
          ExprKind::BinOp { left: Box::new(left), op: Operator::Pow, right: Box::new(right) };
        return Ok(Expr::new(kind, node.span()));
      }
      SK::AtomExpr => return atom_expr(st, node),
      SK::Atom => return atom(st, node),
      k => unreachable!("not an expression: {k:?}"),
    }
  }
}

/// Builds a list of expressions separated by commas. One expression without a trailing comma is
/// just that expression. Anything else is a tuple spanning the node.
pub(crate) fn testlist(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  testlist_spanned(st, node.clone(), node.span())
}

fn testlist_spanned(st: &mut St<'_>, node: Node<'_>, span: Span) -> Result<Expr> {
  if !matches!(
    node.kind(),
    SK::Testlist | SK::TestlistStarExpr | SK::ExprList | SK::TestlistComp
  ) {
    return expr(st, node);
  }
  if node.num_children() == 1 {
    return expr(st, node.child(0));
  }
  let elts = node.children().step_by(2).map(|x| expr(st, x)).collect::<Result<Vec<_>>>()?;
  Ok(Expr::new(ExprKind::Tuple { elts, ctx: ExprContext::Load }, span))
}

/// Builds the right side of an assignment, which may be a yield expression.
pub(crate) fn value(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  if node.kind() == SK::YieldExpr { expr(st, node) } else { testlist(st, node) }
}

/// Builds each expression in the list, then sets each one's context.
pub(crate) fn exprlist(st: &mut St<'_>, node: Node<'_>, ctx: ExprContext) -> Result<Vec<Expr>> {
  let mut ret = Vec::new();
  for child in node.children().step_by(2) {
    let mut e = expr(st, child)?;
    ctx::set(st, &mut e, ctx)?;
    ret.push(e);
  }
  Ok(ret)
}

/// Builds the target of a `for`: one expression, or a tuple of all of them.
pub(crate) fn target_list(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let mut elts = exprlist(st, node.clone(), ExprContext::Store)?;
  if node.num_children() == 1 {
    if let Some(e) = elts.pop() {
      return Ok(e);
    }
  }
  Ok(Expr::new(ExprKind::Tuple { elts, ctx: ExprContext::Store }, node.span()))
}

fn lambda(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let args =
    if ch.len() == 3 { Arguments::default() } else { args::parameters(st, ch[1].clone())? };
  let body = expr(st, ch[ch.len() - 1].clone())?;
  Ok(Expr::new(ExprKind::Lambda { args: Box::new(args), body: Box::new(body) }, node.span()))
}

fn named_expr(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  st.check_feature(true, Feature::NamedExpr, &node)?;
  let mut target = expr(st, node.child(0))?;
  if !matches!(target.kind, ExprKind::Name { .. }) {
    let what = ctx::describe(&target.kind);
    return Err(st.err_at(target.span.start, Kind::NamedExprTarget(what)));
  }
  ctx::set(st, &mut target, ExprContext::Store)?;
  let value = expr(st, node.child(2))?;
  let kind = ExprKind::NamedExpr { target: Box::new(target), value: Box::new(value) };
  Ok(Expr::new(kind, node.span()))
}

fn comparison(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let left = expr(st, ch[0].clone())?;
  let mut ops = Vec::with_capacity(ch.len() / 2);
  let mut comparators = Vec::with_capacity(ch.len() / 2);
  for pair in ch[1..].chunks(2) {
    ops.push(comp_op(st, pair[0].clone())?);
    comparators.push(expr(st, pair[1].clone())?);
  }
  let kind = ExprKind::Compare { left: Box::new(left), ops, comparators };
  Ok(Expr::new(kind, node.span()))
}

fn comp_op(st: &mut St<'_>, node: Node<'_>) -> Result<CmpOp> {
  let first = node.child(0);
  if node.num_children() == 2 {
    return Ok(if first.kind() == SK::NotKw { CmpOp::NotIn } else { CmpOp::IsNot });
  }
  let flufl = st.info().barry_as_flufl;
  let ret = match first.kind() {
    SK::Lt => CmpOp::Lt,
    SK::Gt => CmpOp::Gt,
    SK::EqEq => CmpOp::Eq,
    SK::LtEq => CmpOp::LtE,
    SK::GtEq => CmpOp::GtE,
    SK::NotEq if flufl => return Err(st.err(&first, Kind::Flufl)),
    SK::LtGt if !flufl => return Err(st.err(&first, Kind::InvalidSyntax)),
    SK::NotEq | SK::LtGt => CmpOp::NotEq,
    SK::InKw => CmpOp::In,
    SK::IsKw => CmpOp::Is,
    k => unreachable!("not a comparison: {k:?}"),
  };
  Ok(ret)
}

/// Folds a chain of binary operators to the left. The first node spans its two operands. Each
/// later node spans from the start of the chain to the end of its own right operand.
fn binop(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let start = ch[0].start();
  st.fold(ch.len() / 2, &node, |st| {
    let mut ret = expr(st, ch[0].clone())?;
    for pair in ch[1..].chunks(2) {
      let op = operator(pair[0].kind());
      st.check_feature(op == Operator::MatMult, Feature::MatMult, &node)?;
      let span = Span::new(start, pair[1].span().end);
      let right = expr(st, pair[1].clone())?;
      let kind = ExprKind::BinOp { left: Box::new(ret), op, right: Box::new(right) };
      ret = Expr::new(kind, span);
    }
    Ok(ret)
  })
}

fn operator(kind: SK) -> Operator {
  match kind {
    SK::Bar => Operator::BitOr,
    SK::Caret => Operator::BitXor,
    SK::Amp => Operator::BitAnd,
    SK::LtLt => Operator::LShift,
    SK::GtGt => Operator::RShift,
    SK::Plus => Operator::Add,
    SK::Minus => Operator::Sub,
    SK::Star => Operator::Mult,
    SK::Slash => Operator::Div,
    SK::SlashSlash => Operator::FloorDiv,
    SK::Percent => Operator::Mod,
    SK::At => Operator::MatMult,
    k => unreachable!("not a binary operator: {k:?}"),
  }
}

fn yield_expr(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let kind = match node.children().nth(1) {
    None => ExprKind::Yield(None),
    Some(arg) => {
      if arg.num_children() == 2 {
        ExprKind::YieldFrom(Box::new(expr(st, arg.child(1))?))
      } else {
        ExprKind::Yield(Some(Box::new(testlist(st, arg.child(0))?)))
      }
    }
  };
  Ok(Expr::new(kind, node.span()))
}

/// Builds an atom with its trailers, and the `await` before it if there is one. Each trailer
/// spans from the start of the atom to its own end.
fn atom_expr(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let is_await = ch[0].kind() == SK::AwaitKw;
  st.check_feature(is_await, Feature::Await, &node)?;
  let atom_node = &ch[usize::from(is_await)];
  let start = atom_node.start();
  // one level for each trailer, and one for the `await`
  st.fold(ch.len() - 1, &node, |st| {
    let mut ret = atom(st, atom_node.clone())?;
    for trailer_node in &ch[usize::from(is_await) + 1..] {
      let mut e = trailer(st, trailer_node.clone(), ret)?;
      e.span = Span::new(start, trailer_node.span().end);
      ret = e;
    }
    if is_await {
      ret = Expr::new(ExprKind::Await(Box::new(ret)), node.span());
    }
    Ok(ret)
  })
}

fn trailer(st: &mut St<'_>, node: Node<'_>, left: Expr) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let span = node.span();
  let load = ExprContext::Load;
  let kind = match ch[0].kind() {
    SK::LRound => {
      let (args, keywords) = if ch.len() == 2 {
        (Vec::new(), Vec::new())
      } else {
        call_args(st, ch[1].clone(), Some((ch[0].clone(), ch[2].clone())), true)?
      };
      ExprKind::Call { func: Box::new(left), args, keywords }
    }
    SK::Dot => {
      ExprKind::Attribute { value: Box::new(left), attr: ch[1].text().to_owned(), ctx: load }
    }
    SK::LSquare => {
      let list = ch[1].clone();
      let mut slices = list
        .children()
        .filter(|x| x.kind() == SK::Subscript)
        .map(|x| slice(st, x))
        .collect::<Result<Vec<_>>>()?;
      let slice = if list.num_children() == 1 {
        slices.pop().expect("one subscript")
      } else if slices.iter().all(|x| matches!(x, Slice::Index(_))) {
        let elts = slices
          .into_iter()
          .map(|x| match x {
            Slice::Index(e) => *e,
            Slice::Slice { .. } | Slice::ExtSlice(_) => unreachable!("checked above"),
          })
          .collect();
        let tuple = Expr::new(ExprKind::Tuple { elts, ctx: load }, list.span());
        Slice::Index(Box::new(tuple))
      } else {
        Slice::ExtSlice(slices)
      };
      ExprKind::Subscript { value: Box::new(left), slice: Box::new(slice), ctx: load }
    }
    k => unreachable!("not a trailer: {k:?}"),
  };
  Ok(Expr::new(kind, span))
}

fn slice(st: &mut St<'_>, node: Node<'_>) -> Result<Slice> {
  let ch: Vec<_> = node.children().collect();
  if ch.len() == 1 && ch[0].kind() != SK::Colon {
    return Ok(Slice::Index(Box::new(expr(st, ch[0].clone())?)));
  }
  let mut lower = None;
  let mut upper = None;
  let mut step = None;
  let mut seen_colon = false;
  for child in ch {
    match child.kind() {
      SK::Colon => seen_colon = true,
      SK::SliceOp => {
        if let Some(e) = child.children().nth(1) {
          step = Some(Box::new(expr(st, e)?));
        }
      }
      _ if seen_colon => upper = Some(Box::new(expr(st, child)?)),
      _ => lower = Some(Box::new(expr(st, child)?)),
    }
  }
  Ok(Slice::Slice { lower, upper, step })
}

/// Builds the arguments of a call, or the bases of a class when `!genexp_allowed`. A generator
/// argument spans the parentheses when given.
pub(crate) fn call_args(
  st: &mut St<'_>,
  node: Node<'_>,
  parens: Option<(Node<'_>, Node<'_>)>,
  genexp_allowed: bool,
) -> Result<(Vec<Expr>, Vec<Keyword>)> {
  let arguments: Vec<_> = node.children().filter(|x| x.kind() == SK::Argument).collect();
  let counts = ArgCounts::new(&arguments);
  if counts.generators != 0 && !genexp_allowed {
    return Err(st.err(&node, Kind::GenexpBase));
  }
  let last_is_comma = node.children().last().is_some_and(|x| x.kind() == SK::Comma);
  let others = counts.args != 0 || counts.keywords != 0 || last_is_comma;
  if counts.generators > 1 || (counts.generators == 1 && others) {
    return Err(st.err(&node, Kind::GenexpNotSole));
  }
  let mut args = Vec::with_capacity(counts.args + counts.generators);
  let mut keywords = Vec::with_capacity(counts.keywords);
  let mut n_double_stars = 0usize;
  let mut seen_names = FxHashSet::<String>::default();
  for argument in arguments {
    let ch: Vec<_> = argument.children().collect();
    let first = ch[0].clone();
    let is_walrus = ch.len() == 3 && ch[1].kind() == SK::ColonEq;
    if ch.len() == 1 || is_walrus {
      if !keywords.is_empty() {
        let kind = if n_double_stars == 0 {
          Kind::PositionalAfterKeyword
        } else {
          Kind::PositionalAfterDoubleStar
        };
        return Err(st.err(&first, kind));
      }
      let e = if is_walrus { named_expr(st, argument)? } else { expr(st, first)? };
      args.push(e);
    } else if first.kind() == SK::Star {
      if n_double_stars != 0 {
        return Err(st.err(&first, Kind::StarAfterDoubleStar));
      }
      let value = expr(st, ch[1].clone())?;
      let kind = ExprKind::Starred { value: Box::new(value), ctx: ExprContext::Load };
      args.push(Expr::new(kind, argument.span()));
    } else if first.kind() == SK::StarStar {
      n_double_stars += 1;
      keywords.push(Keyword { arg: None, value: expr(st, ch[1].clone())? });
    } else if ch[1].kind() == SK::CompFor {
      let span = match &parens {
        Some((lpar, rpar)) => Span::new(lpar.start(), rpar.span().end),
        None => argument.span(),
      };
      args.push(comprehension(st, Comp::Generator, first, ch[1].clone(), span)?);
    } else {
      let is_name = {
        let mut tokens = first.tokens();
        let one = tokens.next().filter(|x| {
          matches!(x.kind(), SK::Name | SK::NoneKw | SK::TrueKw | SK::FalseKw)
        });
        one.is_some() && tokens.next().is_none()
      };
      if !is_name {
        return Err(st.err(&first, Kind::KeywordNotName));
      }
      let name = expr(st, first.clone())?;
      let id = match name.kind {
        ExprKind::Name { id, .. } => id,
        kind => return Err(st.err(&first, Kind::CannotAssign(ctx::describe(&kind)))),
      };
      if !seen_names.insert(id.clone()) {
        return Err(st.err(&first, Kind::KeywordRepeated(id)));
      }
      st.check_name(&id, first.start())?;
      let value = expr(st, ch[2].clone())?;
      keywords.push(Keyword { arg: Some(id), value });
    }
  }
  Ok((args, keywords))
}

/// How many of each kind of argument there are.
#[derive(Debug, Default)]
struct ArgCounts {
  args: usize,
  keywords: usize,
  generators: usize,
}

impl ArgCounts {
  fn new(arguments: &[Node<'_>]) -> Self {
    let mut ret = Self::default();
    for argument in arguments {
      let mut ch = argument.children();
      let first = ch.next().map(|x| x.kind());
      match ch.next().map(|x| x.kind()) {
        None => ret.args += 1,
        Some(_) if first == Some(SK::Star) => ret.args += 1,
        Some(SK::ColonEq) => ret.args += 1,
        Some(SK::CompFor) => ret.generators += 1,
        Some(_) => ret.keywords += 1,
      }
    }
    ret
  }
}

fn atom(st: &mut St<'_>, node: Node<'_>) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let first = &ch[0];
  let span = node.span();
  let kind = match first.kind() {
    SK::Name => ExprKind::Name { id: first.text().to_owned(), ctx: ExprContext::Load },
    SK::NoneKw => ExprKind::constant(Constant::None),
    SK::TrueKw => ExprKind::constant(Constant::Bool(true)),
    SK::FalseKw => ExprKind::constant(Constant::Bool(false)),
    SK::Ellipsis => ExprKind::constant(Constant::Ellipsis),
    SK::String => return fstring::atom(st, node),
    SK::Number => {
      let text = first.text();
      st.check_feature(text.contains('_'), Feature::NumericUnderscores, &node)?;
      match number::get(text) {
        Some(c) => ExprKind::constant(c),
        None => return Err(st.err(&node, Kind::InvalidSyntax)),
      }
    }
    SK::LRound => {
      let inner = ch[1].clone();
      match inner.kind() {
        SK::RRound => ExprKind::Tuple { elts: Vec::new(), ctx: ExprContext::Load },
        SK::YieldExpr => return expr(st, inner),
        _ => {
          if inner.children().nth(1).is_some_and(|x| x.kind() == SK::CompFor) {
            return comprehension(st, Comp::Generator, inner.child(0), inner.child(1), span);
          }
          return testlist_spanned(st, inner, span);
        }
      }
    }
    SK::LSquare => {
      let inner = ch[1].clone();
      if inner.kind() == SK::RSquare {
        ExprKind::List { elts: Vec::new(), ctx: ExprContext::Load }
      } else if inner.children().nth(1).is_some_and(|x| x.kind() == SK::CompFor) {
        return comprehension(st, Comp::List, inner.child(0), inner.child(1), span);
      } else {
        let elts = inner.children().step_by(2).map(|x| expr(st, x)).collect::<Result<Vec<_>>>()?;
        ExprKind::List { elts, ctx: ExprContext::Load }
      }
    }
    SK::LCurly => {
      let maker = ch[1].clone();
      if maker.kind() == SK::RCurly {
        ExprKind::Dict { keys: Vec::new(), values: Vec::new() }
      } else {
        return dict_or_set(st, maker, span);
      }
    }
    k => unreachable!("not an atom: {k:?}"),
  };
  Ok(Expr::new(kind, span))
}

fn dict_or_set(st: &mut St<'_>, node: Node<'_>, span: Span) -> Result<Expr> {
  let ch: Vec<_> = node.children().collect();
  let is_dict = ch[0].kind() == SK::StarStar;
  if ch.len() == 1 || ch[1].kind() == SK::Comma {
    let elts = ch.into_iter().step_by(2).map(|x| expr(st, x)).collect::<Result<Vec<_>>>()?;
    return Ok(Expr::new(ExprKind::Set(elts), span));
  }
  if ch[1].kind() == SK::CompFor {
    return comprehension(st, Comp::Set, ch[0].clone(), ch[1].clone(), span);
  }
  let comp_idx = 3 - usize::from(is_dict);
  if ch.get(comp_idx).is_some_and(|x| x.kind() == SK::CompFor) {
    if is_dict {
      return Err(st.err(&node, Kind::DictUnpackInComp));
    }
    let key = expr(st, ch[0].clone())?;
    let value = expr(st, ch[2].clone())?;
    let generators = comprehensions(st, ch[3].clone())?;
    let kind = ExprKind::DictComp { key: Box::new(key), value: Box::new(value), generators };
    return Ok(Expr::new(kind, span));
  }
  let mut keys = Vec::new();
  let mut values = Vec::new();
  let mut idx = 0usize;
  while idx < ch.len() {
    if ch[idx].kind() == SK::StarStar {
      keys.push(None);
      values.push(expr(st, ch[idx + 1].clone())?);
      idx += 3;
    } else {
      keys.push(Some(expr(st, ch[idx].clone())?));
      values.push(expr(st, ch[idx + 2].clone())?);
      idx += 4;
    }
  }
  Ok(Expr::new(ExprKind::Dict { keys, values }, span))
}

#[derive(Debug, Clone, Copy)]
enum Comp {
  Generator,
  List,
  Set,
}

fn comprehension(
  st: &mut St<'_>,
  comp: Comp,
  elt_node: Node<'_>,
  for_node: Node<'_>,
  span: Span,
) -> Result<Expr> {
  let elt = expr(st, elt_node.clone())?;
  if matches!(elt.kind, ExprKind::Starred { .. }) {
    return Err(st.err(&elt_node, Kind::StarredInComp));
  }
  let elt = Box::new(elt);
  let generators = comprehensions(st, for_node)?;
  let kind = match comp {
    Comp::Generator => ExprKind::GeneratorExp { elt, generators },
    Comp::List => ExprKind::ListComp { elt, generators },
    Comp::Set => ExprKind::SetComp { elt, generators },
  };
  Ok(Expr::new(kind, span))
}

/// Builds the `for` clauses, each with the `if`s that directly follow it.
fn comprehensions(st: &mut St<'_>, comp_for: Node<'_>) -> Result<Vec<Comprehension>> {
  let mut ret = Vec::new();
  let mut cur = Some(comp_for);
  while let Some(comp_for) = cur.take() {
    let is_async = comp_for.child(0).kind() == SK::AsyncKw;
    st.check_feature(is_async, Feature::AsyncComprehensions, &comp_for)?;
    let sync = comp_for.child(usize::from(is_async));
    let ch: Vec<_> = sync.children().collect();
    let mut targets = exprlist(st, ch[1].clone(), ExprContext::Store)?;
    let target = if ch[1].num_children() == 1 {
      targets.pop().expect("one target")
    } else {
      let span = targets[0].span;
      Expr::new(ExprKind::Tuple { elts: targets, ctx: ExprContext::Store }, span)
    };
    let iter = expr(st, ch[3].clone())?;
    let mut ifs = Vec::new();
    let mut comp_iter = ch.get(4).cloned();
    while let Some(it) = comp_iter.take() {
      let inner = it.child(0);
      match inner.kind() {
        SK::CompFor => cur = Some(inner),
        SK::CompIf => {
          ifs.push(expr(st, inner.child(1))?);
          comp_iter = inner.children().nth(2);
        }
        k => unreachable!("not a comprehension clause: {k:?}"),
      }
    }
    ret.push(Comprehension { target, iter, ifs, is_async });
  }
  Ok(ret)
}
