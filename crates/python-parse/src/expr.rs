//! Expressions.

use crate::parser::{Parser, Result};
use python_syntax::SyntaxKind as SK;

/// returns whether the kind can start an expression, not counting a starred expression.
pub(crate) fn at_expr(kind: SK) -> bool {
  matches!(
    kind,
    SK::Name
      | SK::Number
      | SK::String
      | SK::LRound
      | SK::LSquare
      | SK::LCurly
      | SK::Minus
      | SK::Plus
      | SK::Tilde
      | SK::NotKw
      | SK::LambdaKw
      | SK::AwaitKw
      | SK::Ellipsis
      | SK::NoneKw
      | SK::TrueKw
      | SK::FalseKw
  )
}

pub(crate) fn at_star_or_expr(kind: SK) -> bool {
  kind == SK::Star || at_expr(kind)
}

fn at_comp_for(p: &Parser<'_>) -> bool {
  matches!(p.peek(), SK::ForKw | SK::AsyncKw)
}

pub(crate) fn namedexpr_test(p: &mut Parser<'_>) -> Result {
  p.start(SK::NamedexprTest);
  test(p)?;
  if p.eat(SK::ColonEq) {
    test(p)?;
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn test(p: &mut Parser<'_>) -> Result {
  p.nest(|p| {
    p.start(SK::Test);
    if p.peek() == SK::LambdaKw {
      lambdef(p, SK::Lambdef)?;
    } else {
      or_test(p)?;
      if p.eat(SK::IfKw) {
        or_test(p)?;
        p.expect(SK::ElseKw)?;
        test(p)?;
      }
    }
    p.finish_node();
    Ok(())
  })
}

fn test_nocond(p: &mut Parser<'_>) -> Result {
  p.start(SK::TestNocond);
  if p.peek() == SK::LambdaKw {
    lambdef(p, SK::LambdefNocond)?;
  } else {
    or_test(p)?;
  }
  p.finish_node();
  Ok(())
}

fn lambdef(p: &mut Parser<'_>, kind: SK) -> Result {
  p.start(kind);
  p.bump();
  if p.peek() != SK::Colon {
    args_list(p, SK::VarArgsList, SK::Vfpdef, SK::Colon)?;
  }
  p.expect(SK::Colon)?;
  if kind == SK::LambdefNocond {
    p.nest(test_nocond)?;
  } else {
    test(p)?;
  }
  p.finish_node();
  Ok(())
}

/// a left-associative chain of operands separated by any of the operators.
fn chain(
  p: &mut Parser<'_>,
  kind: SK,
  ops: &[SK],
  operand: fn(&mut Parser<'_>) -> Result,
) -> Result {
  p.start(kind);
  operand(p)?;
  while ops.contains(&p.peek()) {
    p.bump();
    operand(p)?;
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn or_test(p: &mut Parser<'_>) -> Result {
  chain(p, SK::OrTest, &[SK::OrKw], and_test)
}

fn and_test(p: &mut Parser<'_>) -> Result {
  chain(p, SK::AndTest, &[SK::AndKw], not_test)
}

fn not_test(p: &mut Parser<'_>) -> Result {
  p.start(SK::NotTest);
  if p.eat(SK::NotKw) {
    p.nest(not_test)?;
  } else {
    comparison(p)?;
  }
  p.finish_node();
  Ok(())
}

fn comparison(p: &mut Parser<'_>) -> Result {
  p.start(SK::Comparison);
  expr(p)?;
  while matches!(
    p.peek(),
    SK::Lt
      | SK::Gt
      | SK::EqEq
      | SK::GtEq
      | SK::LtEq
      | SK::LtGt
      | SK::NotEq
      | SK::InKw
      | SK::IsKw
      | SK::NotKw
  ) {
    p.start(SK::CompOp);
    match p.peek() {
      SK::NotKw => {
        p.bump();
        p.expect(SK::InKw)?;
      }
      SK::IsKw => {
        p.bump();
        p.eat(SK::NotKw);
      }
      _ => p.bump(),
    }
    p.finish_node();
    expr(p)?;
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn star_expr(p: &mut Parser<'_>) -> Result {
  p.start(SK::StarExpr);
  p.bump();
  expr(p)?;
  p.finish_node();
  Ok(())
}

pub(crate) fn expr(p: &mut Parser<'_>) -> Result {
  chain(p, SK::Expr, &[SK::Bar], xor_expr)
}

fn xor_expr(p: &mut Parser<'_>) -> Result {
  chain(p, SK::XorExpr, &[SK::Caret], and_expr)
}

fn and_expr(p: &mut Parser<'_>) -> Result {
  chain(p, SK::AndExpr, &[SK::Amp], shift_expr)
}

fn shift_expr(p: &mut Parser<'_>) -> Result {
  chain(p, SK::ShiftExpr, &[SK::LtLt, SK::GtGt], arith_expr)
}

fn arith_expr(p: &mut Parser<'_>) -> Result {
  chain(p, SK::ArithExpr, &[SK::Plus, SK::Minus], term)
}

fn term(p: &mut Parser<'_>) -> Result {
  chain(p, SK::Term, &[SK::Star, SK::At, SK::Slash, SK::Percent, SK::SlashSlash], factor)
}

fn factor(p: &mut Parser<'_>) -> Result {
  p.start(SK::Factor);
  if matches!(p.peek(), SK::Plus | SK::Minus | SK::Tilde) {
    p.bump();
    p.nest(factor)?;
  } else {
    power(p)?;
  }
  p.finish_node();
  Ok(())
}

fn power(p: &mut Parser<'_>) -> Result {
  p.start(SK::Power);
  atom_expr(p)?;
  if p.eat(SK::StarStar) {
    p.nest(factor)?;
  }
  p.finish_node();
  Ok(())
}

fn atom_expr(p: &mut Parser<'_>) -> Result {
  p.start(SK::AtomExpr);
  p.eat(SK::AwaitKw);
  atom(p)?;
  while matches!(p.peek(), SK::LRound | SK::LSquare | SK::Dot) {
    trailer(p)?;
  }
  p.finish_node();
  Ok(())
}

fn atom(p: &mut Parser<'_>) -> Result {
  p.start(SK::Atom);
  match p.peek() {
    SK::LRound => {
      p.bump();
      match p.peek() {
        SK::RRound => {}
        SK::YieldKw => yield_expr(p)?,
        _ => testlist_comp(p)?,
      }
      p.expect(SK::RRound)?;
    }
    SK::LSquare => {
      p.bump();
      if p.peek() != SK::RSquare {
        testlist_comp(p)?;
      }
      p.expect(SK::RSquare)?;
    }
    SK::LCurly => {
      p.bump();
      if p.peek() != SK::RCurly {
        dictorsetmaker(p)?;
      }
      p.expect(SK::RCurly)?;
    }
    SK::Name | SK::Number | SK::Ellipsis | SK::NoneKw | SK::TrueKw | SK::FalseKw => p.bump(),
    SK::String => {
      while p.peek() == SK::String {
        p.bump();
      }
    }
    _ => return Err(p.error()),
  }
  p.finish_node();
  Ok(())
}

fn namedexpr_or_star(p: &mut Parser<'_>) -> Result {
  if p.peek() == SK::Star { star_expr(p) } else { namedexpr_test(p) }
}

fn testlist_comp(p: &mut Parser<'_>) -> Result {
  p.start(SK::TestlistComp);
  namedexpr_or_star(p)?;
  if at_comp_for(p) {
    comp_for(p)?;
  } else {
    while p.eat(SK::Comma) {
      if !at_star_or_expr(p.peek()) {
        break;
      }
      namedexpr_or_star(p)?;
    }
  }
  p.finish_node();
  Ok(())
}

fn trailer(p: &mut Parser<'_>) -> Result {
  p.start(SK::Trailer);
  match p.peek() {
    SK::LRound => {
      p.bump();
      if p.peek() != SK::RRound {
        arglist(p)?;
      }
      p.expect(SK::RRound)?;
    }
    SK::LSquare => {
      p.bump();
      subscriptlist(p)?;
      p.expect(SK::RSquare)?;
    }
    _ => {
      p.bump();
      p.expect(SK::Name)?;
    }
  }
  p.finish_node();
  Ok(())
}

fn subscriptlist(p: &mut Parser<'_>) -> Result {
  p.start(SK::SubscriptList);
  subscript(p)?;
  while p.eat(SK::Comma) {
    if !(p.peek() == SK::Colon || at_expr(p.peek())) {
      break;
    }
    subscript(p)?;
  }
  p.finish_node();
  Ok(())
}

fn subscript(p: &mut Parser<'_>) -> Result {
  p.start(SK::Subscript);
  if p.peek() != SK::Colon {
    test(p)?;
  }
  if p.eat(SK::Colon) {
    if at_expr(p.peek()) {
      test(p)?;
    }
    if p.peek() == SK::Colon {
      p.start(SK::SliceOp);
      p.bump();
      if at_expr(p.peek()) {
        test(p)?;
      }
      p.finish_node();
    }
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn exprlist(p: &mut Parser<'_>) -> Result {
  p.start(SK::ExprList);
  expr_or_star(p)?;
  while p.eat(SK::Comma) {
    if !at_star_or_expr(p.peek()) {
      break;
    }
    expr_or_star(p)?;
  }
  p.finish_node();
  Ok(())
}

fn expr_or_star(p: &mut Parser<'_>) -> Result {
  if p.peek() == SK::Star { star_expr(p) } else { expr(p) }
}

pub(crate) fn testlist(p: &mut Parser<'_>) -> Result {
  p.start(SK::Testlist);
  test(p)?;
  while p.eat(SK::Comma) {
    if !at_expr(p.peek()) {
      break;
    }
    test(p)?;
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn testlist_star_expr(p: &mut Parser<'_>) -> Result {
  p.start(SK::TestlistStarExpr);
  test_or_star(p)?;
  while p.eat(SK::Comma) {
    if !at_star_or_expr(p.peek()) {
      break;
    }
    test_or_star(p)?;
  }
  p.finish_node();
  Ok(())
}

fn test_or_star(p: &mut Parser<'_>) -> Result {
  if p.peek() == SK::Star { star_expr(p) } else { test(p) }
}

fn dictorsetmaker(p: &mut Parser<'_>) -> Result {
  p.start(SK::DictOrSetMaker);
  let is_dict = dict_or_set_item(p, None)?;
  if at_comp_for(p) {
    comp_for(p)?;
  } else {
    while p.eat(SK::Comma) {
      if p.peek() == SK::RCurly {
        break;
      }
      dict_or_set_item(p, Some(is_dict))?;
    }
  }
  p.finish_node();
  Ok(())
}

/// returns whether the item was a dict item.
fn dict_or_set_item(p: &mut Parser<'_>, want_dict: Option<bool>) -> Result<bool> {
  let is_dict = match p.peek() {
    SK::StarStar => {
      p.bump();
      expr(p)?;
      true
    }
    SK::Star => {
      star_expr(p)?;
      false
    }
    _ => {
      test(p)?;
      if p.eat(SK::Colon) {
        test(p)?;
        true
      } else {
        false
      }
    }
  };
  if want_dict.is_some_and(|w| w != is_dict) {
    return Err(p.error());
  }
  Ok(is_dict)
}

pub(crate) fn arglist(p: &mut Parser<'_>) -> Result {
  p.start(SK::ArgList);
  argument(p)?;
  while p.eat(SK::Comma) {
    if !(matches!(p.peek(), SK::Star | SK::StarStar) || at_expr(p.peek())) {
      break;
    }
    argument(p)?;
  }
  p.finish_node();
  Ok(())
}

fn argument(p: &mut Parser<'_>) -> Result {
  p.start(SK::Argument);
  if matches!(p.peek(), SK::Star | SK::StarStar) {
    p.bump();
    test(p)?;
  } else {
    test(p)?;
    if at_comp_for(p) {
      comp_for(p)?;
    } else if p.eat(SK::ColonEq) || p.eat(SK::Eq) {
      test(p)?;
    }
  }
  p.finish_node();
  Ok(())
}

fn at_comp_iter(p: &Parser<'_>) -> bool {
  matches!(p.peek(), SK::ForKw | SK::AsyncKw | SK::IfKw)
}

fn comp_iter(p: &mut Parser<'_>) -> Result {
  p.nest(|p| {
    p.start(SK::CompIter);
    if p.peek() == SK::IfKw {
      comp_if(p)?;
    } else {
      comp_for(p)?;
    }
    p.finish_node();
    Ok(())
  })
}

fn comp_for(p: &mut Parser<'_>) -> Result {
  p.start(SK::CompFor);
  p.eat(SK::AsyncKw);
  p.start(SK::SyncCompFor);
  p.expect(SK::ForKw)?;
  exprlist(p)?;
  p.expect(SK::InKw)?;
  or_test(p)?;
  if at_comp_iter(p) {
    comp_iter(p)?;
  }
  p.finish_node();
  p.finish_node();
  Ok(())
}

fn comp_if(p: &mut Parser<'_>) -> Result {
  p.start(SK::CompIf);
  p.bump();
  p.nest(test_nocond)?;
  if at_comp_iter(p) {
    comp_iter(p)?;
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn yield_expr(p: &mut Parser<'_>) -> Result {
  p.start(SK::YieldExpr);
  p.bump();
  if p.peek() == SK::FromKw || at_star_or_expr(p.peek()) {
    p.start(SK::YieldArg);
    if p.eat(SK::FromKw) {
      test(p)?;
    } else {
      testlist_star_expr(p)?;
    }
    p.finish_node();
  }
  p.finish_node();
  Ok(())
}

/// the parameters of a function (`typedargslist`) or lambda (`varargslist`), up to but not
/// including `end`. checks structure only, so e.g. defaults out of order get past here.
pub(crate) fn args_list(p: &mut Parser<'_>, kind: SK, param: SK, end: SK) -> Result {
  p.start(kind);
  let mut seen_star = false;
  let mut seen_slash = false;
  let mut any_positional = false;
  loop {
    match p.peek() {
      SK::Star if !seen_star => {
        p.bump();
        seen_star = true;
        if p.peek() == SK::Name {
          param_def(p, param)?;
        }
      }
      SK::StarStar => {
        p.bump();
        param_def(p, param)?;
        p.eat(SK::Comma);
        break;
      }
      SK::Slash if any_positional && !seen_slash && !seen_star => {
        p.bump();
        seen_slash = true;
      }
      SK::Name => {
        param_def(p, param)?;
        if p.eat(SK::Eq) {
          test(p)?;
        }
        any_positional = true;
      }
      _ => return Err(p.error()),
    }
    if !p.eat(SK::Comma) || p.peek() == end {
      break;
    }
  }
  p.finish_node();
  Ok(())
}

fn param_def(p: &mut Parser<'_>, kind: SK) -> Result {
  p.start(kind);
  p.expect(SK::Name)?;
  if kind == SK::Tfpdef && p.eat(SK::Colon) {
    test(p)?;
  }
  p.finish_node();
  Ok(())
}
