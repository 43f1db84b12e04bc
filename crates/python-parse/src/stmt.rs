//! Statements and the roots.

use crate::error::Kind;
use crate::expr::{
  arglist, args_list, at_expr, at_star_or_expr, exprlist, namedexpr_test, test, testlist,
  testlist_star_expr, yield_expr,
};
use crate::parser::{Parser, Result};
use python_syntax::SyntaxKind as SK;

pub(crate) fn file_input(p: &mut Parser<'_>) -> Result {
  p.start(SK::FileInput);
  loop {
    match p.peek() {
      SK::EndMarker => {
        p.bump();
        break;
      }
      SK::Newline => p.bump(),
      _ => stmt(p)?,
    }
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn eval_input(p: &mut Parser<'_>) -> Result {
  p.start(SK::EvalInput);
  // leading whitespace is allowed, and closed at the end by a dedent.
  p.eat(SK::Indent);
  testlist(p)?;
  while matches!(p.peek(), SK::Newline | SK::Dedent) {
    p.bump();
  }
  p.expect(SK::EndMarker)?;
  p.finish_node();
  Ok(())
}

pub(crate) fn single_input(p: &mut Parser<'_>) -> Result {
  p.start(SK::SingleInput);
  match p.peek() {
    SK::Newline => p.bump(),
    k if at_compound(k) => {
      compound_stmt(p)?;
      p.eat(SK::Newline);
    }
    _ => simple_stmt(p)?,
  }
  if !p.eat(SK::EndMarker) {
    return Err(p.error_kind(Kind::MultipleStatements));
  }
  p.finish_node();
  Ok(())
}

pub(crate) fn func_type_input(p: &mut Parser<'_>) -> Result {
  p.start(SK::FuncTypeInput);
  p.start(SK::FuncType);
  p.expect(SK::LRound)?;
  if p.peek() != SK::RRound {
    p.start(SK::TypeList);
    loop {
      match p.peek() {
        SK::Star => {
          p.bump();
          if at_expr(p.peek()) {
            test(p)?;
          }
        }
        SK::StarStar => {
          p.bump();
          test(p)?;
        }
        _ => test(p)?,
      }
      if !p.eat(SK::Comma) || p.peek() == SK::RRound {
        break;
      }
    }
    p.finish_node();
  }
  p.expect(SK::RRound)?;
  p.expect(SK::Arrow)?;
  test(p)?;
  p.finish_node();
  while p.eat(SK::Newline) {}
  p.expect(SK::EndMarker)?;
  p.finish_node();
  Ok(())
}

fn at_compound(kind: SK) -> bool {
  matches!(
    kind,
    SK::IfKw
      | SK::WhileKw
      | SK::ForKw
      | SK::TryKw
      | SK::WithKw
      | SK::DefKw
      | SK::ClassKw
      | SK::At
      | SK::AsyncKw
  )
}

fn stmt(p: &mut Parser<'_>) -> Result {
  if p.peek() == SK::Indent {
    return Err(p.error_kind(Kind::UnexpectedIndent));
  }
  p.nest(|p| {
    p.start(SK::Stmt);
    if at_compound(p.peek()) {
      compound_stmt(p)?;
    } else {
      simple_stmt(p)?;
    }
    p.finish_node();
    Ok(())
  })
}

fn simple_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::SimpleStmt);
  small_stmt(p)?;
  while p.eat(SK::Semi) {
    if p.peek() == SK::Newline {
      break;
    }
    small_stmt(p)?;
  }
  p.expect(SK::Newline)?;
  p.finish_node();
  Ok(())
}

fn small_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::SmallStmt);
  match p.peek() {
    SK::DelKw => {
      p.start(SK::DelStmt);
      p.bump();
      exprlist(p)?;
      p.finish_node();
    }
    SK::PassKw => {
      p.start(SK::PassStmt);
      p.bump();
      p.finish_node();
    }
    SK::BreakKw | SK::ContinueKw | SK::ReturnKw | SK::RaiseKw | SK::YieldKw => flow_stmt(p)?,
    SK::ImportKw | SK::FromKw => import_stmt(p)?,
    SK::GlobalKw => names_stmt(p, SK::GlobalStmt)?,
    SK::NonlocalKw => names_stmt(p, SK::NonlocalStmt)?,
    SK::AssertKw => {
      p.start(SK::AssertStmt);
      p.bump();
      test(p)?;
      if p.eat(SK::Comma) {
        test(p)?;
      }
      p.finish_node();
    }
    _ => expr_stmt(p)?,
  }
  p.finish_node();
  Ok(())
}

fn is_augassign(kind: SK) -> bool {
  matches!(
    kind,
    SK::PlusEq
      | SK::MinusEq
      | SK::StarEq
      | SK::AtEq
      | SK::SlashEq
      | SK::PercentEq
      | SK::AmpEq
      | SK::BarEq
      | SK::CaretEq
      | SK::LtLtEq
      | SK::GtGtEq
      | SK::StarStarEq
      | SK::SlashSlashEq
  )
}

fn yield_or(p: &mut Parser<'_>, f: fn(&mut Parser<'_>) -> Result) -> Result {
  if p.peek() == SK::YieldKw { yield_expr(p) } else { f(p) }
}

fn expr_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::ExprStmt);
  testlist_star_expr(p)?;
  match p.peek() {
    SK::Colon => {
      p.start(SK::AnnAssign);
      p.bump();
      test(p)?;
      if p.eat(SK::Eq) {
        yield_or(p, testlist_star_expr)?;
      }
      p.finish_node();
    }
    k if is_augassign(k) => {
      p.start(SK::AugAssign);
      p.bump();
      p.finish_node();
      yield_or(p, testlist)?;
    }
    _ => {
      while p.eat(SK::Eq) {
        yield_or(p, testlist_star_expr)?;
      }
    }
  }
  p.finish_node();
  Ok(())
}

fn flow_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::FlowStmt);
  match p.peek() {
    SK::BreakKw => {
      p.start(SK::BreakStmt);
      p.bump();
      p.finish_node();
    }
    SK::ContinueKw => {
      p.start(SK::ContinueStmt);
      p.bump();
      p.finish_node();
    }
    SK::ReturnKw => {
      p.start(SK::ReturnStmt);
      p.bump();
      if at_star_or_expr(p.peek()) {
        testlist_star_expr(p)?;
      }
      p.finish_node();
    }
    SK::RaiseKw => {
      p.start(SK::RaiseStmt);
      p.bump();
      if at_expr(p.peek()) {
        test(p)?;
        if p.eat(SK::FromKw) {
          test(p)?;
        }
      }
      p.finish_node();
    }
    _ => {
      p.start(SK::YieldStmt);
      yield_expr(p)?;
      p.finish_node();
    }
  }
  p.finish_node();
  Ok(())
}

fn import_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::ImportStmt);
  if p.peek() == SK::ImportKw {
    p.start(SK::ImportName);
    p.bump();
    p.start(SK::DottedAsNames);
    dotted_as_name(p)?;
    while p.eat(SK::Comma) {
      dotted_as_name(p)?;
    }
    p.finish_node();
    p.finish_node();
  } else {
    import_from(p)?;
  }
  p.finish_node();
  Ok(())
}

fn import_from(p: &mut Parser<'_>) -> Result {
  p.start(SK::ImportFrom);
  p.bump();
  let mut dots = false;
  while matches!(p.peek(), SK::Dot | SK::Ellipsis) {
    p.bump();
    dots = true;
  }
  if p.peek() == SK::Name {
    dotted_name(p)?;
  } else if !dots {
    return Err(p.error());
  }
  p.expect(SK::ImportKw)?;
  match p.peek() {
    SK::Star => p.bump(),
    SK::LRound => {
      p.bump();
      import_as_names(p)?;
      p.expect(SK::RRound)?;
    }
    _ => import_as_names(p)?,
  }
  p.finish_node();
  Ok(())
}

fn import_as_names(p: &mut Parser<'_>) -> Result {
  p.start(SK::ImportAsNames);
  import_as_name(p)?;
  while p.eat(SK::Comma) {
    if p.peek() != SK::Name {
      break;
    }
    import_as_name(p)?;
  }
  p.finish_node();
  Ok(())
}

fn import_as_name(p: &mut Parser<'_>) -> Result {
  p.start(SK::ImportAsName);
  p.expect(SK::Name)?;
  if p.eat(SK::AsKw) {
    p.expect(SK::Name)?;
  }
  p.finish_node();
  Ok(())
}

fn dotted_as_name(p: &mut Parser<'_>) -> Result {
  p.start(SK::DottedAsName);
  dotted_name(p)?;
  if p.eat(SK::AsKw) {
    p.expect(SK::Name)?;
  }
  p.finish_node();
  Ok(())
}

fn dotted_name(p: &mut Parser<'_>) -> Result {
  p.start(SK::DottedName);
  p.expect(SK::Name)?;
  while p.eat(SK::Dot) {
    p.expect(SK::Name)?;
  }
  p.finish_node();
  Ok(())
}

fn names_stmt(p: &mut Parser<'_>, kind: SK) -> Result {
  p.start(kind);
  p.bump();
  p.expect(SK::Name)?;
  while p.eat(SK::Comma) {
    p.expect(SK::Name)?;
  }
  p.finish_node();
  Ok(())
}

fn compound_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::CompoundStmt);
  match p.peek() {
    SK::IfKw => if_stmt(p)?,
    SK::WhileKw => while_stmt(p)?,
    SK::ForKw => for_stmt(p)?,
    SK::TryKw => try_stmt(p)?,
    SK::WithKw => with_stmt(p)?,
    SK::DefKw => funcdef(p)?,
    SK::ClassKw => classdef(p)?,
    SK::At => decorated(p)?,
    _ => {
      p.start(SK::AsyncStmt);
      p.bump();
      match p.peek() {
        SK::DefKw => funcdef(p)?,
        SK::WithKw => with_stmt(p)?,
        SK::ForKw => for_stmt(p)?,
        _ => return Err(p.error()),
      }
      p.finish_node();
    }
  }
  p.finish_node();
  Ok(())
}

/// `: suite`
fn block(p: &mut Parser<'_>) -> Result {
  p.expect(SK::Colon)?;
  suite(p)
}

fn else_block(p: &mut Parser<'_>) -> Result {
  if p.eat(SK::ElseKw) {
    block(p)?;
  }
  Ok(())
}

fn if_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::IfStmt);
  p.bump();
  namedexpr_test(p)?;
  block(p)?;
  while p.eat(SK::ElifKw) {
    namedexpr_test(p)?;
    block(p)?;
  }
  else_block(p)?;
  p.finish_node();
  Ok(())
}

fn while_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::WhileStmt);
  p.bump();
  namedexpr_test(p)?;
  block(p)?;
  else_block(p)?;
  p.finish_node();
  Ok(())
}

fn for_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::ForStmt);
  p.bump();
  exprlist(p)?;
  p.expect(SK::InKw)?;
  testlist(p)?;
  block(p)?;
  else_block(p)?;
  p.finish_node();
  Ok(())
}

fn try_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::TryStmt);
  p.bump();
  block(p)?;
  if p.eat(SK::FinallyKw) {
    block(p)?;
  } else {
    if p.peek() != SK::ExceptKw {
      return Err(p.error());
    }
    while p.peek() == SK::ExceptKw {
      p.start(SK::ExceptClause);
      p.bump();
      if at_expr(p.peek()) {
        test(p)?;
        if p.eat(SK::AsKw) {
          p.expect(SK::Name)?;
        }
      }
      p.finish_node();
      block(p)?;
    }
    else_block(p)?;
    if p.eat(SK::FinallyKw) {
      block(p)?;
    }
  }
  p.finish_node();
  Ok(())
}

fn with_stmt(p: &mut Parser<'_>) -> Result {
  p.start(SK::WithStmt);
  p.bump();
  with_item(p)?;
  while p.eat(SK::Comma) {
    with_item(p)?;
  }
  block(p)?;
  p.finish_node();
  Ok(())
}

fn with_item(p: &mut Parser<'_>) -> Result {
  p.start(SK::WithItem);
  test(p)?;
  if p.eat(SK::AsKw) {
    crate::expr::expr(p)?;
  }
  p.finish_node();
  Ok(())
}

fn suite(p: &mut Parser<'_>) -> Result {
  p.start(SK::Suite);
  if p.eat(SK::Newline) {
    if p.peek() != SK::Indent {
      return Err(p.error_kind(Kind::ExpectedIndent));
    }
    p.bump();
    while p.peek() != SK::Dedent {
      if p.peek() == SK::EndMarker {
        return Err(p.error());
      }
      stmt(p)?;
    }
    p.bump();
  } else {
    simple_stmt(p)?;
  }
  p.finish_node();
  Ok(())
}

fn funcdef(p: &mut Parser<'_>) -> Result {
  p.start(SK::Funcdef);
  p.expect(SK::DefKw)?;
  p.expect(SK::Name)?;
  p.start(SK::Parameters);
  p.expect(SK::LRound)?;
  if p.peek() != SK::RRound {
    args_list(p, SK::TypedArgsList, SK::Tfpdef, SK::RRound)?;
  }
  p.expect(SK::RRound)?;
  p.finish_node();
  if p.eat(SK::Arrow) {
    test(p)?;
  }
  block(p)?;
  p.finish_node();
  Ok(())
}

fn classdef(p: &mut Parser<'_>) -> Result {
  p.start(SK::Classdef);
  p.bump();
  p.expect(SK::Name)?;
  if p.eat(SK::LRound) {
    if p.peek() != SK::RRound {
      arglist(p)?;
    }
    p.expect(SK::RRound)?;
  }
  block(p)?;
  p.finish_node();
  Ok(())
}

fn decorated(p: &mut Parser<'_>) -> Result {
  p.start(SK::Decorated);
  p.start(SK::Decorators);
  while p.peek() == SK::At {
    p.start(SK::Decorator);
    p.bump();
    dotted_name(p)?;
    if p.eat(SK::LRound) {
      if p.peek() != SK::RRound {
        arglist(p)?;
      }
      p.expect(SK::RRound)?;
    }
    p.expect(SK::Newline)?;
    p.finish_node();
  }
  p.finish_node();
  match p.peek() {
    SK::ClassKw => classdef(p)?,
    SK::DefKw => funcdef(p)?,
    SK::AsyncKw => {
      p.start(SK::AsyncFuncdef);
      p.bump();
      funcdef(p)?;
      p.finish_node();
    }
    _ => return Err(p.error()),
  }
  p.finish_node();
  Ok(())
}
