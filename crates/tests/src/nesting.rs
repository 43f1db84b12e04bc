//! Tests for limits on how deeply things may nest.

use crate::check::{Input, pos};
use python_front::Mode;

fn parens(n: usize) -> String {
  format!("{}x{}", "(".repeat(n), ")".repeat(n))
}

#[test]
fn parens_ok() {
  Input::new(&parens(30)).mode(Mode::Eval).ok("Expression(Name(x, Load))");
}

#[test]
fn parens_too_deep() {
  Input::new(&parens(30)).mode(Mode::Eval).max_nesting(20).err("too many nested expressions");
}

fn blocks(n: usize) -> String {
  let mut ret = String::new();
  for i in 0..n {
    ret.push_str(&" ".repeat(i));
    ret.push_str("if a:\n");
  }
  ret.push_str(&" ".repeat(n));
  ret.push_str("pass\n");
  ret
}

#[test]
fn blocks_ok() {
  let mut want = "Pass".to_owned();
  for _ in 0..3 {
    want = format!("If(Name(a, Load), [{want}], [])");
  }
  Input::new(&blocks(3)).ok(&format!("Module([{want}])"));
}

#[test]
fn blocks_too_deep() {
  Input::new(&blocks(30)).max_nesting(20).err("too many nested expressions");
}

const THREE_DEEP: &str = r#"f'''{f"{f'{a}'}"}'''"#;

#[test]
fn fragments_ok() {
  Input::new(THREE_DEEP).mode(Mode::Eval).max_nesting(3).ok(
    "Expression(JoinedStr([FormattedValue(JoinedStr([FormattedValue(JoinedStr([\
     FormattedValue(Name(a, Load), None, None)]), None, None)]), None, None)]))",
  );
}

#[test]
fn fragments_too_deep() {
  Input::new(THREE_DEEP).mode(Mode::Eval).max_nesting(2).err("too many nested expressions");
}

fn chain(n: usize) -> String {
  format!("x = {}\n", vec!["a"; n].join(" + "))
}

#[test]
fn long_chain_ok() {
  let got = crate::check::stmts(&chain(500));
  assert_eq!(got.len(), 1);
}

#[test]
fn long_chain_too_deep() {
  let e = Input::new(&chain(100_000)).err("too many nested expressions");
  assert_eq!(e.pos, pos(1, 4));
  Input::new(&chain(30)).max_nesting(20).err("too many nested expressions");
}

#[test]
fn long_trailers_too_deep() {
  let source = format!("x = a{}\n", ".b".repeat(50_000));
  let e = Input::new(&source).err("too many nested expressions");
  assert_eq!(e.pos, pos(1, 4));
  let source = format!("f(){}\n", "()".repeat(30));
  Input::new(&source).max_nesting(20).err("too many nested expressions");
}

#[test]
fn long_elif_too_deep() {
  let mut source = "if a:\n  pass\n".to_owned();
  for _ in 0..5_000 {
    source.push_str("elif a:\n  pass\n");
  }
  let e = Input::new(&source).err("too many nested expressions");
  assert_eq!(e.pos, pos(1, 0));
}
