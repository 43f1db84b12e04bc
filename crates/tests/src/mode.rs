//! Tests for the modes other than a whole module.

use crate::check::{Input, pos};
use python_front::Mode;

#[test]
fn eval_tuple() {
  Input::new("1, 2").mode(Mode::Eval).ok("Expression(Tuple([Constant(1), Constant(2)], Load))");
  Input::new("x\n\n").mode(Mode::Eval).ok("Expression(Name(x, Load))");
}

#[test]
fn eval_statement() {
  Input::new("x = 1").mode(Mode::Eval).err("invalid syntax");
}

#[test]
fn single_simple() {
  Input::new("x = 1\n")
    .mode(Mode::Single)
    .ok("Interactive([Assign([Name(x, Store)], Constant(1))])");
  Input::new("a; b\n")
    .mode(Mode::Single)
    .ok("Interactive([Expr(Name(a, Load)), Expr(Name(b, Load))])");
  Input::new("\n").mode(Mode::Single).ok("Interactive([])");
}

#[test]
fn single_compound() {
  Input::new("if a:\n  b\n")
    .mode(Mode::Single)
    .ok("Interactive([If(Name(a, Load), [Expr(Name(b, Load))], [])])");
}

#[test]
fn single_many() {
  Input::new("x = 1\ny = 2\n")
    .mode(Mode::Single)
    .err("multiple statements found while compiling a single statement");
}

#[test]
fn func_type() {
  Input::new("(int, str) -> bool")
    .mode(Mode::FuncType)
    .ok("FunctionType([Name(int, Load), Name(str, Load)], Name(bool, Load))");
  Input::new("() -> None").mode(Mode::FuncType).ok("FunctionType([], Constant(None))");
}

#[test]
fn parse_mode() {
  assert_eq!("exec".parse::<Mode>().ok(), Some(Mode::Exec));
  assert_eq!("eval".parse::<Mode>().ok(), Some(Mode::Eval));
  assert_eq!("single".parse::<Mode>().ok(), Some(Mode::Single));
  assert_eq!("func_type".parse::<Mode>().ok(), Some(Mode::FuncType));
  let e = "module".parse::<Mode>().unwrap_err();
  assert_eq!(e.to_string(), "mode must be one of 'exec', 'eval', 'single', 'func_type'");
}

#[test]
fn filename_on_parse_error() {
  let e = Input::new("x = = 1\n").filename("a.py").err("invalid syntax");
  assert_eq!(e.pos, pos(1, 4));
  assert_eq!(e.to_string(), "a.py:1:4: invalid syntax");
  assert_eq!(e.text.as_deref(), Some("x = = 1"));
}

#[test]
fn default_filename() {
  let e = Input::new("x = = 1\n").err("invalid syntax");
  assert_eq!(e.filename.as_deref(), Some("<string>"));
}
