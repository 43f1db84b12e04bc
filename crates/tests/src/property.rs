//! The basic guarantees about the shape of the tree and the errors.

use crate::check::{self, Input, pos};
use diagnostic::SyntaxError;
use python_ast::{Expr, ExprKind, Mod, StmtKind};
use python_front::{CompileInfo, Mode};

#[test]
fn binop_span() {
  let stmts = check::stmts("x = 1 + 2\n");
  let StmtKind::Assign { value, .. } = &stmts[0].kind else { panic!("not an assign") };
  assert_eq!(value.to_string(), "BinOp(Constant(1), Add, Constant(2))");
  assert_eq!(value.span.start, pos(1, 4));
  assert_eq!(value.span.end, pos(1, 9));
}

#[test]
fn binop_left_assoc() {
  let e = check::expr("1 + 2 - 3");
  assert_eq!(e.to_string(), "BinOp(BinOp(Constant(1), Add, Constant(2)), Sub, Constant(3))");
  assert_eq!(e.span.end, pos(1, 9));
  let ExprKind::BinOp { left, .. } = &e.kind else { panic!("not a binop") };
  assert_eq!(left.span.start, pos(1, 0));
  assert_eq!(left.span.end, pos(1, 5));
}

#[test]
fn compare_chain() {
  let e = check::expr("1 < 2 < 3");
  assert_eq!(e.to_string(), "Compare(Constant(1), [Lt, Lt], [Constant(2), Constant(3)])");
}

#[test]
fn positional_after_keyword() {
  check::err(
    r"
f(a=1, b)
##     ^ err: positional argument follows keyword argument
",
    "positional argument follows keyword argument",
  );
}

#[test]
fn conversion_and_nested_spec() {
  let e = check::expr(r#"f"{x!r:>{width}}""#);
  assert_eq!(
    e.to_string(),
    "JoinedStr([FormattedValue(Name(x, Load), r, \
     JoinedStr([Constant('>'), FormattedValue(Name(width, Load), None, None)]))])"
  );
}

#[test]
fn adjacent_strings() {
  let e = check::expr(r#""a" "b""#);
  assert_eq!(e.to_string(), "Constant('ab')");
}

#[test]
fn annotate_tuple() {
  check::err("(x, y): int = v\n", "only single target (not tuple) can be annotated");
}

#[test]
fn self_documenting() {
  let e = check::expr(r#"f"{x=}""#);
  assert_eq!(e.to_string(), "JoinedStr([Constant('x='), FormattedValue(Name(x, Load), r, None)])");
}

#[test]
fn doubled_braces() {
  let e = check::expr(r#"f"{{literal}}""#);
  assert_eq!(e.to_string(), "JoinedStr([Constant('{literal}')])");
}

#[test]
fn missing_close_brace() {
  Input::new(r#"f"{x""#).mode(Mode::Eval).err("f-string: expecting '}'");
}

#[derive(Debug)]
struct Fragments<'a>(&'a CompileInfo);

impl python_lower::CompileFragment for Fragments<'_> {
  fn compile_fragment(&self, text: &str) -> Result<Expr, SyntaxError> {
    match python_front::compile(text, Mode::Eval, self.0)? {
      Mod::Expression(e) => Ok(*e),
      m => panic!("not an expression: {m}"),
    }
  }
}

#[test]
fn idempotent() {
  let source = r#"
@dec(1)
def f(a, /, *b, c=1, **d) -> int:
    x: int = a + b[1:2, ...]
    return f"{a!r:>{c}}" "x" "y", [y async for y in z if y]
"#;
  let info = CompileInfo::default();
  let fragments = Fragments(&info);
  let lex = python_lex::get(source).expect("lex");
  let tree = python_parse::get(&lex.tokens, Mode::Exec).expect("parse");
  let a = python_lower::build(tree.root(), &info, &fragments).expect("build");
  let b = python_lower::build(tree.root(), &info, &fragments).expect("build again");
  pretty_assertions::assert_eq!(a, b);
  assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn nested_spec_ok() {
  let e = check::expr(r#"f"{x:{y}}""#);
  assert_eq!(
    e.to_string(),
    "JoinedStr([FormattedValue(Name(x, Load), None, \
     JoinedStr([FormattedValue(Name(y, Load), None, None)]))])"
  );
}

#[test]
fn spec_too_deep() {
  let s = r#"f"{x:{y:{z:{w}}}}""#;
  Input::new(s).mode(Mode::Eval).err("f-string: expressions nested too deeply");
  let s = r#"f"{x:{y:{z}}}""#;
  Input::new(s).mode(Mode::Eval).err("f-string: expressions nested too deeply");
}
