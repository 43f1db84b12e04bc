//! Tests for expressions.

use crate::check::{self, Input, pos};
use python_ast::ExprKind;

#[track_caller]
fn expr(source: &str, want: &str) {
  assert_eq!(check::expr(source).to_string(), want);
}

#[test]
fn bool_ops() {
  expr(
    "a and b or not c",
    "BoolOp(Or, [BoolOp(And, [Name(a, Load), Name(b, Load)]), UnaryOp(Not, Name(c, Load))])",
  );
  expr("a or b or c", "BoolOp(Or, [Name(a, Load), Name(b, Load), Name(c, Load)])");
}

#[test]
fn unary_and_power() {
  expr("-x ** 2", "UnaryOp(USub, BinOp(Name(x, Load), Pow, Constant(2)))");
  expr("2 ** -1", "BinOp(Constant(2), Pow, UnaryOp(USub, Constant(1)))");
  expr("+~a", "UnaryOp(UAdd, UnaryOp(Invert, Name(a, Load)))");
}

#[test]
fn bit_ops() {
  expr(
    "a | b ^ c & d << 1",
    "BinOp(Name(a, Load), BitOr, BinOp(Name(b, Load), BitXor, \
     BinOp(Name(c, Load), BitAnd, BinOp(Name(d, Load), LShift, Constant(1)))))",
  );
}

#[test]
fn term_chain() {
  expr(
    "a * b / c // d % e @ f",
    "BinOp(BinOp(BinOp(BinOp(BinOp(Name(a, Load), Mult, Name(b, Load)), Div, Name(c, Load)), \
     FloorDiv, Name(d, Load)), Mod, Name(e, Load)), MatMult, Name(f, Load))",
  );
}

#[test]
fn if_exp() {
  expr("a if b else c", "IfExp(Name(b, Load), Name(a, Load), Name(c, Load))");
}

#[test]
fn lambda() {
  expr(
    "lambda x, y=1: x",
    "Lambda(arguments([], [arg(x), arg(y)], None, [], [], None, [Constant(1)]), Name(x, Load))",
  );
  expr("lambda: 0", "Lambda(arguments([], [], None, [], [], None, []), Constant(0))");
}

#[test]
fn compare_ops() {
  expr(
    "a not in b is not c",
    "Compare(Name(a, Load), [NotIn, IsNot], [Name(b, Load), Name(c, Load)])",
  );
  expr(
    "a == b != c >= d",
    "Compare(Name(a, Load), [Eq, NotEq, GtE], [Name(b, Load), Name(c, Load), Name(d, Load)])",
  );
}

#[test]
fn flufl() {
  let e = Input::new("1 <> 2").mode(python_front::Mode::Eval).flufl();
  e.ok("Expression(Compare(Constant(1), [NotEq], [Constant(2)]))");
  check::err(
    r"
x = 1 <> 2
##    ^ err: invalid syntax
",
    "invalid syntax",
  );
  Input::new(
    r"
x = 1 != 2
##    ^ err: with Barry as BDFL, use '<>' instead of '!='
",
  )
  .flufl()
  .err("with Barry as BDFL, use '<>' instead of '!='");
}

#[test]
fn call() {
  expr(
    "f(a, *b, c=1, **d)",
    "Call(Name(f, Load), [Name(a, Load), Starred(Name(b, Load), Load)], \
     [keyword(c, Constant(1)), keyword(None, Name(d, Load))])",
  );
  expr("f()", "Call(Name(f, Load), [], [])");
  expr("f(a,)", "Call(Name(f, Load), [Name(a, Load)], [])");
}

#[test]
fn call_generator() {
  let e = check::expr("f(x for x in y)");
  assert_eq!(
    e.to_string(),
    "Call(Name(f, Load), [GeneratorExp(Name(x, Load), \
     [comprehension(Name(x, Store), Name(y, Load), [], 0)])], [])"
  );
  let ExprKind::Call { args, .. } = &e.kind else { panic!("not a call") };
  assert_eq!(args[0].span.start, pos(1, 1));
  assert_eq!(args[0].span.end, pos(1, 15));
}

#[test]
fn call_walrus() {
  expr("f(y := 1)", "Call(Name(f, Load), [NamedExpr(Name(y, Store), Constant(1))], [])");
}

#[test]
fn call_errors() {
  check::err(
    r"
f(**a, *b)
##     ^ err: iterable argument unpacking follows keyword argument unpacking
",
    "iterable argument unpacking follows keyword argument unpacking",
  );
  check::err(
    r"
f(**a, b)
##     ^ err: positional argument follows keyword argument unpacking
",
    "positional argument follows keyword argument unpacking",
  );
  check::err(
    r"
f(x for x in y, 1)
##^ err: Generator expression must be parenthesized if not sole argument
",
    "Generator expression must be parenthesized if not sole argument",
  );
  check::err(
    r#"
f(a.b=1)
##^ err: expression cannot contain assignment, perhaps you meant "=="?
"#,
    "expression cannot contain assignment, perhaps you meant \"==\"?",
  );
  check::err(
    r"
f(a=1, a=2)
##     ^ err: keyword argument repeated: 'a'
",
    "keyword argument repeated: 'a'",
  );
  check::err("f(True=1)\n", "cannot assign to True");
  check::err("f(__debug__=1)\n", "cannot assign to __debug__");
}

#[test]
fn trailers() {
  expr(
    "a.b[1:2:3]",
    "Subscript(Attribute(Name(a, Load), b, Load), Slice(Constant(1), Constant(2), Constant(3)), \
     Load)",
  );
  expr("a[:]", "Subscript(Name(a, Load), Slice(None, None, None), Load)");
  expr("a[::2]", "Subscript(Name(a, Load), Slice(None, None, Constant(2)), Load)");
  expr(
    "a[1, 2]",
    "Subscript(Name(a, Load), Index(Tuple([Constant(1), Constant(2)], Load)), Load)",
  );
  expr(
    "a[1:, ...]",
    "Subscript(Name(a, Load), ExtSlice([Slice(Constant(1), None, None), \
     Index(Constant(Ellipsis))]), Load)",
  );
}

#[test]
fn trailer_spans() {
  let e = check::expr("a.b(c)");
  assert_eq!(e.span.start, pos(1, 0));
  assert_eq!(e.span.end, pos(1, 6));
  let ExprKind::Call { func, .. } = &e.kind else { panic!("not a call") };
  assert_eq!(func.span.start, pos(1, 0));
  assert_eq!(func.span.end, pos(1, 3));
}

#[test]
fn comprehensions() {
  expr(
    "[x for x in y if x if z for w in x]",
    "ListComp(Name(x, Load), [comprehension(Name(x, Store), Name(y, Load), \
     [Name(x, Load), Name(z, Load)], 0), comprehension(Name(w, Store), Name(x, Load), [], 0)])",
  );
  expr(
    "{k: v for k, v in x}",
    "DictComp(Name(k, Load), Name(v, Load), \
     [comprehension(Tuple([Name(k, Store), Name(v, Store)], Store), Name(x, Load), [], 0)])",
  );
  expr(
    "{x async for x in y}",
    "SetComp(Name(x, Load), [comprehension(Name(x, Store), Name(y, Load), [], 1)])",
  );
  expr(
    "(x for x in y)",
    "GeneratorExp(Name(x, Load), [comprehension(Name(x, Store), Name(y, Load), [], 0)])",
  );
}

#[test]
fn comprehension_errors() {
  check::err(
    r"
x = [*a for a in b]
##   ^ err: iterable unpacking cannot be used in comprehension
",
    "iterable unpacking cannot be used in comprehension",
  );
  check::err(
    r"
x = {**a for a in b}
##   ^ err: dict unpacking cannot be used in dict comprehension
",
    "dict unpacking cannot be used in dict comprehension",
  );
}

#[test]
fn displays() {
  expr("{1, *a}", "Set([Constant(1), Starred(Name(a, Load), Load)])");
  expr("{**a, 'b': 1}", "Dict([None, Constant('b')], [Name(a, Load), Constant(1)])");
  expr("{}", "Dict([], [])");
  expr("()", "Tuple([], Load)");
  expr("(1,)", "Tuple([Constant(1)], Load)");
  expr("[1, 2]", "List([Constant(1), Constant(2)], Load)");
  expr("[]", "List([], Load)");
  expr("(a)", "Name(a, Load)");
}

#[test]
fn paren_spans() {
  let e = check::expr("(a)");
  assert_eq!(e.span.start, pos(1, 1));
  let e = check::expr("(a, b)");
  assert_eq!(e.span.start, pos(1, 0));
  assert_eq!(e.span.end, pos(1, 6));
}

#[test]
fn yield_and_await() {
  expr("(yield)", "Yield(None)");
  expr("(yield a, b)", "Yield(Tuple([Name(a, Load), Name(b, Load)], Load))");
  expr("await x", "Await(Name(x, Load))");
  expr("await f()", "Await(Call(Name(f, Load), [], []))");
}

#[test]
fn named_expr() {
  expr(
    "(y := f(x))",
    "NamedExpr(Name(y, Store), Call(Name(f, Load), [Name(x, Load)], []))",
  );
  check::err(
    r"
x = (a.b := 1)
##   ^ err: cannot use assignment expressions with attribute
",
    "cannot use assignment expressions with attribute",
  );
}
