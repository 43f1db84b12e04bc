//! Tests for parameter lists.

use crate::check;

#[test]
fn all_kinds() {
  check::ok(
    "def f(a, b=1, *c, d, e=2, **g): pass\n",
    "Module([FunctionDef(f, arguments([], [arg(a), arg(b)], arg(c), [None, Constant(2)], \
     [arg(d), arg(e)], arg(g), [Constant(1)]), [Pass], [], None)])",
  );
}

#[test]
fn bare_star() {
  check::ok(
    "def f(*, a): pass\n",
    "Module([FunctionDef(f, arguments([], [], None, [None], [arg(a)], None, []), [Pass], [], \
     None)])",
  );
}

#[test]
fn positional_only() {
  check::ok(
    "def f(a, /): pass\n",
    "Module([FunctionDef(f, arguments([arg(a)], [], None, [], [], None, []), [Pass], [], None)])",
  );
  check::ok(
    "def f(a, /, b, *, c): pass\n",
    "Module([FunctionDef(f, arguments([arg(a)], [arg(b)], None, [None], [arg(c)], None, []), \
     [Pass], [], None)])",
  );
}

#[test]
fn annotated_default() {
  check::ok(
    "def f(a: int = 1) -> None: pass\n",
    "Module([FunctionDef(f, arguments([], [arg(a, Name(int, Load))], None, [], [], None, \
     [Constant(1)]), [Pass], [], Constant(None))])",
  );
}

#[test]
fn lambda_star() {
  check::ok(
    "lambda *a, **k: 0\n",
    "Module([Expr(Lambda(arguments([], [], arg(a), [], [], arg(k), []), Constant(0)))])",
  );
}

#[test]
fn non_default_after_default() {
  check::err(
    r"
def f(a=1, b): pass
##    ^ err: non-default argument follows default argument
",
    "non-default argument follows default argument",
  );
}

#[test]
fn bare_star_alone() {
  check::err(
    r"
def f(*): pass
##    ^ err: named arguments must follow bare *
",
    "named arguments must follow bare *",
  );
  check::err(
    r"
def f(*, **k): pass
##       ^ err: named arguments must follow bare *
",
    "named arguments must follow bare *",
  );
}

#[test]
fn debug_param() {
  check::err("def f(__debug__): pass\n", "cannot assign to __debug__");
  check::err("lambda __debug__: 0\n", "cannot assign to __debug__");
}
