//! Tests for rejecting constructs newer than the configured version.

use crate::check::Input;

#[track_caller]
fn too_new(source: &str, minor: u32, want: &str) {
  Input::new(source).version(minor).err(want);
}

#[test]
fn three_five() {
  let want = "Async functions are only supported in Python 3.5 and greater";
  too_new("async def f(): pass\n", 4, want);
  too_new("async def f():\n  async for x in y: pass\n", 4, want);
  let want = "The '@' operator is only supported in Python 3.5 and greater";
  too_new("a @ b\n", 4, want);
  too_new("a @= b\n", 4, want);
  too_new("await x\n", 4, "Await expressions are only supported in Python 3.5 and greater");
}

#[test]
fn three_six() {
  too_new(
    "x: int = 1\n",
    5,
    "Variable annotation syntax is only supported in Python 3.6 and greater",
  );
  too_new(
    "1_000\n",
    5,
    "Underscores in numeric literals are only supported in Python 3.6 and greater",
  );
  too_new("f'a'\n", 5, "Format strings are only supported in Python 3.6 and greater");
  too_new(
    "[x async for x in y]\n",
    5,
    "Async comprehensions are only supported in Python 3.6 and greater",
  );
}

#[test]
fn three_eight() {
  too_new(
    "f'{x=}'\n",
    7,
    "f-string: self documenting expressions are only supported in Python 3.8 and greater",
  );
  too_new("(a := 1)\n", 7, "The ':=' operator is only supported in Python 3.8 and greater");
  too_new(
    "def f(a, /): pass\n",
    7,
    "Positional-only parameters are only supported in Python 3.8 and greater",
  );
}

#[test]
fn at_the_version() {
  Input::new("x: int = 1\n")
    .version(6)
    .ok("Module([AnnAssign(Name(x, Store), Name(int, Load), Constant(1), 1)])");
  Input::new("(a := 1)\n").version(8).ok("Module([Expr(NamedExpr(Name(a, Store), Constant(1)))])");
  Input::new("a @ b\n")
    .version(5)
    .ok("Module([Expr(BinOp(Name(a, Load), MatMult, Name(b, Load)))])");
}

#[test]
fn plain_strings_any_version() {
  Input::new("'a' 'b'\n").version(4).ok("Module([Expr(Constant('ab'))])");
}
