//! Tests for statements.

use crate::check::{self, pos};
use indoc::indoc;
use python_ast::StmtKind;

#[test]
fn assign_chain() {
  check::ok("x = y = 1\n", "Module([Assign([Name(x, Store), Name(y, Store)], Constant(1))])");
}

#[test]
fn assign_starred() {
  check::ok(
    "a, *b = c\n",
    "Module([Assign([Tuple([Name(a, Store), Starred(Name(b, Store), Store)], Store)], \
     Name(c, Load))])",
  );
}

#[test]
fn aug_assign() {
  check::ok("x += 1\n", "Module([AugAssign(Name(x, Store), Add, Constant(1))])");
  check::ok(
    "a.b //= c\n",
    "Module([AugAssign(Attribute(Name(a, Load), b, Store), FloorDiv, Name(c, Load))])",
  );
}

#[test]
fn ann_assign() {
  check::ok("x: int = 1\n", "Module([AnnAssign(Name(x, Store), Name(int, Load), Constant(1), 1)])");
  check::ok("(x): int\n", "Module([AnnAssign(Name(x, Store), Name(int, Load), None, 0)])");
  check::ok(
    "a.b: int\n",
    "Module([AnnAssign(Attribute(Name(a, Load), b, Store), Name(int, Load), None, 0)])",
  );
}

#[test]
fn delete() {
  check::ok(
    "del a, b[0]\n",
    "Module([Delete([Name(a, Del), Subscript(Name(b, Load), Index(Constant(0)), Del)])])",
  );
}

#[test]
fn semicolons() {
  check::ok("a; b\n", "Module([Expr(Name(a, Load)), Expr(Name(b, Load))])");
}

#[test]
fn import() {
  check::ok("import a.b.c as d, e\n", "Module([Import([alias(a.b.c, d), alias(e)])])");
  check::ok(
    "from ..a import (b as c, d)\n",
    "Module([ImportFrom(a, [alias(b, c), alias(d)], 2)])",
  );
  check::ok("from . import *\n", "Module([ImportFrom(None, [alias(*)], 1)])");
  check::ok("from ...a.b import c\n", "Module([ImportFrom(a.b, [alias(c)], 3)])");
}

#[test]
fn import_trailing_comma() {
  check::err(
    r"
from a import b,
##            ^ err: trailing comma not allowed without surrounding parentheses
",
    "trailing comma not allowed without surrounding parentheses",
  );
}

#[test]
fn global_nonlocal() {
  check::ok("global a, b\nnonlocal c\n", "Module([Global([a, b]), Nonlocal([c])])");
}

#[test]
fn if_elif_else() {
  let source = indoc! {"
    if a:
        pass
    elif b:
        x
    else:
        y
  "};
  let m = check::ok(
    source,
    "Module([If(Name(a, Load), [Pass], \
     [If(Name(b, Load), [Expr(Name(x, Load))], [Expr(Name(y, Load))])])])",
  );
  let python_ast::Mod::Module(stmts) = m else { panic!("not a module") };
  assert_eq!(stmts[0].span.start, pos(1, 0));
  assert_eq!(stmts[0].span.end, pos(6, 5));
  let StmtKind::If { orelse, .. } = &stmts[0].kind else { panic!("not an if") };
  assert_eq!(orelse[0].span.start, pos(3, 0));
  assert_eq!(orelse[0].span.end, pos(6, 5));
}

#[test]
fn for_else() {
  let source = indoc! {"
    for i, j in x:
        break
    else:
        continue
  "};
  check::ok(
    source,
    "Module([For(Tuple([Name(i, Store), Name(j, Store)], Store), Name(x, Load), [Break], \
     [Continue])])",
  );
}

#[test]
fn while_loop() {
  check::ok("while x: pass\n", "Module([While(Name(x, Load), [Pass], [])])");
}

#[test]
fn try_all() {
  let source = indoc! {"
    try:
        pass
    except E as e:
        pass
    except:
        pass
    else:
        pass
    finally:
        pass
  "};
  check::ok(
    source,
    "Module([Try([Pass], [ExceptHandler(Name(E, Load), e, [Pass]), \
     ExceptHandler(None, None, [Pass])], [Pass], [Pass])])",
  );
}

#[test]
fn try_finally() {
  check::ok("try: pass\nfinally: pass\n", "Module([Try([Pass], [], [], [Pass])])");
}

#[test]
fn with() {
  check::ok(
    "with a as b, c: pass\n",
    "Module([With([withitem(Name(a, Load), Name(b, Store)), withitem(Name(c, Load), None)], \
     [Pass])])",
  );
}

#[test]
fn def() {
  let stmts = check::stmts("def f(x: int) -> str: return x\n");
  assert_eq!(
    stmts[0].to_string(),
    "FunctionDef(f, arguments([], [arg(x, Name(int, Load))], None, [], [], None, []), \
     [Return(Name(x, Load))], [], Name(str, Load))"
  );
  assert_eq!(stmts[0].span.start, pos(1, 0));
  assert_eq!(stmts[0].span.end, pos(1, 30));
}

#[test]
fn class() {
  check::ok(
    "class A(B, metaclass=M): pass\n",
    "Module([ClassDef(A, [Name(B, Load)], [keyword(metaclass, Name(M, Load))], [Pass], [])])",
  );
  check::ok("class A(): pass\n", "Module([ClassDef(A, [], [], [Pass], [])])");
}

#[test]
fn class_generator_base() {
  check::err(
    r"
class A(x for x in y): pass
##      ^ err: generator expression can't be used as bases of class definition
",
    "generator expression can't be used as bases of class definition",
  );
}

#[test]
fn decorators() {
  let source = indoc! {"
    @a.b
    @c()
    @d(1)
    def f(): pass
  "};
  check::ok(
    source,
    "Module([FunctionDef(f, arguments([], [], None, [], [], None, []), [Pass], \
     [Attribute(Name(a, Load), b, Load), Call(Name(c, Load), [], []), \
     Call(Name(d, Load), [Constant(1)], [])], None)])",
  );
}

#[test]
fn async_stmts() {
  let source = indoc! {"
    async def f():
        async for x in y:
            await z
        async with a:
            pass
  "};
  check::ok(
    source,
    "Module([AsyncFunctionDef(f, arguments([], [], None, [], [], None, []), \
     [AsyncFor(Name(x, Store), Name(y, Load), [Expr(Await(Name(z, Load)))], []), \
     AsyncWith([withitem(Name(a, Load), None)], [Pass])], [], None)])",
  );
}

#[test]
fn flow() {
  let source = indoc! {"
    def f():
        raise E from c
        raise
        assert x, 'm'
        return
  "};
  check::ok(
    source,
    "Module([FunctionDef(f, arguments([], [], None, [], [], None, []), \
     [Raise(Name(E, Load), Name(c, Load)), Raise(None, None), Assert(Name(x, Load), \
     Constant('m')), Return(None)], [], None)])",
  );
}

#[test]
fn yields() {
  let source = indoc! {"
    def g():
        yield 1
        x = yield
        yield from y
  "};
  check::ok(
    source,
    "Module([FunctionDef(g, arguments([], [], None, [], [], None, []), \
     [Expr(Yield(Constant(1))), Assign([Name(x, Store)], Yield(None)), \
     Expr(YieldFrom(Name(y, Load)))], [], None)])",
  );
}

#[test]
fn return_tuple() {
  check::ok(
    "def f(): return 1, 2\n",
    "Module([FunctionDef(f, arguments([], [], None, [], [], None, []), \
     [Return(Tuple([Constant(1), Constant(2)], Load))], [], None)])",
  );
}
