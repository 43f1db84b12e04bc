//! Tests for assignment and deletion targets.

use crate::check;

#[test]
fn call_in_tuple() {
  check::err(
    r"
x, f() = 1
## ^ err: cannot assign to function call
",
    "cannot assign to function call",
  );
}

#[test]
fn delete_call() {
  check::err(
    r"
del f()
##  ^ err: cannot delete function call
",
    "cannot delete function call",
  );
}

#[test]
fn aug_assign_illegal() {
  check::err("a + 1 += 1\n", "illegal expression for augmented assignment");
  check::err("a, b += 1\n", "illegal expression for augmented assignment");
}

#[test]
fn annotate_illegal() {
  check::err("[a, b]: int\n", "only single target (not list) can be annotated");
  check::err("a + b: int\n", "illegal target for annotation");
}

#[test]
fn assign_to_yield() {
  check::err(
    r"
x = yield = 1
##  ^ err: assignment to yield expression not possible
",
    "assignment to yield expression not possible",
  );
}

#[test]
fn constants() {
  check::err("__debug__ = 1\n", "cannot assign to __debug__");
  check::err("None = 1\n", "cannot assign to None");
  check::err("a.__debug__ = 1\n", "cannot assign to __debug__");
  check::err(
    r"
(a, 1) = x
##  ^ err: cannot assign to literal
",
    "cannot assign to literal",
  );
}

#[test]
fn other_kinds() {
  check::err("a if b else c = 1\n", "cannot assign to conditional expression");
  check::err("[x for x in y] = 1\n", "cannot assign to list comprehension");
  check::err("del (a, b + 1)\n", "cannot delete operator");
}

#[test]
fn for_store() {
  check::ok(
    "for a.b, c[0] in x: pass\n",
    "Module([For(Tuple([Attribute(Name(a, Load), b, Store), \
     Subscript(Name(c, Load), Index(Constant(0)), Store)], Store), Name(x, Load), [Pass], [])])",
  );
}

#[test]
fn with_tuple() {
  check::ok(
    "with a as (b, c): pass\n",
    "Module([With([withitem(Name(a, Load), Tuple([Name(b, Store), Name(c, Store)], Store))], \
     [Pass])])",
  );
}

#[test]
fn starred_store() {
  check::ok(
    "[a, *b] = c\n",
    "Module([Assign([List([Name(a, Store), Starred(Name(b, Store), Store)], Store)], \
     Name(c, Load))])",
  );
}
