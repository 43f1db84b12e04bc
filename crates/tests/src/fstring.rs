//! Tests for interpolated string literals.

use crate::check::{self, Input, pos};
use python_ast::{Expr, ExprKind};
use python_front::Mode;

#[track_caller]
fn expr(source: &str, want: &str) {
  assert_eq!(check::expr(source).to_string(), want);
}

/// Returns the expression in the only replacement field of `e`.
#[track_caller]
fn field_value(e: &Expr) -> &Expr {
  let ExprKind::JoinedStr(values) = &e.kind else { panic!("not joined: {e}") };
  let [value] = values.as_slice() else { panic!("not one value: {e}") };
  let ExprKind::FormattedValue { value, .. } = &value.kind else { panic!("not formatted: {e}") };
  value
}

#[test]
fn literal_text() {
  expr(
    r#"f"a{b}c""#,
    "JoinedStr([Constant('a'), FormattedValue(Name(b, Load), None, None), Constant('c')])",
  );
  expr(r#"f"abc""#, "JoinedStr([Constant('abc')])");
  expr(r#"f"""#, "JoinedStr([])");
}

#[test]
fn conversions() {
  expr(r#"f"{x!s}""#, "JoinedStr([FormattedValue(Name(x, Load), s, None)])");
  expr(r#"f"{x!a}""#, "JoinedStr([FormattedValue(Name(x, Load), a, None)])");
  expr(
    r#"f"{x!r:>10}""#,
    "JoinedStr([FormattedValue(Name(x, Load), r, JoinedStr([Constant('>10')]))])",
  );
}

#[test]
fn mixed_with_plain() {
  expr(
    r#"'a' f"{b}" 'c'"#,
    "JoinedStr([Constant('a'), FormattedValue(Name(b, Load), None, None), Constant('c')])",
  );
  expr(r#"'a' f'b'"#, "JoinedStr([Constant('ab')])");
}

#[test]
fn debug_marker() {
  expr(
    r#"f"{x = }""#,
    "JoinedStr([Constant('x = '), FormattedValue(Name(x, Load), r, None)])",
  );
  expr(r#"f"{x=!s}""#, "JoinedStr([Constant('x='), FormattedValue(Name(x, Load), s, None)])");
  expr(
    r#"f"{x=:>5}""#,
    "JoinedStr([Constant('x='), FormattedValue(Name(x, Load), None, \
     JoinedStr([Constant('>5')]))])",
  );
}

#[test]
fn operators_in_fields() {
  expr(
    r#"f"{a == b}""#,
    "JoinedStr([FormattedValue(Compare(Name(a, Load), [Eq], [Name(b, Load)]), None, None)])",
  );
  expr(
    r#"f"{a != b}""#,
    "JoinedStr([FormattedValue(Compare(Name(a, Load), [NotEq], [Name(b, Load)]), None, None)])",
  );
  expr(
    r#"f"{a <= b}""#,
    "JoinedStr([FormattedValue(Compare(Name(a, Load), [LtE], [Name(b, Load)]), None, None)])",
  );
  expr(
    r#"f"{a < b}""#,
    "JoinedStr([FormattedValue(Compare(Name(a, Load), [Lt], [Name(b, Load)]), None, None)])",
  );
}

#[test]
fn brackets_in_fields() {
  expr(
    r#"f"{d['k']}""#,
    "JoinedStr([FormattedValue(Subscript(Name(d, Load), Index(Constant('k')), Load), None, \
     None)])",
  );
  expr(
    r#"f"{ {'a': 1}['a'] }""#,
    "JoinedStr([FormattedValue(Subscript(Dict([Constant('a')], [Constant(1)]), \
     Index(Constant('a')), Load), None, None)])",
  );
}

#[test]
fn backslash_brace() {
  expr(
    r#"f"\{a}""#,
    r"JoinedStr([Constant('\\'), FormattedValue(Name(a, Load), None, None)])",
  );
}

#[test]
fn bad_fields() {
  check::err("f'{}'\n", "f-string: empty expression not allowed");
  check::err("f'{ }'\n", "f-string: empty expression not allowed");
  check::err("f'{#}'\n", "f-string expression part cannot include '#'");
  check::err(r"f'{a\tb}'", "f-string expression part cannot include a backslash");
  check::err("f'{a)}'\n", "f-string: unmatched ')'");
  check::err(
    "f'{(a]}'\n",
    "f-string: closing parenthesis ']' does not match opening parenthesis '('",
  );
  check::err(
    "f'{(a}'\n",
    "f-string: closing parenthesis '}' does not match opening parenthesis '('",
  );
  check::err("f'{(a'\n", "f-string: unmatched '('");
  check::err("f\"{'a}\"\n", "f-string: unterminated string");
}

#[test]
fn bad_conversions() {
  let want = "f-string: invalid conversion character: expected 's', 'r', or 'a'";
  check::err("f'{a!x}'\n", want);
  check::err("f'{a!}'\n", want);
  check::err("f'{a!r'\n", "f-string: expecting '}'");
  check::err("f'{a'\n", "f-string: expecting '}'");
}

#[test]
fn single_close_brace() {
  let e = check::err("x = f'a}'\n", "f-string: single '}' is not allowed");
  assert_eq!(e.pos, pos(1, 4));
}

#[test]
fn error_at_atom_start() {
  let e = check::err("x = 'a' f'{}'\n", "f-string: empty expression not allowed");
  assert_eq!(e.pos, pos(1, 4));
}

#[test]
fn fragment_error() {
  check::err(
    r#"
x = f"{a b}"
##       ^ err: invalid syntax
"#,
    "invalid syntax",
  );
}

#[test]
fn fragment_error_second_line() {
  check::err(
    r#"
x = f'''{a
    b c}'''
##  ^ err: invalid syntax
"#,
    "invalid syntax",
  );
}

#[test]
fn fragment_error_later_line_of_token() {
  check::err(
    r#"
x = f'''
  {a b}'''
##   ^ err: invalid syntax
"#,
    "invalid syntax",
  );
}

#[test]
fn mix_bytes() {
  check::err(r#"b"a" f"{x}""#, "cannot mix bytes and nonbytes literals");
  check::err(r#"b"a" "b""#, "cannot mix bytes and nonbytes literals");
  expr(r#"b"a" b"b""#, "Constant(b'ab')");
}

#[test]
fn mix_bytes_too_new() {
  Input::new(r#"b"a" f"{x}""#)
    .version(5)
    .err("Format strings are only supported in Python 3.6 and greater");
}

#[test]
fn field_span() {
  let stmts = check::stmts("x = f\"{a + b}\"\n");
  let python_ast::StmtKind::Assign { value, .. } = &stmts[0].kind else { panic!("not assign") };
  let e = field_value(value);
  assert_eq!(e.to_string(), "BinOp(Name(a, Load), Add, Name(b, Load))");
  assert_eq!(e.span.start, pos(1, 7));
  assert_eq!(e.span.end, pos(1, 12));
}

#[test]
fn field_span_later_line() {
  let stmts = check::stmts("x = f'''\n{a}'''\n");
  let python_ast::StmtKind::Assign { value, .. } = &stmts[0].kind else { panic!("not assign") };
  let e = field_value(value);
  assert_eq!(e.span.start, pos(2, 1));
  assert_eq!(e.span.end, pos(2, 2));
}

#[test]
fn field_span_nested() {
  let e = check::expr(r#"f"{f'{a}'}""#);
  let inner = field_value(field_value(&e));
  assert_eq!(inner.to_string(), "Name(a, Load)");
  assert_eq!(inner.span.start, pos(1, 6));
}

#[test]
fn unicode_kind() {
  expr(r#"u"a""#, "Constant('a', u)");
  expr(r#"u"a" "b""#, "Constant('ab')");
  expr(r#""a" u"b""#, "Constant('ab', u)");
}

#[test]
fn in_eval_with_filename() {
  let e = Input::new("f'{'").mode(Mode::Eval).filename("x.py").err("f-string: expecting '}'");
  assert_eq!(e.filename.as_deref(), Some("x.py"));
}
