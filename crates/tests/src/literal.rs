//! Tests for string, bytes, and number literals.

use crate::check::{self, pos};

#[track_caller]
fn expr(source: &str, want: &str) {
  assert_eq!(check::expr(source).to_string(), want);
}

#[test]
fn text_escapes() {
  expr(r"'a\n\tb'", r"Constant('a\n\tb')");
  expr(r"'\u00e9'", "Constant('é')");
  expr(r"'\U0001F600'", "Constant('😀')");
  expr(r"'\101\x42'", "Constant('AB')");
  expr(r#""it's""#, r"Constant('it\'s')");
}

#[test]
fn unknown_escape_kept() {
  expr(r"'\d'", r"Constant('\\d')");
}

#[test]
fn raw() {
  expr(r"r'a\n'", r"Constant('a\\n')");
  expr(r"rb'\x'", r"Constant(b'\\x')");
}

#[test]
fn bytes() {
  expr(r"b'a\x00\xff'", r"Constant(b'a\x00\xff')");
  expr(r"b'\n'", r"Constant(b'\n')");
}

#[test]
fn line_continuation() {
  expr("'a\\\nb'", "Constant('ab')");
  expr("'''a\nb'''", r"Constant('a\nb')");
}

#[test]
fn truncated_hex() {
  let e = check::err(
    "x = '\\x4'\n",
    "(unicode error) 'unicodeescape' codec can't decode bytes in position 0-2: \
     truncated \\xXX escape",
  );
  assert_eq!(e.pos, pos(1, 4));
  check::err(
    r"'\u12'",
    "(unicode error) 'unicodeescape' codec can't decode bytes in position 0-3: \
     truncated \\uXXXX escape",
  );
}

#[test]
fn bytes_errors() {
  check::err(r"b'\x4'", r"(value error) invalid \x escape at position 0");
  check::err("b'é'", "bytes can only contain ASCII literal characters.");
}

#[test]
fn named_char() {
  expr(r"'\N{BULLET} \N{EM DASH}'", "Constant('\u{2022} \u{2014}')");
  check::err(
    r"'\N{NOT A NAME}'",
    "(unicode error) 'unicodeescape' codec can't decode bytes in position 0-13: \
     unknown Unicode character name",
  );
}

#[test]
fn ints() {
  expr("0xff", "Constant(255)");
  expr("0o17", "Constant(15)");
  expr("0b101", "Constant(5)");
  expr("1_000", "Constant(1000)");
  expr("123456789012345678901234567890", "Constant(123456789012345678901234567890)");
}

#[test]
fn floats() {
  expr("1.5e3", "Constant(1500.0)");
  expr("1.", "Constant(1.0)");
  expr(".5", "Constant(0.5)");
  expr("2j", "Constant(2.0j)");
}

#[test]
fn keyword_constants() {
  expr("None", "Constant(None)");
  expr("True", "Constant(True)");
  expr("False", "Constant(False)");
  expr("...", "Constant(Ellipsis)");
}
