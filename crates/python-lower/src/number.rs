//! Numeric literals.

use num_bigint::BigInt;
use num_traits::Num as _;
use python_ast::Constant;

/// Returns the value of a number token, or `None` if it is not a valid number. Underscores must
/// already have been checked.
pub(crate) fn get(text: &str) -> Option<Constant> {
  let s: String = text.chars().filter(|&c| c != '_').collect();
  if let Some(imag) = s.strip_suffix(['j', 'J']) {
    let imag = imag.parse::<f64>().ok()?;
    return Some(Constant::Complex { real: 0.0, imag });
  }
  let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
    Some("0x") => 16,
    Some("0o") => 8,
    Some("0b") => 2,
    _ => {
      if s.contains(['.', 'e', 'E']) {
        return s.parse::<f64>().ok().map(Constant::Float);
      }
      return BigInt::from_str_radix(&s, 10).ok().map(Constant::Int);
    }
  };
  BigInt::from_str_radix(&s[2..], radix).ok().map(Constant::Int)
}
