//! End-to-end tests.

#![cfg(test)]
#![allow(clippy::needless_raw_string_hashes)]

mod args;
mod check;
mod expr;
mod fstring;
mod literal;
mod mode;
mod nesting;
mod property;
mod stmt;
mod target;
mod version;
