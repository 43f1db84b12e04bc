//! A task runner for the repo based on the [xtask spec](https://github.com/matklad/cargo-xtask).

#![expect(clippy::disallowed_methods)]

use flate2::{Compression, write::GzEncoder};
use pico_args::Arguments;
use std::path::{Path, PathBuf};
use std::{env, fs, io, process::Command};

#[derive(Debug, Clone, Copy)]
enum Cmd {
  Help,
  Ci,
  Dist,
}

struct CmdSpec {
  name: &'static str,
  desc: &'static str,
  options: &'static [(&'static str, &'static str)],
}

impl Cmd {
  const VALUES: [Cmd; 3] = [Cmd::Help, Cmd::Ci, Cmd::Dist];

  fn spec(self) -> CmdSpec {
    match self {
      Cmd::Help => CmdSpec { name: "help", desc: "show this help", options: &[] },
      Cmd::Ci => CmdSpec { name: "ci", desc: "run various tests", options: &[] },
      Cmd::Dist => CmdSpec {
        name: "dist",
        desc: "make the CLI for distribution",
        options: &[
          ("--release", "build for release"),
          ("--target <TARGET>", "a specific target to build for"),
        ],
      },
    }
  }
}

impl std::str::FromStr for Cmd {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Cmd::VALUES.iter().find(|c| c.spec().name == s).copied().ok_or(())
  }
}

fn show_help() {
  println!("usage:");
  println!("  cargo xtask <command> [<options>]");
  println!();
  println!("commands:");
  for c in Cmd::VALUES {
    let spec = c.spec();
    println!("  {}", spec.name);
    println!("    {}", spec.desc);
    if !spec.options.is_empty() {
      println!();
      println!("    options:");
      for (name, desc) in spec.options {
        println!("      {name}");
        println!("        {desc}");
      }
    }
  }
}

fn finish_args(args: Arguments) {
  let args = args.finish();
  assert!(args.is_empty());
}

fn run(c: &mut Command) {
  let mut sp = c.spawn().expect("spawn cmd");
  let w = sp.wait().expect("wait for cmd");
  assert!(w.success());
}

fn run_ci() {
  run(Command::new("cargo").args(["build", "--locked"]));
  run(Command::new("cargo").args(["fmt", "--", "--check"]));
  run(Command::new("cargo").args(["clippy", "--locked"]));
  run(Command::new("cargo").args(["clippy", "--locked", "--tests"]));
  run(Command::new("cargo").args(["test", "--locked"]));
}

#[derive(Debug)]
struct DistArgs {
  release: bool,
  target: Option<String>,
}

const CLI_NAME: &str = "python-cli";

fn exe(s: &str) -> String {
  let suffix = env::consts::EXE_SUFFIX;
  format!("{s}{suffix}")
}

fn gzip(src: &Path, dst: &Path) {
  let dst_file = fs::File::create(dst).expect("create gzip dist");
  let mut encoder = GzEncoder::new(dst_file, Compression::best());
  let src_file = fs::File::open(src).expect("open file");
  let mut input = io::BufReader::new(src_file);
  io::copy(&mut input, &mut encoder).expect("copy gzip");
  encoder.finish().expect("finish gzip");
}

fn dist(args: &DistArgs) {
  let mut c = Command::new("cargo");
  c.args(["build", "--locked", "--bin", CLI_NAME]);
  if args.release {
    c.arg("--release");
  }
  if let Some(target) = &args.target {
    c.args(["--target", target.as_str()]);
  }
  run(&mut c);
  let kind = if args.release { "release" } else { "debug" };
  let mut src: PathBuf =
    std::iter::once("target").chain(args.target.as_deref()).chain(std::iter::once(kind)).collect();
  src.push(exe(CLI_NAME).as_str());
  let mut dst = PathBuf::from("binary");
  fs::create_dir_all(&dst).expect("create dirs");
  let gz = match &args.target {
    Some(target) => format!("{CLI_NAME}-{target}.gz"),
    None => format!("{CLI_NAME}.gz"),
  };
  dst.push(gz.as_str());
  gzip(&src, &dst);
}

fn main() {
  let mut args = Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    show_help();
    return;
  }
  let Some(cmd) = args.subcommand().expect("subcommand") else {
    show_help();
    return;
  };
  let cmd = cmd.parse::<Cmd>().expect("parse cmd");
  let dir = Path::new(env!("CARGO_MANIFEST_DIR")).parent().expect("parent");
  env::set_current_dir(dir).expect("set dir");
  match cmd {
    Cmd::Help => show_help(),
    Cmd::Ci => {
      finish_args(args);
      run_ci();
    }
    Cmd::Dist => {
      let dist_args = DistArgs {
        release: args.contains("--release"),
        target: args.opt_value_from_str("--target").expect("no parse"),
      };
      finish_args(args);
      dist(&dist_args);
    }
  }
}
