//! A CLI for building syntax trees.

use python_front::{CompileInfo, Mode};
use std::io::Read as _;
use std::process::ExitCode;

fn main() -> ExitCode {
  let args = match get_args() {
    Err(e) => {
      println!("error parsing args: {e}");
      return ExitCode::FAILURE;
    }
    Ok(None) => return ExitCode::SUCCESS,
    Ok(Some(x)) => x,
  };
  let quiet = args.quiet;
  let n = run(args);
  if n == 0 {
    ExitCode::SUCCESS
  } else {
    if !quiet {
      let s = if n == 1 { "" } else { "s" };
      println!("{n} error{s}");
    }
    ExitCode::FAILURE
  }
}

struct Args {
  mode: Mode,
  info: CompileInfo,
  /// Whether the file name was given, rather than defaulted.
  filename: bool,
  quiet: bool,
  files: Vec<std::ffi::OsString>,
}

fn get_args() -> Result<Option<Args>, pico_args::Error> {
  env_logger::init();
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    println!("usage:");
    println!("  python-cli [<option>...] [<file>...]");
    println!();
    println!("reads standard input if no files are given");
    println!();
    println!("options:");
    println!("  -h, --help");
    println!("    show this help");
    println!("  -q, --quiet");
    println!("    emit no output");
    println!("  --mode <mode>");
    println!("    what the input is");
    println!("    <mode> may be 'exec', 'eval', 'single', or 'func_type'");
    println!("    defaults to 'exec' if not specified");
    println!("  --feature-version <n>");
    println!("    reject syntax newer than Python 3.<n>");
    println!("    defaults to 8 if not specified");
    println!("  --filename <name>");
    println!("    the file name to report in errors");
    println!("    defaults to the path of each file, or '<stdin>'");
    println!("  --barry-as-flufl");
    println!("    accept '<>' and reject '!='");
    println!("  --max-nesting <n>");
    println!("    how deeply expressions and blocks may nest");
    println!();
    return Ok(None);
  }
  let quiet = args.contains(["-q", "--quiet"]);
  let barry_as_flufl = args.contains("--barry-as-flufl");
  let mode: Option<Mode> = args.opt_value_from_str("--mode")?;
  let feature_version: Option<u32> = args.opt_value_from_str("--feature-version")?;
  let filename: Option<String> = args.opt_value_from_str("--filename")?;
  let max_nesting: Option<usize> = args.opt_value_from_str("--max-nesting")?;
  let mut info = CompileInfo { barry_as_flufl, ..CompileInfo::default() };
  if let Some(v) = feature_version {
    info.feature_version = v;
  }
  if let Some(n) = max_nesting {
    info.max_nesting = n;
  }
  let has_filename = filename.is_some();
  if let Some(name) = filename {
    info.filename = name;
  }
  let files = args.finish();
  Ok(Some(Args { mode: mode.unwrap_or_default(), info, filename: has_filename, quiet, files }))
}

fn run(args: Args) -> usize {
  if args.files.is_empty() {
    let mut contents = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut contents) {
      if !args.quiet {
        println!("couldn't read stdin: {e}");
      }
      return 1;
    }
    let mut info = args.info.clone();
    if !args.filename {
      "<stdin>".clone_into(&mut info.filename);
    }
    return usize::from(!compile(&contents, args.mode, &info, args.quiet));
  }
  let mut ret = 0usize;
  for arg in &args.files {
    let Some(arg) = arg.to_str() else {
      if !args.quiet {
        println!("{}: not valid UTF-8", arg.to_string_lossy());
      }
      ret += 1;
      continue;
    };
    let contents = match std::fs::read_to_string(arg) {
      Ok(x) => x,
      Err(e) => {
        if !args.quiet {
          println!("{arg}: couldn't read path: {e}");
        }
        ret += 1;
        continue;
      }
    };
    let mut info = args.info.clone();
    if !args.filename {
      arg.clone_into(&mut info.filename);
    }
    if !compile(&contents, args.mode, &info, args.quiet) {
      ret += 1;
    }
  }
  ret
}

/// Returns whether it compiled.
fn compile(contents: &str, mode: Mode, info: &CompileInfo, quiet: bool) -> bool {
  match python_front::compile(contents, mode, info) {
    Ok(m) => {
      if !quiet {
        println!("{m}");
      }
      true
    }
    Err(e) => {
      log::info!("{} failed to compile", info.filename);
      if !quiet {
        println!("{e}");
        if let Some(text) = &e.text {
          println!("  {text}");
        }
      }
      false
    }
  }
}
