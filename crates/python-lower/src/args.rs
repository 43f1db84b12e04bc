//! Parameter lists of functions and lambdas.

use crate::error::{Feature, Kind};
use crate::expr;
use crate::st::{Result, St};
use python_ast::{Arg, Arguments};
use python_syntax::{Node, SyntaxKind as SK};

/// Builds the `Parameters` of a `def`, or the `TypedArgsList` or `VarArgsList` itself.
pub(crate) fn parameters(st: &mut St<'_>, node: Node<'_>) -> Result<Arguments> {
  let node = if node.kind() == SK::Parameters {
    match node.children().nth(1) {
      Some(list) if list.kind() != SK::RRound => list,
      _ => return Ok(Arguments::default()),
    }
  } else {
    node
  };
  let ch: Vec<_> = node.children().collect();
  let counts = Counts::new(&ch);
  if let Some(slash) = ch.iter().find(|x| x.kind() == SK::Slash) {
    st.check_feature(true, Feature::PositionalOnly, slash)?;
  }
  let mut ret = Arguments {
    args: Vec::with_capacity(counts.positional),
    defaults: Vec::with_capacity(counts.defaults),
    kwonlyargs: Vec::with_capacity(counts.kwonly),
    kw_defaults: Vec::with_capacity(counts.kwonly),
    ..Arguments::default()
  };
  let mut have_default = false;
  let mut idx = 0usize;
  while let Some(child) = ch.get(idx) {
    match child.kind() {
      SK::Tfpdef | SK::Vfpdef => {
        if ch.get(idx + 1).is_some_and(|x| x.kind() == SK::Eq) {
          ret.defaults.push(expr::expr(st, ch[idx + 2].clone())?);
          have_default = true;
          idx += 2;
        } else if have_default {
          return Err(st.err(&node, Kind::NonDefaultAfterDefault));
        }
        ret.args.push(arg(st, child.clone())?);
        idx += 2;
      }
      SK::Star => {
        let Some(next) = ch.get(idx + 1) else {
          return Err(st.err(&node, Kind::BareStar));
        };
        if next.kind() == SK::Comma {
          idx += 2;
          if counts.kwonly == 0 {
            return Err(st.err(ch.get(idx).unwrap_or(&node), Kind::BareStar));
          }
          idx = kwonly(st, &ch, idx, &mut ret)?;
        } else {
          ret.vararg = Some(arg(st, next.clone())?);
          idx += 3;
          if ch.get(idx).is_some_and(|x| matches!(x.kind(), SK::Tfpdef | SK::Vfpdef)) {
            idx = kwonly(st, &ch, idx, &mut ret)?;
          }
        }
      }
      SK::StarStar => {
        ret.kwarg = Some(arg(st, ch[idx + 1].clone())?);
        idx += 3;
      }
      SK::Slash => {
        ret.posonlyargs = std::mem::take(&mut ret.args);
        idx += 2;
      }
      k => unreachable!("bad parameter list: {k:?}"),
    }
  }
  Ok(ret)
}

/// Builds the keyword-only parameters starting at `idx`. Returns the index after them.
fn kwonly(st: &mut St<'_>, ch: &[Node<'_>], mut idx: usize, ret: &mut Arguments) -> Result<usize> {
  while let Some(child) = ch.get(idx) {
    match child.kind() {
      SK::Tfpdef | SK::Vfpdef => {
        if ch.get(idx + 1).is_some_and(|x| x.kind() == SK::Eq) {
          ret.kw_defaults.push(Some(expr::expr(st, ch[idx + 2].clone())?));
          idx += 2;
        } else {
          ret.kw_defaults.push(None);
        }
        ret.kwonlyargs.push(arg(st, child.clone())?);
        idx += 2;
      }
      SK::StarStar => break,
      k => unreachable!("bad keyword-only parameter: {k:?}"),
    }
  }
  Ok(idx)
}

fn arg(st: &mut St<'_>, node: Node<'_>) -> Result<Arg> {
  let name = node.child(0);
  st.check_name(name.text(), node.start())?;
  let annotation = match node.children().nth(2) {
    None => None,
    Some(ann) => Some(Box::new(expr::expr(st, ann)?)),
  };
  Ok(Arg { arg: name.text().to_owned(), annotation, span: node.span() })
}

/// How many of each kind of parameter there are.
#[derive(Debug, Default)]
struct Counts {
  positional: usize,
  defaults: usize,
  kwonly: usize,
}

impl Counts {
  fn new(ch: &[Node<'_>]) -> Self {
    let mut ret = Self::default();
    let mut after_star = false;
    let mut iter = ch.iter().peekable();
    while let Some(child) = iter.next() {
      match child.kind() {
        SK::Star => {
          after_star = true;
          // the `*args` name is not keyword-only
          iter.next_if(|x| matches!(x.kind(), SK::Tfpdef | SK::Vfpdef));
        }
        SK::StarStar => break,
        SK::Tfpdef | SK::Vfpdef if after_star => ret.kwonly += 1,
        SK::Tfpdef | SK::Vfpdef => ret.positional += 1,
        SK::Eq if !after_star => ret.defaults += 1,
        _ => {}
      }
    }
    ret
  }
}
