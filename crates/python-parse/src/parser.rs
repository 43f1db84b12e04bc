//! The parser state.

use crate::error::{Error, Kind};
use event_parse::Entered;
use python_syntax::{Python, SyntaxKind as SK, SyntaxNode};
use token::{Token, Triviable as _};

const MAX_DEPTH: usize = 200;

pub(crate) type Result<T = ()> = std::result::Result<T, Error>;

/// The events and the tree come from `event_parse`. We also keep our own cursor into the tokens,
/// since parsing stops at the first error and that error needs a byte offset.
pub(crate) struct Parser<'a> {
  events: event_parse::Parser<'a, SK, Kind>,
  tokens: &'a [Token<'a, SK>],
  /// the index of the first token not yet bumped, trivia included.
  idx: usize,
  /// the byte offset of `tokens[idx]`.
  offset: usize,
  /// the nodes entered but not yet exited, innermost last.
  open: Vec<(Entered, SK)>,
  depth: usize,
}

impl<'a> Parser<'a> {
  pub(crate) fn new(tokens: &'a [Token<'a, SK>]) -> Self {
    Self {
      events: event_parse::Parser::new(tokens),
      tokens,
      idx: 0,
      offset: 0,
      open: Vec::new(),
      depth: 0,
    }
  }

  fn significant(&self, n: usize) -> Option<&Token<'a, SK>> {
    self.tokens[self.idx..].iter().filter(|t| !t.kind.is_trivia()).nth(n)
  }

  /// the kind of the next non-trivia token. past the end, this is always the end marker.
  pub(crate) fn peek(&self) -> SK {
    self.peek_nth(0)
  }

  pub(crate) fn peek_nth(&self, n: usize) -> SK {
    self.significant(n).map_or(SK::EndMarker, |t| t.kind)
  }

  fn skip_trivia(&mut self) {
    while let Some(tok) = self.tokens.get(self.idx).filter(|t| t.kind.is_trivia()) {
      self.offset += tok.text.len();
      self.idx += 1;
    }
  }

  pub(crate) fn bump(&mut self) {
    self.skip_trivia();
    let Some(tok) = self.tokens.get(self.idx) else { return };
    self.events.bump();
    self.offset += tok.text.len();
    self.idx += 1;
  }

  pub(crate) fn eat(&mut self, kind: SK) -> bool {
    if self.peek() == kind {
      self.bump();
      true
    } else {
      false
    }
  }

  pub(crate) fn expect(&mut self, kind: SK) -> Result {
    if self.eat(kind) { Ok(()) } else { Err(self.error()) }
  }

  pub(crate) fn start(&mut self, kind: SK) {
    let en = self.events.enter();
    self.open.push((en, kind));
  }

  pub(crate) fn finish_node(&mut self) {
    let Some((en, kind)) = self.open.pop() else { unreachable!("no node to finish") };
    self.events.exit(en, kind);
  }

  /// an error at the next token.
  pub(crate) fn error(&self) -> Error {
    let kind = if self.peek() == SK::Indent { Kind::UnexpectedIndent } else { Kind::InvalidSyntax };
    self.error_kind(kind)
  }

  pub(crate) fn error_kind(&self, kind: Kind) -> Error {
    let trivia: usize =
      self.tokens[self.idx..].iter().take_while(|t| t.kind.is_trivia()).map(|t| t.text.len()).sum();
    Error { idx: self.offset + trivia, kind }
  }

  /// runs `f` one level deeper, failing if that is too deep.
  pub(crate) fn nest<F>(&mut self, f: F) -> Result
  where
    F: FnOnce(&mut Parser<'a>) -> Result,
  {
    if self.depth >= MAX_DEPTH {
      return Err(self.error_kind(Kind::TooDeep));
    }
    self.depth += 1;
    let ret = f(self);
    self.depth -= 1;
    ret
  }

  /// # Panics
  ///
  /// If a node is still open.
  pub(crate) fn finish(self) -> SyntaxNode {
    assert!(self.open.is_empty(), "{} unfinished nodes", self.open.len());
    let mut sink = event_parse::rowan_sink::RowanSink::default();
    self.events.finish(&mut sink);
    let (root, errors) = sink.finish::<Python>();
    debug_assert!(errors.is_empty(), "errors are returned, never recorded");
    root
  }

  /// Throws away a partial parse after an error.
  pub(crate) fn discard(mut self) {
    while !self.open.is_empty() {
      self.finish_node();
    }
  }
}
