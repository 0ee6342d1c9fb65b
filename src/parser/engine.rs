//! Matching engine: drives concurrent partial matches over the token stream.
//!
//! One forward pass with one token of lookahead. Every token is offered to
//! each open candidate ([`MatchAttempt`]); shapes whose first step accepts
//! the token spawn new candidates. When a candidate consumes its whole shape
//! it is committed onto an explicit stack of frames, unless a candidate that
//! precedes it in catalog order would still accept the next token, in which
//! case commitment is deferred so the more specific shape can keep matching.
//!
//! Frames close on their closing rule and become [`Match`]es, attached to
//! the frame below or, at depth zero, to the returned forest.

use super::catalog::{Closing, PatternSpec, ShapeStep, Slot};
use super::tokenizer::{self, Token};
use std::ops::Range;
use tracing::{debug, trace};

/// Words a capture step never binds.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "import", "in", "instanceof", "let", "new", "null", "return", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_capturable(text: &str) -> bool {
    tokenizer::is_identifier(text) && !RESERVED_WORDS.contains(&text)
}

/// Tokens bound into one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub slot: Slot,
    pub tokens: Vec<String>,
    /// Source span from the first to the last bound token.
    pub span: Range<usize>,
}

impl Capture {
    /// The captured source text, including any whitespace between tokens.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or_default()
    }
}

/// A completed construct: header matched and body closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'c> {
    pub spec: &'c PatternSpec,
    pub captures: Vec<Capture>,
    /// From the first header token through the closing token.
    pub span: Range<usize>,
    /// Between the header and the closing token.
    pub body: Range<usize>,
    pub children: Vec<Match<'c>>,
}

impl<'c> Match<'c> {
    pub fn capture(&self, slot: Slot) -> Option<&Capture> {
        self.captures.iter().find(|c| c.slot == slot)
    }

    /// Text bound to `slot`, if the shape captured anything there.
    pub fn text_of<'s>(&self, slot: Slot, source: &'s str) -> Option<&'s str> {
        self.capture(slot).map(|c| c.text(source))
    }

    pub fn body_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.body.clone()).unwrap_or_default()
    }
}

/// Per-parse state of one candidate shape.
#[derive(Debug, Clone)]
struct MatchAttempt<'c> {
    pattern: usize,
    spec: &'c PatternSpec,
    cursor: usize,
    start: usize,
    captures: Vec<Capture>,
    /// Token index at which the whole shape was consumed.
    matched_at: Option<usize>,
}

impl<'c> MatchAttempt<'c> {
    fn new(pattern: usize, spec: &'c PatternSpec, start: usize) -> Self {
        Self {
            pattern,
            spec,
            cursor: 0,
            start,
            captures: Vec::new(),
            matched_at: None,
        }
    }

    /// Whether the step under the cursor would take `token`.
    fn accepts(&self, token: &Token<'_>) -> bool {
        match self.spec.steps.get(self.cursor) {
            Some(ShapeStep::Literal(literal)) => token.is(literal),
            Some(ShapeStep::Capture(_)) => token.text().is_some_and(is_capturable),
            Some(ShapeStep::Gather { .. }) => !token.is_end(),
            None => false,
        }
    }

    /// Offer `token` (at `index`) to the step under the cursor. Returns
    /// false when the shape no longer matches.
    fn advance(&mut self, token: &Token<'_>, index: usize) -> bool {
        if !self.accepts(token) {
            return false;
        }
        match self.spec.steps[self.cursor] {
            ShapeStep::Literal(_) => self.cursor += 1,
            ShapeStep::Capture(slot) => {
                self.bind(slot, token);
                self.cursor += 1;
            }
            ShapeStep::Gather { stop, slot } => {
                if token.is(stop) {
                    self.cursor += 1;
                } else {
                    self.bind(slot, token);
                }
            }
        }
        if self.cursor == self.spec.steps.len() {
            self.matched_at = Some(index);
        }
        true
    }

    fn bind(&mut self, slot: Slot, token: &Token<'_>) {
        let text = token.text().unwrap_or_default().to_string();
        match self.captures.iter_mut().find(|c| c.slot == slot) {
            Some(capture) => {
                capture.tokens.push(text);
                capture.span.end = token.end();
            }
            None => self.captures.push(Capture {
                slot,
                tokens: vec![text],
                span: token.start()..token.end(),
            }),
        }
    }
}

/// An open scope on the nesting stack.
#[derive(Debug)]
struct Frame<'c> {
    attempt: MatchAttempt<'c>,
    body_start: usize,
    children: Vec<Match<'c>>,
}

impl Frame<'_> {
    fn closes_on(&self, token: &Token<'_>) -> bool {
        match self.attempt.spec.closing {
            Closing::Literal(literal) => token.is(literal),
            Closing::EndOfLine => false,
        }
    }
}

/// Shape matcher over an explicit catalog.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'c> {
    catalog: &'c [PatternSpec],
}

impl<'c> Matcher<'c> {
    pub fn new(catalog: &'c [PatternSpec]) -> Self {
        Self { catalog }
    }

    /// Match `tokens` (produced from `source`) and return the match forest.
    pub fn run(&self, source: &str, tokens: &[Token<'_>]) -> Vec<Match<'c>> {
        let mut pass = Pass {
            catalog: self.catalog,
            source,
            tokens,
            stack: Vec::new(),
            candidates: Vec::new(),
            forest: Vec::new(),
        };

        let mut index = 0;
        while index < tokens.len() {
            index = pass.step(index);
        }

        // A stream without an end marker still leaves no open frames.
        pass.close_all(source.len());
        pass.forest
    }
}

/// State of a single run; discarded afterwards.
struct Pass<'c, 's, 't> {
    catalog: &'c [PatternSpec],
    source: &'s str,
    tokens: &'t [Token<'s>],
    stack: Vec<Frame<'c>>,
    /// Open candidates, kept in catalog order.
    candidates: Vec<MatchAttempt<'c>>,
    forest: Vec<Match<'c>>,
}

impl<'c> Pass<'c, '_, '_> {
    /// Process the token at `index` and return the index to continue from.
    fn step(&mut self, index: usize) -> usize {
        let token = self.tokens[index];

        while self.top_closes_at_line_break(index) {
            self.pop(token.start(), token.start());
        }

        // A statement never outlives the block it sits in.
        if self.ready().is_none() {
            while self.statement_ends_with_parent(&token) {
                self.pop(token.start(), token.start());
            }
        }

        if token.is_end() {
            if let Some(resume) = self.commit_pending() {
                return resume;
            }
            self.close_all(token.start());
            return index + 1;
        }

        if self.top_closes_on(&token) {
            if let Some(resume) = self.commit_pending() {
                return resume;
            }
            self.pop(token.start(), token.end());
            return index + 1;
        }

        if self.stack.last().is_some_and(|frame| frame.attempt.spec.opaque) {
            return index + 1;
        }

        self.advance(index);
        self.spawn(index);
        self.resolve(index).unwrap_or(index + 1)
    }

    fn top_closes_on(&self, token: &Token<'_>) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.closes_on(token))
    }

    /// A `;`-closed frame ends when its parent's closing token arrives.
    ///
    /// Only a closing token of the parent ends it: a top-level statement
    /// without a semicolon stays open until the next `;` and holds
    /// whatever is declared before it.
    fn statement_ends_with_parent(&self, token: &Token<'_>) -> bool {
        let [.., parent, top] = self.stack.as_slice() else {
            return false;
        };
        top.attempt.spec.closing == Closing::Literal(";")
            && !token.is(";")
            && parent.closes_on(token)
    }

    fn top_closes_at_line_break(&self, index: usize) -> bool {
        let closes_at_eol = self
            .stack
            .last()
            .is_some_and(|frame| frame.attempt.spec.closing == Closing::EndOfLine);
        closes_at_eol && tokenizer::line_break_before(self.source, self.tokens, index)
    }

    fn advance(&mut self, index: usize) {
        let token = self.tokens[index];
        self.candidates.retain_mut(|attempt| {
            // Fully matched candidates wait for resolution untouched.
            attempt.matched_at.is_some() || attempt.advance(&token, index)
        });
    }

    fn spawn(&mut self, index: usize) {
        let token = self.tokens[index];
        for (pattern, spec) in self.catalog.iter().enumerate() {
            if self.candidates.iter().any(|c| c.pattern == pattern) {
                continue;
            }
            let mut attempt = MatchAttempt::new(pattern, spec, token.start());
            if attempt.advance(&token, index) {
                self.candidates.push(attempt);
            }
        }
        self.candidates.sort_by_key(|c| c.pattern);
    }

    /// Commit the first fully matched candidate unless an earlier one would
    /// still take the next token.
    fn resolve(&mut self, index: usize) -> Option<usize> {
        let (position, matched_at) = self.ready()?;
        let next = self.tokens.get(index + 1)?;
        let blocker = self.candidates[..position]
            .iter()
            .find(|c| c.accepts(next));
        if let Some(blocker) = blocker {
            trace!(
                ready = self.candidates[position].spec.name,
                blocker = blocker.spec.name,
                "deferring commit"
            );
            return None;
        }
        Some(self.commit(position, matched_at))
    }

    fn ready(&self) -> Option<(usize, usize)> {
        self.candidates
            .iter()
            .enumerate()
            .find_map(|(position, c)| c.matched_at.map(|at| (position, at)))
    }

    fn commit_pending(&mut self) -> Option<usize> {
        let (position, matched_at) = self.ready()?;
        Some(self.commit(position, matched_at))
    }

    /// Push the candidate as a new frame and return the token index right
    /// after its header, so tokens seen while it was deferred are re-scanned
    /// inside the new scope.
    fn commit(&mut self, position: usize, matched_at: usize) -> usize {
        let attempt = self.candidates.remove(position);
        self.candidates.clear();
        debug!(
            pattern = attempt.spec.name,
            depth = self.stack.len(),
            "opening scope"
        );
        self.stack.push(Frame {
            attempt,
            body_start: self.tokens[matched_at].end(),
            children: Vec::new(),
        });
        matched_at + 1
    }

    fn pop(&mut self, body_end: usize, span_end: usize) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        self.candidates.clear();

        let completed = Match {
            spec: frame.attempt.spec,
            captures: frame.attempt.captures,
            span: frame.attempt.start..span_end.max(frame.body_start),
            body: frame.body_start..body_end.max(frame.body_start),
            children: frame.children,
        };
        debug!(
            pattern = completed.spec.name,
            depth = self.stack.len(),
            "closing scope"
        );

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(completed),
            None => self.forest.push(completed),
        }
    }

    fn close_all(&mut self, offset: usize) {
        while !self.stack.is_empty() {
            self.pop(offset, offset);
        }
    }
}
