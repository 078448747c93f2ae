//! A reference trampoline that interprets [`Transition`] messages.

use crate::matcher::Matcher;
use crate::source::{Cursor, Source};
use crate::types::state::State;
use crate::types::transition::Transition;
use crate::types::value::Value;
use crate::{Error, Result};

/// One successful parse yielded by [`Parse::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The matched value.
    pub value: Value,
    /// The cursor after the match.
    pub end: Cursor,
}

/// A lazy enumeration of a matcher's solutions over one source.
///
/// `Parse` is the driver side of the transition protocol: it interprets the
/// messages matchers return, scheduling the next `execute`, `success`, or
/// `failure` call until the root resolves. It is a fallible iterator; call
/// [`.next()`][Parse::next] repeatedly to enumerate solutions until
/// `Ok(None)`.
pub struct Parse<'s> {
    /// The input being parsed.
    source: &'s dyn Source,

    /// The root matcher.
    root: Matcher,

    /// Where the root enters the source.
    start: Cursor,

    /// State that resumes the root for its next solution; `None` once the
    /// root is exhausted.
    resume: Option<State>,

    /// Matchers waiting on a child, newest last.
    stack: Vec<(Matcher, State)>,

    /// Bound on the height of `stack`.
    max_depth: usize,
}

impl<'s> Parse<'s> {
    /// Construct a new parse of `source` with `root`.
    pub fn new(root: Matcher, source: &'s dyn Source) -> Self {
        let start = source.start();
        Self {
            source,
            root,
            start,
            resume: Some(State::Clean),
            stack: Vec::new(),
            max_depth: 1024,
        }
    }

    /// Set the maximum height of the suspended-matcher stack.
    ///
    /// This bounds how deeply matchers may nest while a parse is in flight,
    /// as counted from the root. Grammars that recurse without consuming
    /// input (most commonly direct left recursion) hit this bound and fail
    /// fast with an error instead of looping.
    ///
    /// Defaults to `1024`.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    /// Returns the next solution, or `Ok(None)` once the root is exhausted.
    ///
    /// A fatal error tears the parse down: no partial results survive, and
    /// every subsequent call returns `Ok(None)`.
    pub fn next(&mut self) -> Result<Option<Solution>> {
        let result = self.run();
        if result.is_err() {
            self.resume = None;
            self.stack.clear();
        }
        result
    }

    fn run(&mut self) -> Result<Option<Solution>> {
        let state = match self.resume.take() {
            Some(state) => state,
            None => return Ok(None),
        };
        let mut transition = self.root.execute(self.source, state, self.start)?;
        loop {
            transition = match transition {
                Transition::Execute {
                    parent,
                    parent_state,
                    child,
                    child_state,
                    at,
                } => {
                    self.stack.push((parent, parent_state));
                    if self.stack.len() > self.max_depth {
                        return Err(Error::max_depth(self.max_depth));
                    }
                    child.execute(self.source, child_state, at)?
                }
                Transition::Success { state, at, value } => match self.stack.pop() {
                    Some((parent, parent_state)) => {
                        parent.success(parent_state, state, at, value)?
                    }
                    None => {
                        self.resume = Some(state);
                        return Ok(Some(Solution { value, end: at }));
                    }
                },
                Transition::Failure => match self.stack.pop() {
                    Some((parent, parent_state)) => parent.failure(parent_state)?,
                    None => return Ok(None),
                },
            };
        }
    }
}

impl std::fmt::Debug for Parse<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parse")
            .field("source", &(..))
            .field("root", &self.root)
            .field("start", &self.start)
            .field("resume", &self.resume)
            .field("stack", &self.stack)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Matcher {
    /// Enumerate this matcher's solutions over `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use volley::{Matcher, Text};
    ///
    /// let either = Matcher::alt([Matcher::equal("ac"), Matcher::equal("ab")]);
    /// let source = Text::new("ab");
    ///
    /// let mut parse = either.solutions(&source);
    /// let solution = parse.next()?.unwrap();
    /// assert_eq!(solution.value, vec!["ab".into()]);
    /// assert_eq!(parse.next()?, None);
    /// # Ok::<(), volley::Error>(())
    /// ```
    pub fn solutions<'s>(&self, source: &'s dyn Source) -> Parse<'s> {
        Parse::new(self.clone(), source)
    }
}
