//! The matcher algebra: immutable rule descriptions and the state machines
//! behind them.
//!
//! Every matcher is re-entrant. The first [`execute`][Matcher::execute] at a
//! call site receives [`State::Clean`]; a successful matcher hands back a
//! state that, fed to `execute` again, enumerates its next solution; an
//! exhausted matcher fails. Matchers never call each other directly: each
//! callback returns a single [`Transition`] describing the next move, and
//! the driver performs it.

mod alt;
mod atom;
mod repeat;
mod series;
mod wrap;

use std::cell::OnceCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use regex::Regex;

pub use self::repeat::Repeat;

use crate::source::{Cursor, Source};
use crate::types::state::State;
use crate::types::transition::Transition;
use crate::types::value::{Datum, Value};
use crate::{Error, Result};

/// An immutable description of a parsing rule.
///
/// A `Matcher` is a cheap-to-clone handle; cloning shares the underlying
/// node, so combinators can reuse sub-rules freely. Matchers form a DAG,
/// with cycles permitted only through [`Matcher::delayed`]. Equality and
/// hashing are structural, except for delayed matchers which compare by
/// identity so that cyclic grammars terminate.
#[derive(Clone)]
pub struct Matcher {
    node: Rc<Node>,
}

enum Node {
    Epsilon,
    Insert(Datum),
    Dot,
    Fail,
    Equal(String),
    Eos,
    Pattern(Pattern),
    Drop(Matcher),
    Lookahead(Matcher),
    Not(Matcher),
    Alt(Vec<Matcher>),
    Series { children: Vec<Matcher>, flatten: bool },
    Depth(Rep),
    Breadth(Rep),
    Delayed(OnceCell<Matcher>),
}

/// The shared description of a bounded repetition.
#[derive(PartialEq)]
struct Rep {
    child: Matcher,
    lo: usize,
    hi: Option<usize>,
    flatten: bool,
}

/// A regular expression and the pattern it was built from.
struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `raw` so that matching is anchored at the cursor and the
    /// matched byte length is exact.
    fn new(raw: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\A(?:{raw})")).map_err(Error::pattern)?;
        Ok(Self {
            raw: raw.to_owned(),
            regex,
        })
    }

    /// Wraps an already built expression as is, keeping whatever options it
    /// was configured with. Anchoring is enforced at match time instead.
    fn from_regex(regex: &Regex) -> Self {
        Self {
            raw: regex.as_str().to_owned(),
            regex: regex.clone(),
        }
    }
}

impl Matcher {
    fn new(node: Node) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    /// Match nothing, yielding the empty value.
    #[inline]
    pub fn epsilon() -> Self {
        Self::new(Node::Epsilon)
    }

    /// Consume nothing and inject `datum` into the output.
    #[inline]
    pub fn insert(datum: impl Into<Datum>) -> Self {
        Self::new(Node::Insert(datum.into()))
    }

    /// Match any single token.
    #[inline]
    pub fn dot() -> Self {
        Self::new(Node::Dot)
    }

    /// Fail unconditionally.
    #[inline]
    pub fn fail() -> Self {
        Self::new(Node::Fail)
    }

    /// Match `text` token by token, yielding the whole text as a single
    /// element.
    #[inline]
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Node::Equal(text.into()))
    }

    /// Succeed only at the end of input, consuming nothing.
    #[inline]
    pub fn eos() -> Self {
        Self::new(Node::Eos)
    }

    /// Match the regular expression `pattern` anchored at the cursor,
    /// yielding the matched text as a single element.
    ///
    /// Requires a text source; driving this matcher over a non-text source
    /// is a fatal error.
    ///
    /// # Examples
    ///
    /// ```
    /// use volley::{Matcher, Text};
    ///
    /// let number = Matcher::pattern("[0-9]+")?;
    /// let source = Text::new("123abc");
    /// let solution = number.solutions(&source).next()?.unwrap();
    /// assert_eq!(solution.value, vec!["123".into()]);
    /// # Ok::<(), volley::Error>(())
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::new(Node::Pattern(Pattern::new(pattern)?)))
    }

    /// Like [`pattern`][Matcher::pattern], but from an already built
    /// [`Regex`], keeping its configuration (case folding, multi-line
    /// matching, and so on). A match that does not start exactly at the
    /// cursor does not count.
    #[inline]
    pub fn regex(regex: &Regex) -> Self {
        Self::new(Node::Pattern(Pattern::from_regex(regex)))
    }

    /// Match `child` but discard its value.
    #[inline]
    pub fn drop(child: Matcher) -> Self {
        Self::new(Node::Drop(child))
    }

    /// Match `child` without consuming input: on success the cursor is
    /// restored and the value discarded.
    #[inline]
    pub fn lookahead(child: Matcher) -> Self {
        Self::new(Node::Lookahead(child))
    }

    /// Succeed with the empty value exactly where `child` fails, consuming
    /// nothing.
    #[inline]
    pub fn not(child: Matcher) -> Self {
        Self::new(Node::Not(child))
    }

    /// Ordered choice: try each alternative left to right, enumerating every
    /// solution of one alternative before moving to the next.
    #[inline]
    pub fn alt(children: impl IntoIterator<Item = Matcher>) -> Self {
        Self::new(Node::Alt(children.into_iter().collect()))
    }

    /// Match the children in order, concatenating their values.
    #[inline]
    pub fn seq(children: impl IntoIterator<Item = Matcher>) -> Self {
        Self::series(children, true)
    }

    /// Match the children in order, yielding one nested element per child.
    #[inline]
    pub fn and(children: impl IntoIterator<Item = Matcher>) -> Self {
        Self::series(children, false)
    }

    /// Match the children in order with explicit assembly: concatenated if
    /// `flatten`, nested otherwise.
    #[inline]
    pub fn series(children: impl IntoIterator<Item = Matcher>, flatten: bool) -> Self {
        Self::new(Node::Series {
            children: children.into_iter().collect(),
            flatten,
        })
    }

    /// Greedy bounded repetition: match `child` as many times as possible
    /// within `bounds`, then backtrack to shallower counts.
    #[inline]
    pub fn depth(child: Matcher, bounds: impl std::ops::RangeBounds<usize>) -> Self {
        Repeat::new(child).bounds(bounds).build()
    }

    /// Non-greedy bounded repetition: enumerate match counts within
    /// `bounds` shortest first.
    #[inline]
    pub fn breadth(child: Matcher, bounds: impl std::ops::RangeBounds<usize>) -> Self {
        Repeat::new(child).bounds(bounds).greedy(false).build()
    }

    /// Repetition with the default options: greedy and flattening. Use
    /// [`Repeat`] for full control.
    #[inline]
    pub fn repeat(child: Matcher, bounds: impl std::ops::RangeBounds<usize>) -> Self {
        Repeat::new(child).bounds(bounds).build()
    }

    /// An unbound forward reference, used to tie the knot in recursive
    /// grammars.
    ///
    /// The child is assigned exactly once with [`set`][Matcher::set];
    /// evaluating an unbound delayed matcher is a fatal error. Note that a
    /// cyclic grammar holds a reference cycle and is leaked rather than
    /// collected when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use volley::{Matcher, Text};
    ///
    /// // expr := "1" "+" expr | "1"
    /// let expr = Matcher::delayed();
    /// expr.set(Matcher::alt([
    ///     Matcher::seq([Matcher::equal("1"), Matcher::equal("+"), expr.clone()]),
    ///     Matcher::equal("1"),
    /// ]))?;
    ///
    /// let source = Text::new("1+1");
    /// let solution = expr.solutions(&source).next()?.unwrap();
    /// assert_eq!(solution.value, vec!["1".into(), "+".into(), "1".into()]);
    /// # Ok::<(), volley::Error>(())
    /// ```
    #[inline]
    pub fn delayed() -> Self {
        Self::new(Node::Delayed(OnceCell::new()))
    }

    /// Bind the child of a delayed matcher.
    ///
    /// Errors if this matcher is not delayed or was already bound.
    pub fn set(&self, child: Matcher) -> Result<()> {
        match &*self.node {
            Node::Delayed(cell) => cell.set(child).map_err(|_| Error::rebound()),
            _ => Err(Error::not_delayed(self.name())),
        }
    }

    /// The constructor name of this matcher, used in diagnostics.
    pub(crate) fn name(&self) -> &'static str {
        match &*self.node {
            Node::Epsilon => "Epsilon",
            Node::Insert(_) => "Insert",
            Node::Dot => "Dot",
            Node::Fail => "Fail",
            Node::Equal(_) => "Equal",
            Node::Eos => "Eos",
            Node::Pattern(_) => "Pattern",
            Node::Drop(_) => "Drop",
            Node::Lookahead(_) => "Lookahead",
            Node::Not(_) => "Not",
            Node::Alt(_) => "Alt",
            Node::Series { flatten: true, .. } => "Seq",
            Node::Series { flatten: false, .. } => "And",
            Node::Depth(_) => "Depth",
            Node::Breadth(_) => "Breadth",
            Node::Delayed(_) => "Delayed",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// The transition protocol
////////////////////////////////////////////////////////////////////////////////

impl Matcher {
    /// Begin or resume this matcher at `at`.
    ///
    /// [`State::Clean`] starts a fresh enumeration; the state carried by a
    /// previous [`Transition::Success`] resumes it; [`State::Dirty`] always
    /// fails. Any other state kind this matcher does not recognise is a
    /// contract violation and errors.
    pub fn execute(&self, source: &dyn Source, state: State, at: Cursor) -> Result<Transition> {
        if matches!(state, State::Dirty) {
            return Ok(Transition::Failure);
        }
        match &*self.node {
            Node::Epsilon
            | Node::Insert(_)
            | Node::Dot
            | Node::Fail
            | Node::Equal(_)
            | Node::Eos
            | Node::Pattern(_) => atom::execute(self, source, state, at),
            Node::Drop(child) => wrap::drop_execute(self, child, state, at),
            Node::Lookahead(child) => wrap::lookahead_execute(self, child, state, at),
            Node::Not(child) => wrap::not_execute(self, child, state, at),
            Node::Alt(children) => alt::execute(self, children, state, at),
            Node::Series { children, .. } => series::execute(self, children, state, at),
            Node::Depth(rep) => repeat::depth_execute(self, rep, state, at),
            Node::Breadth(rep) => repeat::breadth_execute(self, rep, state, at),
            Node::Delayed(cell) => match cell.get() {
                Some(child) => child.execute(source, state, at),
                None => Err(Error::unbound()),
            },
        }
    }

    /// Deliver a child's success to this matcher.
    ///
    /// `state` is the `parent_state` this matcher attached to the
    /// [`Transition::Execute`] that requested the child; `child_state`,
    /// `at`, and `value` come from the child's success.
    pub fn success(
        &self,
        state: State,
        child_state: State,
        at: Cursor,
        value: Value,
    ) -> Result<Transition> {
        match (&*self.node, state) {
            (Node::Drop(_), State::Clean | State::Drop(_)) => {
                Ok(wrap::drop_success(child_state, at))
            }
            (Node::Lookahead(_), State::Lookahead(s)) => {
                Ok(wrap::lookahead_success(*s, child_state))
            }
            (Node::Not(_), State::Not(_)) => Ok(Transition::Failure),
            (Node::Alt(_), State::Alt(s)) => Ok(alt::success(*s, child_state, at, value)),
            (Node::Series { children, flatten }, State::Series(s)) => {
                Ok(series::success(self, children, *flatten, s, child_state, at, value))
            }
            (Node::Depth(rep), State::Depth(s)) => {
                Ok(repeat::depth_success(self, rep, s, child_state, at, value))
            }
            (Node::Breadth(rep), State::Breadth(s)) => {
                Ok(repeat::breadth_success(self, rep, s, child_state, at, value))
            }
            (_, state) => Err(Error::outcome(self.name(), &state)),
        }
    }

    /// Deliver a child's failure to this matcher.
    ///
    /// `state` is the `parent_state` this matcher attached to the
    /// [`Transition::Execute`] that requested the child.
    pub fn failure(&self, state: State) -> Result<Transition> {
        match (&*self.node, state) {
            (Node::Drop(_), State::Clean | State::Drop(_)) => Ok(Transition::Failure),
            (Node::Lookahead(_), State::Lookahead(_)) => Ok(Transition::Failure),
            (Node::Not(_), State::Not(s)) => Ok(wrap::not_failure(s)),
            (Node::Alt(children), State::Alt(s)) => Ok(alt::failure(self, children, *s)),
            (Node::Series { children, .. }, State::Series(s)) => {
                Ok(series::failure(self, children, s))
            }
            (Node::Depth(rep), State::Depth(s)) => Ok(repeat::depth_failure(self, rep, s)),
            (Node::Breadth(rep), State::Breadth(s)) => Ok(repeat::breadth_failure(self, rep, s)),
            (_, state) => Err(Error::outcome(self.name(), &state)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Identity
////////////////////////////////////////////////////////////////////////////////

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.node, &other.node) {
            return true;
        }
        match (&*self.node, &*other.node) {
            (Node::Epsilon, Node::Epsilon)
            | (Node::Dot, Node::Dot)
            | (Node::Fail, Node::Fail)
            | (Node::Eos, Node::Eos) => true,
            (Node::Insert(a), Node::Insert(b)) => a == b,
            (Node::Equal(a), Node::Equal(b)) => a == b,
            (Node::Pattern(a), Node::Pattern(b)) => a.raw == b.raw,
            (Node::Drop(a), Node::Drop(b)) => a == b,
            (Node::Lookahead(a), Node::Lookahead(b)) => a == b,
            (Node::Not(a), Node::Not(b)) => a == b,
            (Node::Alt(a), Node::Alt(b)) => a == b,
            (
                Node::Series { children: a, flatten: fa },
                Node::Series { children: b, flatten: fb },
            ) => fa == fb && a == b,
            (Node::Depth(a), Node::Depth(b)) => a == b,
            (Node::Breadth(a), Node::Breadth(b)) => a == b,
            // Delayed matchers compare by identity only, handled above.
            _ => false,
        }
    }
}

impl Eq for Matcher {}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        std::mem::discriminant(&*self.node).hash(hasher);
        match &*self.node {
            Node::Epsilon | Node::Dot | Node::Fail | Node::Eos => {}
            Node::Insert(datum) => datum.hash(hasher),
            Node::Equal(text) => text.hash(hasher),
            Node::Pattern(pattern) => pattern.raw.hash(hasher),
            Node::Drop(child) | Node::Lookahead(child) | Node::Not(child) => child.hash(hasher),
            Node::Alt(children) => children.hash(hasher),
            Node::Series { children, flatten } => {
                children.hash(hasher);
                flatten.hash(hasher);
            }
            Node::Depth(rep) | Node::Breadth(rep) => {
                rep.child.hash(hasher);
                rep.lo.hash(hasher);
                rep.hi.hash(hasher);
                rep.flatten.hash(hasher);
            }
            Node::Delayed(_) => Rc::as_ptr(&self.node).hash(hasher),
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.node {
            Node::Epsilon | Node::Dot | Node::Fail | Node::Eos => f.write_str(self.name()),
            Node::Insert(datum) => f.debug_tuple("Insert").field(datum).finish(),
            Node::Equal(text) => f.debug_tuple("Equal").field(text).finish(),
            Node::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.raw).finish(),
            Node::Drop(child) => f.debug_tuple("Drop").field(child).finish(),
            Node::Lookahead(child) => f.debug_tuple("Lookahead").field(child).finish(),
            Node::Not(child) => f.debug_tuple("Not").field(child).finish(),
            Node::Alt(children) => f.debug_tuple("Alt").field(children).finish(),
            Node::Series { children, .. } => {
                f.debug_tuple(self.name()).field(children).finish()
            }
            Node::Depth(rep) | Node::Breadth(rep) => f
                .debug_struct(self.name())
                .field("child", &rep.child)
                .field("lo", &rep.lo)
                .field("hi", &rep.hi)
                .field("flatten", &rep.flatten)
                .finish(),
            // Never print the child: a cyclic grammar would recurse forever.
            Node::Delayed(cell) => f
                .debug_struct("Delayed")
                .field("bound", &cell.get().is_some())
                .finish(),
        }
    }
}
