//! Bounded repetition.
//!
//! `Depth` enumerates match counts greedily: it matches as deeply as the
//! bounds and input allow, yields, then backtracks one match at a time.
//! `Breadth` enumerates counts shortest first by keeping a level-order
//! frontier of partial solutions. The [`Repeat`] builder configures the
//! bounds and picks between them.

use std::collections::VecDeque;
use std::ops::{Bound, RangeBounds};

use super::{Matcher, Node, Rep};
use crate::source::Cursor;
use crate::types::state::{BreadthState, DepthState, Entry, State, Step};
use crate::types::transition::Transition;
use crate::types::value::{assemble, Value};
use crate::{Error, Result};

/// A builder for repetition matchers.
///
/// Defaults to any number of matches (`0..`), greedy enumeration, and a
/// flattened value.
///
/// # Examples
///
/// ```
/// use volley::{Matcher, Repeat};
///
/// let lazy = Repeat::new(Matcher::dot()).bounds(1..=3).greedy(false).build();
/// assert_eq!(lazy, Matcher::breadth(Matcher::dot(), 1..=3));
/// ```
#[derive(Debug, Clone)]
pub struct Repeat {
    child: Matcher,
    lo: usize,
    hi: Option<usize>,
    flatten: bool,
    greedy: bool,
}

impl Repeat {
    /// Creates a new repetition builder over `child`.
    #[inline]
    pub fn new(child: Matcher) -> Self {
        Self {
            child,
            lo: 0,
            hi: None,
            flatten: true,
            greedy: true,
        }
    }

    /// Set the allowed number of matches, e.g. `2..=3`, `1..`, or `..5`.
    #[inline]
    pub fn bounds(mut self, bounds: impl RangeBounds<usize>) -> Self {
        self.lo = match bounds.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        self.hi = match bounds.end_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => Some(n.saturating_sub(1)),
            Bound::Unbounded => None,
        };
        self
    }

    /// Set whether the per-match values are concatenated into one value or
    /// kept as one nested element per match.
    #[inline]
    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Set the enumeration order: greedy yields the deepest count first,
    /// non-greedy the shallowest.
    #[inline]
    pub fn greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    /// Build the matcher.
    pub fn build(self) -> Matcher {
        let Self {
            child,
            lo,
            hi,
            flatten,
            greedy,
        } = self;
        let rep = Rep {
            child,
            lo,
            hi,
            flatten,
        };
        Matcher::new(if greedy {
            Node::Depth(rep)
        } else {
            Node::Breadth(rep)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Depth
////////////////////////////////////////////////////////////////////////////////

pub(super) fn depth_execute(
    m: &Matcher,
    rep: &Rep,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => {
            let s = DepthState {
                step: Step::Slurp,
                results: Vec::new(),
                cursors: vec![at],
                states: vec![State::Clean],
            };
            Ok(slurp(m, rep, s))
        }
        State::Depth(s) if s.step == Step::Backtrack => Ok(backtrack(m, rep, s)),
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn depth_success(
    m: &Matcher,
    rep: &Rep,
    mut s: DepthState,
    child_state: State,
    at: Cursor,
    value: Value,
) -> Transition {
    // Record the match: the attempt slot becomes the child's resume state
    // and a fresh slot is pushed for the next attempt.
    if let Some(top) = s.states.last_mut() {
        *top = child_state;
    }
    s.states.push(State::Clean);
    s.cursors.push(at);
    s.results.push(value);
    s.step = Step::Slurp;
    slurp(m, rep, s)
}

pub(super) fn depth_failure(m: &Matcher, rep: &Rep, s: DepthState) -> Transition {
    // Slurping: no deeper match exists here. Backtracking: the popped child
    // is exhausted. Either way the current depth is the one to yield.
    emit(m, rep, s)
}

/// Push deeper, or yield once the upper bound is reached.
fn slurp(m: &Matcher, rep: &Rep, s: DepthState) -> Transition {
    if Some(s.results.len()) == rep.hi {
        return emit(m, rep, s);
    }
    let at = *s.cursors.last().unwrap();
    Transition::execute(m, State::Depth(s), &rep.child, State::Clean, at)
}

/// Yield the current depth as a solution, unless it is below the lower
/// bound, in which case backtracking is the only way forward.
fn emit(m: &Matcher, rep: &Rep, mut s: DepthState) -> Transition {
    if s.results.len() < rep.lo {
        return backtrack(m, rep, s);
    }
    let value = assemble(&s.results, rep.flatten);
    let at = *s.cursors.last().unwrap();
    s.step = Step::Backtrack;
    Transition::success(State::Depth(s), at, value)
}

/// Remove the deepest match and ask that child for its next solution.
fn backtrack(m: &Matcher, rep: &Rep, mut s: DepthState) -> Transition {
    // Only the entry cursor left: nothing to unwind.
    if s.results.is_empty() {
        return Transition::Failure;
    }
    s.results.pop();
    s.cursors.pop();
    s.states.pop();
    let resume = s.states.last().unwrap().clone();
    let at = *s.cursors.last().unwrap();
    s.step = Step::Backtrack;
    Transition::execute(m, State::Depth(s), &rep.child, resume, at)
}

////////////////////////////////////////////////////////////////////////////////
// Breadth
////////////////////////////////////////////////////////////////////////////////

pub(super) fn breadth_execute(
    m: &Matcher,
    rep: &Rep,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => {
            let mut queue = VecDeque::new();
            queue.push_back(Entry {
                at,
                state: State::Clean,
                results: Vec::new(),
            });
            Ok(emit_head(m, rep, BreadthState { queue }))
        }
        // Re-entry for the next solution: expand the yielded head before
        // inspecting the next entry.
        State::Breadth(s) => Ok(grow(m, rep, s)),
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn breadth_success(
    m: &Matcher,
    rep: &Rep,
    mut s: BreadthState,
    child_state: State,
    at: Cursor,
    value: Value,
) -> Transition {
    // One more sibling found: enqueue it as a deeper partial solution and
    // keep asking the head for the next one.
    let head = s.queue.front_mut().unwrap();
    let mut results = head.results.clone();
    results.push(value);
    head.state = child_state;
    s.queue.push_back(Entry {
        at,
        state: State::Clean,
        results,
    });
    grow(m, rep, s)
}

pub(super) fn breadth_failure(m: &Matcher, rep: &Rep, mut s: BreadthState) -> Transition {
    // The head has no more extensions; retire it.
    s.queue.pop_front();
    if s.queue.is_empty() {
        Transition::Failure
    } else {
        emit_head(m, rep, s)
    }
}

/// Yield the head entry as a solution if it has enough matches, otherwise
/// grow the frontier until one does.
fn emit_head(m: &Matcher, rep: &Rep, s: BreadthState) -> Transition {
    let head = s.queue.front().unwrap();
    if head.results.len() < rep.lo {
        return grow(m, rep, s);
    }
    let value = assemble(&head.results, rep.flatten);
    let at = head.at;
    Transition::success(State::Breadth(s), at, value)
}

/// Drive the head entry's child for another extension. A head that has
/// reached the upper bound cannot be extended and is retired instead, which
/// keeps every enqueued entry within bounds.
fn grow(m: &Matcher, rep: &Rep, mut s: BreadthState) -> Transition {
    let head = s.queue.front().unwrap();
    if rep.hi.is_some_and(|hi| head.results.len() >= hi) {
        s.queue.pop_front();
        return if s.queue.is_empty() {
            Transition::Failure
        } else {
            emit_head(m, rep, s)
        };
    }
    let resume = head.state.clone();
    let at = head.at;
    Transition::execute(m, State::Breadth(s), &rep.child, resume, at)
}
