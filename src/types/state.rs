//! Per-invocation matcher states.
//!
//! A [`State`] records the progress of one matcher at one call site. States
//! are immutable value objects: a driver is free to clone, compare, hash,
//! and cache them, and a matcher never mutates a state it has already handed
//! out. The state carried by a [`Transition::Success`] fully describes how
//! to resume enumeration when the parent backtracks.
//!
//! [`Transition::Success`]: crate::Transition::Success

use std::collections::VecDeque;

use crate::source::Cursor;
use crate::types::value::Value;

/// The progress of one matcher at one call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// The matcher has not yet been entered at this call site.
    Clean,

    /// The matcher is exhausted; any further entry fails.
    ///
    /// Atoms succeed at most once and carry `Dirty` in their success, so
    /// that asking them for another solution fails without special casing.
    Dirty,

    /// A [`drop`][crate::Matcher::drop] matcher waiting on, or resuming, its
    /// child.
    Drop(Box<State>),

    /// See [`LookaheadState`].
    Lookahead(Box<LookaheadState>),

    /// See [`NotState`].
    Not(NotState),

    /// See [`AltState`].
    Alt(Box<AltState>),

    /// See [`SeriesState`].
    Series(SeriesState),

    /// See [`DepthState`].
    Depth(DepthState),

    /// See [`BreadthState`].
    Breadth(BreadthState),
}

impl State {
    /// A short name for this kind of state, used in diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            State::Clean => "CLEAN",
            State::Dirty => "DIRTY",
            State::Drop(_) => "DropState",
            State::Lookahead(_) => "LookaheadState",
            State::Not(_) => "NotState",
            State::Alt(_) => "AltState",
            State::Series(_) => "SeriesState",
            State::Depth(_) => "DepthState",
            State::Breadth(_) => "BreadthState",
        }
    }
}

/// State for [`lookahead`][crate::Matcher::lookahead]: the child's resume
/// state plus the cursor restored on every success.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookaheadState {
    /// The child's resume state.
    pub child: State,
    /// The cursor at which the lookahead was entered.
    pub saved: Cursor,
}

/// State for [`not`][crate::Matcher::not].
///
/// Only the entry cursor is needed; the existence of the record also means
/// the single solution has already been produced, so re-entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotState {
    /// The cursor at which the negation was entered.
    pub saved: Cursor,
}

/// State for [`alt`][crate::Matcher::alt]: which alternative is live and how
/// to resume it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AltState {
    /// The live alternative's resume state.
    pub child: State,
    /// The entry cursor, from which later alternatives restart.
    pub saved: Cursor,
    /// Zero-based index of the live alternative.
    pub index: usize,
}

/// State for [`seq`][crate::Matcher::seq] and [`and`][crate::Matcher::and]:
/// three parallel stacks, one frame per matched child.
///
/// `cursors[0]` is the entry cursor and `cursors[k + 1]` the cursor after
/// the `k`-th child matched; `states[k]` is that child's resume state and
/// `results[k]` its value. `cursors` is always one longer than the other
/// two stacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesState {
    /// The value each matched child produced.
    pub results: Vec<Value>,
    /// The entry cursor followed by the cursor after each matched child.
    pub cursors: Vec<Cursor>,
    /// The resume state of each matched child.
    pub states: Vec<State>,
}

/// State for [`depth`][crate::Matcher::depth]: parallel stacks like
/// [`SeriesState`], plus which way the traversal is moving.
///
/// Here `cursors` *and* `states` are both one longer than `results`: the
/// top state slot belongs to the next attempt at the top cursor rather than
/// to a completed match, which lets backtracking pop all three stacks
/// uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepthState {
    /// Which way the traversal is moving.
    pub step: Step,
    /// The value each matched child produced.
    pub results: Vec<Value>,
    /// The entry cursor followed by the cursor after each matched child.
    pub cursors: Vec<Cursor>,
    /// The resume state of each matched child, topped by the attempt slot.
    pub states: Vec<State>,
}

/// Which way a [`DepthState`] traversal is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Matching deeper: the child in flight extends the current run.
    Slurp,
    /// Unwinding: the child in flight is the deepest completed match being
    /// asked for its next solution.
    Backtrack,
}

/// State for [`breadth`][crate::Matcher::breadth]: the level-order frontier
/// of partial solutions, shallowest at the front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreadthState {
    /// Pending partial solutions in yield order.
    pub queue: VecDeque<Entry>,
}

/// One partial solution in a [`BreadthState`] frontier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// The cursor after this entry's matches.
    pub at: Cursor,
    /// Resume state for the child that extends this entry; `Clean` until
    /// the first extension is attempted.
    pub state: State,
    /// The value each match in this entry produced.
    pub results: Vec<Value>,
}
