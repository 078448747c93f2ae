//! Defines [`Transition`], the messages matchers hand back to the driver.

use crate::matcher::Matcher;
use crate::source::Cursor;
use crate::types::state::State;
use crate::types::value::Value;

/// One step of a matcher, returned from every matcher callback.
///
/// A matcher never drives the parse itself. Each callback does a bounded
/// amount of work, describes the next move as a `Transition`, and suspends;
/// the driver interprets the message and schedules the corresponding
/// `execute`, `success`, or `failure` call. This is what turns a naturally
/// recursive parser into a resumable state machine.
#[derive(Debug)]
pub enum Transition {
    /// Drive `child` at `at` in `child_state`; when it resolves, deliver
    /// the outcome to `parent` in `parent_state`.
    Execute {
        /// The suspending matcher.
        parent: Matcher,
        /// The state to deliver the child's outcome into.
        parent_state: State,
        /// The matcher to drive next.
        child: Matcher,
        /// The state to drive the child in.
        child_state: State,
        /// The cursor to drive the child at.
        at: Cursor,
    },

    /// The matcher produced `value` and moved to `at`.
    ///
    /// Re-entering the matcher in `state` asks it for its next solution.
    Success {
        /// The state that resumes enumeration.
        state: State,
        /// The cursor after the match.
        at: Cursor,
        /// The matched value.
        value: Value,
    },

    /// The matcher is exhausted at this call site.
    Failure,
}

impl Transition {
    pub(crate) fn execute(
        parent: &Matcher,
        parent_state: State,
        child: &Matcher,
        child_state: State,
        at: Cursor,
    ) -> Self {
        Self::Execute {
            parent: parent.clone(),
            parent_state,
            child: child.clone(),
            child_state,
            at,
        }
    }

    pub(crate) fn success(state: State, at: Cursor, value: Value) -> Self {
        Self::Success { state, at, value }
    }
}
