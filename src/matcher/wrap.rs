//! Single-child wrappers: `Drop`, `Lookahead`, and `Not`.

use super::Matcher;
use crate::source::Cursor;
use crate::types::state::{LookaheadState, NotState, State};
use crate::types::transition::Transition;
use crate::types::value::Value;
use crate::{Error, Result};

/// `Drop` delegates to its child and discards the value. It does no
/// backtracking of its own: each of the child's solutions becomes one empty
/// solution of the wrapper.
pub(super) fn drop_execute(
    m: &Matcher,
    child: &Matcher,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => Ok(Transition::execute(m, State::Clean, child, State::Clean, at)),
        State::Drop(inner) => Ok(Transition::execute(m, State::Clean, child, *inner, at)),
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn drop_success(child_state: State, at: Cursor) -> Transition {
    Transition::success(State::Drop(Box::new(child_state)), at, Value::new())
}

/// `Lookahead` runs its child from the entry cursor but restores that cursor
/// on every success, so the parent observes a zero-width match.
pub(super) fn lookahead_execute(
    m: &Matcher,
    child: &Matcher,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => {
            let waiting = LookaheadState {
                child: State::Clean,
                saved: at,
            };
            Ok(Transition::execute(
                m,
                State::Lookahead(Box::new(waiting)),
                child,
                State::Clean,
                at,
            ))
        }
        // Drive the child's next solution; the saved cursor is kept so a
        // re-success is again reported at the entry point.
        State::Lookahead(s) => {
            let LookaheadState { child: resume, saved } = *s;
            let waiting = LookaheadState {
                child: State::Clean,
                saved,
            };
            Ok(Transition::execute(
                m,
                State::Lookahead(Box::new(waiting)),
                child,
                resume,
                at,
            ))
        }
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn lookahead_success(waiting: LookaheadState, child_state: State) -> Transition {
    let saved = waiting.saved;
    let state = LookaheadState {
        child: child_state,
        saved,
    };
    Transition::success(State::Lookahead(Box::new(state)), saved, Value::new())
}

/// `Not` succeeds with the empty value exactly where its child fails. A
/// single child success negates; no child backtracking is attempted, and the
/// wrapper produces at most one solution.
pub(super) fn not_execute(
    m: &Matcher,
    child: &Matcher,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => Ok(Transition::execute(
            m,
            State::Not(NotState { saved: at }),
            child,
            State::Clean,
            at,
        )),
        // The single solution was already produced.
        State::Not(_) => Ok(Transition::Failure),
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn not_failure(state: NotState) -> Transition {
    let saved = state.saved;
    Transition::success(State::Not(state), saved, Value::new())
}
