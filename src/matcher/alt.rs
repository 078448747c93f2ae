//! Ordered choice.
//!
//! `Alt` tries its alternatives strictly left to right. Every solution of
//! the live alternative is enumerated before the next alternative is
//! restarted, clean, at the entry cursor.

use super::Matcher;
use crate::source::Cursor;
use crate::types::state::{AltState, State};
use crate::types::transition::Transition;
use crate::types::value::Value;
use crate::{Error, Result};

pub(super) fn execute(
    m: &Matcher,
    children: &[Matcher],
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => match children.first() {
            Some(first) => {
                let waiting = AltState {
                    child: State::Clean,
                    saved: at,
                    index: 0,
                };
                Ok(Transition::execute(
                    m,
                    State::Alt(Box::new(waiting)),
                    first,
                    State::Clean,
                    at,
                ))
            }
            None => Ok(Transition::Failure),
        },
        // Ask the live alternative for its next solution.
        State::Alt(s) => {
            let AltState { child, saved, index } = *s;
            let waiting = AltState {
                child: State::Clean,
                saved,
                index,
            };
            Ok(Transition::execute(
                m,
                State::Alt(Box::new(waiting)),
                &children[index],
                child,
                at,
            ))
        }
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn success(
    waiting: AltState,
    child_state: State,
    at: Cursor,
    value: Value,
) -> Transition {
    let state = AltState {
        child: child_state,
        saved: waiting.saved,
        index: waiting.index,
    };
    Transition::success(State::Alt(Box::new(state)), at, value)
}

pub(super) fn failure(m: &Matcher, children: &[Matcher], waiting: AltState) -> Transition {
    let AltState { saved, index, .. } = waiting;
    let next = index + 1;
    if next == children.len() {
        return Transition::Failure;
    }
    let restarted = AltState {
        child: State::Clean,
        saved,
        index: next,
    };
    Transition::execute(
        m,
        State::Alt(Box::new(restarted)),
        &children[next],
        State::Clean,
        saved,
    )
}
