//! Sequencing.
//!
//! `Seq` and `And` share one state machine and differ only in how the final
//! value is assembled. Backtracking walks left along the sequence: the last
//! slot's solutions are exhausted before an earlier child is asked to move.

use super::Matcher;
use crate::source::Cursor;
use crate::types::state::{SeriesState, State};
use crate::types::transition::Transition;
use crate::types::value::{assemble, Value};
use crate::{Error, Result};

pub(super) fn execute(
    m: &Matcher,
    children: &[Matcher],
    state: State,
    at: Cursor,
) -> Result<Transition> {
    match state {
        State::Clean => match children.first() {
            // An empty sequence matches once, emptily.
            None => Ok(Transition::success(State::Dirty, at, Value::new())),
            Some(first) => {
                let waiting = SeriesState {
                    results: Vec::new(),
                    cursors: vec![at],
                    states: Vec::new(),
                };
                Ok(Transition::execute(
                    m,
                    State::Series(waiting),
                    first,
                    State::Clean,
                    at,
                ))
            }
        },
        // Re-entry for the next solution: pop the newest frame and ask that
        // child to move to its next solution.
        State::Series(mut s) => match pop_frame(&mut s) {
            Some((resume, at)) => {
                let index = s.results.len();
                Ok(Transition::execute(
                    m,
                    State::Series(s),
                    &children[index],
                    resume,
                    at,
                ))
            }
            None => Ok(Transition::Failure),
        },
        state => Err(Error::state(m.name(), &state)),
    }
}

pub(super) fn success(
    m: &Matcher,
    children: &[Matcher],
    flatten: bool,
    mut s: SeriesState,
    child_state: State,
    at: Cursor,
    value: Value,
) -> Transition {
    s.results.push(value);
    s.cursors.push(at);
    s.states.push(child_state);
    if s.results.len() == children.len() {
        let value = assemble(&s.results, flatten);
        Transition::success(State::Series(s), at, value)
    } else {
        let index = s.results.len();
        Transition::execute(m, State::Series(s), &children[index], State::Clean, at)
    }
}

pub(super) fn failure(m: &Matcher, children: &[Matcher], mut s: SeriesState) -> Transition {
    // With no completed frame there is no earlier child to backtrack into.
    match pop_frame(&mut s) {
        Some((resume, at)) => {
            let index = s.results.len();
            Transition::execute(m, State::Series(s), &children[index], resume, at)
        }
        None => Transition::Failure,
    }
}

/// Removes the newest frame, returning the popped child's resume state and
/// the cursor it was entered at.
fn pop_frame(s: &mut SeriesState) -> Option<(State, Cursor)> {
    s.results.pop()?;
    s.cursors.pop();
    let resume = s.states.pop()?;
    let at = *s.cursors.last()?;
    Some((resume, at))
}
