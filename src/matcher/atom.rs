//! The atomic matchers.
//!
//! Atoms are one-shot: entered clean they consume zero or more tokens and
//! either succeed once, carrying [`State::Dirty`] so that re-entry fails, or
//! fail outright. They never enumerate multiple solutions and never receive
//! child outcomes.

use super::{Matcher, Node, Pattern};
use crate::source::{Cursor, Source};
use crate::types::state::State;
use crate::types::transition::Transition;
use crate::types::value::{Datum, Value};
use crate::{Error, Result};

pub(super) fn execute(
    m: &Matcher,
    source: &dyn Source,
    state: State,
    at: Cursor,
) -> Result<Transition> {
    if !matches!(state, State::Clean) {
        return Err(Error::state(m.name(), &state));
    }
    match &*m.node {
        Node::Epsilon => Ok(Transition::success(State::Dirty, at, Value::new())),
        Node::Insert(datum) => Ok(Transition::success(State::Dirty, at, vec![datum.clone()])),
        Node::Dot => Ok(match source.next(at) {
            Some((token, next)) => Transition::success(State::Dirty, next, vec![token]),
            None => Transition::Failure,
        }),
        Node::Fail => Ok(Transition::Failure),
        Node::Equal(text) => Ok(equal(source, text, at)),
        Node::Eos => Ok(if source.is_end(at) {
            Transition::success(State::Dirty, at, Value::new())
        } else {
            Transition::Failure
        }),
        Node::Pattern(pattern) => find(m, source, pattern, at),
        _ => unreachable!(),
    }
}

/// Walks `text` against the source one token at a time. Any mismatch or
/// premature end of input fails; otherwise the whole text is yielded as a
/// single element.
fn equal(source: &dyn Source, text: &str, at: Cursor) -> Transition {
    let mut cursor = at;
    for expected in text.chars() {
        match source.next(cursor) {
            Some((Datum::Char(c), next)) if c == expected => cursor = next,
            _ => return Transition::Failure,
        }
    }
    Transition::success(State::Dirty, cursor, vec![Datum::Str(text.to_owned())])
}

/// Matches an anchored pattern against the rest of the source.
fn find(m: &Matcher, source: &dyn Source, pattern: &Pattern, at: Cursor) -> Result<Transition> {
    let tail = source
        .tail(at)
        .ok_or_else(|| Error::text_required(m.name()))?;
    Ok(match pattern.regex.find(tail) {
        // Only a match at the cursor counts. Patterns built from text carry
        // a leading `\A` and always satisfy this; a prebuilt expression may
        // not, and `find` returns the leftmost match, so a nonzero start
        // means there is no match at the cursor at all.
        Some(found) if found.start() == 0 => {
            let end = source.advance(at, found.end());
            Transition::success(State::Dirty, end, vec![Datum::Str(found.as_str().to_owned())])
        }
        _ => Transition::Failure,
    })
}
