//! A backtracking parser combinator engine built from message-passing
//! matchers.
//!
//! # Overview
//!
//! A grammar is a DAG of [`Matcher`]s: atoms that consume input directly,
//! and combinators that arrange other matchers into ordered choice,
//! sequencing, bounded repetition, lookahead, negation, and recursion
//! through forward references.
//!
//! What sets this engine apart is how a parse runs. A matcher never calls
//! another matcher: each callback does a bounded amount of work and returns
//! a single [`Transition`] message ("drive this child and get back to me",
//! "I matched, here is how to resume me", or "I am exhausted"), and a
//! driver ([`Parse`], or one you write) interprets the messages on an
//! explicit stack. The naturally recursive parser becomes an iterative
//! state machine with unbounded backtracking: re-entering a matcher in the
//! state carried by its last success yields its next solution, so ambiguous
//! grammars enumerate every parse lazily, like a coroutine but without
//! needing one.
//!
//! # Examples
//!
//! Match a sequence and enumerate its single solution:
//!
//! ```
//! use volley::{Matcher, Text};
//!
//! let grammar = Matcher::seq([
//!     Matcher::equal("a"),
//!     Matcher::equal("b"),
//!     Matcher::equal("c"),
//!     Matcher::eos(),
//! ]);
//!
//! let source = Text::new("abc");
//! let mut parse = grammar.solutions(&source);
//!
//! let solution = parse.next()?.unwrap();
//! assert_eq!(solution.value, vec!["a".into(), "b".into(), "c".into()]);
//! assert_eq!(solution.end.offset(), 3);
//! assert_eq!(parse.next()?, None);
//! # Ok::<(), volley::Error>(())
//! ```
//!
//! Repetition backtracks, yielding one solution per match count:
//!
//! ```
//! use volley::{Matcher, Text};
//!
//! let greedy = Matcher::depth(Matcher::dot(), 2..=3);
//! let source = Text::new("aaaa");
//! let mut parse = greedy.solutions(&source);
//!
//! assert_eq!(parse.next()?.unwrap().value.len(), 3);
//! assert_eq!(parse.next()?.unwrap().value.len(), 2);
//! assert_eq!(parse.next()?, None);
//! # Ok::<(), volley::Error>(())
//! ```
//!
//! Separated lists combine dropping, sequencing, and repetition:
//!
//! ```
//! use volley::{Matcher, Text};
//!
//! let number = Matcher::pattern("[0-9]+")?;
//! let rest = Matcher::seq([Matcher::drop(Matcher::equal(",")), number.clone()]);
//! let csv = Matcher::seq([number, Matcher::repeat(rest, 0..)]);
//!
//! let source = Text::new("1,2,3");
//! let solution = csv.solutions(&source).next()?.unwrap();
//! assert_eq!(solution.value, vec!["1".into(), "2".into(), "3".into()]);
//! # Ok::<(), volley::Error>(())
//! ```
//!
//! # Features
//!
//! - **serde** _(enabled by default)_ — Enables serialization of the output
//!   data model ([`Datum`]) and cursors, and pulls in the [`serde`] crate as
//!   a dependency.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod drive;
mod error;
mod matcher;
mod source;
mod types;

pub use crate::drive::{Parse, Solution};
pub use crate::error::Error;
pub use crate::matcher::{Matcher, Repeat};
pub use crate::source::{Cursor, Source, Text, Tokens};
pub use crate::types::state::{
    AltState, BreadthState, DepthState, Entry, LookaheadState, NotState, SeriesState, State, Step,
};
pub use crate::types::transition::Transition;
pub use crate::types::value::{Datum, Value};

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
