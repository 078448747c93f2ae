//! Defines the [`Source`] contract that matchers consume input through, and
//! the two provided inputs: [`Text`] and [`Tokens`].

use crate::types::value::Datum;

/// An opaque position within a [`Source`].
///
/// Cursors are cheap to copy, never invalidated, and ordered so that a
/// driver can assert monotonic progress or key a cache on them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub struct Cursor(pub(crate) usize);

impl Cursor {
    /// Returns the raw offset: a byte offset for text sources, an element
    /// index for token sources.
    #[inline]
    pub fn offset(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Cursor").field(&self.0).finish()
    }
}

/// A read-only input that matchers consume one token at a time.
///
/// The source itself never moves: all progress lives in [`Cursor`] values
/// threaded through the transition protocol, so a driver may revisit any
/// position while backtracking.
pub trait Source {
    /// Returns the cursor at the start of the input.
    fn start(&self) -> Cursor;

    /// Returns whether `at` is at or past the end of the input.
    fn is_end(&self, at: Cursor) -> bool;

    /// Returns the token at `at` together with the cursor just past it, or
    /// `None` at the end of the input.
    fn next(&self, at: Cursor) -> Option<(Datum, Cursor)>;

    /// Returns the remaining input as text, if this source is textual.
    ///
    /// Sources that return `Some` here must also implement [`advance`]
    /// consistently: pattern matchers use the pair to translate a matched
    /// byte length back into a cursor.
    ///
    /// [`advance`]: Source::advance
    fn tail(&self, at: Cursor) -> Option<&str>;

    /// Returns the cursor `bytes` into the view returned by
    /// [`tail(at)`][Source::tail]. Only called after `tail` returned `Some`.
    fn advance(&self, at: Cursor, bytes: usize) -> Cursor;
}

/// A textual source: tokens are [`char`]s and cursors are byte offsets.
#[derive(Debug, Clone, Copy)]
pub struct Text<'s> {
    raw: &'s str,
}

impl<'s> Text<'s> {
    /// Construct a new textual source.
    #[inline]
    pub fn new(raw: &'s str) -> Self {
        Self { raw }
    }
}

impl Source for Text<'_> {
    fn start(&self) -> Cursor {
        Cursor(0)
    }

    fn is_end(&self, at: Cursor) -> bool {
        at.0 >= self.raw.len()
    }

    fn next(&self, at: Cursor) -> Option<(Datum, Cursor)> {
        let c = self.raw.get(at.0..)?.chars().next()?;
        Some((Datum::Char(c), Cursor(at.0 + c.len_utf8())))
    }

    fn tail(&self, at: Cursor) -> Option<&str> {
        self.raw.get(at.0..)
    }

    fn advance(&self, at: Cursor, bytes: usize) -> Cursor {
        Cursor(at.0 + bytes)
    }
}

/// A source over pre-tokenized data: cursors are element indices.
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'s> {
    raw: &'s [Datum],
}

impl<'s> Tokens<'s> {
    /// Construct a new token source.
    #[inline]
    pub fn new(raw: &'s [Datum]) -> Self {
        Self { raw }
    }
}

impl Source for Tokens<'_> {
    fn start(&self) -> Cursor {
        Cursor(0)
    }

    fn is_end(&self, at: Cursor) -> bool {
        at.0 >= self.raw.len()
    }

    fn next(&self, at: Cursor) -> Option<(Datum, Cursor)> {
        let token = self.raw.get(at.0)?;
        Some((token.clone(), Cursor(at.0 + 1)))
    }

    fn tail(&self, _at: Cursor) -> Option<&str> {
        None
    }

    fn advance(&self, at: Cursor, _bytes: usize) -> Cursor {
        // Unreachable in practice: `tail` is always `None` for this source.
        at
    }
}
