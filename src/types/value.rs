//! Defines [`Datum`] and [`Value`], the output of a successful match.

/// A single element of parser output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub enum Datum {
    /// One input token.
    Char(char),
    /// A run of input, or an injected literal.
    Str(String),
    /// A nested value, e.g. one element of an unflattened sequence.
    List(Vec<Datum>),
}

/// The output of a successful match: an ordered sequence of data.
///
/// The empty vector is the distinguished empty value. Flattening
/// concatenation discards empty values naturally, so matchers that consume
/// input without producing output (like [`Matcher::drop`]) simply vanish
/// from the result.
///
/// [`Matcher::drop`]: crate::Matcher::drop
pub type Value = Vec<Datum>;

impl From<char> for Datum {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(list: Vec<Datum>) -> Self {
        Self::List(list)
    }
}

/// Assembles per-child values into a single value: concatenated when
/// `flatten`, otherwise one nested list element per child.
pub(crate) fn assemble(results: &[Value], flatten: bool) -> Value {
    if flatten {
        results.iter().flatten().cloned().collect()
    } else {
        results.iter().cloned().map(Datum::List).collect()
    }
}
