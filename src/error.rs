/// An error that can occur while building a matcher or driving a parse.
///
/// Ordinary match failure is *not* an error: it is signalled by
/// [`Transition::Failure`][crate::Transition::Failure] and simply drives
/// backtracking. `Error` is reserved for fatal diagnostics, after which no
/// partial results survive.
pub struct Error {
    /// The type of error, possibly carries a source error.
    kind: ErrorKind,

    /// Optional additional reason for this kind of error.
    reason: Option<String>,
}

#[derive(Debug)]
enum ErrorKind {
    /// A regular expression failed to compile.
    Pattern(regex::Error),

    /// The matcher graph is misconfigured.
    ///
    /// This can happen when a delayed matcher is evaluated before being
    /// bound, bound twice, or when a child is bound to a matcher that is not
    /// delayed.
    Grammar,

    /// A matcher required a capability the source does not provide, e.g. a
    /// pattern matcher driven over a non-text source.
    Source,

    /// A matcher was delivered a state kind or child outcome it does not
    /// recognise. This indicates a bug in the driver, not in the grammar.
    Protocol,

    /// The driver's stack of suspended matchers outgrew its configured
    /// bound.
    Depth,
}

impl Error {
    pub(crate) fn pattern(err: regex::Error) -> Self {
        Self {
            kind: ErrorKind::Pattern(err),
            reason: None,
        }
    }

    pub(crate) fn unbound() -> Self {
        Self {
            kind: ErrorKind::Grammar,
            reason: Some("delayed matcher evaluated before being bound".into()),
        }
    }

    pub(crate) fn rebound() -> Self {
        Self {
            kind: ErrorKind::Grammar,
            reason: Some("delayed matcher is already bound".into()),
        }
    }

    pub(crate) fn not_delayed(name: &str) -> Self {
        Self {
            kind: ErrorKind::Grammar,
            reason: Some(format!("cannot bind a child to {name}")),
        }
    }

    pub(crate) fn text_required(name: &str) -> Self {
        Self {
            kind: ErrorKind::Source,
            reason: Some(format!("{name} requires a text source")),
        }
    }

    /// Constructs a contract violation error for a matcher entered with a
    /// state kind it does not recognise.
    pub(crate) fn state(name: &str, state: &crate::State) -> Self {
        Self {
            kind: ErrorKind::Protocol,
            reason: Some(format!("{name} cannot proceed from {}", state.kind())),
        }
    }

    /// Constructs a contract violation error for a matcher delivered a child
    /// outcome it never requested.
    pub(crate) fn outcome(name: &str, state: &crate::State) -> Self {
        Self {
            kind: ErrorKind::Protocol,
            reason: Some(format!(
                "{name} in {} was delivered a child outcome it never requested",
                state.kind()
            )),
        }
    }

    /// Constructs a max parse depth error.
    pub(crate) fn max_depth(max: usize) -> Self {
        Self {
            kind: ErrorKind::Depth,
            reason: Some(format!("reached maximum parse depth ({max})")),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("reason", &self.reason)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match &self.kind {
            ErrorKind::Pattern(_) => "invalid pattern",
            ErrorKind::Grammar => "invalid grammar",
            ErrorKind::Source => "unsupported source",
            ErrorKind::Protocol => "protocol violation",
            ErrorKind::Depth => "parse error",
        };
        match &self.reason {
            Some(reason) => write!(f, "{msg}: {reason}"),
            None => match &self.kind {
                ErrorKind::Pattern(err) => write!(f, "{msg}: {err}"),
                _ => write!(f, "{msg}"),
            },
        }
    }
}
