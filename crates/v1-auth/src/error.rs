//! Error types for v1-auth.
//!
//! Error messages name the offending argument, never its value.

/// Result type alias for v1-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for v1-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a missing or blank argument.
    pub(crate) fn missing(argument: &str) -> Self {
        Self::new(ErrorKind::MissingArgument(argument.to_string()))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required argument was empty or whitespace.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The proxy descriptor could not be turned into a transport proxy.
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidProxy(format!("Invalid URL: {}", err)), err)
    }
}
