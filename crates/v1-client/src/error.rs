//! Error types for v1-client.

/// Result type alias for v1-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for v1-client operations.
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

    /// Shorthand for a configuration error.
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    /// A non-success status, with the reason phrase looked up from the code.
    pub(crate) fn transport(status: u16, message: Option<String>) -> Self {
        Self::new(ErrorKind::Transport {
            status,
            reason: reason_phrase(status).to_string(),
            message,
        })
    }

    /// Returns true if the connector was misconfigured.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }

    /// Returns true if the service answered with a non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport { .. })
    }

    /// Returns true if a staged write was finalized without being opened.
    pub fn is_lookup(&self) -> bool {
        matches!(self.kind, ErrorKind::Lookup(_))
    }

    /// The HTTP status, if this is a transport error.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message the service put in its error payload, if one was found.
    pub fn service_message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Transport { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid or missing configuration, detected before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service answered with a non-success status.
    #[error(
        "The remote server returned an error: ({status}) {reason}.{}",
        .message.as_ref().map(|m| format!(" {}", m)).unwrap_or_default()
    )]
    Transport {
        status: u16,
        reason: String,
        message: Option<String>,
    },

    /// A staged write was finalized without a matching begin.
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// The HTTP exchange failed before a status was received.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be read or decoded.
    #[error("Body error: {0}")]
    Body(String),
}

/// Standard reason phrase for a status code, empty when the code is unknown.
pub(crate) fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if let Some(status) = err.status() {
            ErrorKind::Transport {
                status: status.as_u16(),
                reason: reason_phrase(status.as_u16()).to_string(),
                message: None,
            }
        } else if err.is_builder() {
            ErrorKind::Configuration(err.to_string())
        } else if err.is_body() || err.is_decode() {
            ErrorKind::Body(err.to_string())
        } else {
            ErrorKind::Connection(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(
            ErrorKind::Configuration(format!("Instance url is not valid: {}", err)),
            err,
        )
    }
}

impl From<versionone_auth::Error> for Error {
    fn from(err: versionone_auth::Error) -> Self {
        Error::with_source(ErrorKind::Configuration(err.to_string()), err)
    }
}
