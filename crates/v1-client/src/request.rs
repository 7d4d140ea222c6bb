//! Request bodies, content types and resource paths.

use bytes::Bytes;

/// Content type used when the caller names none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/xml";

/// Wire format of a request body.
///
/// Converts into the `content_type` argument of
/// [`V1Connector::send_data`](crate::V1Connector::send_data) and its siblings:
/// `Some(RequestFormat::Json.into())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestFormat {
    #[default]
    Xml,
    Json,
}

impl RequestFormat {
    /// The MIME type for this format.
    pub const fn content_type(self) -> &'static str {
        match self {
            RequestFormat::Xml => DEFAULT_CONTENT_TYPE,
            RequestFormat::Json => "application/json",
        }
    }
}

impl From<RequestFormat> for &'static str {
    fn from(format: RequestFormat) -> Self {
        format.content_type()
    }
}

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
        })
    }
}

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Sent as a string body.
    Text(String),
    /// Sent as a binary body.
    Bytes(Bytes),
}

impl Payload {
    /// Body text for diagnostics. Binary bodies are decoded lossily.
    pub fn to_log_string(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub(crate) fn into_body(self) -> reqwest::Body {
        match self {
            Payload::Text(text) => reqwest::Body::from(text),
            Payload::Bytes(bytes) => reqwest::Body::from(bytes),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

/// Normalize a resource path so it starts with exactly one `/`.
///
/// A missing resource addresses the endpoint itself and yields an empty path.
pub fn normalize_resource(resource: Option<&str>) -> String {
    match resource {
        None => String::new(),
        Some(r) if r.starts_with('/') => r.to_string(),
        Some(r) => format!("/{}", r),
    }
}
