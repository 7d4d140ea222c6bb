//! Wire-level request logging.
//!
//! When enabled, every exchange produces one combined `debug` event on the
//! [`WIRE_TARGET`] target holding the request and response method, URL,
//! headers and bodies. Logging never fails and never touches the payload
//! handed back to the caller.

use reqwest::header::HeaderMap;
use tracing::debug;

use crate::request::RequestMethod;

/// Tracing target for wire log entries.
pub const WIRE_TARGET: &str = "versionone_client::wire";

const REDACTED_HEADERS: [&str; 2] = ["authorization", "proxy-authorization"];

/// Outgoing half of a logged exchange.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Incoming half of a logged exchange.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Records request/response pairs when debug logging is on.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger {
    enabled: bool,
}

impl RequestLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit one entry for the exchange.
    pub fn log(&self, request: &WireRequest, response: &WireResponse) {
        if !self.enabled {
            return;
        }

        debug!(
            target: WIRE_TARGET,
            method = %request.method,
            url = %request.url,
            status = response.status,
            "{}",
            render_exchange(request, response)
        );
    }
}

/// Flatten a header map into loggable pairs, with credentials redacted.
pub fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<non-ascii>");
            redact(name.as_str(), value)
        })
        .collect()
}

/// Redact the value of a credential-bearing header.
pub fn redact(name: &str, value: &str) -> (String, String) {
    let value = if REDACTED_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
    {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    };
    (name.to_string(), value)
}

/// Render an exchange as a multi-line block.
pub fn render_exchange(request: &WireRequest, response: &WireResponse) -> String {
    let mut out = String::new();

    out.push_str("REQUEST\n");
    out.push_str(&format!("\tMethod: {}\n", request.method));
    out.push_str(&format!("\tRequest URL: {}\n", request.url));
    push_headers(&mut out, &request.headers);
    push_body(&mut out, &request.body);

    out.push_str("RESPONSE\n");
    out.push_str(&format!(
        "\tStatus code: {} {}\n",
        response.status,
        crate::error::reason_phrase(response.status)
    ));
    push_headers(&mut out, &response.headers);
    push_body(&mut out, &response.body);

    out
}

fn push_headers(out: &mut String, headers: &[(String, String)]) {
    out.push_str("\tHeaders:\n");
    for (name, value) in headers {
        out.push_str(&format!("\t\t{}={}\n", name, value));
    }
}

fn push_body(out: &mut String, body: &str) {
    out.push_str("\tBody:\n");
    out.push_str(&format!("\t\t{}\n", body));
}
