//! Translation of failed responses into [`Error`]s.
//!
//! The service reports failures in two shapes. XML payloads carry one or more
//! `Message` elements, possibly nested inside a generic wrapper; the last one
//! in document order is the most specific. JSON payloads carry
//! `{"exceptions": [{"message": "..."}]}`. A payload that cannot be parsed
//! leaves the error without a service message.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::error::Error;

/// JSON error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    exceptions: Vec<ServiceException>,
}

#[derive(Debug, Deserialize)]
struct ServiceException {
    message: Option<String>,
}

/// Returns true for XML media types (`text/xml`, `application/xml`, `*+xml`).
fn is_xml(content_type: &str) -> bool {
    match content_type.trim().to_ascii_lowercase().parse::<mime::Mime>() {
        Ok(media) => {
            media.subtype() == mime::XML || media.suffix().is_some_and(|s| s == mime::XML)
        }
        Err(_) => false,
    }
}

/// Build the error for a non-success response.
pub(crate) fn translate_error(status: u16, content_type: Option<&str>, body: &[u8]) -> Error {
    Error::transport(status, extract_service_message(content_type, body))
}

/// Extract the service's own error message from a response body.
///
/// Blank messages count as absent.
pub fn extract_service_message(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    let message = if content_type.is_some_and(is_xml) {
        last_xml_message(body)
    } else {
        json_exception_message(body)
    };

    message.filter(|m| !m.trim().is_empty())
}

/// Value of the last element named `Message`, ordered by where it opens.
fn last_xml_message(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    let mut reader = Reader::from_str(text);

    // (ordinal, collected text) for every open element; Message elements
    // carry Some(ordinal) so their text can be attributed on close.
    let mut open: Vec<Option<(usize, String)>> = Vec::new();
    let mut last: Option<(usize, String)> = None;
    let mut ordinal = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                saw_root = true;
                ordinal += 1;
                if e.local_name().as_ref() == b"Message" {
                    open.push(Some((ordinal, String::new())));
                } else {
                    open.push(None);
                }
            }
            Ok(Event::Empty(e)) => {
                saw_root = true;
                ordinal += 1;
                if e.local_name().as_ref() == b"Message" {
                    keep_latest(&mut last, (ordinal, String::new()));
                }
            }
            Ok(Event::End(_)) => match open.pop() {
                Some(Some(message)) => keep_latest(&mut last, message),
                Some(None) => {}
                None => return None,
            },
            Ok(Event::Text(t)) => {
                let value = t.unescape().ok()?;
                append_to_open(&mut open, &value);
            }
            Ok(Event::CData(c)) => {
                let raw = c.into_inner();
                let value = std::str::from_utf8(&raw).ok()?;
                append_to_open(&mut open, value);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if !saw_root || !open.is_empty() {
        return None;
    }

    last.map(|(_, text)| text)
}

fn keep_latest(last: &mut Option<(usize, String)>, candidate: (usize, String)) {
    if last.as_ref().is_none_or(|(seen, _)| candidate.0 > *seen) {
        *last = Some(candidate);
    }
}

/// Element text includes the text of all descendants.
fn append_to_open(open: &mut [Option<(usize, String)>], value: &str) {
    for (_, text) in open.iter_mut().flatten() {
        text.push_str(value);
    }
}

/// `exceptions[0].message` from a JSON error envelope.
fn json_exception_message(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    envelope.exceptions.into_iter().next()?.message
}
