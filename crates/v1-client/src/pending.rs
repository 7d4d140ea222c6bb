//! Buffers for staged writes.
//!
//! A staged write opens a buffer keyed by API path, lets the caller write the
//! body incrementally, and hands the accumulated bytes to the request
//! pipeline when it is finalized.

use std::collections::HashMap;
use std::io;

use bytes::Bytes;

use crate::error::{Error, ErrorKind, Result};

/// An open request body that has not been sent yet.
#[derive(Debug, Default)]
pub struct PendingWrite {
    buffer: Vec<u8>,
}

impl PendingWrite {
    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl io::Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Open staged writes, one per API path.
#[derive(Debug, Default)]
pub(crate) struct PendingWrites {
    streams: HashMap<String, PendingWrite>,
}

impl PendingWrites {
    /// Open a fresh buffer for `api_path`, discarding any previous one.
    pub(crate) fn begin(&mut self, api_path: &str) -> &mut PendingWrite {
        let slot = self.streams.entry(api_path.to_string()).or_default();
        *slot = PendingWrite::default();
        slot
    }

    /// Remove the buffer for `api_path` and return its contents.
    pub(crate) fn finish(&mut self, api_path: &str) -> Result<Bytes> {
        self.streams
            .remove(api_path)
            .map(|pending| Bytes::from(pending.buffer))
            .ok_or_else(|| {
                Error::new(ErrorKind::Lookup(format!(
                    "no pending request for '{}'",
                    api_path
                )))
            })
    }

    pub(crate) fn contains(&self, api_path: &str) -> bool {
        self.streams.contains_key(api_path)
    }
}
