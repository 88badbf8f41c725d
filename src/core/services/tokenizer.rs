//! Splits raw log output into commit hunks
//!
//! Every record ends with [`SENTINEL`] followed by the record's own line
//! break. A bare newline never ends a record, so commit bodies can span
//! lines. Data may arrive in arbitrary chunks; the codec keeps its scan
//! position between calls.

use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Control byte terminating each record (BEL)
pub const SENTINEL: u8 = 0x07;

/// Pretty-format spelling of [`SENTINEL`], appended to log templates
pub const SENTINEL_MARKER: &str = "%x07";

/// Stateful decoder from raw log bytes to hunks
#[derive(Debug, Clone, Copy, Default)]
pub struct HunkCodec {
    // Bytes before this offset hold no sentinel
    scan_from: usize,
    // Position of the sentinel of the record being assembled
    sentinel_at: Option<usize>,
}

impl HunkCodec {
    /// Create a codec positioned at the start of a stream
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scan_from: 0,
            sentinel_at: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn find_sentinel(&mut self, buf: &[u8]) -> Option<usize> {
        if self.sentinel_at.is_none() {
            match buf[self.scan_from..].iter().position(|&b| b == SENTINEL) {
                Some(offset) => self.sentinel_at = Some(self.scan_from + offset),
                None => self.scan_from = buf.len(),
            }
        }
        self.sentinel_at
    }
}

impl Decoder for HunkCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        let Some(sentinel) = self.find_sentinel(buf) else {
            return Ok(None);
        };
        let Some(offset) = buf[sentinel..].iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };

        let record = buf.split_to(sentinel + offset + 1);
        self.reset();
        Ok(Some(hunk_text(&record[..sentinel])))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        if let Some(hunk) = self.decode(buf)? {
            return Ok(Some(hunk));
        }
        if buf.is_empty() {
            return Ok(None);
        }

        let rest = buf.split();
        self.reset();
        let hunk = hunk_text(rest.strip_suffix(&[SENTINEL]).unwrap_or(&rest[..]));
        Ok((!hunk.is_empty()).then_some(hunk))
    }
}

fn hunk_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
