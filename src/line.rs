//! Newline framing for bytes arriving off the wire.
//!
//! Reads hand back arbitrary chunks, so a line may span several reads or a
//! single read may carry several lines. [`LineBuffer`] keeps the unterminated
//! tail between calls.

use crate::constants::MAX_LINE_LENGTH;

#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    max_len: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        LineBuffer::with_max_len(MAX_LINE_LENGTH)
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tail reaching `max_len` bytes without a newline is handed out as a
    /// line of its own.
    pub fn with_max_len(max_len: usize) -> Self {
        LineBuffer {
            pending: Vec::new(),
            max_len: max_len.max(4),
        }
    }

    /// Append a received chunk and return every line it completed, in order.
    /// Lines that are empty after decoding and trimming are skipped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if byte == b'\n' {
                let raw = std::mem::take(&mut self.pending);
                lines.extend(decode_line(&raw));
                continue;
            }

            self.pending.push(byte);
            if self.pending.len() >= self.max_len {
                lines.extend(self.split_overlong());
            }
        }

        lines
    }

    /// Bytes held back waiting for a newline
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    // Cut on a character boundary; the piece keeps its whitespace since the
    // line continues in the next one.
    fn split_overlong(&mut self) -> Option<String> {
        let cut = incomplete_tail_start(&self.pending);
        let tail = self.pending.split_off(cut);
        let head = std::mem::replace(&mut self.pending, tail);

        let text = decode_lossy(&head);
        (!text.is_empty()).then_some(text)
    }
}

/// Decode one raw line as UTF-8, dropping invalid sequences, and trim the
/// trailing whitespace. Returns `None` if nothing printable is left.
pub fn decode_line(raw: &[u8]) -> Option<String> {
    let text = decode_lossy(raw);
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn decode_lossy(raw: &[u8]) -> String {
    let mut text = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Index where a multibyte sequence that is still missing bytes begins, or
/// `bytes.len()` if the buffer does not end mid-character.
fn incomplete_tail_start(bytes: &[u8]) -> usize {
    let floor = bytes.len().saturating_sub(3);
    for start in (floor..bytes.len()).rev() {
        if bytes[start] & 0xC0 == 0xC0 {
            return match std::str::from_utf8(&bytes[start..]) {
                Err(e) if e.error_len().is_none() => start,
                _ => bytes.len(),
            };
        }
        if bytes[start] & 0x80 == 0 {
            break;
        }
    }
    bytes.len()
}
