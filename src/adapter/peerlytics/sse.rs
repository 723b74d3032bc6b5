//! Incremental `text/event-stream` framing.
//!
//! Bytes arrive in arbitrary chunks; the decoder buffers partial lines and
//! yields complete messages once their terminating blank line is seen.
//! Lines and event payloads are capped; an event that exceeds either cap is
//! still dispatched, empty and flagged `oversized`, so the stream stays open.

/// Longest single line kept in memory.
pub const MAX_LINE_BYTES: usize = 64 * 1024;
/// Largest accumulated `data` payload for one event.
pub const MAX_DATA_BYTES: usize = 256 * 1024;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    pub event: String,
    pub data: String,
    /// The payload hit a size cap and was dropped.
    pub oversized: bool,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    data_len: usize,
    oversized: bool,
    // inside an over-long line; drop bytes until its newline
    skipping_line: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every message it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        loop {
            let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') else {
                if self.skipping_line || self.buffer.len() > MAX_LINE_BYTES {
                    self.buffer.clear();
                    self.skipping_line = true;
                    self.oversized = true;
                }
                break;
            };

            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if std::mem::take(&mut self.skipping_line) {
                continue;
            }
            if line.len() > MAX_LINE_BYTES + 1 {
                self.oversized = true;
                continue;
            }

            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(message) = self.process_line(line) {
                messages.push(message);
            }
        }
        messages
    }

    fn process_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" if self.oversized => {}
            "data" => {
                self.data_len += value.len() + 1;
                if self.data_len > MAX_DATA_BYTES {
                    self.data.clear();
                    self.oversized = true;
                } else {
                    self.data.push(value.to_string());
                }
            }
            // id and retry carry nothing we act on
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        let event = self
            .event
            .take()
            .unwrap_or_else(|| "message".to_string());
        self.data_len = 0;

        if std::mem::take(&mut self.oversized) {
            self.data.clear();
            return Some(SseMessage {
                event,
                data: String::new(),
                oversized: true,
            });
        }
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseMessage {
            event,
            data,
            oversized: false,
        })
    }
}
