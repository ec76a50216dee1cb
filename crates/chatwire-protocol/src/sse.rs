/// Incremental event framer for OpenAI-compatible SSE streams.
///
/// Standard SSE separates events with a blank line. Several compatible
/// servers instead push one JSON object per line with no blank-line
/// separator at all, so after the standard pass the framer also flushes
/// every complete line still sitting in the buffer as its own event.
/// An unterminated tail is never dropped — it stays buffered until the
/// next fragment arrives.
pub struct SseFramer {
    buf: String,
}

impl SseFramer {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Feed one raw text fragment from the transport. Returns every event
    /// chunk that became complete, in arrival order. Fragments may split
    /// mid-line or mid-JSON-object, or batch several events at once.
    pub fn feed(&mut self, fragment: &str) -> Vec<String> {
        self.buf.push_str(fragment);
        if self.buf.contains("\r\n") {
            self.buf = self.buf.replace("\r\n", "\n");
        }

        let mut chunks = Vec::new();

        // Standard framing: events delimited by a blank line.
        while let Some(sep) = self.buf.find("\n\n") {
            let chunk = self.buf[..sep].to_string();
            self.buf.drain(..sep + 2);
            chunks.push(chunk);
        }

        // Line framing: whatever remains that ends in a newline is handed
        // over line by line. Recovers servers that never send a blank
        // separator.
        if let Some(last_nl) = self.buf.rfind('\n') {
            let complete = self.buf[..last_nl].to_string();
            self.buf.drain(..=last_nl);
            for line in complete.split('\n') {
                chunks.push(line.to_string());
            }
        }

        chunks
    }

    /// Unclassified text still waiting for more input.
    pub fn pending(&self) -> &str {
        &self.buf
    }
}

impl Default for SseFramer {
    fn default() -> Self {
        Self::new()
    }
}
