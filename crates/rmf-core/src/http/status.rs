//! Track the HTTP status across redirect hops from raw header lines.

use std::cell::Cell;

/// Parse a status line (`HTTP/1.1 200 OK`, `HTTP/2 404`) into its code.
/// Returns `None` for ordinary header lines.
pub(crate) fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = std::str::from_utf8(line).ok()?.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Status of the most recent response seen by the header callback.
///
/// With redirects followed, libcurl reports every hop's headers; only the last
/// status line matters for whether body bytes belong to the caller.
#[derive(Debug, Default)]
pub(crate) struct StatusTracker {
    code: Cell<u32>,
}

impl StatusTracker {
    pub(crate) fn observe(&self, line: &[u8]) {
        if let Some(code) = parse_status_line(line) {
            self.code.set(code);
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        is_success(self.code.get())
    }
}

pub(crate) fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_http1_and_http2_status_lines() {
        assert_eq!(parse_status_line(b"HTTP/1.1 200 OK\r\n"), Some(200));
        assert_eq!(parse_status_line(b"HTTP/2 404\r\n"), Some(404));
        assert_eq!(parse_status_line(b"HTTP/1.0 301 Moved Permanently"), Some(301));
    }

    #[test]
    fn ignores_regular_headers() {
        assert_eq!(parse_status_line(b"Content-Length: 12"), None);
        assert_eq!(parse_status_line(b"\r\n"), None);
    }

    #[test]
    fn tracker_keeps_last_hop() {
        let t = StatusTracker::default();
        assert!(!t.is_success());
        t.observe(b"HTTP/1.1 302 Found\r\n");
        t.observe(b"Location: https://cdn.example.com/a.mp4\r\n");
        assert!(!t.is_success());
        t.observe(b"HTTP/1.1 200 OK\r\n");
        assert!(t.is_success());
    }
}
