//! Server-sent event decoding for streamed completions.

use super::dto::{ChatCompletionChunk, ErrorEnvelope};
use super::errors::stream_error_kind;
use lectern_core::FragmentEvent;
use lectern_error::{RemoteError, RemoteErrorKind, RemoteResult};
use tracing::{trace, warn};

const DONE_MARKER: &str = "[DONE]";

/// Incremental decoder for a `text/event-stream` body.
///
/// Network chunks may split lines anywhere, including inside a multi-byte
/// character, so bytes are buffered until a full line is available. Only
/// `data:` lines carry events; blank lines, comments, and other fields are
/// skipped. A `data:` payload holding an error object becomes an error.
///
/// # Examples
///
/// ```
/// use lectern_core::FragmentEvent;
/// use lectern_models::SseDecoder;
///
/// let mut decoder = SseDecoder::new();
/// let mut events = decoder
///     .decode(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel")
///     .unwrap();
/// assert!(events.is_empty());
///
/// events = decoder.decode(b"lo\"}}]}\n\ndata: [DONE]\n\n").unwrap();
/// assert_eq!(events, [FragmentEvent::delta("Hello"), FragmentEvent::Done]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return every event it completes.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteErrorKind::MalformedResponse`] for a line that is not
    /// UTF-8 or a `data:` payload that is not a valid chunk, and the mapped
    /// failure kind for an error object sent by the endpoint.
    pub fn decode(&mut self, chunk: &[u8]) -> RemoteResult<Vec<FragmentEvent>> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Decode whatever remains after the body ends without a final newline.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn finish(&mut self) -> RemoteResult<Option<FragmentEvent>> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }
}

fn parse_line(raw: &[u8]) -> RemoteResult<Option<FragmentEvent>> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| malformed(format!("Invalid UTF-8 in event stream: {}", e)))?
        .trim_end_matches(['\r', '\n']);

    let Some(data) = line.strip_prefix("data:") else {
        if !line.is_empty() {
            trace!(line, "Skipping non-data event line");
        }
        return Ok(None);
    };

    let data = data.trim_start();
    if data == DONE_MARKER {
        return Ok(Some(FragmentEvent::Done));
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(data) {
        warn!(message = %envelope.error.message, "Error event in stream");
        return Err(RemoteError::new(stream_error_kind(&envelope)));
    }

    let chunk = serde_json::from_str::<ChatCompletionChunk>(data)
        .map_err(|e| malformed(format!("Failed to parse chunk: {}", e)))?;
    Ok(Some(FragmentEvent::Delta(chunk.into_content())))
}

fn malformed(message: String) -> RemoteError {
    RemoteError::new(RemoteErrorKind::MalformedResponse(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> String {
        format!(
            "data: {{\"id\":\"c\",\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
            content
        )
    }

    #[test]
    fn test_events_in_one_chunk() {
        let body = format!("{}{}data: [DONE]\n\n", data("Hello"), data(" world"));

        let events = SseDecoder::new().decode(body.as_bytes()).unwrap();

        assert_eq!(
            events,
            [
                FragmentEvent::delta("Hello"),
                FragmentEvent::delta(" world"),
                FragmentEvent::Done
            ]
        );
    }

    #[test]
    fn test_byte_at_a_time() {
        let body = format!("{}data: [DONE]\n\n", data("héllo"));
        let mut decoder = SseDecoder::new();

        let events: Vec<_> = body
            .as_bytes()
            .iter()
            .flat_map(|b| decoder.decode(std::slice::from_ref(b)).unwrap())
            .collect();

        assert_eq!(events, [FragmentEvent::delta("héllo"), FragmentEvent::Done]);
    }

    #[test]
    fn test_role_chunk_has_no_text() {
        let body = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n";

        let events = SseDecoder::new().decode(body.as_bytes()).unwrap();

        assert_eq!(events, [FragmentEvent::Delta(None)]);
    }

    #[test]
    fn test_comments_and_crlf_are_tolerated() {
        let body = ": keep-alive\r\nevent: message\r\ndata:[DONE]\r\n\r\n";

        let events = SseDecoder::new().decode(body.as_bytes()).unwrap();

        assert_eq!(events, [FragmentEvent::Done]);
    }

    #[test]
    fn test_invalid_payload_is_malformed() {
        let err = SseDecoder::new().decode(b"data: {not json}\n").unwrap_err();

        assert!(matches!(err.kind(), RemoteErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn test_error_event_is_not_an_empty_delta() {
        let body = format!(
            "{}data: {{\"error\":{{\"message\":\"server overloaded\",\"type\":\"server_error\"}}}}\n\ndata: [DONE]\n\n",
            data("partial")
        );

        let err = SseDecoder::new().decode(body.as_bytes()).unwrap_err();

        assert_eq!(
            *err.kind(),
            RemoteErrorKind::Unrecognized("server_error: server overloaded".to_string())
        );
    }

    #[test]
    fn test_error_event_keeps_rate_limit_kind() {
        let body = b"data: {\"error\":{\"message\":\"Rate limit reached\",\"code\":\"rate_limit_exceeded\"}}\n";

        let err = SseDecoder::new().decode(body).unwrap_err();

        assert_eq!(
            *err.kind(),
            RemoteErrorKind::RateLimited("Rate limit reached".to_string())
        );
    }

    #[test]
    fn test_finish_flushes_trailing_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.decode(b"data: [DONE]").unwrap().is_empty());

        assert_eq!(decoder.finish().unwrap(), Some(FragmentEvent::Done));
        assert_eq!(decoder.finish().unwrap(), None);
    }
}
