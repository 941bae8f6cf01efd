//! Reassembly of streamed completions.

use futures_util::stream::{Stream, StreamExt};
use lectern_core::FragmentEvent;
use lectern_error::{RemoteResult, StreamError, StreamErrorKind, StreamResult};
use tracing::{debug, instrument, trace, warn};

/// Collects fragments of one streamed completion.
///
/// Each non-empty fragment is buffered and forwarded to the observer before
/// the next one is pulled, so the observer sees fragments exactly once and in
/// arrival order. The assembler and its source are consumed by
/// [`consume`](Self::consume); neither can be reused.
///
/// # Examples
///
/// ```
/// use futures_util::stream;
/// use lectern_core::FragmentEvent;
/// use lectern_dispatch::StreamAssembler;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let source = stream::iter(vec![
///     Ok(FragmentEvent::delta("Hello")),
///     Ok(FragmentEvent::delta(", ")),
///     Ok(FragmentEvent::delta("world")),
///     Ok(FragmentEvent::Done),
/// ]);
///
/// let mut seen = Vec::new();
/// let text = StreamAssembler::new()
///     .consume(source, |fragment| seen.push(fragment.to_string()))
///     .await
///     .unwrap();
///
/// assert_eq!(text, "Hello, world");
/// assert_eq!(seen, ["Hello", ", ", "world"]);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamAssembler {
    buffer: Vec<String>,
}

impl StreamAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `source`, forwarding each fragment to `on_fragment`, and return
    /// the concatenated text once the completion marker arrives.
    ///
    /// # Errors
    ///
    /// Returns [`StreamErrorKind::Interrupted`] when the source yields an error
    /// and [`StreamErrorKind::MissingTerminator`] when it ends without a
    /// [`FragmentEvent::Done`].
    #[instrument(skip_all)]
    pub async fn consume<S, F>(mut self, mut source: S, mut on_fragment: F) -> StreamResult<String>
    where
        S: Stream<Item = RemoteResult<FragmentEvent>> + Unpin,
        F: FnMut(&str),
    {
        while let Some(event) = source.next().await {
            match event {
                Ok(FragmentEvent::Delta(Some(text))) if !text.is_empty() => {
                    trace!(len = text.len(), "Fragment received");
                    on_fragment(&text);
                    self.buffer.push(text);
                }
                Ok(FragmentEvent::Delta(_)) => {}
                Ok(FragmentEvent::Done) => {
                    debug!(fragments = self.buffer.len(), "Stream complete");
                    return Ok(self.buffer.concat());
                }
                Err(e) => {
                    warn!(error = %e, fragments = self.buffer.len(), "Stream interrupted");
                    return Err(StreamError::new(StreamErrorKind::Interrupted(e.kind)));
                }
            }
        }

        warn!(fragments = self.buffer.len(), "Stream ended without completion marker");
        Err(StreamError::new(StreamErrorKind::MissingTerminator(
            self.buffer.len(),
        )))
    }
}
