//! Trait definitions for completion backends.

use async_trait::async_trait;
use futures_util::stream::Stream;
use lectern_core::{CompletionRequest, CompletionResponse, FragmentEvent};
use lectern_error::RemoteResult;
use std::pin::Pin;

/// Lazy, finite, single-use sequence of fragment events.
///
/// Pulled one event at a time. Owning the stream is the only way to consume
/// it, so it cannot be restarted once handed to an assembler.
pub type FragmentStream = Pin<Box<dyn Stream<Item = RemoteResult<FragmentEvent>> + Send>>;

/// The remote completion call.
///
/// Implementations perform exactly one network round trip per call and report
/// failures as [`RemoteError`](lectern_error::RemoteError) values. Retrying and
/// pacing belong to the dispatcher, never to the backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue one non-streaming completion call.
    async fn complete(&self, req: &CompletionRequest) -> RemoteResult<CompletionResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

/// Backends that can stream completions.
#[async_trait]
pub trait StreamingBackend: CompletionBackend {
    /// Open a streamed completion.
    ///
    /// Failing to open the stream is an ordinary remote failure. Failures after
    /// the stream is open arrive as error items inside the stream.
    async fn complete_stream(&self, req: &CompletionRequest) -> RemoteResult<FragmentStream>;
}
