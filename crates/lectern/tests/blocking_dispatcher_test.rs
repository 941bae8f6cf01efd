use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures_util::{StreamExt, stream};
use lectern::{
    BackoffPolicy, BlockingDispatcher, Choice, CompletionBackend, CompletionRequest,
    CompletionResponse, Dispatcher, DispatchErrorKind, FinishReason, FragmentEvent,
    FragmentStream, RateLimiter, RemoteError, RemoteErrorKind, RemoteResult, StreamingBackend,
    TransientErrorClassifier, Usage,
};
use std::num::NonZeroU32;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Backend that fails `failures` times with the given kind, then succeeds.
#[derive(Debug)]
struct FlakyBackend {
    failure: RemoteErrorKind,
    failures: usize,
    calls: AtomicUsize,
    fragments: Mutex<Vec<&'static str>>,
}

impl FlakyBackend {
    fn new(failure: RemoteErrorKind, failures: usize) -> Self {
        Self {
            failure,
            failures,
            calls: AtomicUsize::new(0),
            fragments: Mutex::new(vec!["Hello", ", ", "world"]),
        }
    }

    fn call(&self) -> RemoteResult<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(RemoteError::new(self.failure.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CompletionBackend for FlakyBackend {
    async fn complete(&self, _req: &CompletionRequest) -> RemoteResult<CompletionResponse> {
        self.call()?;
        Ok(CompletionResponse::builder()
            .id("chatcmpl-blocking")
            .model("gpt-3.5-turbo")
            .created_at(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
            .choices(vec![Choice::new("Charcoal and cream", FinishReason::Stop)])
            .usage(Usage::new(12, 4, 16))
            .build()
            .unwrap())
    }

    fn provider_name(&self) -> &'static str {
        "flaky"
    }
}

#[async_trait]
impl StreamingBackend for FlakyBackend {
    async fn complete_stream(&self, _req: &CompletionRequest) -> RemoteResult<FragmentStream> {
        self.call()?;
        let mut events: Vec<RemoteResult<FragmentEvent>> = self
            .fragments
            .lock()
            .unwrap()
            .iter()
            .map(|f| Ok(FragmentEvent::delta(*f)))
            .collect();
        events.push(Ok(FragmentEvent::Done));
        Ok(stream::iter(events).boxed())
    }
}

fn blocking(backend: FlakyBackend, max_attempts: u32) -> BlockingDispatcher<FlakyBackend> {
    let dispatcher = Dispatcher::new(
        backend,
        RateLimiter::new(60_000).unwrap(),
        TransientErrorClassifier::new(BackoffPolicy::new(
            Duration::from_millis(20),
            Duration::from_millis(5),
        )),
        NonZeroU32::new(max_attempts).unwrap(),
    );
    BlockingDispatcher::new(dispatcher).unwrap()
}

fn request(stream: bool) -> CompletionRequest {
    CompletionRequest::builder()
        .prompt("2 most preferred colours for a casual office shirt")
        .model("gpt-3.5-turbo")
        .stream(stream)
        .build()
        .unwrap()
}

#[test]
fn test_blocking_dispatch_retries_then_succeeds() {
    let mut d = blocking(
        FlakyBackend::new(RemoteErrorKind::RateLimited("slow down".into()), 2),
        3,
    );

    let completion = d.dispatch(&request(false)).unwrap();

    assert_eq!(completion.text(), "Charcoal and cream");
    assert_eq!(*completion.attempts(), 3);
    assert_eq!(d.inner().backend().calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_blocking_dispatch_reports_exhaustion() {
    let mut d = blocking(
        FlakyBackend::new(RemoteErrorKind::Connection("refused".into()), 10),
        2,
    );

    let err = d.dispatch(&request(false)).unwrap_err();

    assert_eq!(
        err.reason(),
        "retries exhausted after 2 attempts (last failure: Connection error: refused)"
    );
}

#[test]
fn test_blocking_dispatch_fails_fast_on_fatal() {
    let mut d = blocking(
        FlakyBackend::new(RemoteErrorKind::Authentication("invalid api key".into()), 1),
        3,
    );

    let err = d
        .dispatch_with_attempts(&request(false), NonZeroU32::new(5).unwrap())
        .unwrap_err();

    assert!(matches!(err.kind(), DispatchErrorKind::Fatal(_)));
    assert_eq!(d.inner().backend().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_blocking_stream_with_observer() {
    let mut d = blocking(
        FlakyBackend::new(RemoteErrorKind::Connection("reset".into()), 1),
        3,
    );

    let mut seen = Vec::new();
    let completion = d
        .dispatch_with_observer(&request(true), NonZeroU32::new(3).unwrap(), |f| {
            seen.push(f.to_string())
        })
        .unwrap();

    assert_eq!(completion.text(), "Hello, world");
    assert_eq!(seen, ["Hello", ", ", "world"]);
    assert_eq!(*completion.attempts(), 2);
}

#[test]
fn test_into_inner_keeps_limiter_state() {
    let mut d = blocking(FlakyBackend::new(RemoteErrorKind::Connection("x".into()), 0), 1);
    d.dispatch(&request(false)).unwrap();

    let inner = d.into_inner();

    assert!(inner.limiter().last_request().is_some());
}
