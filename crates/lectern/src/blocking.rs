//! Blocking front end over the async dispatcher.

use lectern_core::{Completion, CompletionRequest};
use lectern_dispatch::Dispatcher;
use lectern_error::{DispatchResult, LecternResult, RuntimeError};
use lectern_interface::StreamingBackend;
use lectern_rate_limit::LecternConfig;
use std::num::NonZeroU32;
use tokio::runtime::Runtime;

/// A [`Dispatcher`] driven on its own current-thread runtime.
///
/// Every call blocks the calling thread until the dispatch reaches its
/// terminal value, pacing and retry delays included. Must not be used from
/// inside an async runtime.
#[derive(Debug)]
pub struct BlockingDispatcher<B> {
    runtime: Runtime,
    inner: Dispatcher<B>,
}

impl<B: StreamingBackend> BlockingDispatcher<B> {
    /// Wrap an existing dispatcher.
    ///
    /// # Errors
    ///
    /// Returns a [`RuntimeError`] if the async runtime cannot be started.
    pub fn new(inner: Dispatcher<B>) -> LecternResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RuntimeError::new(format!("Failed to start async runtime: {}", e)))?;
        Ok(Self { runtime, inner })
    }

    /// Build the dispatcher from configuration and wrap it.
    pub fn from_config(backend: B, config: &LecternConfig) -> LecternResult<Self> {
        Self::new(Dispatcher::from_config(backend, config)?)
    }

    /// The wrapped dispatcher.
    pub fn inner(&self) -> &Dispatcher<B> {
        &self.inner
    }

    /// Unwrap into the async dispatcher, dropping the runtime.
    pub fn into_inner(self) -> Dispatcher<B> {
        self.inner
    }

    /// Blocking [`Dispatcher::dispatch`].
    pub fn dispatch(&mut self, request: &CompletionRequest) -> DispatchResult<Completion> {
        self.runtime.block_on(self.inner.dispatch(request))
    }

    /// Blocking [`Dispatcher::dispatch_with_attempts`].
    pub fn dispatch_with_attempts(
        &mut self,
        request: &CompletionRequest,
        max_attempts: NonZeroU32,
    ) -> DispatchResult<Completion> {
        self.runtime
            .block_on(self.inner.dispatch_with_attempts(request, max_attempts))
    }

    /// Blocking [`Dispatcher::dispatch_with_observer`].
    pub fn dispatch_with_observer<F>(
        &mut self,
        request: &CompletionRequest,
        max_attempts: NonZeroU32,
        on_fragment: F,
    ) -> DispatchResult<Completion>
    where
        F: FnMut(&str),
    {
        self.runtime.block_on(
            self.inner
                .dispatch_with_observer(request, max_attempts, on_fragment),
        )
    }
}
