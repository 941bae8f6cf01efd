//! HTTP client for the chat completions endpoint.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse};
use super::errors::{status_error_kind, transport_error_kind};
use super::sse::SseDecoder;
use async_trait::async_trait;
use futures_util::StreamExt;
use lectern_core::{CompletionRequest, CompletionResponse};
use lectern_error::{ConfigError, HttpError, LecternResult, RemoteError, RemoteResult};
use lectern_interface::{CompletionBackend, FragmentStream, StreamingBackend};
use lectern_rate_limit::ClientConfig;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Client for the OpenAI chat completions API.
///
/// Every call is a single HTTP round trip. Failures are reported as
/// [`RemoteError`] values so the dispatcher can classify them; this client
/// never retries on its own.
///
/// The timeout bounds connecting and each wait for more bytes. Only
/// non-streaming calls also cap the whole exchange, so a stream that keeps
/// producing fragments may run longer than the timeout.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a client with an explicit key, base URL, and timeout.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if the HTTP client cannot be initialized.
    #[instrument(skip(api_key), fields(base_url = %base_url.as_ref()))]
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> LecternResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Creating OpenAI client");
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client from the `[client]` configuration section, reading the
    /// key from the environment variable it names.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the key variable is unset or empty.
    pub fn from_config(config: &ClientConfig) -> LecternResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} not set", config.api_key_env)))?;

        Self::new(api_key, &config.base_url, config.timeout())
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// POST the body and turn any non-success status into a failure kind.
    ///
    /// `total` caps the whole exchange when set.
    async fn send(
        &self,
        body: &ChatCompletionRequest,
        total: Option<Duration>,
    ) -> RemoteResult<reqwest::Response> {
        let url = self.endpoint();
        debug!(url = %url, "Sending chat completion request");

        let mut request = self.client.post(&url).bearer_auth(&self.api_key).json(body);
        if let Some(total) = total {
            request = request.timeout(total);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
                error!("Request failed: {}", e);
                RemoteError::new(transport_error_kind(&e))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let kind = status_error_kind(status.as_u16(), &text);
        error!(status = status.as_u16(), %kind, "Endpoint returned error");
        Err(RemoteError::new(kind))
    }
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    #[instrument(skip(self, req), fields(model = %req.model()))]
    async fn complete(&self, req: &CompletionRequest) -> RemoteResult<CompletionResponse> {
        let mut body = ChatCompletionRequest::from(req);
        body.stream = None;

        let response = self.send(&body, Some(self.timeout)).await?;
        let wire: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            RemoteError::new(transport_error_kind(&e))
        })?;

        debug!(id = %wire.id, choices = wire.choices.len(), "Chat completion received");
        wire.into_response()
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[async_trait]
impl StreamingBackend for OpenAIClient {
    #[instrument(skip(self, req), fields(model = %req.model()))]
    async fn complete_stream(&self, req: &CompletionRequest) -> RemoteResult<FragmentStream> {
        let mut body = ChatCompletionRequest::from(req);
        body.stream = Some(true);

        let response = self.send(&body, None).await?;
        debug!("Streaming request accepted, decoding event stream");

        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut finished = false;

            'read: while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(RemoteError::new(transport_error_kind(&e)));
                        finished = true;
                        break 'read;
                    }
                };

                match decoder.decode(&chunk) {
                    Ok(events) => {
                        for event in events {
                            let done = event.is_done();
                            yield Ok(event);
                            if done {
                                finished = true;
                                break 'read;
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        finished = true;
                        break 'read;
                    }
                }
            }

            if !finished {
                match decoder.finish() {
                    Ok(Some(event)) => {
                        yield Ok(event);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        yield Err(e);
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
