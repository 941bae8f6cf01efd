use futures_util::StreamExt;
use lectern_core::{CompletionRequest, FragmentEvent};
use lectern_error::{LecternErrorKind, RemoteErrorKind};
use lectern_interface::{CompletionBackend, StreamingBackend};
use lectern_models::OpenAIClient;
use lectern_rate_limit::ClientConfig;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn request(stream: bool) -> CompletionRequest {
    CompletionRequest::builder()
        .prompt("Say 'test' and nothing else.")
        .model("gpt-3.5-turbo")
        .max_output_tokens(10u32)
        .stream(stream)
        .build()
        .unwrap()
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = OpenAIClient::new("sk-test", "http://localhost:8080/v1/", Duration::from_secs(5))
        .unwrap();

    assert_eq!(client.base_url(), "http://localhost:8080/v1");
    assert_eq!(client.provider_name(), "openai");
}

#[test]
fn test_from_config_requires_key_variable() {
    let config = ClientConfig {
        api_key_env: "LECTERN_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..ClientConfig::default()
    };

    let err = OpenAIClient::from_config(&config).unwrap_err();

    assert!(matches!(err.kind(), LecternErrorKind::Config(_)));
    assert!(err.to_string().contains("LECTERN_TEST_KEY_THAT_IS_NEVER_SET"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connection_error() {
    // Nothing listens on port 1 of the loopback interface.
    let client =
        OpenAIClient::new("sk-test", "http://127.0.0.1:1/v1", Duration::from_secs(5)).unwrap();

    let err = client.complete(&request(false)).await.unwrap_err();
    assert!(matches!(err.kind(), RemoteErrorKind::Connection(_)));

    let err = client.complete_stream(&request(true)).await.err().unwrap();
    assert!(matches!(err.kind(), RemoteErrorKind::Connection(_)));
}

/// Serve one event-stream response, writing each event after `gap`.
async fn serve_events(events: Vec<String>, gap: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 8192];
        let _ = socket.read(&mut request).await.unwrap();

        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n",
            )
            .await
            .unwrap();
        for event in events {
            tokio::time::sleep(gap).await;
            if socket.write_all(event.as_bytes()).await.is_err() {
                return;
            }
        }
        let _ = socket.shutdown().await;
    });

    format!("http://{}/v1", addr)
}

fn delta(content: &str) -> String {
    format!(
        "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
        content
    )
}

#[tokio::test]
async fn test_stream_may_outlast_timeout_while_fragments_arrive() {
    let mut events: Vec<String> = (0..5).map(|i| delta(&format!("t{} ", i))).collect();
    events.push("data: [DONE]\n\n".to_string());
    let base_url = serve_events(events, Duration::from_millis(400)).await;
    let client = OpenAIClient::new("sk-test", &base_url, Duration::from_secs(1)).unwrap();

    let stream = client.complete_stream(&request(true)).await.unwrap();
    let events: Vec<_> = stream.collect().await;

    assert_eq!(events.len(), 6);
    let text: String = events
        .iter()
        .filter_map(|event| match event {
            Ok(FragmentEvent::Delta(Some(fragment))) => Some(fragment.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "t0 t1 t2 t3 t4 ");
    assert!(matches!(events.last(), Some(Ok(FragmentEvent::Done))));
}

#[tokio::test]
async fn test_stalled_stream_is_connection_error() {
    let events = vec![delta("first"), delta("never seen")];
    let base_url = serve_events(events, Duration::from_secs(3)).await;
    let client = OpenAIClient::new("sk-test", &base_url, Duration::from_secs(1)).unwrap();

    let stream = client.complete_stream(&request(true)).await.unwrap();
    let events: Vec<_> = stream.collect().await;

    assert_eq!(events.len(), 1);
    let err = events[0].as_ref().unwrap_err();
    assert!(matches!(err.kind(), RemoteErrorKind::Connection(_)));
}

#[tokio::test]
async fn test_error_event_in_stream_is_reported() {
    let events = vec![
        delta("partial"),
        "data: {\"error\":{\"message\":\"server overloaded\",\"type\":\"server_error\"}}\n\n"
            .to_string(),
    ];
    let base_url = serve_events(events, Duration::from_millis(10)).await;
    let client = OpenAIClient::new("sk-test", &base_url, Duration::from_secs(5)).unwrap();

    let stream = client.complete_stream(&request(true)).await.unwrap();
    let events: Vec<_> = stream.collect().await;

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Ok(FragmentEvent::Delta(Some(_)))));
    let err = events[1].as_ref().unwrap_err();
    assert!(err.to_string().contains("server overloaded"));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_simple_completion() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let client = OpenAIClient::from_config(&ClientConfig::default())?;

    let response = client.complete(&request(false)).await?;

    assert!(response.text().is_some_and(|text| !text.is_empty()));
    println!("Response: {:?}", response.text());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_streamed_completion_through_dispatcher(
) -> Result<(), Box<dyn std::error::Error>> {
    use lectern_dispatch::Dispatcher;
    use lectern_rate_limit::LecternConfig;
    use std::num::NonZeroU32;

    dotenvy::dotenv().ok();
    let config = LecternConfig::default();
    let client = OpenAIClient::from_config(&config.client)?;
    let mut dispatcher = Dispatcher::from_config(client, &config)?;

    let mut fragments = Vec::new();
    let completion = dispatcher
        .dispatch_with_observer(&request(true), NonZeroU32::MIN, |f| {
            fragments.push(f.to_string())
        })
        .await?;

    assert_eq!(completion.text(), &fragments.concat());
    Ok(())
}
