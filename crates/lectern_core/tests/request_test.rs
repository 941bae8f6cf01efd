use lectern_core::{CompletionRequest, Role};
use lectern_error::BuilderErrorKind;

#[test]
fn test_builder_defaults_to_non_streaming_without_token_cap() {
    let request = CompletionRequest::builder()
        .prompt("Say hello to OpenAI!")
        .model("gpt-3.5-turbo")
        .build()
        .unwrap();

    assert!(!*request.stream());
    assert_eq!(*request.max_output_tokens(), None);
}

#[test]
fn test_builder_rejects_missing_model() {
    let err = CompletionRequest::builder().prompt("Hi").build().unwrap_err();
    assert_eq!(
        err.kind(),
        &BuilderErrorKind::MissingField("model".to_string())
    );
}

#[test]
fn test_builder_rejects_blank_prompt() {
    let result = CompletionRequest::builder()
        .prompt("   ")
        .model("gpt-3.5-turbo")
        .build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("prompt must not be empty"));
}

#[test]
fn test_messages_wrap_prompt_as_single_user_message() {
    let request = CompletionRequest::builder()
        .prompt("Write a haiku about programming")
        .model("gpt-3.5-turbo")
        .stream(true)
        .build()
        .unwrap();

    let messages = request.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(*messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "Write a haiku about programming");
}

#[test]
fn test_request_serializes_without_absent_token_cap() {
    let request = CompletionRequest::builder()
        .prompt("Test 0")
        .model("gpt-3.5-turbo")
        .build()
        .unwrap();

    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("max_output_tokens").is_none());
    assert_eq!(json["stream"], false);
}
