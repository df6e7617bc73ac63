use super::*;
use crate::prompts::{
    ANALYSIS_PROMPT, EXAMPLE_STYLE_GUIDE, SubjectKind, combined_analyses, enhancement_prompt,
    guide_prompt, synthesis_prompt,
};
use std::fs;

#[test]
fn serialize_text_request_matches_expected_shape() {
    let messages = vec![Message::user("Describe Turner's palette")];
    let request = ChatRequest {
        model: "gpt-4o-mini",
        messages: &messages,
        temperature: Some(0.7),
    };
    let value = serde_json::to_value(request).expect("serialize request");

    let expected = serde_json::json!({
        "model": "gpt-4o-mini",
        "messages": [{"role": "user", "content": "Describe Turner's palette"}],
        "temperature": 0.7,
    });

    assert_eq!(value, expected);
}

#[test]
fn serialize_request_omits_absent_temperature() {
    let messages = vec![Message::user("hello")];
    let request = ChatRequest {
        model: "gpt-4o-mini",
        messages: &messages,
        temperature: None,
    };
    let value = serde_json::to_value(request).expect("serialize request");
    assert!(value.get("temperature").is_none());
}

#[test]
fn serialize_vision_message_uses_multipart_content() {
    let message = Message::user_with_image(
        "Analyze this image",
        "data:image/png;base64,aGVsbG8=".to_string(),
    );
    let value = serde_json::to_value(message).expect("serialize message");

    assert_eq!(value["role"], "user");
    assert_eq!(value["content"][0]["type"], "text");
    assert_eq!(value["content"][0]["text"], "Analyze this image");
    assert_eq!(value["content"][1]["type"], "image_url");
    assert_eq!(
        value["content"][1]["image_url"]["url"],
        "data:image/png;base64,aGVsbG8="
    );
    assert_eq!(value["content"][1]["image_url"]["detail"], "high");
}

#[test]
fn parses_completion_payload() {
    let json = r##"
    {
        "choices": [
            {"message": {"role": "assistant", "content": "# Guide"}}
        ]
    }
    "##;

    let response: ChatResponse = serde_json::from_str(json).expect("parse response");
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0].message.content, "# Guide");
}

#[test]
fn empty_api_key_is_rejected() {
    let error = CompletionClient::new("   ", DEFAULT_API_BASE).expect_err("missing key");
    assert!(matches!(error, LlmError::MissingApiKey));
}

#[test]
fn complete_returns_first_choice_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "a fox"}}]}"#)
        .create();

    let client = CompletionClient::new("fake-key", server.url()).expect("build client");
    let text = client
        .complete("test-model", &[Message::user("prompt")], None)
        .expect("completion succeeds");

    assert_eq!(text, "a fox");
    mock.assert();
}

#[test]
fn complete_maps_missing_choices_to_empty_response() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create();

    let client = CompletionClient::new("fake-key", server.url()).expect("build client");
    let error = client
        .complete("test-model", &[Message::user("prompt")], None)
        .expect_err("no choices");
    assert!(matches!(error, LlmError::EmptyResponse));
}

#[test]
fn complete_surfaces_http_status_errors() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .create();

    let client = CompletionClient::new("fake-key", server.url()).expect("build client");
    let error = client
        .complete("test-model", &[Message::user("prompt")], None)
        .expect_err("auth failure");
    assert!(matches!(error, LlmError::Http(_)));
}

#[test]
fn image_data_url_normalizes_jpg_extension() {
    let path = std::env::temp_dir().join(format!("stilo-llm-test-{}.jpg", std::process::id()));
    fs::write(&path, b"hello").expect("write test image");

    let url = image_data_url(&path).expect("encode image");
    assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");

    fs::remove_file(&path).ok();
}

#[test]
fn image_data_url_reports_missing_file() {
    let path = std::env::temp_dir().join("stilo-llm-test-missing.png");
    let error = image_data_url(&path).expect_err("missing file");
    assert!(matches!(error, LlmError::ReadImage { .. }));
}

#[test]
fn guide_prompt_embeds_example_and_subject() {
    let prompt = guide_prompt("Claude Monet", SubjectKind::Artist);
    assert!(prompt.contains("Claude Monet (artist)"));
    assert!(prompt.contains(EXAMPLE_STYLE_GUIDE));

    let prompt = guide_prompt("Art Nouveau", SubjectKind::Movement);
    assert!(prompt.contains("Art Nouveau (artistic style or movement)"));
}

#[test]
fn combined_analyses_are_labeled_and_separated() {
    let analyses = vec!["first".to_string(), "second".to_string()];
    let combined = combined_analyses(&analyses);
    assert!(combined.starts_with("## Image 1 Analysis\nfirst"));
    assert!(combined.contains("\n\n---\n\n## Image 2 Analysis\nsecond"));
}

#[test]
fn synthesis_prompt_counts_analyses() {
    let analyses = vec!["first".to_string(), "second".to_string(), "third".to_string()];
    let prompt = synthesis_prompt(&analyses);
    assert!(prompt.contains("analyses of 3 images"));
    assert!(prompt.contains(EXAMPLE_STYLE_GUIDE));
}

#[test]
fn analysis_prompt_lists_all_six_categories() {
    for category in [
        "Core Characteristics",
        "Color Palette",
        "Composition",
        "Technique",
        "Mood",
        "Subject Matter",
    ] {
        assert!(ANALYSIS_PROMPT.contains(category), "missing {category}");
    }
}

#[test]
fn enhancement_prompt_embeds_guide_and_subject() {
    let prompt = enhancement_prompt("# Turner Guide\ngolden skies", "a castle at dusk");
    assert!(prompt.contains("# Turner Guide\ngolden skies"));
    assert!(prompt.contains("a castle at dusk"));
    assert!(prompt.contains("2-4 sentences maximum"));
}
