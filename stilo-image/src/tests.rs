use super::*;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn unique_temp_dir() -> PathBuf {
    let id = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "stilo-image-test-{}-{}",
        std::process::id(),
        id
    ));
    fs::create_dir_all(&dir).expect("create temp directory");
    dir
}

#[test]
fn serialize_prediction_request_matches_expected_shape() {
    let request = PredictionRequest {
        input: PredictionInput {
            prompt: "a fox in the snow",
        },
    };
    let value = serde_json::to_value(request).expect("serialize request");

    let expected = serde_json::json!({
        "input": {"prompt": "a fox in the snow"},
    });

    assert_eq!(value, expected);
}

#[test]
fn empty_api_token_is_rejected() {
    let error = ImageClient::new("   ", DEFAULT_API_BASE).expect_err("missing token");
    assert!(matches!(error, ImageError::MissingApiToken));
}

#[test]
fn generate_accepts_single_url_output() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/google/nano-banana/predictions")
        .match_header("Prefer", "wait")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": "https://example.com/out.png"}"#)
        .create();

    let client = ImageClient::new("fake-token", server.url()).expect("build client");
    let url = client
        .generate("google/nano-banana", "a fox")
        .expect("generation succeeds");

    assert_eq!(url, "https://example.com/out.png");
    mock.assert();
}

#[test]
fn generate_takes_first_url_from_sequence_output() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/models/google/nano-banana/predictions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": ["https://example.com/a.png", "https://example.com/b.png"]}"#)
        .create();

    let client = ImageClient::new("fake-token", server.url()).expect("build client");
    let url = client
        .generate("google/nano-banana", "a fox")
        .expect("generation succeeds");

    assert_eq!(url, "https://example.com/a.png");
}

#[test]
fn generate_rejects_payload_without_output() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/models/google/nano-banana/predictions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "failed"}"#)
        .create();

    let client = ImageClient::new("fake-token", server.url()).expect("build client");
    let error = client
        .generate("google/nano-banana", "a fox")
        .expect_err("no output");
    assert!(matches!(error, ImageError::MissingOutput));
}

#[test]
fn download_returns_bytes_and_content_type() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/out.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(b"image-bytes".as_slice())
        .create();

    let client = ImageClient::new("fake-token", server.url()).expect("build client");
    let image = client
        .download(&format!("{}/out.png", server.url()))
        .expect("download succeeds");

    assert_eq!(image.bytes, b"image-bytes");
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
}

#[test]
fn extension_defaults_to_png() {
    assert_eq!(extension_from_content_type(None), "png");
    assert_eq!(extension_from_content_type(Some("application/json")), "png");
}

#[test]
fn extension_follows_content_type() {
    assert_eq!(extension_from_content_type(Some("image/jpeg")), "jpg");
    assert_eq!(extension_from_content_type(Some("image/webp")), "webp");
    assert_eq!(
        extension_from_content_type(Some("image/gif; charset=binary")),
        "gif"
    );
}

#[test]
fn save_image_writes_bytes_to_named_file() {
    let dir = unique_temp_dir();

    let path = save_image(b"hello", &dir, "a_bright_red_fox", "png").expect("save image");
    assert_eq!(path, dir.join("a_bright_red_fox.png"));

    let bytes = fs::read(&path).expect("read saved image");
    assert_eq!(bytes, b"hello");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn save_image_overwrites_existing_file() {
    let dir = unique_temp_dir();

    save_image(b"first", &dir, "same_name", "png").expect("first save");
    let path = save_image(b"second", &dir, "same_name", "png").expect("second save");

    let bytes = fs::read(&path).expect("read saved image");
    assert_eq!(bytes, b"second");

    fs::remove_dir_all(&dir).ok();
}
