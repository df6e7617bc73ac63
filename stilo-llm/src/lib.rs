use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Temperature used for all style-guide building calls. The prompt
/// enhancement call passes no temperature and takes the provider default.
pub const GUIDE_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion API key is missing")]
    MissingApiKey,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("completion response contained no choices")]
    EmptyResponse,
    #[error("failed to read image {path}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
pub struct Message {
    role: &'static str,
    content: MessageContent,
}

impl Message {
    /// A plain text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text.into()),
        }
    }

    /// A user message pairing an instruction with an inline image, in the
    /// multi-part shape vision-capable chat models expect.
    pub fn user_with_image(text: impl Into<String>, image_data_url: String) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_url,
                        detail: "high",
                    },
                },
            ]),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: String,
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
///
/// The base URL is injectable so tests can point the client at a local
/// stub server; production callers use [`DEFAULT_API_BASE`].
pub struct CompletionClient {
    api_base: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl CompletionClient {
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key is empty or
    /// whitespace only.
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        Ok(Self {
            api_base: api_base.into(),
            api_key,
            client: Client::new(),
        })
    }

    /// Send one completion request and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Network and HTTP-status errors surface via `reqwest`; a response
    /// with no choices maps to [`LlmError::EmptyResponse`].
    pub fn complete(
        &self,
        model: &str,
        messages: &[Message],
        temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request_body = ChatRequest {
            model,
            messages,
            temperature,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()?;

        let response = response.error_for_status()?;
        let parsed = response.json::<ChatResponse>()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Encode a local image file into a `data:` URL for vision messages.
///
/// The MIME subtype comes from the file extension, with `jpg` normalized
/// to `jpeg`; files without a recognizable extension are sent as `png`.
pub fn image_data_url(path: &Path) -> Result<String, LlmError> {
    let bytes = fs::read(path).map_err(|source| LlmError::ReadImage {
        path: path.to_path_buf(),
        source,
    })?;

    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") => "jpeg".to_string(),
        Some(ext) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => "png".to_string(),
    };

    Ok(format!(
        "data:image/{format};base64,{}",
        BASE64_STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests;
