use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image API token is missing")]
    MissingApiToken,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("prediction response contained no image URL")]
    MissingOutput,
    #[error("failed to write image to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    output: Option<PredictionOutput>,
}

/// The prediction endpoint returns either one URL or a sequence of URLs
/// depending on the model; only the first is used either way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionOutput {
    Single(String),
    Many(Vec<String>),
}

impl PredictionOutput {
    fn into_first(self) -> Option<String> {
        match self {
            PredictionOutput::Single(url) => Some(url),
            PredictionOutput::Many(urls) => urls.into_iter().next(),
        }
    }
}

#[derive(Debug)]
pub struct DownloadedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Blocking client for a Replicate-style prediction endpoint.
pub struct ImageClient {
    api_base: String,
    api_token: String,
    client: Client,
}

impl std::fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClient")
            .field("api_base", &self.api_base)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl ImageClient {
    /// # Errors
    ///
    /// Returns [`ImageError::MissingApiToken`] when the token is empty or
    /// whitespace only.
    pub fn new(
        api_token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ImageError> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ImageError::MissingApiToken);
        }

        Ok(Self {
            api_base: api_base.into(),
            api_token,
            client: Client::new(),
        })
    }

    /// Submit a prompt to the named model and return the first output URL.
    ///
    /// Uses the synchronous `Prefer: wait` mode, so the call blocks until
    /// the prediction completes.
    pub fn generate(&self, model: &str, prompt: &str) -> Result<String, ImageError> {
        let url = format!(
            "{}/models/{model}/predictions",
            self.api_base.trim_end_matches('/')
        );
        let request_body = PredictionRequest {
            input: PredictionInput { prompt },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&request_body)
            .send()?;

        let response = response.error_for_status()?;
        let parsed = response.json::<PredictionResponse>()?;
        parsed
            .output
            .and_then(PredictionOutput::into_first)
            .ok_or(ImageError::MissingOutput)
    }

    /// Fetch the generated image bytes from the URL the prediction returned.
    pub fn download(&self, url: &str) -> Result<DownloadedImage, ImageError> {
        let response = self.client.get(url).send()?;
        let response = response.error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes()?.to_vec();

        Ok(DownloadedImage {
            bytes,
            content_type,
        })
    }
}

/// Map a download's Content-Type to a file extension, defaulting to `png`
/// when the header is absent or unrecognized.
pub fn extension_from_content_type(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .unwrap_or("image/png")
        .split(';')
        .next()
        .unwrap_or("image/png")
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

/// Write image bytes to `<dir>/<stem>.<extension>`, overwriting silently.
pub fn save_image(
    bytes: &[u8],
    dir: &Path,
    stem: &str,
    extension: &str,
) -> Result<PathBuf, ImageError> {
    let path = dir.join(format!("{stem}.{extension}"));
    fs::write(&path, bytes).map_err(|source| ImageError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests;
