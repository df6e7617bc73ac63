use std::path::PathBuf;

use stilo_image::ImageError;
use stilo_llm::LlmError;
use thiserror::Error;

/// One failure type for both subcommands so every external-call boundary
/// shares the same abort-and-report discipline, each class with its own
/// process exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),
    #[error("image file not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("style guide not found: {0}")]
    StyleGuideNotFound(PathBuf),
    #[error("failed to read style guide {path}")]
    ReadStyleGuide {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub const EXIT_CONFIG: i32 = 1;
pub const EXIT_INPUT: i32 = 2;
pub const EXIT_COMPLETION: i32 = 3;
pub const EXIT_IMAGE: i32 = 4;
pub const EXIT_WRITE: i32 = 5;

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingCredential(_) => EXIT_CONFIG,
            CliError::ImageNotFound(_)
            | CliError::StyleGuideNotFound(_)
            | CliError::ReadStyleGuide { .. } => EXIT_INPUT,
            CliError::Llm(LlmError::MissingApiKey) => EXIT_CONFIG,
            CliError::Llm(_) => EXIT_COMPLETION,
            CliError::Image(ImageError::MissingApiToken) => EXIT_CONFIG,
            CliError::Image(_) => EXIT_IMAGE,
            CliError::Write { .. } => EXIT_WRITE,
        }
    }
}
