use std::fs;
use std::path::{Path, PathBuf};

use stilo_image::{ImageClient, extension_from_content_type, save_image};
use stilo_llm::{CompletionClient, Message, prompts};
use stilo_utils::image_file_stem;

use crate::error::CliError;

const RULE: &str = "======================================================================";

pub struct ImageTask<'a> {
    /// Full text of an already-loaded style guide.
    pub style_guide: &'a str,
    /// The user's subject prompt; also the source of the output file name.
    pub user_prompt: &'a str,
    pub completion_model: &'a str,
    pub image_model: &'a str,
    pub output_dir: &'a Path,
    pub llm: &'a CompletionClient,
    pub image: &'a ImageClient,
}

/// Read a style guide file, failing before any network traffic when it is
/// absent.
pub fn load_style_guide(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::StyleGuideNotFound(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|source| CliError::ReadStyleGuide {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate one style-consistent image and return the path it was saved to.
pub fn run(task: &ImageTask<'_>) -> Result<PathBuf, CliError> {
    // The enhancement call takes no temperature override; the provider
    // default applies.
    let enhanced = task.llm.complete(
        task.completion_model,
        &[Message::user(prompts::enhancement_prompt(
            task.style_guide,
            task.user_prompt,
        ))],
        None,
    )?;

    println!("{RULE}");
    println!("ENHANCED PROMPT");
    println!("{RULE}");
    println!("{enhanced}");
    println!("{RULE}");
    println!();

    let url = task.image.generate(task.image_model, &enhanced)?;
    eprintln!("Image URL: {url}");

    let downloaded = task.image.download(&url)?;

    // The file name derives from the original user prompt, not the
    // enhanced one.
    let stem = image_file_stem(task.user_prompt);
    let extension = extension_from_content_type(downloaded.content_type.as_deref());
    let path = save_image(&downloaded.bytes, task.output_dir, &stem, extension)?;
    Ok(path)
}
