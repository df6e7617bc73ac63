use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use stilo_llm::prompts::{self, SubjectKind};
use stilo_llm::{CompletionClient, GUIDE_TEMPERATURE, Message, image_data_url};
use stilo_utils::guide_file_stem;

use crate::error::CliError;

/// The mutually exclusive input modes of the style guide builder.
#[derive(Debug, Clone)]
pub enum GuideSource {
    Artist(String),
    Style(String),
    Images(Vec<PathBuf>),
}

pub struct GuideTask<'a> {
    pub source: GuideSource,
    pub model: &'a str,
    pub output_dir: &'a Path,
    pub client: &'a CompletionClient,
}

/// Build one style guide and return the path it was written to.
pub fn run(task: &GuideTask<'_>) -> Result<PathBuf, CliError> {
    match &task.source {
        GuideSource::Artist(name) => build_named_guide(task, name, SubjectKind::Artist),
        GuideSource::Style(name) => build_named_guide(task, name, SubjectKind::Movement),
        GuideSource::Images(paths) => build_guide_from_images(task, paths),
    }
}

fn build_named_guide(
    task: &GuideTask<'_>,
    name: &str,
    kind: SubjectKind,
) -> Result<PathBuf, CliError> {
    eprintln!("Asking {} to generate a style guide for {name}...", task.model);

    let prompt = prompts::guide_prompt(name, kind);
    let guide = task.client.complete(
        task.model,
        &[Message::user(prompt)],
        Some(GUIDE_TEMPERATURE),
    )?;

    let file_name = format!("{}.md", guide_file_stem(name));
    write_guide(task.output_dir, &file_name, &guide)
}

fn build_guide_from_images(task: &GuideTask<'_>, paths: &[PathBuf]) -> Result<PathBuf, CliError> {
    // All paths are checked before any completion call; the first missing
    // file aborts the run with no partial output.
    for path in paths {
        if !path.exists() {
            return Err(CliError::ImageNotFound(path.clone()));
        }
    }

    eprintln!("Processing {} images...", paths.len());

    let mut analyses = Vec::with_capacity(paths.len());
    for path in paths {
        eprintln!("Analyzing image: {}", path.display());
        let data_url = image_data_url(path)?;
        let analysis = task.client.complete(
            task.model,
            &[Message::user_with_image(prompts::ANALYSIS_PROMPT, data_url)],
            Some(GUIDE_TEMPERATURE),
        )?;
        eprintln!("Analysis complete for {}", path.display());
        analyses.push(analysis);
    }

    // The synthesis pass runs even for a single image so the output always
    // has the unified-guide shape rather than a raw analysis dump.
    eprintln!(
        "Synthesizing style guide from {} image analyses...",
        analyses.len()
    );
    let guide = task.client.complete(
        task.model,
        &[Message::user(prompts::synthesis_prompt(&analyses))],
        Some(GUIDE_TEMPERATURE),
    )?;

    let file_name = format!("images-{}.md", Local::now().format("%Y%m%d_%H%M%S"));
    write_guide(task.output_dir, &file_name, &guide)
}

fn write_guide(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
