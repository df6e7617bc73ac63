use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser, Subcommand};
use stilo_config::{COMPLETION_API_KEY_ENV_VAR, Config, IMAGE_API_KEY_ENV_VAR};
use stilo_image::ImageClient;
use stilo_llm::CompletionClient;

mod error;
mod guide;
mod image;

use error::CliError;
use guide::{GuideSource, GuideTask};
use image::ImageTask;

/// Stilo CLI entry point.
///
/// Stilo builds textual style guides with an LLM and uses them to generate
/// style-consistent images through a hosted image model.
#[derive(Parser, Debug)]
#[command(
    name = "stilo",
    author,
    version,
    about = "Build visual style guides and generate style-consistent images.",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a style guide from an artist, a movement, or a set of images.
    #[command(group(ArgGroup::new("source").required(true)))]
    Guide {
        /// Artist name (e.g., "J. M. W. Turner").
        #[arg(long, value_name = "NAME", group = "source")]
        artist: Option<String>,
        /// Artistic style or movement (e.g., "Art Nouveau").
        #[arg(long, value_name = "NAME", group = "source")]
        style: Option<String>,
        /// Comma-separated image paths to analyze (e.g., "img1.png,img2.jpg").
        #[arg(long, value_name = "PATHS", group = "source", value_delimiter = ',')]
        images: Option<Vec<PathBuf>>,
        /// Completion model to use (defaults to the configured model).
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
    },
    /// Generate an image in the style of a previously built guide.
    Image {
        /// Path to the style guide file (e.g., style-guides/jmw_turner.md).
        #[arg(long = "style-guide", value_name = "PATH")]
        style_guide: PathBuf,
        /// Completion model used to craft the enhanced prompt.
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
        /// Image model submitted to the prediction endpoint.
        #[arg(long = "image-model", value_name = "MODEL")]
        image_model: Option<String>,
        /// Subject to depict, joined into a single prompt.
        #[arg(required = true, value_name = "PROMPT")]
        prompt: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = load_config();

    if let Err(error) = run(cli, &config) {
        report(&error);
        process::exit(error.exit_code());
    }
}

fn load_config() -> Config {
    match stilo_config::load_or_init() {
        Ok(outcome) => {
            if outcome.created {
                eprintln!("Created Stilo configuration at {}", outcome.path.display());
            }
            outcome.config
        }
        Err(error) => {
            eprintln!(
                "Warning: failed to load Stilo configuration ({error}). Falling back to defaults."
            );
            Config::default()
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<(), CliError> {
    match cli.command {
        Command::Guide {
            artist,
            style,
            images,
            model,
        } => {
            let source = match (artist, style, images) {
                (Some(name), _, _) => GuideSource::Artist(name),
                (_, Some(name), _) => GuideSource::Style(name),
                (_, _, Some(paths)) => GuideSource::Images(paths),
                // clap's ArgGroup guarantees exactly one source flag.
                _ => unreachable!("clap enforces a required source flag"),
            };

            let api_key = require_env(COMPLETION_API_KEY_ENV_VAR)?;
            let client = CompletionClient::new(api_key, stilo_llm::DEFAULT_API_BASE)?;
            let model = model.unwrap_or_else(|| config.completion_model.clone());

            let task = GuideTask {
                source,
                model: &model,
                output_dir: Path::new(&config.style_guide_dir),
                client: &client,
            };

            let path = guide::run(&task)?;
            println!("Style guide created: {}", path.display());
            Ok(())
        }
        Command::Image {
            style_guide,
            model,
            image_model,
            prompt,
        } => {
            // The guide is loaded before either client is built; a missing
            // file never reaches the network or the credential checks.
            let guide_text = image::load_style_guide(&style_guide)?;
            let user_prompt = prompt.join(" ");

            let llm = CompletionClient::new(
                require_env(COMPLETION_API_KEY_ENV_VAR)?,
                stilo_llm::DEFAULT_API_BASE,
            )?;
            let image_client = ImageClient::new(
                require_env(IMAGE_API_KEY_ENV_VAR)?,
                stilo_image::DEFAULT_API_BASE,
            )?;

            let completion_model = model.unwrap_or_else(|| config.completion_model.clone());
            let image_model = image_model.unwrap_or_else(|| config.image_model.clone());

            let task = ImageTask {
                style_guide: &guide_text,
                user_prompt: &user_prompt,
                completion_model: &completion_model,
                image_model: &image_model,
                // Empty prefix: the file lands in the working directory and
                // the reported path stays a bare filename.
                output_dir: Path::new(""),
                llm: &llm,
                image: &image_client,
            };

            let path = image::run(&task)?;
            println!("Image generated: {}", path.display());
            Ok(())
        }
    }
}

fn require_env(var: &'static str) -> Result<String, CliError> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(CliError::MissingCredential(var))
}

fn report(error: &CliError) {
    eprintln!("Error: {error}");

    match error {
        CliError::StyleGuideNotFound(_) => {
            eprintln!("Create one first using: stilo guide --artist 'Artist Name'");
        }
        CliError::MissingCredential(var) => {
            eprintln!("Set it first, e.g. export {var}='your-key'");
        }
        CliError::Llm(_) => {
            eprintln!("Make sure you have:");
            eprintln!("1. Set your API key (e.g., export OPENAI_API_KEY='your-key')");
            eprintln!("2. Access to the specified model");
        }
        _ => {}
    }
}
