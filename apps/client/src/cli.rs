use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use crate::app::{App, EventOutcome, PageEvent, SubmissionOutcome};
use crate::clipboard::copy::COPY_FAILED_MESSAGE;
use crate::clipboard::{ClipboardBackends, CopyOutcome};
use crate::config::Config;
use crate::form::mode_toggle::JobDescriptionMode;
use crate::page::render::letter_to_html;
use crate::page::{ids, Document};
use crate::service::{CoverLetterService, HttpCoverLetterService};
use crate::upload::{load_cv, load_job_image};

#[derive(Parser)]
#[command(name = "cover-letter")]
#[command(about = "Generate a cover letter from a résumé and a job description")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a cover letter
    Generate(GenerateArgs),
    /// Check that the backend is reachable
    Health,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("job_description")
        .required(true)
        .args(["text", "text_file", "image"]),
))]
pub struct GenerateArgs {
    /// Résumé file (.pdf, .docx or .doc)
    #[arg(long)]
    pub cv: PathBuf,

    /// Job description text
    #[arg(long)]
    pub text: Option<String>,

    /// File holding the job description text
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// Screenshot of the job description (.jpg, .jpeg or .png)
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[arg(long)]
    pub company: Option<String>,

    /// Target length of the letter, 250 to 400 words
    #[arg(long)]
    pub word_limit: Option<u16>,

    /// Copy the letter to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write the letter to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let service = Arc::new(
        HttpCoverLetterService::new(config).context("Failed to build the HTTP client")?,
    );

    match cli.command {
        Command::Generate(args) => generate(args, service).await,
        Command::Health => {
            let health = service
                .health()
                .await
                .with_context(|| format!("Health check against {} failed", config.api_base_url))?;
            println!(
                "{} (api version: {}, environment: {})",
                health.status,
                health.api_version.as_deref().unwrap_or("unknown"),
                health.environment.as_deref().unwrap_or("unknown"),
            );
            Ok(())
        }
    }
}

async fn generate(args: GenerateArgs, service: Arc<dyn CoverLetterService>) -> Result<()> {
    let document = fill_document(&args).await?;
    let mode = if args.image.is_some() {
        JobDescriptionMode::Image
    } else {
        JobDescriptionMode::Text
    };

    let mut app = App::load(document, service, ClipboardBackends::platform())?;
    app.dispatch(PageEvent::change(mode.radio_id())).await?;

    let outcome = app
        .dispatch(PageEvent::submit(ids::COVER_LETTER_FORM))
        .await?;
    let length = ensure_generated(outcome)?;
    info!("Received cover letter ({} characters)", length);

    if args.copy {
        match app.dispatch(PageEvent::click(ids::COPY_BTN)).await? {
            EventOutcome::Copied(CopyOutcome::Copied { backend }) => {
                info!("Cover letter copied to clipboard via {}", backend)
            }
            EventOutcome::Copied(CopyOutcome::Failed) => warn!("{}", COPY_FAILED_MESSAGE),
            _ => warn!("Nothing copied to clipboard"),
        }
    }

    let letter = app.document().element(ids::COVER_LETTER_EDITOR)?.value();
    let rendered = match args.format {
        OutputFormat::Text => letter.to_string(),
        OutputFormat::Html => letter_to_html(letter),
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Cover letter written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Length of the generated letter, or the unescaped reason the submission
/// did not produce one. The page banner holds the HTML-escaped form of the
/// same reason.
fn ensure_generated(outcome: EventOutcome) -> Result<usize> {
    match outcome {
        EventOutcome::Submitted(SubmissionOutcome::Generated { length }) => Ok(length),
        EventOutcome::Submitted(
            SubmissionOutcome::Rejected { reason } | SubmissionOutcome::Failed { reason },
        ) => bail!("{reason}"),
        other => bail!("Cover letter generation failed: {other:?}"),
    }
}

/// Fills the page's inputs the way a user would before pressing generate.
async fn fill_document(args: &GenerateArgs) -> Result<Document> {
    let mut document = Document::cover_letter_page();

    let cv = load_cv(&args.cv).await?;
    document.element_mut(ids::CV_FILE)?.set_file(Some(cv));

    if let Some(path) = &args.image {
        let image = load_job_image(path).await?;
        document.element_mut(ids::JOB_DESC_IMAGE)?.set_file(Some(image));
    }

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };
    if let Some(text) = text {
        document.element_mut(ids::JOB_DESC_TEXT)?.set_value(text);
    }

    if let Some(company) = &args.company {
        document.element_mut(ids::COMPANY_NAME)?.set_value(company.as_str());
    }
    if let Some(limit) = args.word_limit {
        document
            .element_mut(ids::WORD_LIMIT)?
            .set_value(limit.to_string());
    }

    Ok(document)
}
