use etsy_lister_core::{
    clipboard::{CopyIndicator, SystemClipboard},
    config::Config,
    flow::GENERATION_FAILED_MESSAGE,
    init, CopyField, EtsyLister, ListingView, ProcessingStatus, SourceFile,
};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use termimad::crossterm::style::Color;
use termimad::MadSkin;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate an Etsy listing from a book PDF and its cover", long_about = None)]
struct Args {
    /// Book interior (PDF)
    #[arg(short, long)]
    document: PathBuf,

    /// Cover image (JPG, PNG, ...)
    #[arg(short, long)]
    cover: PathBuf,

    /// Override the model defined in .env
    #[arg(short, long)]
    model: Option<String>,

    /// Copy a field to the clipboard (title, tags, description, price, category, keywords)
    #[arg(long)]
    copy: Vec<CopyField>,

    /// Print the listing as JSON instead of formatted text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    tracing::debug!(document = %args.document.display(), cover = %args.cover.display(), "Arguments parsed");

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = args.model {
        config.model_name = m;
    }
    let lister = EtsyLister::with_config(config).context("Failed to initialize Gemini client")?;

    // Selection: wrong file types are reported and abort before any request
    let mut flow = lister.flow();
    let document = SourceFile::load(&args.document).context("Failed to read document")?;
    if let Err(e) = flow.select_document(document) {
        bail!("{}", flow.message().map(str::to_string).unwrap_or_else(|| e.to_string()));
    }
    let cover = SourceFile::load(&args.cover).context("Failed to read cover image")?;
    if let Err(e) = flow.select_cover(cover) {
        bail!("{}", flow.message().map(str::to_string).unwrap_or_else(|| e.to_string()));
    }

    // Send to API
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!("Analyzing cover and interior with {}...", lister.config().model_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let status = flow.submit(lister.generator()).await;
    spinner.finish_and_clear();

    match status? {
        ProcessingStatus::Success => {}
        _ => bail!("{}", flow.message().unwrap_or(GENERATION_FAILED_MESSAGE)),
    }
    let Some(listing) = flow.result() else {
        bail!(GENERATION_FAILED_MESSAGE);
    };
    let view = ListingView::new(listing);

    if args.json {
        println!("{}", serde_json::to_string_pretty(listing)?);
    } else {
        print_markdown(&view.to_markdown());
        for issue in listing.guideline_issues() {
            eprintln!("Note: {}", issue);
        }
    }

    // Copy to clipboard if requested
    if !args.copy.is_empty() {
        match SystemClipboard::new() {
            Ok(mut clipboard) => {
                let mut indicator = CopyIndicator::default();
                for field in args.copy {
                    if indicator.copy(&mut clipboard, &view, field) {
                        eprintln!("(Copied {} to clipboard)", field.label());
                    } else {
                        eprintln!("Warning: Failed to copy {} to clipboard", field.label());
                    }
                }
            }
            Err(e) => eprintln!("Warning: {}", e),
        }
    }

    Ok(())
}

/// Helper to print markdown
fn print_markdown(text: &str) {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin.inline_code.set_fg(Color::Rgb { r: 241, g: 100, b: 30 });

    skin.print_text(text);
}
