//! Etsy Lister Core Library
//!
//! This library turns a book's interior (PDF) and its cover image into a
//! structured Etsy listing using Google's Gemini API.
//!
//! # Overview
//!
//! The pipeline is a single structured-output request:
//!
//! - **Inputs**: typed, media-type-checked files via [`source`]
//! - **Encoding**: base64 payloads via [`encoder`]
//! - **Request**: fixed instruction plus response schema via [`request`]
//! - **AI Integration**: one Gemini call per listing via [`gemini`]
//! - **Result**: parsed and validated [`listing::ListingResult`]
//! - **Presentation**: counters, Markdown and copy actions via [`view`] and [`clipboard`]
//! - **Interaction**: the idle/processing/success/error machine in [`flow`]
//!
//! # Quick Start
//!
//! ```ignore
//! use etsy_lister_core::{EtsyLister, SourceFile};
//!
//! let lister = EtsyLister::new()?;
//! let mut flow = lister.flow();
//! flow.select_document(SourceFile::load("book.pdf")?)?;
//! flow.select_cover(SourceFile::load("cover.jpg")?)?;
//! flow.submit(lister.generator()).await?;
//!
//! if let Some(listing) = flow.result() {
//!     println!("{}", listing.title);
//! }
//! ```
//!
//! # Module Structure
//!
//! - [`clipboard`]: Per-field copy actions
//! - [`config`]: Configuration loading and management
//! - [`encoder`]: Base64 payload encoding
//! - [`error`]: Error types and result aliases
//! - [`flow`]: Upload flow state machine
//! - [`gemini`]: Listing generator trait and Gemini client
//! - [`listing`]: Listing result type and response validation
//! - [`request`]: Prompt and response schema
//! - [`source`]: Document and cover inputs
//! - [`view`]: Listing rendering

pub mod clipboard;
pub mod config;
pub mod encoder;
pub mod error;
pub mod flow;
pub mod gemini;
pub mod listing;
pub mod request;
pub mod source;
pub mod view;

// Re-export primary types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use flow::{ProcessingStatus, UploadFlow};
pub use gemini::{GeminiClient, ListingGenerator};
pub use listing::ListingResult;
pub use source::{CoverImage, SourceDocument, SourceFile};
pub use view::{CopyField, ListingView};

/// Main entry point for the listing generator.
///
/// Owns the configuration and the Gemini client and hands out fresh upload
/// flows.
pub struct EtsyLister {
    config: Config,
    client: GeminiClient,
}

impl EtsyLister {
    /// Creates an instance from environment configuration (including `.env`).
    ///
    /// A missing API key does not fail here; it surfaces as
    /// [`AppError::MissingCredential`] on the first submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the model name or base URL is invalid.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::load()?)
    }

    /// Creates an instance with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Starts a new, empty upload flow.
    pub fn flow(&self) -> UploadFlow {
        UploadFlow::new()
    }

    /// The generator submissions should be sent to.
    pub fn generator(&self) -> &dyn ListingGenerator {
        &self.client
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Loads `.env` files if present.
///
/// Call this once at application startup.
pub fn init() {
    let _ = dotenvy::dotenv();
}
