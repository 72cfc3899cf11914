//! Upload flow state machine.
//!
//! ```text
//! Idle ──submit──▶ Processing ──ok──▶ Success ──reset──▶ Idle
//!   ▲                  │                                  ▲
//!   │                  └──err──▶ Error ──submit──▶ Processing
//!   └──────────────────────────── reset ──────────────────┘
//! ```
//!
//! The flow owns the selected files. A submission hands a [`GenerationJob`]
//! with shared copies of them to the generator, so the files stay selected
//! after a failure and can be resubmitted as they are.

use crate::error::{AppError, Result};
use crate::gemini::ListingGenerator;
use crate::listing::ListingResult;
use crate::source::{CoverImage, SourceDocument, SourceFile};

/// Shown for every generation failure; the specific kind goes to the log.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Could not generate the listing. Check your connection and your Gemini API key, then try again.";

/// Shown when submitting without both files.
pub const MISSING_FILES_MESSAGE: &str = "Please provide both the book PDF and the cover image.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

/// Inputs of one in-flight generation request.
#[derive(Clone, Debug)]
pub struct GenerationJob {
    pub document: SourceDocument,
    pub cover: CoverImage,
}

impl GenerationJob {
    pub async fn run(&self, generator: &dyn ListingGenerator) -> Result<ListingResult> {
        generator.generate(&self.document, &self.cover).await
    }
}

#[derive(Debug, Default)]
pub struct UploadFlow {
    document: Option<SourceDocument>,
    cover: Option<CoverImage>,
    status: ProcessingStatus,
    result: Option<ListingResult>,
    message: Option<String>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn document(&self) -> Option<&SourceDocument> {
        self.document.as_ref()
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        self.cover.as_ref()
    }

    /// The listing from the last successful submission.
    pub fn result(&self) -> Option<&ListingResult> {
        self.result.as_ref()
    }

    /// Inline message for the user (validation or generation failure).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Selects the book interior. A file of the wrong type leaves the current
    /// selection in place.
    pub fn select_document(&mut self, file: SourceFile) -> Result<()> {
        match SourceDocument::try_from(file) {
            Ok(document) => {
                self.document = Some(document);
                self.message = None;
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Selects the cover. A file of the wrong type leaves the current
    /// selection in place.
    pub fn select_cover(&mut self, file: SourceFile) -> Result<()> {
        match CoverImage::try_from(file) {
            Ok(cover) => {
                self.cover = Some(cover);
                self.message = None;
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Clears the interior. An in-flight job keeps its own copy.
    pub fn remove_document(&mut self) {
        self.document = None;
    }

    pub fn remove_cover(&mut self) {
        self.cover = None;
    }

    pub fn can_submit(&self) -> bool {
        self.document.is_some() && self.cover.is_some() && self.status != ProcessingStatus::Processing
    }

    /// Moves to `Processing` and returns the job to run.
    ///
    /// Returns `Ok(None)` while a request is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either file is missing; the state
    /// does not change.
    pub fn begin_submission(&mut self) -> Result<Option<GenerationJob>> {
        let job = match (self.document.clone(), self.cover.clone()) {
            (Some(document), Some(cover)) => GenerationJob { document, cover },
            _ => return Err(self.reject(AppError::validation(MISSING_FILES_MESSAGE))),
        };
        if self.status == ProcessingStatus::Processing {
            tracing::debug!("Submission ignored, a listing request is already in flight");
            return Ok(None);
        }

        self.status = ProcessingStatus::Processing;
        self.message = None;
        tracing::info!(
            document = %job.document.file().name,
            cover = %job.cover.file().name,
            "Listing generation started"
        );
        Ok(Some(job))
    }

    /// Applies the outcome of the job returned by [`begin_submission`](Self::begin_submission).
    pub fn finish_submission(&mut self, outcome: Result<ListingResult>) -> ProcessingStatus {
        if self.status != ProcessingStatus::Processing {
            tracing::debug!(status = ?self.status, "Dropping outcome, no submission in flight");
            return self.status;
        }

        match outcome {
            Ok(listing) => {
                tracing::info!(tags = listing.tags.len(), title_chars = listing.title_chars(), "Listing generated");
                self.result = Some(listing);
                self.message = None;
                self.status = ProcessingStatus::Success;
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Listing generation failed");
                self.message = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.status = ProcessingStatus::Error;
            }
        }
        self.status
    }

    /// Runs one submission to completion against `generator`.
    ///
    /// Validation failures are returned as errors; generation failures are not,
    /// they move the flow to [`ProcessingStatus::Error`].
    pub async fn submit(&mut self, generator: &dyn ListingGenerator) -> Result<ProcessingStatus> {
        let Some(job) = self.begin_submission()? else {
            return Ok(self.status);
        };
        let outcome = job.run(generator).await;
        Ok(self.finish_submission(outcome))
    }

    /// Discards the files, the result and any message. Ignored while a
    /// request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.status == ProcessingStatus::Processing {
            return false;
        }
        *self = Self::default();
        true
    }

    fn reject(&mut self, error: AppError) -> AppError {
        self.message = Some(match &error {
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        });
        error
    }
}
