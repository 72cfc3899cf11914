//! Error types for the etsy-lister-core library.
//!
//! This module provides granular error variants for every failure mode of the
//! listing pipeline. The upload flow collapses generation failures into one
//! user-facing message, so [`AppError::kind`] exists to keep the specific
//! variant visible in logs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur within the etsy-lister-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// A selected file has the wrong media type, or a required file is missing.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors (invalid model name, bad base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No Gemini API key was available when a request was about to be sent.
    #[error("Missing Gemini API key (set GEMINI_API_KEY in the environment or .env file)")]
    MissingCredential,

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoded payload could not be decoded back into bytes.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Network, connectivity or non-success status from the Gemini API.
    #[error("Gemini API request failed: {0}")]
    Transport(String),

    /// The Gemini API answered without any text payload.
    #[error("No text response received from Gemini")]
    EmptyResponse,

    /// The Gemini API answered with a payload that does not match the listing schema.
    #[error("Malformed listing response: {0}")]
    MalformedResponse(String),

    /// Clipboard access or write failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl AppError {
    /// Creates a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a malformed-response error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Creates a clipboard error with the given message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Short stable identifier used as the `kind` field in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
            Self::MissingCredential => "missing_credential",
            Self::FileRead { .. } => "file_read",
            Self::Encoding(_) => "encoding",
            Self::Transport(_) => "transport",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Clipboard(_) => "clipboard",
        }
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
