use std::env;
use crate::error::{AppError, Result};
use dotenvy::dotenv;
use url::Url;

/// Model used when neither `GEMINI_MODEL` nor an override is given.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Credential variables, in order of precedence.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, Debug)]
pub struct Config {
    /// Absent keys are reported as `MissingCredential` when a request is made,
    /// not when the configuration is loaded.
    pub gemini_api_key: Option<String>,
    pub model_name: String,
    pub base_url: Url,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = first_api_key(|name| env::var(name).ok());

        let mut builder = Self::builder();
        if let Some(key) = api_key {
            builder = builder.with_api_key(key);
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            builder = builder.with_model(model);
        }
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns the API key if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Model path in the `models/<name>` form the REST API expects.
    pub fn model_path(&self) -> String {
        if self.model_name.starts_with("models/") {
            self.model_name.clone()
        } else {
            format!("models/{}", self.model_name)
        }
    }
}

/// First credential variable holding a non-blank value.
fn first_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|key| !key.trim().is_empty())
}

#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl ConfigBuilder {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let model_name = self
            .model
            .map(|m| m.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model_name.is_empty() || model_name == "models/" {
            return Err(AppError::config("model name must not be empty"));
        }

        let raw_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment unless it ends with a slash
        let raw_url = if raw_url.ends_with('/') {
            raw_url
        } else {
            format!("{}/", raw_url)
        };
        let base_url = Url::parse(&raw_url)
            .map_err(|e| AppError::config(format!("Invalid base URL '{}': {}", raw_url, e)))?;

        Ok(Config {
            gemini_api_key: self.api_key,
            model_name,
            base_url,
        })
    }
}
