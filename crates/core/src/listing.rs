//! The generated Etsy listing and its response-shape validation.

use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Etsy's title limit, in characters.
pub const TITLE_MAX_CHARS: usize = 140;
/// Number of tags Etsy allows per listing.
pub const TAG_COUNT: usize = 13;
/// Etsy's per-tag limit, in characters.
pub const TAG_MAX_CHARS: usize = 20;
/// Requested range for the supplementary long-tail keywords.
pub const SEO_KEYWORD_RANGE: std::ops::RangeInclusive<usize> = 5..=10;

/// A structured e-commerce listing produced by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub price_suggestion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_keywords: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ListingResult {
    /// Parses the raw text returned by the model.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyResponse`] if the payload is blank
    /// - [`AppError::MalformedResponse`] if it is not a listing object or a
    ///   required field is blank
    pub fn from_payload(payload: &str) -> Result<Self> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(AppError::EmptyResponse);
        }

        let listing: Self = serde_json::from_str(payload)
            .map_err(|e| AppError::malformed(format!("payload does not match listing schema: {}", e)))?;
        listing.validate()?;
        Ok(listing)
    }

    /// Checks that every required field carries content.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("priceSuggestion", &self.price_suggestion),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::malformed(format!("required field `{}` is empty", name)));
            }
        }
        if self.tags.iter().all(|tag| tag.trim().is_empty()) {
            return Err(AppError::malformed("required field `tags` is empty"));
        }
        Ok(())
    }

    pub fn title_chars(&self) -> usize {
        self.title.chars().count()
    }

    /// Reports deviations from the Etsy guidelines the model was asked to follow.
    ///
    /// The listing is never modified; callers decide what to do with the report.
    pub fn guideline_issues(&self) -> Vec<GuidelineIssue> {
        let mut issues = Vec::new();

        let title_chars = self.title_chars();
        if title_chars > TITLE_MAX_CHARS {
            issues.push(GuidelineIssue::TitleTooLong { chars: title_chars });
        }
        if self.tags.len() != TAG_COUNT {
            issues.push(GuidelineIssue::TagCount { count: self.tags.len() });
        }
        for tag in &self.tags {
            let chars = tag.chars().count();
            if chars > TAG_MAX_CHARS {
                issues.push(GuidelineIssue::TagTooLong { tag: tag.clone(), chars });
            }
        }
        if !self.seo_keywords.is_empty() && !SEO_KEYWORD_RANGE.contains(&self.seo_keywords.len()) {
            issues.push(GuidelineIssue::KeywordCount { count: self.seo_keywords.len() });
        }

        issues
    }
}

/// A single guideline deviation found by [`ListingResult::guideline_issues`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuidelineIssue {
    TitleTooLong { chars: usize },
    TagCount { count: usize },
    TagTooLong { tag: String, chars: usize },
    KeywordCount { count: usize },
}

impl fmt::Display for GuidelineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleTooLong { chars } => {
                write!(f, "title is {} characters (limit {})", chars, TITLE_MAX_CHARS)
            }
            Self::TagCount { count } => write!(f, "{} tags (Etsy allows {})", count, TAG_COUNT),
            Self::TagTooLong { tag, chars } => {
                write!(f, "tag '{}' is {} characters (limit {})", tag, chars, TAG_MAX_CHARS)
            }
            Self::KeywordCount { count } => write!(
                f,
                "{} SEO keywords (expected {}-{})",
                count,
                SEO_KEYWORD_RANGE.start(),
                SEO_KEYWORD_RANGE.end()
            ),
        }
    }
}
