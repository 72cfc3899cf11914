//! Presentation of a generated listing.
//!
//! [`ListingView`] does no validation; it shows whatever the client accepted,
//! with counters against the Etsy limits so the seller can spot deviations.

use crate::listing::{ListingResult, TAG_COUNT, TITLE_MAX_CHARS};
use std::fmt::Write as _;
use std::str::FromStr;

/// A field the seller can copy to the clipboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyField {
    Title,
    Tags,
    Description,
    Price,
    Category,
    Keywords,
}

impl CopyField {
    pub const ALL: [CopyField; 6] = [
        CopyField::Title,
        CopyField::Tags,
        CopyField::Description,
        CopyField::Price,
        CopyField::Category,
        CopyField::Keywords,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CopyField::Title => "title",
            CopyField::Tags => "tags",
            CopyField::Description => "description",
            CopyField::Price => "price",
            CopyField::Category => "category",
            CopyField::Keywords => "keywords",
        }
    }
}

impl FromStr for CopyField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CopyField::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Borrowed, render-ready view of a [`ListingResult`].
pub struct ListingView<'a> {
    listing: &'a ListingResult,
}

impl<'a> ListingView<'a> {
    pub fn new(listing: &'a ListingResult) -> Self {
        Self { listing }
    }

    pub fn listing(&self) -> &ListingResult {
        self.listing
    }

    /// Title length against the 140 character guideline, e.g. `52 / 140`.
    pub fn title_counter(&self) -> String {
        format!("{} / {}", self.listing.title_chars(), TITLE_MAX_CHARS)
    }

    /// Tag count against the 13 tag guideline, e.g. `13 / 13`.
    pub fn tag_counter(&self) -> String {
        format!("{} / {}", self.listing.tags.len(), TAG_COUNT)
    }

    /// Attribute rows in key order; empty when the model sent none.
    pub fn attribute_rows(&self) -> Vec<(&str, &str)> {
        self.listing
            .attributes
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    /// Text placed on the clipboard for a field.
    pub fn copy_text(&self, field: CopyField) -> String {
        match field {
            CopyField::Title => self.listing.title.clone(),
            CopyField::Tags => self.listing.tags.join(", "),
            CopyField::Description => self.listing.description.clone(),
            CopyField::Price => self.listing.price_suggestion.clone(),
            CopyField::Category => self.listing.category.clone(),
            CopyField::Keywords => self.listing.seo_keywords.join(", "),
        }
    }

    /// Renders the whole listing as Markdown.
    pub fn to_markdown(&self) -> String {
        let listing = self.listing;
        let mut out = String::new();

        let _ = writeln!(out, "## Title\n\n**{}**\n\n*{} characters*\n", listing.title, self.title_counter());

        let _ = writeln!(out, "## Tags\n");
        let chips: Vec<String> = listing.tags.iter().map(|tag| code_span(tag)).collect();
        let _ = writeln!(out, "{}\n\n*{} tags*\n", chips.join(" "), self.tag_counter());

        let _ = writeln!(out, "## Description\n\n{}\n", listing.description);

        let _ = writeln!(out, "## Price suggestion\n\n**{}**\n", listing.price_suggestion);
        let _ = writeln!(out, "## Category\n\n{}\n", listing.category);

        let rows = self.attribute_rows();
        if !rows.is_empty() {
            let _ = writeln!(out, "## Attributes\n\n|Attribute|Value|\n|-|-|");
            for (key, value) in rows {
                let _ = writeln!(out, "|{}|{}|", table_cell(key), table_cell(value));
            }
            out.push('\n');
        }

        if !listing.seo_keywords.is_empty() {
            let _ = writeln!(out, "## SEO keywords\n");
            for keyword in &listing.seo_keywords {
                let _ = writeln!(out, "* {}", keyword);
            }
        }

        out
    }
}

/// Inline code whose fence is longer than any backtick run in `text`.
fn code_span(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ");
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

/// Table cells stay on one line and cannot close the cell early.
fn table_cell(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace('|', "\\|")
}
