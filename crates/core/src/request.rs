//! Construction of the listing request sent to Gemini.
//!
//! Building a request is pure: the same cover and document always produce the
//! same request. Nothing here touches the network.

use crate::encoder::encode_bytes;
use crate::source::{CoverImage, SourceDocument};
use serde_json::{json, Value};

/// Instruction sent alongside the cover and interior.
pub const LISTING_PROMPT: &str = r#"
You are an experienced Etsy seller and SEO specialist for digital and printed books (KDP, printables).

Task: study the attached book cover image and the book interior (PDF) and write a complete, high-converting Etsy listing.

Rules:
1. Title: at most 140 characters. Dense with keywords but still readable; put the most important keywords first. Separate phrases with | or -.
2. Description: persuasive copy structured as a hook, the features, what is included and the benefits for the buyer. Emoji are welcome.
   Never put a list of tags, keywords or SEO terms in the description, neither in the body nor at the end. Tags go in the separate `tags` field only.
3. Tags: exactly 13 relevant tags, each at most 20 characters. Prefer multi-word tags.
4. Language: write in English, the standard for Etsy search, unless the book content is clearly in another language.

Use the visual style of the cover and the content of the interior to work out the niche, the audience and the themes.
"#;

/// Base64 file content tagged with its media type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlinePayload {
    pub mime_type: String,
    pub data: String,
}

/// A fully assembled, single-use listing request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingRequest {
    pub instruction: &'static str,
    pub cover: InlinePayload,
    pub document: InlinePayload,
    pub response_schema: Value,
}

impl ListingRequest {
    pub fn build(cover: &CoverImage, document: &SourceDocument) -> Self {
        Self {
            instruction: LISTING_PROMPT,
            cover: InlinePayload {
                mime_type: cover.media_type().to_string(),
                data: encode_bytes(cover.file().bytes()),
            },
            document: InlinePayload {
                mime_type: document.media_type().to_string(),
                data: encode_bytes(document.file().bytes()),
            },
            response_schema: response_schema(),
        }
    }
}

/// Required keys of a listing response.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "description", "tags", "category", "priceSuggestion"];

/// Gemini response schema describing a [`ListingResult`](crate::listing::ListingResult).
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A high-converting, SEO-optimized Etsy product title (max 140 chars). Use delimiters like | or -."
            },
            "description": {
                "type": "STRING",
                "description": "A persuasive product description. Do NOT include tags or keyword lists at the bottom."
            },
            "tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Exactly 13 SEO tags, each less than 20 characters."
            },
            "category": {
                "type": "STRING",
                "description": "The most relevant Etsy category path (e.g., Books > Coloring Books)."
            },
            "priceSuggestion": {
                "type": "STRING",
                "description": "A suggested price range in USD based on market standards for this type of digital/physical book."
            },
            "seoKeywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 5-10 primary long-tail keywords used in the listing."
            },
            "attributes": {
                "type": "OBJECT",
                "description": "Key-value pairs for product attributes (e.g., 'pages': '50', 'format': 'PDF').",
                "properties": {
                    "pages": { "type": "STRING" },
                    "format": { "type": "STRING" },
                    "dimensions": { "type": "STRING" },
                    "targetAudience": { "type": "STRING" }
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
