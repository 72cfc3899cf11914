use crate::config::Config;
use crate::error::{AppError, Result};
use crate::listing::ListingResult;
use crate::request::{InlinePayload, ListingRequest};
use crate::source::{CoverImage, SourceDocument};
use async_trait::async_trait;
use gemini_rust::{Blob, ClientError, Content, Gemini, GenerationResponse, Message, Part, Role};
#[cfg(test)]
use mockall::automock;

/// Anything that can turn a book interior and cover into a listing.
///
/// [`GeminiClient`] is the production implementation; tests plug in fakes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ListingGenerator: Send + Sync {
    async fn generate(&self, document: &SourceDocument, cover: &CoverImage) -> Result<ListingResult>;
}

pub struct GeminiClient {
    config: Config,
    model_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Use the full model URL, a bare model name gives a BadScheme error
        let model_url = config
            .base_url
            .join(&config.model_path())
            .map_err(|e| AppError::Config(format!("Invalid model URL: {}", e)))?
            .to_string();

        Ok(Self {
            config: config.clone(),
            model_url,
        })
    }

    fn connect(&self, api_key: &str) -> Result<Gemini> {
        Gemini::with_model_and_base_url(api_key, self.model_url.clone(), self.config.base_url.clone())
            .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))
    }
}

#[async_trait]
impl ListingGenerator for GeminiClient {
    /// Sends the cover and interior to Gemini and parses the structured listing.
    ///
    /// Exactly one request is made per call. Failures are not retried.
    async fn generate(&self, document: &SourceDocument, cover: &CoverImage) -> Result<ListingResult> {
        // Checked before anything else so a missing key never reaches the network
        let api_key = self.config.api_key().ok_or(AppError::MissingCredential)?;
        let client = self.connect(api_key)?;

        let request = ListingRequest::build(cover, document);
        let schema = request.response_schema.clone();

        tracing::info!(
            model = %self.config.model_name,
            cover_bytes = cover.file().len(),
            document_bytes = document.file().len(),
            "Requesting listing from Gemini"
        );

        let response = client
            .generate_content()
            .with_messages(vec![user_message(request)])
            .with_response_mime_type("application/json")
            .with_response_schema(schema)
            .execute()
            .await
            .map_err(classify_client_error)?;

        let payload = response_text(&response);
        tracing::debug!(payload_len = payload.len(), "Gemini response received");
        ListingResult::from_payload(&payload)
    }
}

/// Splits client failures into transport problems and unusable replies.
///
/// A reply that came back with a success status but does not decode is the
/// model's fault, not the network's.
fn classify_client_error(error: ClientError) -> AppError {
    match error {
        ClientError::Deserialize { .. } => AppError::malformed(format!("undecodable Gemini reply: {:?}", error)),
        ClientError::DecodeResponse { ref source } if source.is_decode() => {
            AppError::malformed(format!("undecodable Gemini reply: {:?}", error))
        }
        other => AppError::transport(format!("API request failed: {:?}", other)),
    }
}

/// Concatenates the answer parts of the first candidate, skipping thoughts.
fn response_text(response: &GenerationResponse) -> String {
    let mut payload = String::new();
    if let Some(candidate) = response.candidates.first() {
        if let Some(parts) = &candidate.content.parts {
            for part in parts {
                if let Part::Text { text, thought, .. } = part {
                    if !thought.unwrap_or(false) {
                        payload.push_str(text);
                    }
                }
            }
        }
    }
    payload
}

/// Wraps the request into a single user turn: instruction, cover, interior.
fn user_message(request: ListingRequest) -> Message {
    let text_part = Part::Text {
        text: request.instruction.to_string(),
        thought: None,
        thought_signature: None,
    };

    let content = Content {
        role: Some(Role::User),
        parts: Some(vec![
            text_part,
            inline_part(request.cover),
            inline_part(request.document),
        ]),
    };

    Message {
        role: Role::User,
        content,
    }
}

fn inline_part(payload: InlinePayload) -> Part {
    Part::InlineData {
        inline_data: Blob {
            mime_type: payload.mime_type,
            data: payload.data,
        },
    }
}
