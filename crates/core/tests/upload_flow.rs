use async_trait::async_trait;
use etsy_lister_core::encoder::decode_payload;
use etsy_lister_core::request::ListingRequest;
use etsy_lister_core::{
    AppError, Config, CoverImage, GeminiClient, ListingGenerator, ListingResult, ListingView, ProcessingStatus,
    SourceDocument, SourceFile, UploadFlow,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Generator that replays canned outcomes and counts calls.
struct ScriptedGenerator {
    outcomes: Mutex<Vec<etsy_lister_core::Result<ListingResult>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(mut outcomes: Vec<etsy_lister_core::Result<ListingResult>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingGenerator for ScriptedGenerator {
    async fn generate(&self, _document: &SourceDocument, _cover: &CoverImage) -> etsy_lister_core::Result<ListingResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(AppError::transport("no scripted outcome left")))
    }
}

fn forest_listing() -> ListingResult {
    let payload = serde_json::json!({
        "title": "Cute Forest Animals Coloring Book | Printable PDF",
        "description": "Bring the woodland home with 30 hand-drawn pages.",
        "tags": [
            "forest coloring", "animal coloring", "kids coloring", "printable pdf",
            "woodland animals", "coloring pages", "fox coloring", "bear coloring",
            "digital download", "kids activity", "cute animals", "coloring book",
            "gift for kids"
        ],
        "category": "Books > Coloring Books",
        "priceSuggestion": "$4.99 - $7.99"
    });
    ListingResult::from_payload(&payload.to_string()).unwrap()
}

fn big_pdf() -> SourceFile {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(2 * 1024 * 1024, 0x20);
    SourceFile::new("forest-animals.pdf", "application/pdf", bytes)
}

fn jpeg() -> SourceFile {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(500 * 1024, 0x7F);
    SourceFile::new("cover.jpg", "image/jpeg", bytes)
}

#[tokio::test]
async fn forest_book_reaches_success_and_renders() {
    let generator = ScriptedGenerator::new(vec![Ok(forest_listing())]);
    let mut flow = UploadFlow::new();
    flow.select_document(big_pdf()).unwrap();
    flow.select_cover(jpeg()).unwrap();

    let status = flow.submit(&generator).await.unwrap();
    assert_eq!(status, ProcessingStatus::Success);

    let listing = flow.result().unwrap();
    let view = ListingView::new(listing);
    assert!(listing.title_chars() <= 140);
    assert_eq!(view.tag_counter(), "13 / 13");
    assert!(listing.guideline_issues().is_empty());
}

#[tokio::test]
async fn text_file_as_cover_is_rejected_and_flow_stays_idle() {
    let mut flow = UploadFlow::new();
    let result = flow.select_cover(SourceFile::new("cover.txt", "text/plain", b"not an image".to_vec()));

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(flow.cover().is_none());
    assert_eq!(flow.status(), ProcessingStatus::Idle);
    assert!(flow.message().is_some());
}

#[tokio::test]
async fn missing_credential_fails_without_network() {
    // Port 9 is unroutable here; reaching it would give a transport error instead
    let config = Config::builder()
        .with_base_url("http://127.0.0.1:9/v1beta")
        .build()
        .unwrap();
    let client = GeminiClient::new(&config).unwrap();

    let mut flow = UploadFlow::new();
    flow.select_document(big_pdf()).unwrap();
    flow.select_cover(jpeg()).unwrap();

    let document = flow.document().unwrap().clone();
    let cover = flow.cover().unwrap().clone();
    assert!(matches!(
        client.generate(&document, &cover).await,
        Err(AppError::MissingCredential)
    ));

    assert_eq!(flow.submit(&client).await.unwrap(), ProcessingStatus::Error);
}

#[tokio::test]
async fn timeout_keeps_files_for_resubmission() {
    let generator = ScriptedGenerator::new(vec![
        Err(AppError::transport("operation timed out")),
        Ok(forest_listing()),
    ]);
    let mut flow = UploadFlow::new();
    flow.select_document(big_pdf()).unwrap();
    flow.select_cover(jpeg()).unwrap();

    assert_eq!(flow.submit(&generator).await.unwrap(), ProcessingStatus::Error);
    assert!(flow.document().is_some());
    assert!(flow.cover().is_some());

    assert_eq!(flow.submit(&generator).await.unwrap(), ProcessingStatus::Success);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn malformed_response_never_reaches_the_result() {
    let malformed = ListingResult::from_payload(r#"{"title": "Only a title"}"#);
    assert!(matches!(malformed, Err(AppError::MalformedResponse(_))));

    let generator = ScriptedGenerator::new(vec![malformed]);
    let mut flow = UploadFlow::new();
    flow.select_document(big_pdf()).unwrap();
    flow.select_cover(jpeg()).unwrap();

    assert_eq!(flow.submit(&generator).await.unwrap(), ProcessingStatus::Error);
    assert!(flow.result().is_none());
}

#[tokio::test]
async fn in_flight_job_blocks_second_submission() {
    let generator = ScriptedGenerator::new(vec![Ok(forest_listing())]);
    let mut flow = UploadFlow::new();
    flow.select_document(big_pdf()).unwrap();
    flow.select_cover(jpeg()).unwrap();

    let job = flow.begin_submission().unwrap().expect("first submission starts");
    assert!(flow.begin_submission().unwrap().is_none());

    let outcome = job.run(&generator).await;
    assert_eq!(flow.finish_submission(outcome), ProcessingStatus::Success);
    assert_eq!(generator.calls(), 1);
}

#[test]
fn request_payloads_decode_to_original_bytes() {
    let document = SourceDocument::try_from(big_pdf()).unwrap();
    let cover = CoverImage::try_from(jpeg()).unwrap();
    let request = ListingRequest::build(&cover, &document);

    assert_eq!(decode_payload(&request.document.data).unwrap(), document.file().bytes());
    assert_eq!(decode_payload(&request.cover.data).unwrap(), cover.file().bytes());
}
