//! Input files for a listing: the book interior and its cover.
//!
//! A [`SourceFile`] is an untyped blob with a declared media type. It becomes
//! a [`SourceDocument`] or a [`CoverImage`] only after its media type has been
//! checked, so the rest of the crate never sees a file of the wrong kind.

use crate::encoder::decode_payload;
use crate::error::{AppError, Result};
use image::ImageFormat;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// The only document format sent to Gemini.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A file held in memory together with its declared media type.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub media_type: String,
    bytes: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into().trim().to_ascii_lowercase(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, declaring its media type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::FileRead`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, media_type_for_path(path), bytes))
    }

    /// Builds a file from a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(name: impl Into<String>, data_url: &str) -> Result<Self> {
        let header = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(',').map(|(header, _)| header))
            .ok_or_else(|| AppError::Encoding("not a data URL".to_string()))?;
        let media_type = header.split(';').next().unwrap_or_default();
        if !header.ends_with(";base64") {
            return Err(AppError::Encoding(format!(
                "data URL for '{}' is not base64 encoded",
                media_type
            )));
        }

        let bytes = decode_payload(data_url)?;
        let media_type = if media_type.is_empty() { FALLBACK_MEDIA_TYPE } else { media_type };
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Guesses a media type from a file extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type();
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => PDF_MEDIA_TYPE,
        "txt" => "text/plain",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// The book's interior content. Always a PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument(SourceFile);

impl SourceDocument {
    pub fn file(&self) -> &SourceFile {
        &self.0
    }

    pub fn media_type(&self) -> &str {
        &self.0.media_type
    }
}

impl TryFrom<SourceFile> for SourceDocument {
    type Error = AppError;

    fn try_from(file: SourceFile) -> Result<Self> {
        if file.media_type != PDF_MEDIA_TYPE {
            return Err(AppError::validation(format!(
                "'{}' is {}; the book interior must be a PDF file",
                file.name, file.media_type
            )));
        }
        Ok(Self(file))
    }
}

/// The book's cover. Any `image/*` media type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverImage(SourceFile);

impl CoverImage {
    pub fn file(&self) -> &SourceFile {
        &self.0
    }

    pub fn media_type(&self) -> &str {
        &self.0.media_type
    }
}

impl TryFrom<SourceFile> for CoverImage {
    type Error = AppError;

    fn try_from(file: SourceFile) -> Result<Self> {
        if !file.media_type.starts_with("image/") {
            return Err(AppError::validation(format!(
                "'{}' is {}; the cover must be an image file",
                file.name, file.media_type
            )));
        }
        Ok(Self(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn media_type_from_extension() {
        assert_eq!(media_type_for_path(Path::new("cover.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("cover.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("book.pdf")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(media_type_for_path(Path::new("blob")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn document_accepts_pdf_only() {
        let pdf = SourceFile::new("book.pdf", "application/pdf", b"%PDF".to_vec());
        assert!(SourceDocument::try_from(pdf).is_ok());

        let jpeg = SourceFile::new("cover.jpg", "image/jpeg", vec![0xFF, 0xD8]);
        assert!(matches!(SourceDocument::try_from(jpeg), Err(AppError::Validation(_))));
    }

    #[test]
    fn cover_accepts_any_image() {
        let webp = SourceFile::new("cover.webp", "image/webp", vec![1, 2, 3]);
        assert!(CoverImage::try_from(webp).is_ok());

        let text = SourceFile::new("cover.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(CoverImage::try_from(text), Err(AppError::Validation(_))));
    }

    #[test]
    fn media_type_is_normalised() {
        let file = SourceFile::new("cover.png", " Image/PNG ", vec![0]);
        assert_eq!(file.media_type, "image/png");
        assert!(CoverImage::try_from(file).is_ok());
    }

    #[test]
    fn load_reads_bytes_and_declares_type() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 body").unwrap();

        let loaded = SourceFile::load(file.path()).unwrap();
        assert_eq!(loaded.media_type, PDF_MEDIA_TYPE);
        assert_eq!(loaded.bytes(), b"%PDF-1.4 body");
        assert!(loaded.name.ends_with(".pdf"));
    }

    #[test]
    fn from_data_url_decodes_payload() {
        let file = SourceFile::from_data_url("cover", "data:image/png;base64,AAEC").unwrap();
        assert_eq!(file.media_type, "image/png");
        assert_eq!(file.bytes(), &[0, 1, 2]);
    }

    #[test]
    fn from_data_url_rejects_plain_text() {
        assert!(SourceFile::from_data_url("x", "AAEC").is_err());
        assert!(SourceFile::from_data_url("x", "data:text/plain,hello").is_err());
    }
}
