//! File encoding for transmission to the Gemini API.
//!
//! Gemini accepts file content inline as base64 text. Browser file readers
//! hand out `data:<mime>;base64,<payload>` URLs, so this module also knows how
//! to peel that wrapper off and keep only the payload.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fs;
use std::path::Path;

/// Encodes raw bytes as standard, padded base64.
pub fn encode_bytes(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Reads a file once and returns its base64 payload.
///
/// # Errors
///
/// Returns [`AppError::FileRead`] if the file cannot be read. The read is
/// not retried.
pub fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_bytes(&bytes))
}

/// Removes a leading `data:...,` wrapper, if any.
///
/// Strings without the wrapper are returned unchanged.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, payload)| payload),
        None => encoded,
    }
}

/// Decodes a base64 payload, tolerating a data URL wrapper.
pub fn decode_payload(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(strip_data_url_prefix(encoded).trim())
        .map_err(|e| AppError::Encoding(format!("invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trip_reproduces_bytes() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let encoded = encode_bytes(&bytes);
        assert_eq!(decode_payload(&encoded).unwrap(), bytes);
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(encode_bytes(&[]), "");
        assert!(decode_payload("").unwrap().is_empty());
    }

    #[test]
    fn strips_browser_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,AAEC"), "AAEC");
        assert_eq!(strip_data_url_prefix("AAEC"), "AAEC");
    }

    #[test]
    fn encoded_output_has_no_prefix() {
        let encoded = encode_bytes(b"%PDF-1.7");
        assert!(!encoded.starts_with("data:"));
        assert!(!encoded.contains(','));
    }

    #[test]
    fn encode_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"interior pages").unwrap();

        let encoded = encode_file(file.path()).unwrap();
        assert_eq!(decode_payload(&encoded).unwrap(), b"interior pages");
    }

    #[test]
    fn encode_file_surfaces_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");

        let err = encode_file(&missing).unwrap_err();
        assert!(matches!(err, AppError::FileRead { ref path, .. } if *path == missing));
    }

    #[test]
    fn garbage_payload_is_encoding_error() {
        assert!(matches!(decode_payload("@@@"), Err(AppError::Encoding(_))));
    }
}
