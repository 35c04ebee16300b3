//! Base64 and image-format helpers.
//!
//! Generated images arrive as data URLs (`data:image/<fmt>;base64,<payload>`);
//! everything here deals with getting bytes in and out of that encoding and
//! onto disk with a sensible file extension.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose;

use crate::error::PixrouteError;

/// Delimiter between a data-URL header and its base64 payload.
const DATA_URL_DELIMITER: &str = ";base64,";

/// Encodes raw bytes as standard base64.
pub fn encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decodes a standard base64 string.
///
/// # Errors
/// Fails when the input is not valid base64.
pub fn decode(encoded: &str) -> Result<Vec<u8>, PixrouteError> {
    Ok(general_purpose::STANDARD.decode(encoded)?)
}

/// Reads a file and returns its contents base64-encoded.
///
/// # Errors
/// Fails when the file cannot be read.
pub fn encode_file(path: &Path) -> Result<String, PixrouteError> {
    let bytes = fs::read(path)?;
    Ok(encode(&bytes))
}

/// Returns the bare base64 payload of a data URL.
///
/// Input without a `;base64,` marker is treated as already-bare base64 and
/// returned unchanged.
pub fn strip_data_url(url: &str) -> &str {
    match url.split_once(DATA_URL_DELIMITER) {
        Some((_, payload)) => payload,
        None => url,
    }
}

/// Decodes a base64 image payload, sniffs its format, and writes it to
/// `base_path` with the sniffed extension appended (`jpeg` normalized to
/// `jpg`).
///
/// Returns the final path including the extension.
///
/// # Errors
/// Fails when the payload is not valid base64 or not a decodable image, or
/// when the write fails.
pub fn sniff_format_and_save(payload: &str, base_path: &Path) -> Result<PathBuf, PixrouteError> {
    let bytes = decode(payload)?;

    let reader = image::ImageReader::new(Cursor::new(&bytes)).with_guessed_format()?;
    let format = reader.format().ok_or_else(|| {
        PixrouteError::ImageDecode("payload is not a recognized image format".to_string())
    })?;
    // Full decode so a truncated or corrupt payload fails here, not in a viewer.
    reader.decode()?;

    let extension = match format.extensions_str().first() {
        Some(&"jpeg") => "jpg",
        Some(&ext) => ext,
        None => "png",
    };

    let output_path = PathBuf::from(format!("{}.{}", base_path.display(), extension));
    fs::write(&output_path, &bytes)?;
    Ok(output_path)
}
