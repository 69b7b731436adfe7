//! Plain text extractor.

use super::DocumentExtractor;
use crate::error::{IngestError, IngestResult};
use std::path::Path;

/// Reads `.txt` files verbatim as UTF-8.
pub struct TextExtractor;

impl DocumentExtractor for TextExtractor {
    fn extract(&self, path: &Path) -> IngestResult<String> {
        let bytes = std::fs::read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| IngestError::corrupt(path, format!("Invalid UTF-8: {}", e)))
    }
}
