//! PDF text extractor.

use super::DocumentExtractor;
use crate::error::{IngestError, IngestResult};
use std::path::Path;
use tracing::debug;

/// Separator placed between the text of consecutive pages.
const PAGE_SEPARATOR: &str = "\n\n";

/// Extracts machine-readable text from PDF files, page by page.
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> IngestResult<String> {
        // pdf-extract panics on some malformed inputs
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
            .map_err(|_| IngestError::corrupt(path, "PDF parser aborted on malformed input"))?
            .map_err(|e| {
                IngestError::corrupt(path, format!("Failed to extract text from PDF: {}", e))
            })?;

        debug!("Extracted {} pages from PDF", pages.len());
        Ok(join_pages(&pages))
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_join_pages_blank_line_between() {
        let pages = vec!["First page".to_string(), "Second page".to_string()];
        assert_eq!(join_pages(&pages), "First page\n\nSecond page");
    }

    #[test]
    fn test_garbage_pdf_is_corrupt() {
        let file = NamedTempFile::with_suffix(".pdf").unwrap();
        std::fs::write(file.path(), b"this is not a pdf").unwrap();

        let result = PdfExtractor.extract(file.path());
        assert!(matches!(result, Err(IngestError::CorruptFile { .. })));
    }
}
