//! Format-specific text extractors.
//!
//! Each extractor turns one file into a single raw text string. Selection is
//! by file extension only, so an unknown extension is rejected before the
//! file is opened.

mod docx;
mod pdf;
mod text;
mod xlsx;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::TextExtractor;
pub use xlsx::XlsxExtractor;

use crate::error::{IngestError, IngestResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text extracted from a file, before normalization.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The file the text came from.
    pub path: PathBuf,
    /// The extracted text.
    pub text: String,
}

/// Input formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Docx,
    Xlsx,
    Text,
}

impl Format {
    const ALL: [Format; 4] = [Format::Pdf, Format::Docx, Format::Xlsx, Format::Text];

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
            Format::Xlsx => "xlsx",
            Format::Text => "txt",
        }
    }

    /// Match an extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// Detect the format of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// The extractor that handles this format.
    pub fn extractor(&self) -> Box<dyn DocumentExtractor> {
        match self {
            Format::Pdf => Box::new(PdfExtractor),
            Format::Docx => Box::new(DocxExtractor),
            Format::Xlsx => Box::new(XlsxExtractor),
            Format::Text => Box::new(TextExtractor),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Trait for format-specific extractors.
pub trait DocumentExtractor: Send + Sync {
    /// Read the file at `path` into a single text string.
    fn extract(&self, path: &Path) -> IngestResult<String>;
}

/// Extract the raw text of a file, dispatching on its extension.
pub fn extract(path: &Path) -> IngestResult<RawDocument> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }

    let format = Format::from_path(path).ok_or_else(|| {
        IngestError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
        )
    })?;

    debug!("Extracting {} text from {:?}", format, path);
    let text = format.extractor().extract(path)?;
    debug!("Extracted {} characters", text.chars().count());

    Ok(RawDocument {
        path: path.to_path_buf(),
        text,
    })
}
