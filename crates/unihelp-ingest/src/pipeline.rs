//! Per-file orchestration.

use crate::chunker::{ChunkConfig, Chunker};
use crate::error::IngestResult;
use crate::extractors;
use crate::language::detect_language;
use crate::metadata::MetadataExtractor;
use crate::normalizer::normalize;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unihelp_config::{Config, Vocabulary};
use unihelp_core::ProcessedDocument;

/// Suffix appended to the input stem when naming a persisted record.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_processed.json";

/// Runs one file through extraction, normalization, tagging and chunking.
///
/// Holds no per-file state, so one pipeline can be shared across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    chunker: Chunker,
    metadata: MetadataExtractor,
    output_suffix: String,
}

impl Pipeline {
    /// Create a pipeline from chunking parameters and a vocabulary.
    pub fn new(chunk_config: ChunkConfig, vocabulary: &Vocabulary) -> IngestResult<Self> {
        Ok(Self {
            chunker: Chunker::new(chunk_config)?,
            metadata: MetadataExtractor::new(vocabulary)?,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        })
    }

    /// Create a pipeline from the loaded configuration.
    pub fn from_config(config: &Config) -> IngestResult<Self> {
        let vocabulary = config.vocabulary.resolve()?;
        let pipeline = Self::new(ChunkConfig::from_pipeline_config(&config.pipeline), &vocabulary)?;
        Ok(pipeline.with_output_suffix(&config.pipeline.output_suffix))
    }

    /// Create a pipeline with default chunking and the English vocabulary.
    pub fn with_defaults() -> IngestResult<Self> {
        Self::new(ChunkConfig::default(), &Vocabulary::default())
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    pub fn output_suffix(&self) -> &str {
        &self.output_suffix
    }

    /// Process a single file into a document record.
    ///
    /// Fails only when extraction fails; every later stage has a fallback.
    pub fn process(&self, path: &Path) -> IngestResult<ProcessedDocument> {
        info!("Processing file: {}", path.display());

        let raw = extractors::extract(path)?;
        let text = normalize(&raw.text);
        let language = detect_language(&text);
        let tags = self.metadata.extract(&text);
        debug!(
            "Detected language {} and type {}",
            language, tags.document_type
        );

        let file_name = file_name(path);
        let metadata = tags.into_metadata(file_name.clone(), Utc::now());

        let chunks = self.chunker.chunk(&text);
        debug!("Created {} chunks for {}", chunks.len(), file_name);

        Ok(ProcessedDocument::new(file_name, language, metadata, chunks))
    }

    /// Process a file and persist the record.
    ///
    /// Without an explicit `output`, the record is written next to the input.
    pub fn process_and_save(&self, path: &Path, output: Option<&Path>) -> IngestResult<PathBuf> {
        let doc = self.process(path)?;
        let output = match output {
            Some(p) => p.to_path_buf(),
            None => default_record_path(path, &self.output_suffix),
        };

        doc.save_to(&output)?;
        info!(
            "Saved {} chunks from {} to {}",
            doc.total_chunks,
            doc.file,
            output.display()
        );
        Ok(output)
    }

    /// Where a record for `input` lands inside `output_dir`.
    pub fn record_path_in(&self, input: &Path, output_dir: &Path) -> PathBuf {
        record_path(input, output_dir, &self.output_suffix)
    }
}

/// `output_dir/<input stem><suffix>`.
pub fn record_path(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    output_dir.join(format!("{}{}", file_stem(input), suffix))
}

/// The record path beside the input: `<input without extension><suffix>`.
pub fn default_record_path(input: &Path, suffix: &str) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    record_path(input, dir, suffix)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string())
}
