//! Unihelp Ingest - Administrative document processing pipeline.
//!
//! This crate provides:
//! - Text extraction from PDF, DOCX, XLSX and plain text files
//! - Normalization of extracted text
//! - Language detection and heuristic metadata tagging
//! - Size-bounded chunking with boundary-aware overlap
//! - Per-file orchestration, batch processing and record persistence

mod batch;
mod chunker;
mod error;
mod extractors;
mod language;
mod metadata;
mod normalizer;
mod pipeline;
mod sink;

pub use batch::{process_batch, scan_supported_files, BatchReport};
pub use chunker::{ChunkConfig, Chunker};
pub use error::{IngestError, IngestResult};
pub use extractors::{extract, DocumentExtractor, Format, RawDocument};
pub use language::detect_language;
pub use metadata::MetadataExtractor;
pub use normalizer::normalize;
pub use pipeline::{default_record_path, record_path, Pipeline, DEFAULT_OUTPUT_SUFFIX};
pub use sink::{ingest_into, ChunkSink, JsonLinesSink};
