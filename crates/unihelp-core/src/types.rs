//! Core records for Unihelp.
//!
//! Field names and nesting of [`ProcessedDocument`] are the on-disk contract
//! read back by the ingestion side, so renames here are breaking changes.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback tag for an unrecognized document type.
pub const UNKNOWN_DOCUMENT_TYPE: &str = "Unknown";

/// Fallback tag for an unrecognized department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Language tag used when detection is impossible.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Date value in index metadata when no date was found.
pub const UNKNOWN_DATE: &str = "unknown";

/// Joins the source file name and chunk index in index identifiers.
pub const CHUNK_ID_SEPARATOR: &str = "_chunk_";

/// Tags inferred from document text, before file identity is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicTags {
    pub document_type: String,
    pub date: Option<String>,
    pub department: String,
}

impl Default for HeuristicTags {
    fn default() -> Self {
        Self {
            document_type: UNKNOWN_DOCUMENT_TYPE.to_string(),
            date: None,
            department: UNKNOWN_DEPARTMENT.to_string(),
        }
    }
}

impl HeuristicTags {
    /// Attach file identity and processing time.
    pub fn into_metadata(
        self,
        source_file: impl Into<String>,
        processed_at: DateTime<Utc>,
    ) -> DocumentMetadata {
        DocumentMetadata {
            document_type: self.document_type,
            date: self.date,
            department: self.department,
            source_file: source_file.into(),
            processed_at,
        }
    }
}

/// Document-level metadata stored with every processed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub document_type: String,
    pub date: Option<String>,
    pub department: String,
    pub source_file: String,
    pub processed_at: DateTime<Utc>,
}

/// A bounded unit of normalized document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: usize,
    pub content: String,
    pub char_count: usize,
}

impl Chunk {
    pub fn new(chunk_id: usize, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            chunk_id,
            char_count: content.chars().count(),
            content,
        }
    }
}

/// The pipeline's output for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub file: String,
    pub language: String,
    pub metadata: DocumentMetadata,
    pub total_chunks: usize,
    pub chunks: Vec<Chunk>,
}

impl ProcessedDocument {
    /// Assemble a document, numbering chunk texts densely from zero.
    pub fn new(
        file: impl Into<String>,
        language: impl Into<String>,
        metadata: DocumentMetadata,
        chunk_texts: Vec<String>,
    ) -> Self {
        let chunks: Vec<Chunk> = chunk_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i, text))
            .collect();

        Self {
            file: file.into(),
            language: language.into(),
            metadata,
            total_chunks: chunks.len(),
            chunks,
        }
    }

    /// Load a previously persisted record.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let doc = serde_json::from_str(&contents)?;
        Ok(doc)
    }

    /// Write the record as pretty-printed JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Flatten non-blank chunks into records for a vector index.
    pub fn index_records(&self) -> Vec<IndexRecord> {
        self.chunks
            .iter()
            .filter_map(|chunk| {
                let text = chunk.content.trim();
                if text.is_empty() {
                    return None;
                }

                Some(IndexRecord {
                    id: format!(
                        "{}{}{}",
                        self.metadata.source_file, CHUNK_ID_SEPARATOR, chunk.chunk_id
                    ),
                    text: text.to_string(),
                    metadata: IndexMetadata {
                        source: self.metadata.source_file.clone(),
                        document_type: self.metadata.document_type.clone(),
                        department: self.metadata.department.clone(),
                        date: self
                            .metadata
                            .date
                            .clone()
                            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
                        language: self.language.clone(),
                    },
                })
            })
            .collect()
    }
}

/// String-valued metadata attached to every indexed chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub source: String,
    pub document_type: String,
    pub department: String,
    pub date: String,
    pub language: String,
}

/// One chunk as handed to a vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub text: String,
    pub metadata: IndexMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_metadata(date: Option<&str>) -> DocumentMetadata {
        HeuristicTags {
            document_type: "Circular".to_string(),
            date: date.map(str::to_string),
            department: "Department of Physics".to_string(),
        }
        .into_metadata(
            "memo.txt",
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_default_tags_are_fallbacks() {
        let tags = HeuristicTags::default();
        assert_eq!(tags.document_type, "Unknown");
        assert_eq!(tags.date, None);
        assert_eq!(tags.department, "Unknown");
    }

    #[test]
    fn test_chunks_numbered_densely() {
        let doc = ProcessedDocument::new(
            "memo.txt",
            "en",
            sample_metadata(None),
            vec!["one".to_string(), "two".to_string(), "héllo".to_string()],
        );

        assert_eq!(doc.total_chunks, 3);
        let ids: Vec<usize> = doc.chunks.iter().map(|c| c.chunk_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        // char_count counts characters, not bytes
        assert_eq!(doc.chunks[2].char_count, 5);
    }

    #[test]
    fn test_record_field_names() {
        let doc = ProcessedDocument::new(
            "memo.txt",
            "en",
            sample_metadata(None),
            vec!["Body text.".to_string()],
        );
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["file"], "memo.txt");
        assert_eq!(value["language"], "en");
        assert_eq!(value["total_chunks"], 1);
        assert!(value["metadata"]["date"].is_null());
        assert_eq!(value["metadata"]["source_file"], "memo.txt");
        assert_eq!(value["metadata"]["processed_at"], "2024-03-01T09:30:00Z");
        assert_eq!(value["chunks"][0]["chunk_id"], 0);
        assert_eq!(value["chunks"][0]["content"], "Body text.");
        assert_eq!(value["chunks"][0]["char_count"], 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("memo_processed.json");
        let doc = ProcessedDocument::new(
            "memo.txt",
            "fr",
            sample_metadata(Some("12 mai 2023")),
            vec!["Arrêté du doyen.".to_string()],
        );

        doc.save_to(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Arrêté"), "non-ASCII text is written verbatim");

        let loaded = ProcessedDocument::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_index_records() {
        let mut doc = ProcessedDocument::new(
            "memo.txt",
            "en",
            sample_metadata(None),
            vec!["First.".to_string(), "Second.".to_string()],
        );
        doc.chunks.push(Chunk::new(2, "   "));

        let records = doc.index_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "memo.txt_chunk_0");
        assert_eq!(records[1].id, "memo.txt_chunk_1");
        assert_eq!(records[0].metadata.date, "unknown");
        assert_eq!(records[0].metadata.document_type, "Circular");
        assert_eq!(records[1].metadata.language, "en");
    }
}
