//! Hand-off of processed chunks to a vector index.
//!
//! The index itself lives outside this crate. [`ChunkSink`] is the narrow
//! contract it has to satisfy: parallel lists of chunk texts, flattened
//! metadata and identifiers.

use crate::error::{IngestError, IngestResult};
use std::io::Write;
use tracing::debug;
use unihelp_core::{IndexMetadata, IndexRecord, ProcessedDocument};

/// Receives chunk batches destined for a vector index.
pub trait ChunkSink {
    /// Add one batch. The three lists have equal length and matching order.
    fn add_texts(
        &mut self,
        texts: Vec<String>,
        metadatas: Vec<IndexMetadata>,
        ids: Vec<String>,
    ) -> IngestResult<()>;
}

/// Feed every non-blank chunk of `doc` to `sink` in one batch.
///
/// Returns the number of chunks delivered. A document without content
/// never reaches the sink.
pub fn ingest_into<S: ChunkSink + ?Sized>(sink: &mut S, doc: &ProcessedDocument) -> IngestResult<usize> {
    let records = doc.index_records();
    if records.is_empty() {
        debug!("No chunks to index for {}", doc.file);
        return Ok(0);
    }

    let count = records.len();
    let mut texts = Vec::with_capacity(count);
    let mut metadatas = Vec::with_capacity(count);
    let mut ids = Vec::with_capacity(count);
    for record in records {
        texts.push(record.text);
        metadatas.push(record.metadata);
        ids.push(record.id);
    }

    sink.add_texts(texts, metadatas, ids)?;
    debug!("Indexed {} chunks from {}", count, doc.file);
    Ok(count)
}

/// Writes each record as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> IngestResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ChunkSink for JsonLinesSink<W> {
    fn add_texts(
        &mut self,
        texts: Vec<String>,
        metadatas: Vec<IndexMetadata>,
        ids: Vec<String>,
    ) -> IngestResult<()> {
        if texts.len() != metadatas.len() || texts.len() != ids.len() {
            return Err(IngestError::Index(format!(
                "mismatched batch: {} texts, {} metadatas, {} ids",
                texts.len(),
                metadatas.len(),
                ids.len()
            )));
        }

        for ((text, metadata), id) in texts.into_iter().zip(metadatas).zip(ids) {
            let record = IndexRecord { id, text, metadata };
            let line = serde_json::to_string(&record)
                .map_err(|e| IngestError::Index(e.to_string()))?;
            writeln!(self.writer, "{}", line)?;
            self.written += 1;
        }
        Ok(())
    }
}
