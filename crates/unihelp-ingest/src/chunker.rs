//! Content chunking for retrieval.
//!
//! Text is packed paragraph by paragraph up to a target size. Paragraphs
//! larger than the hard cap fall back to sentences, and sentences larger
//! than the cap are sliced by characters. Each new chunk is seeded with
//! trailing context from the previous one, aligned to a sentence start
//! when the tail contains one.

use crate::error::{IngestError, IngestResult};
use regex::Regex;
use std::sync::LazyLock;

/// Configuration for chunking. All sizes are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Preferred upper length; units are packed until the next would cross it.
    pub target_size: usize,
    /// Hard cap on chunk length.
    pub max_size: usize,
    /// Trailing characters of a chunk carried into the next one.
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            target_size: 800,
            max_size: 1000,
            overlap: 150,
        }
    }
}

impl ChunkConfig {
    /// Create config from pipeline settings.
    pub fn from_pipeline_config(config: &unihelp_config::PipelineConfig) -> Self {
        Self {
            target_size: config.target_chunk_size,
            max_size: config.max_chunk_size,
            overlap: config.chunk_overlap,
        }
    }

    /// Check `overlap < target_size <= max_size`.
    pub fn validate(&self) -> IngestResult<()> {
        if self.overlap >= self.target_size {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap ({}) must be smaller than target size ({})",
                self.overlap, self.target_size
            )));
        }
        if self.target_size > self.max_size {
            return Err(IngestError::InvalidChunkConfig(format!(
                "target size ({}) must not exceed max size ({})",
                self.target_size, self.max_size
            )));
        }
        Ok(())
    }
}

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// A sentence terminator and the whitespace run after it.
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Content chunker for splitting text.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Create a new chunker, rejecting inconsistent sizes.
    pub fn new(config: ChunkConfig) -> IngestResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a chunker with default configuration.
    pub fn default_chunker() -> Self {
        Self {
            config: ChunkConfig::default(),
        }
    }

    /// Split text into ordered, non-empty chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut acc = Accumulator::new(&self.config);

        for para in PARAGRAPH_BREAK.split(text) {
            let para = para.trim();
            if para.is_empty() {
                continue;
            }

            if char_len(para) > self.config.max_size {
                for sentence in split_sentences(para) {
                    if char_len(sentence) > self.config.max_size {
                        for piece in self.slice_chars(sentence) {
                            acc.push(&piece, " ");
                        }
                    } else {
                        acc.push(sentence, " ");
                    }
                }
            } else {
                acc.push(para, "\n\n");
            }
        }

        acc.finish()
    }

    /// Hard-slice an unsplittable sentence.
    ///
    /// Pieces are narrow enough that overlap, separator and piece still fit
    /// the target size, so every slice after the first carries overlap.
    fn slice_chars(&self, sentence: &str) -> Vec<String> {
        let width = self
            .config
            .target_size
            .saturating_sub(self.config.overlap + 1)
            .max(1);
        let chars: Vec<char> = sentence.chars().collect();
        chars.chunks(width).map(|c| c.iter().collect()).collect()
    }
}

/// Running chunk under construction plus the chunks already emitted.
struct Accumulator<'a> {
    config: &'a ChunkConfig,
    current: String,
    chunks: Vec<String>,
}

impl<'a> Accumulator<'a> {
    fn new(config: &'a ChunkConfig) -> Self {
        Self {
            config,
            current: String::new(),
            chunks: Vec::new(),
        }
    }

    fn push(&mut self, unit: &str, separator: &str) {
        if self.current.is_empty() {
            self.current.push_str(unit);
            return;
        }

        let joined = char_len(&self.current) + char_len(separator) + char_len(unit);
        if joined <= self.config.target_size {
            self.current.push_str(separator);
            self.current.push_str(unit);
            return;
        }

        let flushed = self.flush();
        let overlap = flushed
            .as_deref()
            .map(|text| overlap_text(text, self.config.overlap))
            .unwrap_or_default();

        // Context is dropped rather than letting the seed exceed the cap
        if char_len(&overlap) + char_len(unit) <= self.config.max_size {
            self.current = overlap;
        }
        self.current.push_str(unit);
    }

    /// Emit the current text as a chunk unless it trims to nothing.
    fn flush(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.current);
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.chunks.push(text.to_string());
        Some(text.to_string())
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}

/// Split on a terminator followed by whitespace, keeping the terminator.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        // Terminators are single-byte ASCII
        let sentence = text[start..m.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Trailing context of `text` to seed the next chunk, ending in a space.
///
/// Starts after the first sentence end inside the last `overlap` characters
/// if there is one, otherwise takes exactly those characters. Text no
/// longer than `overlap` carries nothing forward.
fn overlap_text(text: &str, overlap: usize) -> String {
    let len = char_len(text);
    if overlap == 0 || len <= overlap {
        return String::new();
    }

    let start = text
        .char_indices()
        .nth(len - overlap)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let tail = &text[start..];

    let tail = match SENTENCE_END.find(tail) {
        Some(m) => &tail[m.end()..],
        None => tail,
    };

    let mut seed = tail.to_string();
    seed.push(' ');
    seed
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
