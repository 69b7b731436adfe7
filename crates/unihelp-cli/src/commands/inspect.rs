//! Inspect command - summarize a persisted record.

use super::preview;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use unihelp_core::ProcessedDocument;

pub fn run(record: &Path, preview_chunks: usize) -> Result<()> {
    let doc = ProcessedDocument::load(record)
        .with_context(|| format!("Failed to read record {}", record.display()))?;

    println!("📄 {}", doc.file.white().bold());
    println!("{}", "─".repeat(70));

    let meta = &doc.metadata;
    println!("  {}: {}", "Language".cyan(), doc.language);
    println!("  {}: {}", "Type".cyan(), meta.document_type);
    println!(
        "  {}: {}",
        "Date".cyan(),
        meta.date.as_deref().unwrap_or("-")
    );
    println!("  {}: {}", "Department".cyan(), meta.department);
    println!("  {}: {}", "Source".cyan(), meta.source_file);
    println!(
        "  {}: {}",
        "Processed".cyan(),
        meta.processed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if doc.chunks.is_empty() {
        println!();
        println!("{}", "No chunks (document had no text).".yellow());
        return Ok(());
    }

    let total_chars: usize = doc.chunks.iter().map(|c| c.char_count).sum();
    println!();
    println!(
        "{} ({} chunks, {} characters)",
        "Content Preview".white().bold(),
        doc.total_chunks,
        total_chars
    );
    println!("{}", "─".repeat(70));

    for chunk in doc.chunks.iter().take(preview_chunks) {
        println!("[{}] {} chars", chunk.chunk_id, chunk.char_count);
        println!("{}", preview(&chunk.content, 200).dimmed());
        println!();
    }

    if doc.chunks.len() > preview_chunks {
        println!(
            "{}",
            format!("... and {} more chunks", doc.chunks.len() - preview_chunks).dimmed()
        );
    }

    Ok(())
}
