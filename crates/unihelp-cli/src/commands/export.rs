//! Export command - emit vector-index records as JSON lines.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use unihelp_config::Config;
use unihelp_core::ProcessedDocument;
use unihelp_ingest::{ingest_into, scan_supported_files, JsonLinesSink, Pipeline};

/// Export index records for `input`.
///
/// A `.json` input is read as a persisted record; anything else is run
/// through the pipeline first. Counts go to stderr so stdout carries only
/// records.
pub fn run(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let sources = collect_sources(input)?;
    let pipeline = Pipeline::from_config(config).context("Invalid pipeline configuration")?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut sink = JsonLinesSink::new(writer);

    let mut documents = 0;
    let mut failed = 0;
    for source in &sources {
        let doc = match load_or_process(&pipeline, source) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {:#}", source.display(), e);
                failed += 1;
                continue;
            }
        };
        ingest_into(&mut sink, &doc)
            .with_context(|| format!("Failed to export {}", source.display()))?;
        documents += 1;
    }

    let delivered = sink.written();
    sink.into_inner().context("Failed to flush output")?;

    eprintln!(
        "{} {} chunks from {} documents",
        "Exported:".green().bold(),
        delivered,
        documents
    );
    if failed > 0 {
        eprintln!("{} {} files", "Failed:".red().bold(), failed);
    }

    Ok(())
}

fn collect_sources(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        Ok(scan_supported_files(input))
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        anyhow::bail!("Invalid input path '{}'", input.display())
    }
}

fn is_record(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn load_or_process(pipeline: &Pipeline, path: &Path) -> Result<ProcessedDocument> {
    if is_record(path) {
        Ok(ProcessedDocument::load(path)?)
    } else {
        Ok(pipeline.process(path)?)
    }
}
