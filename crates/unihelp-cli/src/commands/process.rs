//! Process command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use unihelp_config::{Config, PipelineConfig};
use unihelp_ingest::{process_batch, scan_supported_files, Pipeline};

/// Chunking parameters given on the command line.
#[derive(Debug, Default)]
pub struct ChunkOverrides {
    pub target_size: Option<usize>,
    pub max_size: Option<usize>,
    pub overlap: Option<usize>,
}

impl ChunkOverrides {
    pub fn apply(&self, pipeline: &mut PipelineConfig) {
        if let Some(size) = self.target_size {
            pipeline.target_chunk_size = size;
        }
        if let Some(size) = self.max_size {
            pipeline.max_chunk_size = size;
        }
        if let Some(overlap) = self.overlap {
            pipeline.chunk_overlap = overlap;
        }
    }
}

/// Process a single file or every supported file under a directory.
pub fn run(
    config: &Config,
    input: &Path,
    output_dir: &Path,
    overrides: &ChunkOverrides,
    dry_run: bool,
) -> Result<()> {
    let mut config = config.clone();
    overrides.apply(&mut config.pipeline);
    let pipeline = Pipeline::from_config(&config).context("Invalid pipeline configuration")?;

    if input.is_dir() {
        run_directory(&pipeline, input, output_dir, dry_run)
    } else if input.is_file() {
        run_file(&pipeline, input, output_dir, dry_run)
    } else {
        anyhow::bail!("Invalid input path '{}'", input.display())
    }
}

fn run_file(pipeline: &Pipeline, input: &Path, output_dir: &Path, dry_run: bool) -> Result<()> {
    let output = pipeline.record_path_in(input, output_dir);

    if dry_run {
        println!(
            "{} {} -> {}",
            "Would process:".cyan(),
            input.display(),
            output.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Processing {}", input.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = pipeline.process_and_save(input, Some(output.as_path()));
    pb.finish_and_clear();

    match result {
        Ok(output) => {
            println!(
                "{} {} -> {}",
                "Successfully processed:".green().bold(),
                input.display(),
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "{} {}: {}",
                "Failed to process".red().bold(),
                input.display(),
                e
            );
            Err(e).with_context(|| format!("Failed to process {}", input.display()))
        }
    }
}

fn run_directory(pipeline: &Pipeline, input: &Path, output_dir: &Path, dry_run: bool) -> Result<()> {
    let files = scan_supported_files(input);
    println!("Found {} supported files in directory.", files.len());

    if files.is_empty() {
        println!("{}", "No supported files found.".yellow());
        return Ok(());
    }

    if dry_run {
        for file in &files {
            println!(
                "  {} -> {}",
                file.display(),
                pipeline.record_path_in(file, output_dir).display()
            );
        }
        println!("\n{}", "Dry run - no records were written.".cyan());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = process_batch(pipeline, &files, output_dir, |file, outcome| {
        match outcome {
            Ok(output) => pb.println(format!(
                "{} {} -> {}",
                "Successfully processed:".green(),
                file.display(),
                output.display()
            )),
            Err(e) => pb.println(format!(
                "{} {}: {}",
                "Failed to process".red(),
                file.display(),
                e
            )),
        }
        pb.inc(1);
    });

    pb.finish_and_clear();

    println!(
        "\n{} {} files",
        "Processed:".green().bold(),
        report.succeeded.len()
    );
    if !report.failed.is_empty() {
        println!("{} {} files", "Failed:".red().bold(), report.failed.len());
    }

    Ok(())
}
