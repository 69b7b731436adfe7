//! Directory scanning and batch processing.

use crate::error::IngestResult;
use crate::extractors::Format;
use crate::pipeline::Pipeline;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Recursively collect files with a supported extension, sorted by path.
pub fn scan_supported_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| Format::from_path(e.path()).is_some())
        .map(|e| e.into_path())
        .collect();

    files.sort();
    debug!("Found {} supported files under {}", files.len(), dir.display());
    files
}

/// Per-file results of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Input path and the record written for it.
    pub succeeded: Vec<(PathBuf, PathBuf)>,
    /// Input path and the reason it failed.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process every input and save its record into `output_dir`.
///
/// Each file is processed and saved on a worker thread, so only the
/// documents in flight are held in memory. Inputs sharing a stem resolve to
/// the last one listed: earlier ones are still processed but never written.
/// A failing file is reported and never stops the rest. `on_file` is called
/// from the worker as soon as that file's outcome is final; the returned
/// report lists results in input order.
pub fn process_batch<F>(
    pipeline: &Pipeline,
    inputs: &[PathBuf],
    output_dir: &Path,
    on_file: F,
) -> BatchReport
where
    F: Fn(&Path, &IngestResult<PathBuf>) + Sync,
{
    info!(
        "Processing {} files into {}",
        inputs.len(),
        output_dir.display()
    );

    let outputs: Vec<PathBuf> = inputs
        .iter()
        .map(|input| pipeline.record_path_in(input, output_dir))
        .collect();
    let writers = last_writers(&outputs);

    let outcomes: Vec<IngestResult<PathBuf>> = inputs
        .par_iter()
        .zip(outputs.into_par_iter())
        .enumerate()
        .map(|(index, (input, output))| {
            let outcome = pipeline.process(input).and_then(|doc| {
                if writers.get(&output) == Some(&index) {
                    doc.save_to(&output)?;
                } else {
                    debug!(
                        "Skipping write of {}: a later input claims {}",
                        input.display(),
                        output.display()
                    );
                }
                Ok(output)
            });
            on_file(input, &outcome);
            outcome
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok(output) => report.succeeded.push((input.clone(), output)),
            Err(e) => {
                warn!("Failed to process {}: {}", input.display(), e);
                report.failed.push((input.clone(), e.to_string()));
            }
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    report
}

/// Map each output path to the index of the last input that targets it.
fn last_writers(outputs: &[PathBuf]) -> HashMap<PathBuf, usize> {
    outputs
        .iter()
        .enumerate()
        .map(|(index, output)| (output.clone(), index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("b").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(dir.path().join("z.txt"), "z").unwrap();
        std::fs::write(dir.path().join("a.TXT"), "a").unwrap();
        std::fs::write(dir.path().join("photo.png"), "png").unwrap();
        std::fs::write(dir.path().join("README"), "none").unwrap();
        std::fs::write(nested.join("report.pdf"), "pdf").unwrap();

        let files = scan_supported_files(dir.path());
        assert_eq!(
            files,
            vec![
                dir.path().join("a.TXT"),
                nested.join("report.pdf"),
                dir.path().join("z.txt"),
            ]
        );
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(scan_supported_files(dir.path()).is_empty());
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let good = dir.path().join("memo.txt");
        let bad = dir.path().join("broken.txt");
        let missing = dir.path().join("gone.txt");
        std::fs::write(&good, "Circular\n\nAll offices close on 01/05/2024.").unwrap();
        std::fs::write(&bad, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let pipeline = Pipeline::with_defaults().unwrap();
        let seen = Mutex::new(Vec::new());
        let report = process_batch(
            &pipeline,
            &[bad.clone(), good.clone(), missing.clone()],
            &out,
            |input, outcome| {
                seen.lock()
                    .unwrap()
                    .push((input.to_path_buf(), outcome.is_ok()))
            },
        );

        assert_eq!(report.total(), 3);
        assert!(!report.is_success());
        assert_eq!(report.succeeded, vec![(good.clone(), out.join("memo_processed.json"))]);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].0, bad);
        assert_eq!(report.failed[1].0, missing);

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        let mut expected = vec![(bad, false), (good, true), (missing, false)];
        expected.sort();
        assert_eq!(seen, expected);
        assert!(out.join("memo_processed.json").exists());
    }

    #[test]
    fn test_records_saved_as_each_file_finishes() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let inputs: Vec<PathBuf> = (0..4)
            .map(|i| {
                let path = dir.path().join(format!("notice{}.txt", i));
                std::fs::write(&path, format!("Notice number {}.", i)).unwrap();
                path
            })
            .collect();
        let records: Vec<PathBuf> = (0..4)
            .map(|i| out.join(format!("notice{}_processed.json", i)))
            .collect();

        let pipeline = Pipeline::with_defaults().unwrap();
        let calls = Mutex::new(Vec::new());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let report = pool.install(|| {
            process_batch(&pipeline, &inputs, &out, |input, outcome| {
                let written: Vec<bool> = records.iter().map(|r| r.exists()).collect();
                calls
                    .lock()
                    .unwrap()
                    .push((input.to_path_buf(), outcome.is_ok(), written));
            })
        });
        assert!(report.is_success());

        let calls = calls.into_inner().unwrap();
        assert_eq!(calls.len(), 4);
        for (i, (input, ok, written)) in calls.iter().enumerate() {
            assert_eq!(input, &inputs[i]);
            assert!(ok);
            let expected: Vec<bool> = (0..4).map(|j| j <= i).collect();
            assert_eq!(written, &expected);
        }
    }

    #[test]
    fn test_last_writers() {
        let outputs = vec![
            PathBuf::from("out/memo_processed.json"),
            PathBuf::from("out/notice_processed.json"),
            PathBuf::from("out/memo_processed.json"),
        ];
        let writers = last_writers(&outputs);
        assert_eq!(writers.len(), 2);
        assert_eq!(writers[&outputs[0]], 2);
        assert_eq!(writers[&outputs[1]], 1);
    }

    #[test]
    fn test_same_stem_last_input_wins() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let first = dir.path().join("a").join("memo.txt");
        let second = dir.path().join("b").join("memo.txt");
        std::fs::create_dir_all(first.parent().unwrap()).unwrap();
        std::fs::create_dir_all(second.parent().unwrap()).unwrap();
        std::fs::write(&first, "First version.").unwrap();
        std::fs::write(&second, "Second version.").unwrap();

        let pipeline = Pipeline::with_defaults().unwrap();
        let report = process_batch(&pipeline, &[first, second], &out, |_, _| {});
        assert!(report.is_success());

        let doc = unihelp_core::ProcessedDocument::load(&out.join("memo_processed.json")).unwrap();
        assert_eq!(doc.chunks[0].content, "Second version.");
    }
}
