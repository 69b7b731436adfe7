//! DOCX text extractor.

use super::DocumentExtractor;
use crate::error::{IngestError, IngestResult};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use std::path::Path;

/// Extracts body paragraphs from Word documents, one paragraph per line.
///
/// Empty paragraphs become empty lines; the normalizer relies on them as
/// paragraph boundaries. Table contents are not part of the body paragraph
/// sequence and are skipped.
pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> IngestResult<String> {
        let bytes = std::fs::read(path)?;
        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| IngestError::corrupt(path, format!("Failed to read DOCX: {}", e)))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use tempfile::tempdir;

    #[test]
    fn test_paragraphs_one_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inscription.docx");
        let file = std::fs::File::create(&path).unwrap();

        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Service de la scolarité")))
            .add_paragraph(Paragraph::new())
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Hello "))
                    .add_run(Run::new().add_text("world")),
            )
            .build()
            .pack(file)
            .unwrap();

        let text = DocxExtractor.extract(&path).unwrap();
        assert_eq!(text, "Service de la scolarité\n\nHello world");
    }

    #[test]
    fn test_not_a_zip_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"plain bytes").unwrap();

        let result = DocxExtractor.extract(&path);
        assert!(matches!(result, Err(IngestError::CorruptFile { .. })));
    }
}
