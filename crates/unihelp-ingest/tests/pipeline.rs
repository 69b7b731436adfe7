//! End-to-end runs of the public pipeline API over real files.

use docx_rs::{Docx, Paragraph, Run};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use unihelp_core::ProcessedDocument;
use unihelp_ingest::{
    extract, ingest_into, process_batch, scan_supported_files, IngestError, JsonLinesSink,
    Pipeline,
};
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>A</t></is></c><c r="B1" t="inlineStr"><is><t>B</t></is></c></row>
</sheetData>
</worksheet>"#;

/// Pack a single-sheet workbook whose only row holds "A" and "B".
fn write_xlsx(path: &Path) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", SHEET),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    docx.build().pack(File::create(path).unwrap()).unwrap();
}

#[test]
fn test_xlsx_sheet_linearized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grades.xlsx");
    write_xlsx(&path);

    let raw = extract(&path).unwrap();
    assert_eq!(raw.text, "--- Sheet: Sheet1 ---\nA\tB");
}

#[test]
fn test_docx_paragraphs_joined() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minutes.docx");
    write_docx(
        &path,
        &["Minutes", "Faculty of Sciences", "Meeting held on 4 June 2024."],
    );

    let raw = extract(&path).unwrap();
    assert_eq!(
        raw.text,
        "Minutes\nFaculty of Sciences\nMeeting held on 4 June 2024."
    );

    let doc = Pipeline::with_defaults().unwrap().process(&path).unwrap();
    assert_eq!(doc.metadata.document_type, "Minutes");
    assert_eq!(doc.metadata.department, "Faculty of Sciences");
    assert_eq!(doc.metadata.date.as_deref(), Some("4 June 2024"));
}

#[test]
fn test_corrupt_docx_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    assert!(matches!(
        extract(&path),
        Err(IngestError::CorruptFile { .. })
    ));
}

#[test]
fn test_directory_batch() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw");
    let nested = input.join("2024").join("spring");
    let output = dir.path().join("processed");
    std::fs::create_dir_all(&nested).unwrap();

    std::fs::write(
        input.join("notice.txt"),
        "Notice\n\nOffice of the Registrar\n\nPage 1\n\nClasses resume on 02-09-2024.",
    )
    .unwrap();
    std::fs::write(input.join("photo.jpg"), b"\xff\xd8\xff").unwrap();
    write_xlsx(&nested.join("grades.xlsx"));
    write_docx(&nested.join("minutes.docx"), &["Minutes", "Attendance was full."]);

    let files = scan_supported_files(&input);
    assert_eq!(files.len(), 3);

    let pipeline = Pipeline::with_defaults().unwrap();
    let report = process_batch(&pipeline, &files, &output, |_, _| {});
    assert_eq!(report.succeeded.len(), 3);
    assert!(report.failed.is_empty());

    let record = output.join("notice_processed.json");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&record).unwrap()).unwrap();
    assert_eq!(value["file"], "notice.txt");
    assert_eq!(value["metadata"]["document_type"], "Notice");
    assert_eq!(value["metadata"]["department"], "Office of the Registrar");
    assert_eq!(value["metadata"]["date"], "02-09-2024");
    assert!(value["metadata"]["processed_at"].is_string());
    assert_eq!(value["total_chunks"], 1);
    assert_eq!(value["chunks"][0]["chunk_id"], 0);
    assert!(!value["chunks"][0]["content"]
        .as_str()
        .unwrap()
        .contains("Page 1"));

    let sheet = ProcessedDocument::load(&output.join("grades_processed.json")).unwrap();
    assert_eq!(sheet.chunks[0].content, "--- Sheet: Sheet1 ---\nA\tB");
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let pipeline = Pipeline::with_defaults().unwrap();
    let err = pipeline.process(&dir.path().join("nothing.txt")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound(_)));
}

#[test]
fn test_export_json_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("circular.txt");
    std::fs::write(
        &path,
        "Circular\n\nService of Student Affairs\n\nDormitory applications open on 3 March 2025.",
    )
    .unwrap();

    let doc = Pipeline::with_defaults().unwrap().process(&path).unwrap();
    let mut sink = JsonLinesSink::new(Vec::new());
    let delivered = ingest_into(&mut sink, &doc).unwrap();
    assert_eq!(delivered, doc.total_chunks);

    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
    assert_eq!(first["id"], "circular.txt_chunk_0");
    assert_eq!(first["metadata"]["document_type"], "Circular");
    assert_eq!(first["metadata"]["department"], "Service of Student Affairs");
    assert_eq!(first["metadata"]["date"], "3 March 2025");
}
