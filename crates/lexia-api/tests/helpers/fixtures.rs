//! Test fixtures: minimal TXT/DOCX/PDF payloads.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

/// Plain-text contract body used across upload tests.
pub fn sample_contract_text() -> &'static str {
    "Service Agreement\n\nThe provider shall deliver monthly reports.\nEither party may terminate with 30 days written notice."
}

/// Plain-text upload payload.
pub fn create_test_txt() -> Vec<u8> {
    sample_contract_text().as_bytes().to_vec()
}

/// Whitespace-only text; extraction succeeds but trims to empty.
pub fn create_blank_txt() -> Vec<u8> {
    b"   \n\t  \n".to_vec()
}

/// Minimal DOCX: a zip archive whose `word/document.xml` carries one `<w:p>`
/// per given paragraph.
pub fn create_test_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{}</w:body>
</w:document>"#,
        body
    );

    let cursor = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(cursor);
    writer
        .start_file("word/document.xml", FileOptions::default())
        .expect("Failed to start DOCX entry");
    writer
        .write_all(xml.as_bytes())
        .expect("Failed to write DOCX body");
    writer
        .finish()
        .expect("Failed to finish DOCX archive")
        .into_inner()
}

/// Bytes that announce themselves as PDF but cannot be parsed; the upload is
/// accepted and extraction fails.
pub fn create_broken_pdf() -> Vec<u8> {
    b"%PDF-1.4\nthis is not a real pdf body".to_vec()
}
