use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{ExtractError, ExtractResult};

/// Extract text from a DOCX body.
///
/// A DOCX file is a zip archive; the document text lives in
/// `word/document.xml` as WordprocessingML. Paragraph texts are joined with
/// newlines, matching how word processors render them, and the result is
/// trimmed as a whole so empty paragraphs between content survive.
pub(crate) fn extract(data: &[u8]) -> ExtractResult<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractError::Malformed(format!("DOCX is not a valid archive: {}", e)))?;

    let mut xml = String::new();
    {
        let mut entry = archive.by_name("word/document.xml").map_err(|e| {
            ExtractError::Malformed(format!("DOCX has no word/document.xml: {}", e))
        })?;
        entry
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::Malformed(format!("Failed to read document body: {}", e)))?;
    }

    let paragraphs = body_paragraphs(&xml)?;
    let text = paragraphs.join("\n");
    let trimmed = text.trim();

    if trimmed.is_empty() {
        tracing::warn!(
            paragraphs = paragraphs.len(),
            "DOCX text extraction returned empty"
        );
    } else {
        tracing::debug!(
            paragraphs = paragraphs.len(),
            text_len = trimmed.len(),
            "DOCX text extracted"
        );
    }

    Ok(trimmed.to_string())
}

/// Collect the text of each body-level `<w:p>` paragraph.
///
/// Run text comes from `<w:t>` elements; `<w:tab/>` and `<w:br/>`/`<w:cr/>`
/// map to tab and newline. Paragraphs nested inside tables are skipped, and
/// empty paragraphs are kept as empty strings.
fn body_paragraphs(xml: &str) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut table_depth: u32 = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if table_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                // Word serializes empty paragraphs as self-closing elements.
                b"w:p" => {
                    if table_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"w:tab" => {
                    if table_depth == 0 {
                        current.push('\t');
                    }
                }
                b"w:br" | b"w:cr" => {
                    if table_depth == 0 {
                        current.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_text_run && table_depth == 0 {
                    let text = t.unescape().map_err(|e| {
                        ExtractError::Malformed(format!("Invalid text content: {}", e))
                    })?;
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Malformed(format!(
                    "Invalid document XML: {}",
                    e
                )))
            }
        }
    }

    Ok(paragraphs)
}
