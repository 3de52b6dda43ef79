//! DOCX text extraction.
//!
//! A `.docx` is a zip archive; paragraph text lives in `word/document.xml`
//! as `<w:t>` runs inside `<w:p>` paragraphs. We stream the XML and join
//! paragraph texts with newline separators. No styling, tables-as-text, or
//! header/footer handling.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract(path: &Path) -> Result<String, AppError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::Extraction(format!("not a valid DOCX archive: {e}")))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| AppError::Extraction(format!("DOCX is missing {DOCUMENT_PART}: {e}")))?;

    read_paragraphs(BufReader::new(part)).map(|paragraphs| paragraphs.join("\n"))
}

/// Pulls the text of each `<w:p>` out of a `document.xml` stream.
fn read_paragraphs<R: std::io::BufRead>(source: R) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| AppError::Extraction(format!("malformed document.xml: {e}")))?
        {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Event::Text(t) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("malformed document.xml: {e}")))?;
                current.push_str(&text);
            }
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            // Self-closing empty paragraph.
            Event::Empty(e) if e.name().as_ref() == b"w:p" => paragraphs.push(String::new()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_paragraph_text_in_order() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Ada Lovelace</w:t></w:r></w:p>
                <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Analyst</w:t></w:r></w:p>
                <w:p/>
              </w:body>
            </w:document>"#;
        let paragraphs = read_paragraphs(Cursor::new(xml.as_bytes())).unwrap();
        assert_eq!(paragraphs, vec!["Ada Lovelace", "Senior Analyst", ""]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>R&amp;D</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let paragraphs = read_paragraphs(Cursor::new(xml.as_bytes())).unwrap();
        assert_eq!(paragraphs, vec!["R&D"]);
    }

    #[test]
    fn test_roundtrip_through_generated_docx() {
        // Build a real DOCX with docx-rs and read it back through the
        // extraction path.
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Ada Lovelace")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Analyst")))
            .build()
            .pack(file)
            .unwrap();

        let text = extract(&path).unwrap();
        assert_eq!(text, "Ada Lovelace\nAnalyst");
    }
}
