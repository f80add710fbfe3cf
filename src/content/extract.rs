use std::io::{Cursor, Read};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const ALLOWED_EXTENSIONS: [&str; 4] = [".txt", ".pdf", ".docx", ".json"];

/// PDFs whose extracted text is this short are treated as unreadable
/// (scanned images usually yield nothing but whitespace).
const MIN_PDF_TEXT_LEN: usize = 10;

/// Documents are capped before being handed to the language model.
const MAX_PROMPT_CHARS: usize = 8000;
const TRUNCATION_MARKER: &str = "... [content truncated]";

/// Decode attempts for plain-text files, in order. First clean decode wins.
const TEXT_ENCODINGS: [&Encoding; 4] = [UTF_8, WINDOWS_1252, UTF_16LE, UTF_16BE];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("File type {0} not allowed. Please use: .txt, .pdf, .docx, .json")]
    UnsupportedType(String),

    #[error("Could not read the text file. Please ensure it uses standard encoding (UTF-8 recommended).")]
    UnreadableText,

    #[error("PDF text extraction failed. Please upload a text file (.txt) instead, or ensure the PDF contains selectable text (not scanned images).")]
    UnreadablePdf,

    #[error("DOCX file appears to be empty")]
    EmptyDocx,

    #[error("Error reading DOCX file")]
    UnreadableDocx,

    #[error("Error reading JSON file")]
    InvalidJson,
}

/// Converts an uploaded file into a plain string, dispatching on the declared
/// extension (lower-cased, including the leading dot).
pub fn extract(bytes: &[u8], extension: &str) -> Result<String, ExtractionError> {
    match extension {
        ".txt" => extract_text(bytes),
        ".pdf" => extract_pdf(bytes),
        ".docx" => extract_docx(bytes),
        ".json" => extract_json(bytes),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    for encoding in TEXT_ENCODINGS {
        let (text, actual, had_errors) = encoding.decode(bytes);
        if !had_errors {
            log::debug!("decoded text file as {}", actual.name());
            return Ok(text.into_owned());
        }
    }
    Err(ExtractionError::UnreadableText)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        log::warn!("PDF extraction failed: {}", e);
        ExtractionError::UnreadablePdf
    })?;

    let text = text.trim();
    if text.len() <= MIN_PDF_TEXT_LEN {
        return Err(ExtractionError::UnreadablePdf);
    }
    Ok(text.to_string())
}

/// Reads `word/document.xml` out of the DOCX container and concatenates the
/// text runs, one line per paragraph.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|_| ExtractionError::UnreadableDocx)?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractionError::UnreadableDocx)?
        .read_to_string(&mut document_xml)
        .map_err(|_| ExtractionError::UnreadableDocx)?;

    let mut reader = Reader::from_str(&document_xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run => {
                let run = t.unescape().map_err(|_| ExtractionError::UnreadableDocx)?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(ExtractionError::UnreadableDocx),
        }
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::EmptyDocx);
    }
    Ok(text.to_string())
}

/// Flattens a JSON document into readable text: objects become `key: value`
/// lines, arrays become one stringified element per line, scalars become
/// their string form.
fn extract_json(bytes: &[u8]) -> Result<String, ExtractionError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|_| ExtractionError::InvalidJson)?;

    let text = match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, scalar_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        serde_json::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join("\n"),
        scalar => scalar_text(&scalar),
    };

    Ok(text)
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Caps extracted text before it is embedded in the model prompt, marking
/// the cut so the model knows the document continues.
pub fn truncate_for_prompt(text: &str) -> String {
    match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_txt_utf8() {
        let text = extract("hello world".as_bytes(), ".txt").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_extract_txt_windows_1252_fallback() {
        // 0xE9 is é in Windows-1252 but malformed as UTF-8.
        let bytes = b"caf\xe9";
        let text = extract(bytes, ".txt").unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_extract_json_object() {
        let bytes = br#"{"title": "Rust", "year": 2015}"#;
        let text = extract(bytes, ".json").unwrap();
        assert_eq!(text, "title: Rust\nyear: 2015");
    }

    #[test]
    fn test_extract_json_array() {
        let bytes = br#"["alpha", 2, true]"#;
        let text = extract(bytes, ".json").unwrap();
        assert_eq!(text, "alpha\n2\ntrue");
    }

    #[test]
    fn test_extract_json_scalar() {
        assert_eq!(extract(br#""just text""#, ".json").unwrap(), "just text");
        assert_eq!(extract(b"42", ".json").unwrap(), "42");
    }

    #[test]
    fn test_extract_json_malformed() {
        assert_eq!(
            extract(b"{not json", ".json"),
            Err(ExtractionError::InvalidJson)
        );
    }

    #[test]
    fn test_extract_unsupported_extension() {
        assert_eq!(
            extract(b"data", ".csv"),
            Err(ExtractionError::UnsupportedType(".csv".to_string()))
        );
    }

    #[test]
    fn test_extract_pdf_garbage() {
        assert_eq!(
            extract(b"definitely not a pdf", ".pdf"),
            Err(ExtractionError::UnreadablePdf)
        );
    }

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_extract_docx_paragraphs() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
                <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;

        let text = extract(&docx_bytes(xml), ".docx").unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }

    #[test]
    fn test_extract_docx_empty() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body></w:body></w:document>"#;
        assert_eq!(
            extract(&docx_bytes(xml), ".docx"),
            Err(ExtractionError::EmptyDocx)
        );
    }

    #[test]
    fn test_extract_docx_not_a_zip() {
        assert_eq!(
            extract(b"plain bytes", ".docx"),
            Err(ExtractionError::UnreadableDocx)
        );
    }

    #[test]
    fn test_truncate_for_prompt_short_text_untouched() {
        assert_eq!(truncate_for_prompt("short"), "short");
    }

    #[test]
    fn test_truncate_for_prompt_caps_and_marks() {
        let long = "x".repeat(MAX_PROMPT_CHARS + 500);
        let truncated = truncate_for_prompt(&long);

        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            truncated.len(),
            MAX_PROMPT_CHARS + TRUNCATION_MARKER.len()
        );
    }

    #[test]
    fn test_truncate_for_prompt_multibyte_boundary() {
        let long = "é".repeat(MAX_PROMPT_CHARS + 10);
        let truncated = truncate_for_prompt(&long);

        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(truncated.chars().count(), MAX_PROMPT_CHARS + TRUNCATION_MARKER.chars().count());
    }
}
