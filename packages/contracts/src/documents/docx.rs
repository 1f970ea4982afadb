//! Plain-text extraction from .docx payloads.
//!
//! A .docx file is a zip archive whose body lives in `word/document.xml`.
//! Text runs (`w:t`) are concatenated in document order with one line per
//! paragraph (`w:p`); table cell text is part of the same stream, so it is
//! captured without special handling.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{DocumentError, DocumentResult};

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract the full plain text of a .docx payload.
pub fn extract_text(payload: &[u8]) -> DocumentResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(payload))
        .map_err(|e| DocumentError::Payload(format!("not a zip archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| DocumentError::Payload(format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Payload(format!("unreadable {DOCUMENT_XML}: {e}")))?;

    document_text(&xml)
}

fn document_text(xml: &str) -> DocumentResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => {
                in_run_text = true;
            }
            Ok(Event::Text(ref e)) if in_run_text => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DocumentError::Payload(format!("malformed document XML: {e}")));
            }
        }
        buf.clear();
    }

    Ok(text.trim_end().to_string())
}
