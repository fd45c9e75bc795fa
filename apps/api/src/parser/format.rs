//! Format detection by content signature, with the declared `.docx`
//! extension as the only fallback.

use tracing::info;

use crate::parser::document::RawDocument;
use crate::parser::error::ParsingError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const ZIP_MIME: &str = "application/zip";
/// Bytes sniffed for the OOXML markers; local file headers for the first
/// parts of a Word package sit well inside this window.
const SNIFF_WINDOW: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_MIME,
            DocumentFormat::Docx => DOCX_MIME,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
        }
    }
}

/// Resolves the true format of `doc` from its leading bytes.
pub fn detect_format(doc: &RawDocument) -> Result<DocumentFormat, ParsingError> {
    info!(name = %doc.filename, "Detecting file type");

    let sniffed = infer::get(&doc.bytes).map(|kind| kind.mime_type());
    let named_docx = doc.extension().as_deref() == Some("docx");

    let format = match sniffed {
        Some(PDF_MIME) => Some(DocumentFormat::Pdf),
        Some(DOCX_MIME) => Some(DocumentFormat::Docx),
        Some(ZIP_MIME) if has_word_part(&doc.bytes) || named_docx => Some(DocumentFormat::Docx),
        None if named_docx => Some(DocumentFormat::Docx),
        _ => None,
    };

    match format {
        Some(format) => {
            info!(mime_type = format.mime_type(), "File type detected");
            Ok(format)
        }
        None => Err(ParsingError::UnsupportedFormat {
            detected: sniffed.map(str::to_string),
        }),
    }
}

/// True when a ZIP container carries the OOXML content-types part and a
/// `word/` part among its leading entries.
fn has_word_part(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    contains(window, b"[Content_Types].xml") && contains(window, b"word/")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
