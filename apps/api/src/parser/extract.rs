//! Text extraction adapters: one per supported format, behind `TextExtractor`.
//!
//! Document parsing is CPU-bound and may panic on hostile input, so both
//! adapters run inside `tokio::task::spawn_blocking`; a panic surfaces as a
//! `JoinError` and is reported like any other extraction failure.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::{debug, error, info};
use zip::ZipArchive;

use crate::parser::document::RawDocument;
use crate::parser::error::ParsingError;
use crate::parser::format::DocumentFormat;

const DOCX_BODY_PART: &str = "word/document.xml";

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, doc: &RawDocument) -> Result<String, ParsingError>;
}

/// Returns the adapter for a resolved format.
pub fn extractor_for(format: DocumentFormat) -> &'static dyn TextExtractor {
    match format {
        DocumentFormat::Pdf => &PdfExtractor,
        DocumentFormat::Docx => &DocxExtractor,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF
// ────────────────────────────────────────────────────────────────────────────

pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, doc: &RawDocument) -> Result<String, ParsingError> {
        info!(name = %doc.filename, size = doc.size(), "Extracting PDF text");
        let bytes = doc.bytes.clone();

        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())
        .and_then(|inner| inner)
        .map_err(|cause| {
            error!(name = %doc.filename, %cause, "PDF text extraction failed");
            ParsingError::Extraction {
                format: DocumentFormat::Pdf.label(),
                cause,
            }
        })?;

        info!(pages = pages.len(), "PDF loaded");
        let text = assemble_pages(&pages);
        let text = normalize_text(&text);
        info!(text_length = text.len(), "PDF text extraction finished");
        Ok(text)
    }
}

/// Joins the text items of each line with single spaces and pages with
/// newlines, keeping the reading order reported by the PDF library.
fn assemble_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            debug!(page = i + 1, length = page.len(), "PDF page processed");
            page.lines()
                .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, doc: &RawDocument) -> Result<String, ParsingError> {
        info!(name = %doc.filename, "Extracting DOCX text");
        let bytes = doc.bytes.clone();

        let raw = tokio::task::spawn_blocking(move || docx_raw_text(&bytes))
            .await
            .map_err(|e| e.to_string())
            .and_then(|inner| inner)
            .map_err(|cause| {
                error!(name = %doc.filename, %cause, "DOCX text extraction failed");
                ParsingError::Extraction {
                    format: DocumentFormat::Docx.label(),
                    cause,
                }
            })?;

        let text = normalize_text(&raw);
        info!(text_length = text.len(), "DOCX text extraction finished");
        Ok(text)
    }
}

/// Reads the main document part and returns its text, one line per paragraph.
fn docx_raw_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| format!("{DOCX_BODY_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("{DOCX_BODY_PART}: {e}"))?;
    document_xml_text(&xml)
}

/// Walks WordprocessingML, keeping `w:t` runs and turning tabs, breaks and
/// paragraph ends into whitespace. Styling is ignored.
fn document_xml_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push(' '),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
    }

    Ok(out)
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

static HORIZONTAL_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("Invalid whitespace regex"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("Invalid newline-space regex"));
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid newline regex"));

/// Collapses horizontal whitespace to single spaces and 3+ newlines to
/// exactly two, then trims. Section splitting downstream relies on blank
/// lines being exactly `\n\n`.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::format::tests::docx_bytes;

    const W_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn paragraphs(paras: &[&str]) -> String {
        let body: String = paras
            .iter()
            .map(|p| {
                if p.is_empty() {
                    "<w:p/>".to_string()
                } else {
                    format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>")
                }
            })
            .collect();
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document {W_NS}><w:body>{body}</w:body></w:document>")
    }

    #[test]
    fn test_normalize_collapses_spaces_and_newlines() {
        let input = "  Jane   Doe\t\tDeveloper \n\n\n\n Experience  \r\n\r\n\r\nSkills  ";
        let out = normalize_text(input);
        assert_eq!(out, "Jane Doe Developer\n\nExperience\n\nSkills");
    }

    #[test]
    fn test_normalize_output_has_no_long_runs() {
        let input = "a  \n \n \n  b\u{a0}\u{a0}c\n\n\n\n\nd";
        let out = normalize_text(input);
        assert!(!out.contains("\n\n\n"));
        assert!(!out.contains("  "));
        assert_eq!(out, "a\n\nb c\n\nd");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text("   \n\n  "), "");
    }

    #[test]
    fn test_assemble_pages_joins_items_and_pages() {
        let pages = vec![
            "Jane    Doe\nDeveloper".to_string(),
            "Skills   Rust,  Go".to_string(),
        ];
        assert_eq!(assemble_pages(&pages), "Jane Doe\nDeveloper\nSkills Rust, Go");
    }

    #[test]
    fn test_document_xml_text_paragraphs_and_runs() {
        let xml = format!(
            r#"<w:document {W_NS}><w:body>
                <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
                <w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>Go</w:t><w:br/><w:t>SQL &amp; Docker</w:t></w:r></w:p>
            </w:body></w:document>"#
        );
        let text = document_xml_text(&xml).unwrap();
        assert_eq!(normalize_text(&text), "Jane Doe\nRust Go\nSQL & Docker");
    }

    #[test]
    fn test_document_xml_text_rejects_broken_xml() {
        assert!(document_xml_text("<w:document><w:p></w:document>").is_err());
    }

    #[tokio::test]
    async fn test_docx_extractor_reads_package() {
        let xml = paragraphs(&["Jane Doe", "", "Expérience", "Développeuse chez Acme"]);
        let doc = RawDocument::new("cv.docx", docx_bytes(&xml));
        let text = DocxExtractor.extract(&doc).await.unwrap();
        assert_eq!(text, "Jane Doe\n\nExpérience\nDéveloppeuse chez Acme");
    }

    #[tokio::test]
    async fn test_docx_extractor_fails_on_non_zip() {
        let doc = RawDocument::new("cv.docx", b"definitely not a zip".to_vec());
        let err = DocxExtractor.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ParsingError::Extraction { format: "DOCX", .. }));
    }

    /// Builds an uncompressed PDF with one Helvetica text line per entry
    /// on each page, with a valid cross-reference table.
    fn pdf_bytes(pages: &[&[&str]]) -> Vec<u8> {
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];
        for (page, id) in pages.iter().zip(&page_ids) {
            let mut content = String::from("BT /F1 12 Tf 72 720 Td 14 TL");
            for line in page.iter() {
                content.push_str(&format!(" ({line}) Tj T*"));
            }
            content.push_str(" ET");
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                id + 1
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[tokio::test]
    async fn test_pdf_extractor_reads_pages_in_order() {
        let bytes = pdf_bytes(&[
            &["Jane Smith", "Senior    Engineer"],
            &["Experience", "Backend Engineer at Initech"],
        ]);
        let doc = RawDocument::new("cv.pdf", bytes);
        let text = PdfExtractor.extract(&doc).await.unwrap();

        assert!(!text.is_empty());
        assert!(!text.contains("\n\n\n"));
        assert!(!text.contains("  "));
        assert!(text.contains("Senior Engineer"), "{text:?}");

        let name = text.find("Jane Smith").unwrap();
        let heading = text.find("Experience").unwrap();
        let job = text.find("Backend Engineer at Initech").unwrap();
        assert!(name < heading && heading < job, "{text:?}");
    }

    #[tokio::test]
    async fn test_pdf_extractor_fails_on_corrupt_document() {
        let doc = RawDocument::new("cv.pdf", b"%PDF-1.4\nthis is not really a pdf".to_vec());
        let err = PdfExtractor.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ParsingError::Extraction { format: "PDF", .. }));
    }
}
