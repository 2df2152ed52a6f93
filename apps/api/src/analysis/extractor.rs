//! Text Extractor — turns an uploaded document into plain text.
//!
//! Extraction is lossy: pages and paragraphs are joined with single spaces.
//! Failures never reach the caller; they are logged and yield an empty string.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Derives the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("Extractor panicked")]
    Panicked,
}

/// Extracts plain text from `data`. Returns an empty string when extraction fails.
pub fn extract_text(data: &[u8], format: DocumentFormat) -> String {
    // pdf-extract panics on some malformed inputs; treat that as a failed extraction.
    let result = catch_unwind(AssertUnwindSafe(|| match format {
        DocumentFormat::Pdf => extract_pdf(data),
        DocumentFormat::Docx => extract_docx(data),
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(data).into_owned()),
    }))
    .unwrap_or(Err(ExtractionError::Panicked));

    match result {
        Ok(text) => {
            debug!("Extracted {} chars from {:?} document", text.len(), format);
            text
        }
        Err(e) => {
            warn!("Error extracting {:?} text: {e}", format);
            String::new()
        }
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(join_segments(pages))
}

fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs = docx.document.children.iter().filter_map(|child| {
        let DocumentChild::Paragraph(para) = child else {
            return None;
        };
        let text: String = para
            .children
            .iter()
            .filter_map(|pc| match pc {
                ParagraphChild::Run(run) => Some(run),
                _ => None,
            })
            .flat_map(|run| run.children.iter())
            .filter_map(|rc| match rc {
                RunChild::Text(t) => Some(t.text.as_str()),
                // Soft line breaks and tabs separate words within a paragraph.
                RunChild::Break(_) | RunChild::Tab(_) => Some(" "),
                _ => None,
            })
            .collect();
        Some(text)
    });

    Ok(join_segments(paragraphs))
}

/// Joins non-blank segments with a single space.
fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
