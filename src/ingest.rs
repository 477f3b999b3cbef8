//! Document ingestion: turn an uploaded `.txt` or `.pdf` file into document text.
//!
//! PDF text comes from `pdf-extract`, one page at a time.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported file format. Please upload a .pdf or .txt file.")]
    UnsupportedFileType,
    #[error("Failed to extract text from PDF. Ensure the file is not password protected.")]
    ExtractionFailure(String),
    #[error("Failed to read the selected file.")]
    Read(#[from] std::io::Error),
}

/// Declared media type of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
}

impl MediaType {
    /// Derive the media type from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path.extension().and_then(|e| e.to_str());
        match ext {
            Some(e) if e.eq_ignore_ascii_case("pdf") => Ok(MediaType::Pdf),
            Some(e) if e.eq_ignore_ascii_case("txt") => Ok(MediaType::PlainText),
            _ => Err(IngestError::UnsupportedFileType),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::PlainText => "text/plain",
        }
    }
}

/// Read a file and normalize it into document text.
pub async fn ingest_file(path: &Path) -> Result<String, IngestError> {
    let media_type = MediaType::from_path(path)?;
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(
        path = %path.display(),
        mime = media_type.mime(),
        bytes = bytes.len(),
        "ingesting file"
    );

    match media_type {
        MediaType::PlainText => Ok(decode_text(&bytes)),
        MediaType::Pdf => tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| IngestError::ExtractionFailure(e.to_string()))?,
    }
}

/// Decode plain text verbatim; invalid UTF-8 sequences become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Extract the text of every page of an in-memory PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, IngestError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(IngestError::ExtractionFailure(
            "missing %PDF- header".to_string(),
        ));
    }

    // pdf-extract panics on some malformed inputs
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| IngestError::ExtractionFailure("PDF parser panicked".to_string()))?
        .map_err(|e| IngestError::ExtractionFailure(e.to_string()))?;

    tracing::debug!(pages = pages.len(), "extracted PDF pages");
    Ok(join_pages(pages.iter().map(String::as_str)))
}

/// Collapse each page's fragments to single spaces, separate pages with a blank line.
pub fn join_pages<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    let mut full_text = String::new();
    for page in pages {
        let page_text = page.split_whitespace().collect::<Vec<_>>().join(" ");
        full_text.push_str(&page_text);
        full_text.push_str("\n\n");
    }
    full_text.trim().to_string()
}
