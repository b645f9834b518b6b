//! PDF text extraction.
//!
//! Wraps the `pdf-extract` crate. Text-bearing PDFs yield their text in
//! page order; scanned image-only PDFs come back empty or whitespace,
//! which the pipeline reports as a normal condition rather than an error.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read PDF file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to extract text from PDF: {0}")]
    ParseError(#[from] pdf_extract::OutputError),
}

/// Extract the text of every page, joined with single newlines.
///
/// The file is read into memory up front, so no handle stays open while
/// the document is parsed.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)?;
    Ok(pages.join("\n"))
}
