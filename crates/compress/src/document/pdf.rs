use super::ExtractionError;

/// Extract text from a PDF. Pages (form-feed separated) become blank-line
/// separated blocks.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages: Vec<&str> = text
        .split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect();

    if pages.is_empty() {
        // Scanned/image PDFs extract to nothing; the caller reports it.
        tracing::warn!("PDF contained no extractable text");
    }
    Ok(pages.join("\n\n"))
}
