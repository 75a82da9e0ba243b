// src/documents/pdf.rs
use super::PageSource;
use crate::utils::error::DocumentError;
use lopdf::Document;
use std::path::Path;

/// PDF text per page via `lopdf`.
pub struct PdfPageSource;

impl PageSource for PdfPageSource {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, DocumentError> {
        let doc = Document::load(path).map_err(|e| DocumentError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // get_pages() is keyed by page number, so iteration is in page order.
        let pages = doc.get_pages();
        tracing::debug!("Loaded {} with {} pages", path.display(), pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            // One unreadable page must not cost the rest of the document.
            let text = doc.extract_text(&[*page_num]).unwrap_or_else(|e| {
                tracing::warn!(
                    "No text extracted from page {} of {}: {}",
                    page_num,
                    path.display(),
                    e
                );
                String::new()
            });
            texts.push(text);
        }
        Ok(texts)
    }
}
