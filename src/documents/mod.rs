// src/documents/mod.rs
pub mod pdf;
pub mod text;

use crate::models::RawPage;
use crate::utils::error::DocumentError;
use std::fs;
use std::path::{Path, PathBuf};

/// Delivers the text of a document, one string per page, in page order.
/// A page without extractable text is an empty string.
pub trait PageSource {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, DocumentError>;
}

/// Document formats the batch run picks up from the input folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Classifies by (case-insensitive) file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }

    fn source(self) -> &'static dyn PageSource {
        match self {
            DocumentKind::Pdf => &pdf::PdfPageSource,
            DocumentKind::Text => &text::TextPageSource,
        }
    }
}

/// Supported documents directly inside `folder`, sorted by path.
pub fn find_documents(folder: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && DocumentKind::from_path(&path).is_some() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Reads all pages of one document with the source matching its type.
pub fn load_pages(path: &Path) -> Result<Vec<RawPage>, DocumentError> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| DocumentError::Unsupported(path.to_path_buf()))?;
    let texts = kind.source().read_pages(path)?;

    let source_document = path.display().to_string();
    Ok(texts
        .into_iter()
        .zip(1u32..)
        .map(|(text, page_index)| RawPage {
            source_document: source_document.clone(),
            page_index,
            text,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a/B.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("seiten.txt")), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_path(Path::new("notes.md")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_find_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.pdf", "c.md", "A.TXT"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let found = find_documents(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.TXT", "a.pdf", "b.txt"]);
    }

    #[test]
    fn test_load_pages_numbers_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "erste\u{0c}zweite").unwrap();

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_index, 1);
        assert_eq!(pages[1].page_index, 2);
        assert_eq!(pages[1].text, "zweite");
        assert!(pages[0].source_document.ends_with("doc.txt"));
    }

    #[test]
    fn test_load_pages_rejects_unknown_type() {
        let err = load_pages(Path::new("notes.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(_)));
    }
}
