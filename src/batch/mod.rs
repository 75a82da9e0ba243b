// src/batch/mod.rs
use crate::documents;
use crate::extractors::{FieldExtractor, SchemaMapper};
use crate::models::{PageRecord, RawPage, Record};
use crate::utils::error::AppError;
use crate::utils::text;
use std::path::Path;

/// Everything one extraction run produced, in document-then-page order.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub records: Vec<Record>,
    pub pages: Vec<PageRecord>, // Only filled when page dumps are requested
    pub documents: usize,
    pub failed_documents: usize,
}

/// Drives Field Extractor and Schema Mapper over every page of every document
/// in a folder, strictly sequentially.
pub struct BatchAssembler {
    field_extractor: FieldExtractor,
    mapper: SchemaMapper,
    collect_pages: bool,
}

impl BatchAssembler {
    pub fn new() -> Self {
        Self {
            field_extractor: FieldExtractor::new(),
            mapper: SchemaMapper::new(),
            collect_pages: false,
        }
    }

    /// Also keep the per-page intermediate records (`PageRecord`).
    pub fn with_page_records(mut self, collect: bool) -> Self {
        self.collect_pages = collect;
        self
    }

    pub fn run(&self, input_folder: &Path) -> Result<BatchOutput, AppError> {
        if !input_folder.exists() {
            return Err(AppError::InputFolderNotFound(input_folder.to_path_buf()));
        }

        let paths = documents::find_documents(input_folder)?;
        tracing::info!("Found {} documents in {}", paths.len(), input_folder.display());

        let mut output = BatchOutput::default();
        for path in paths {
            tracing::info!("Processing {}...", path.display());
            output.documents += 1;

            let pages = match documents::load_pages(&path) {
                Ok(pages) => pages,
                Err(e) => {
                    tracing::error!("Skipping {}: {}", path.display(), e);
                    output.failed_documents += 1;
                    continue;
                }
            };
            if pages.is_empty() {
                tracing::warn!("{} has no pages", path.display());
            }

            for page in &pages {
                let (record, page_record) = self.process_page(page);
                output.records.push(record);
                if self.collect_pages {
                    output.pages.push(page_record);
                }
            }
        }

        tracing::info!(
            "Extracted {} records from {} documents ({} failed)",
            output.records.len(),
            output.documents,
            output.failed_documents
        );
        Ok(output)
    }

    /// Field extraction and mapping for a single page.
    pub fn process_page(&self, page: &RawPage) -> (Record, PageRecord) {
        let fields = self.field_extractor.extract(&page.text);
        tracing::debug!(
            "{} page {}: beruf={:?}, {} dates",
            page.source_document,
            page.page_index,
            fields.beruf,
            fields.dates.as_ref().map_or(0, Vec::len)
        );
        let record = self.mapper.map(&fields, &page.text);

        let file_name = Path::new(&page.source_document)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| page.source_document.clone());
        let page_record = PageRecord {
            id: format!("{}#p{}", file_name, page.page_index),
            source_file: page.source_document.clone(),
            page: page.page_index,
            title: text::first_line(&page.text).unwrap_or_default().to_string(),
            text: page.text.clone(),
            parsed: fields,
        };

        (record, page_record)
    }
}

impl Default for BatchAssembler {
    fn default() -> Self {
        Self::new()
    }
}
