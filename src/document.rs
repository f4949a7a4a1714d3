//! Paged source documents
//!
//! The splitter only needs three things from a document: how many pages it
//! has, the plain text of a page, and a way to write a page on its own.

use crate::error::{Result, SplitError};
use lopdf::Document;
use std::path::Path;

/// A page-structured document that can be split page by page
///
/// Page indices are 0-based.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Plain text of one page
    fn page_text(&self, index: usize) -> Result<String>;

    /// Write a document containing only this page
    fn write_page(&self, index: usize, output_path: &Path) -> Result<()>;
}

/// PDF file backed by lopdf
pub struct PdfDocument {
    doc: Document,
    /// 1-based lopdf page numbers in document order
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SplitError::FileNotFound(path.display().to_string()));
        }

        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_document(doc: Document) -> Self {
        let page_numbers = doc.get_pages().keys().copied().collect();
        Self { doc, page_numbers }
    }

    fn page_number(&self, index: usize) -> Result<u32> {
        self.page_numbers
            .get(index)
            .copied()
            .ok_or(SplitError::PageOutOfRange {
                index,
                count: self.page_numbers.len(),
            })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let number = self.page_number(index)?;
        Ok(self.doc.extract_text(&[number])?)
    }

    fn write_page(&self, index: usize, output_path: &Path) -> Result<()> {
        let keep = self.page_number(index)?;
        let others: Vec<u32> = self
            .page_numbers
            .iter()
            .copied()
            .filter(|&n| n != keep)
            .collect();

        let mut single = self.doc.clone();
        single.delete_pages(&others);
        single.prune_objects();
        single.save(output_path)?;
        Ok(())
    }
}
