//! Split-and-match
//!
//! Walks the document page by page, recognises the matricule, looks it up
//! in the directory and writes every page to its own file:
//! - matched page → `<canonical payslip name>.pdf`
//! - unmatched page → `page_<n>.pdf`
//!
//! Two pages that resolve to the same canonical name (a payslip spanning
//! two pages) do not overwrite each other: the later one falls back to
//! `page_<n>.pdf`.
//!
//! Pages are processed strictly in order. A write failure aborts the run;
//! files already written stay on disk.

use crate::directory::Directory;
use crate::document::PageSource;
use crate::error::{Result, SplitError};
use bulletin_split_common::{
    extract_page_info, fallback_filename, payslip_filename, MatchStatus, PageResult,
};
use std::collections::HashSet;
use std::path::Path;

/// Identifier reported for a page where no matricule was recognised
pub fn unknown_identifier(page_index: usize) -> String {
    format!("UNKNOWN_{}", page_index)
}

/// Split `document` into `output_dir` and match every page against `directory`
///
/// # Returns
/// One `PageResult` per page, in document order.
pub fn split_and_match<D: PageSource>(
    document: &D,
    directory: &Directory,
    output_dir: &Path,
) -> Result<Vec<PageResult>> {
    split_and_match_with(document, directory, output_dir, |_| {})
}

/// Same as [`split_and_match`], calling `on_page` after each page is written
pub fn split_and_match_with<D, F>(
    document: &D,
    directory: &Directory,
    output_dir: &Path,
    mut on_page: F,
) -> Result<Vec<PageResult>>
where
    D: PageSource,
    F: FnMut(&PageResult),
{
    std::fs::create_dir_all(output_dir)?;

    let page_count = document.page_count();
    let mut results = Vec::with_capacity(page_count);

    let mut used_names = HashSet::new();

    for index in 0..page_count {
        let mut result = match_page(document, directory, output_dir, index)?;

        // a second page with the same canonical name keeps its own file
        if !used_names.insert(result.output_filename.clone()) {
            let fallback = fallback_filename(index);
            tracing::warn!(
                page = index,
                taken = %result.output_filename,
                file = %fallback,
                "file name already used by an earlier page"
            );
            result.output_path = output_dir.join(&fallback).to_string_lossy().to_string();
            result.output_filename = fallback;
            used_names.insert(result.output_filename.clone());
        }

        document
            .write_page(index, Path::new(&result.output_path))
            .map_err(|e| SplitError::PageWrite {
                page: index,
                source: Box::new(e),
            })?;

        tracing::debug!(
            page = index,
            id = %result.identifier,
            status = %result.match_status,
            file = %result.output_filename,
            "page written"
        );

        on_page(&result);
        results.push(result);
    }

    let found = results.iter().filter(|r| r.is_found()).count();
    tracing::info!(
        pages = page_count,
        found,
        not_found = page_count - found,
        "split finished"
    );

    Ok(results)
}

/// Build the result for one page without writing anything
fn match_page<D: PageSource>(
    document: &D,
    directory: &Directory,
    output_dir: &Path,
    index: usize,
) -> Result<PageResult> {
    let text = match document.page_text(index) {
        Ok(text) => Some(text),
        Err(e @ SplitError::PageOutOfRange { .. }) => return Err(e),
        Err(e) => {
            // unreadable text degrades to an unmatched page
            tracing::warn!(page = index, error = %e, "text extraction failed");
            None
        }
    };

    let info = extract_page_info(text.as_deref());
    let matched = info
        .identifier
        .as_deref()
        .and_then(|id| directory.get(id).map(|record| (id, record)));

    let (display_name, email, output_filename, match_status) = match matched {
        Some((id, record)) => (
            record.display_name.clone(),
            record.email.clone(),
            payslip_filename(id, &record.display_name, info.period.as_deref().unwrap_or_default()),
            MatchStatus::Found,
        ),
        None => (
            String::new(),
            String::new(),
            fallback_filename(index),
            MatchStatus::NotFound,
        ),
    };

    let output_path = output_dir.join(&output_filename);

    Ok(PageResult {
        identifier: info.identifier.unwrap_or_else(|| unknown_identifier(index)),
        page_index: index,
        display_name,
        email,
        output_filename,
        match_status,
        output_path: output_path.to_string_lossy().to_string(),
    })
}
