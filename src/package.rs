//! ZIP packaging of split payslips

use crate::error::{Result, SplitError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_ARCHIVE_NAME: &str = "bulletins.zip";

/// Bundle `names` (file names relative to `source_dir`) into `zip_path`
///
/// Names that do not exist in `source_dir` are skipped.
///
/// # Returns
/// Number of files written to the archive.
pub fn package_files(names: &[String], source_dir: &Path, zip_path: &Path) -> Result<usize> {
    if names.is_empty() {
        return Err(SplitError::NoFilesSelected);
    }

    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut added = 0;
    for name in names {
        let path = source_dir.join(name);
        if !path.is_file() {
            tracing::warn!(file = %name, "not found, left out of archive");
            continue;
        }

        let data = std::fs::read(&path)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&data)?;
        added += 1;
    }

    let mut writer = zip.finish()?;
    writer.flush()?;

    tracing::info!(archive = %zip_path.display(), files = added, "archive written");
    Ok(added)
}

/// PDF file names directly under `dir`, sorted
pub fn list_pdfs(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Err(SplitError::FileNotFound(dir.display().to_string()));
    }

    let mut names: Vec<String> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_pdf(p))
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    names.sort();
    Ok(names)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
