//! Split run report
//!
//! `report.json` is the hand-off between `split` and `send`; the optional
//! `report.xlsx` is a human-readable copy for payroll staff.

use crate::error::{Result, SplitError};
use bulletin_split_common::{MatchStatus, PageResult};
use rust_xlsxwriter::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub const REPORT_JSON: &str = "report.json";
pub const REPORT_XLSX: &str = "report.xlsx";

const REPORT_SHEET: &str = "BULLETINS";
const HEADERS: [&str; 6] = ["PAGE", "MATRICULE", "NOM ET PRENOM", "EMAIL", "FICHIER", "STATUT"];

/// Found / not found counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    /// Matched pages whose directory entry has no e-mail
    pub missing_email: usize,
}

pub fn summarize(results: &[PageResult]) -> Summary {
    results.iter().fold(Summary::default(), |mut s, r| {
        s.total += 1;
        match r.match_status {
            MatchStatus::Found => {
                s.found += 1;
                if r.email.is_empty() {
                    s.missing_email += 1;
                }
            }
            MatchStatus::NotFound => s.not_found += 1,
        }
        s
    })
}

pub fn write_json(results: &[PageResult], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Vec<PageResult>> {
    if !path.exists() {
        return Err(SplitError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let results = serde_json::from_reader(BufReader::new(file))?;
    Ok(results)
}

/// Write the report as a single-sheet workbook, one row per page
pub fn write_xlsx(results: &[PageResult], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);
    let missing_format = Format::new().set_font_color(Color::RGB(0xC00000));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(REPORT_SHEET)
        .map_err(|e| SplitError::Report(format!("sheet name: {}", e)))?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| SplitError::Report(format!("header: {}", e)))?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = i as u32 + 1;
        let cells = [
            (result.page_index + 1).to_string(),
            result.identifier.clone(),
            result.display_name.clone(),
            result.email.clone(),
            result.output_filename.clone(),
            result.match_status.to_string(),
        ];
        for (col, value) in cells.iter().enumerate() {
            let written = if result.is_found() {
                worksheet.write_string(row, col as u16, value)
            } else {
                worksheet.write_string_with_format(row, col as u16, value, &missing_format)
            };
            written.map_err(|e| SplitError::Report(format!("row {}: {}", row, e)))?;
        }
    }

    worksheet.autofit();

    workbook
        .save(path)
        .map_err(|e| SplitError::Report(format!("save: {}", e)))?;
    Ok(())
}
