//! Employee directory loaded from the payroll spreadsheet
//!
//! The workbook must contain the sheet [`DIRECTORY_SHEET`] whose first row
//! holds the headers [`MATRICULE_COLUMN`], [`NAME_COLUMN`] and
//! [`EMAIL_COLUMN`] (compared after trimming). Any calamine-readable
//! format works (xlsx, xlsm, xls, ods).

use crate::error::{Result, SplitError};
use bulletin_split_common::EmployeeRecord;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Sheet name, trailing space included
pub const DIRECTORY_SHEET: &str = "EMAIL SALAIRE ";
pub const MATRICULE_COLUMN: &str = "MATRICULE";
pub const NAME_COLUMN: &str = "NOM ET PERENOM";
pub const EMAIL_COLUMN: &str = "EMAIL";

/// Text of a missing cell in exports of the payroll sheet
pub const NO_VALUE_PLACEHOLDER: &str = "nan";

/// Matricule → employee mapping, read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: HashMap<String, EmployeeRecord>,
}

impl Directory {
    /// Load the directory from a spreadsheet file
    ///
    /// # Errors
    /// * `FileNotFound` - the path does not exist
    /// * `DirectoryFormat` - sheet or a required column is missing
    /// * `Spreadsheet` - the workbook cannot be read
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SplitError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        if !workbook.sheet_names().iter().any(|name| name == DIRECTORY_SHEET) {
            return Err(SplitError::DirectoryFormat(format!(
                "sheet \"{}\" not found",
                DIRECTORY_SHEET
            )));
        }

        let range = workbook.worksheet_range(DIRECTORY_SHEET)?;
        let directory = Self::from_range(&range)?;

        tracing::info!(
            path = %path.display(),
            employees = directory.len(),
            "directory loaded"
        );
        Ok(directory)
    }

    /// Build from a worksheet range whose first row is the header row
    pub fn from_range(range: &Range<Data>) -> Result<Self> {
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());

        let header = rows.next().unwrap_or_default();
        Self::from_rows(&header, rows)
    }

    /// Build from a header row and data rows rendered as strings
    pub fn from_rows<I>(header: &[String], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let position = |name: &str| header.iter().position(|h| h.trim() == name);

        let columns =
            [MATRICULE_COLUMN, NAME_COLUMN, EMAIL_COLUMN].map(|name| (name, position(name)));
        let missing: Vec<&str> = columns
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(SplitError::DirectoryFormat(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        let [id_col, name_col, email_col] = columns.map(|(_, idx)| idx.unwrap_or_default());

        let mut entries = HashMap::new();
        for (line, row) in rows.into_iter().enumerate() {
            let cell = |idx: usize| row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();

            let matricule = cell(id_col);
            if matricule.is_empty() || matricule == NO_VALUE_PLACEHOLDER {
                tracing::debug!(row = line + 2, "skipping row without matricule");
                continue;
            }

            // duplicates: last row wins
            entries.insert(
                matricule,
                EmployeeRecord {
                    display_name: cell(name_col),
                    email: cell(email_col),
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn get(&self, matricule: &str) -> Option<&EmployeeRecord> {
        self.entries.get(matricule)
    }

    pub fn contains(&self, matricule: &str) -> bool {
        self.entries.contains_key(matricule)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EmployeeRecord)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, EmployeeRecord)> for Directory {
    fn from_iter<T: IntoIterator<Item = (String, EmployeeRecord)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
