//! Bulletin Split Common Library
//!
//! Document-independent logic: page text → matricule/period, and the
//! canonical payslip file names.

pub mod types;
pub mod extractor;
pub mod filename;

pub use types::{EmployeeRecord, MatchStatus, PageExtract, PageResult};
pub use extractor::{extract_matricule, extract_page_info, extract_period, month_label};
pub use filename::{fallback_filename, payslip_filename, payslip_stem, short_name};
