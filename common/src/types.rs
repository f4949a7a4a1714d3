//! Data model shared by the splitter, the report and the mailer
//!
//! - EmployeeRecord: one directory row (name + e-mail)
//! - PageExtract: what the extractor recovered from one page
//! - PageResult: per-page outcome of a split run

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory entry, keyed by matricule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub display_name: String,
    pub email: String,
}

/// Extractor output for one page
///
/// Both fields are `None` only when the page text was empty.
/// Otherwise `period` is always `Some`, possibly holding `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtract {
    pub identifier: Option<String>,
    pub period: Option<String>,
}

/// Whether a page could be attached to an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Found,
    NotFound,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Found => write!(f, "FOUND"),
            MatchStatus::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// Outcome of one page of a split run
///
/// The serialized keys are the report wire format read back by `send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Extracted matricule, or `UNKNOWN_<index>` when none was found
    #[serde(rename = "id")]
    pub identifier: String,

    /// 0-based page index in the source document
    #[serde(rename = "original_index")]
    pub page_index: usize,

    #[serde(rename = "name", default)]
    pub display_name: String,

    #[serde(default)]
    pub email: String,

    /// File name including the `.pdf` extension
    #[serde(rename = "filename")]
    pub output_filename: String,

    #[serde(rename = "status")]
    pub match_status: MatchStatus,

    #[serde(rename = "path")]
    pub output_path: String,
}

impl PageResult {
    pub fn is_found(&self) -> bool {
        self.match_status == MatchStatus::Found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageResult {
        PageResult {
            identifier: "PERC001".into(),
            page_index: 0,
            display_name: "KOFFI HERVE".into(),
            email: "herve@example.com".into(),
            output_filename: "01 HERVE KOFFI BULLETIN DE SALAIRE OCT25.pdf".into(),
            match_status: MatchStatus::Found,
            output_path: "/tmp/out/01 HERVE KOFFI BULLETIN DE SALAIRE OCT25.pdf".into(),
        }
    }

    #[test]
    fn test_page_result_wire_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "PERC001");
        assert_eq!(json["original_index"], 0);
        assert_eq!(json["name"], "KOFFI HERVE");
        assert_eq!(json["filename"], "01 HERVE KOFFI BULLETIN DE SALAIRE OCT25.pdf");
        assert_eq!(json["status"], "FOUND");
    }

    #[test]
    fn test_not_found_status_serializes() {
        let json = serde_json::to_string(&MatchStatus::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
        assert_eq!(MatchStatus::NotFound.to_string(), "NOT_FOUND");
    }

    #[test]
    fn test_missing_name_and_email_default_to_empty() {
        let json = r#"{"id":"UNKNOWN_2","original_index":2,"filename":"page_3.pdf","status":"NOT_FOUND","path":"out/page_3.pdf"}"#;
        let result: PageResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.display_name, "");
        assert_eq!(result.email, "");
        assert!(!result.is_found());
    }
}
