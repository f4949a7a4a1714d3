//! Matricule / period extraction from payslip page text
//!
//! Both recognisers are heuristics: they never fail and return their
//! first guess. Known quirks kept on purpose:
//! - every letter `O` in the matched matricule is rewritten to `0`
//!   (OCR confusion), even when the letter was legitimate
//! - the first `dd/mm/yy` date on the page is taken as the pay period,
//!   even if it is a birth date printed above the real period

use crate::types::PageExtract;
use regex::Regex;

/// Month label used when the month group is outside 01-12
pub const UNKNOWN_MONTH: &str = "MOIS";

lazy_static::lazy_static! {
    // PER, then optional CO or C, then digits. Earliest match wins.
    static ref MATRICULE_RE: Regex = Regex::new(r"PER(?:CO|C)?[0-9]+").unwrap();
    // dd/mm/yy, no calendar validation
    static ref DATE_RE: Regex = Regex::new(r"([0-9]{2})/([0-9]{2})/([0-9]{2})").unwrap();
}

/// Extract the matricule and pay period from the text of one page
///
/// # Arguments
/// * `text` - raw text of the page (`None` when extraction produced nothing)
///
/// # Returns
/// * `PageExtract { None, None }` for empty or absent text
/// * otherwise the first matricule (if any) and the period label (`""` if no date)
///
/// # Examples
/// ```
/// use bulletin_split_common::extract_page_info;
///
/// let info = extract_page_info(Some("Matricule : PERCO123 Période 01/10/25 31/10/25"));
/// assert_eq!(info.identifier.as_deref(), Some("PERC0123"));
/// assert_eq!(info.period.as_deref(), Some("OCT25"));
/// ```
pub fn extract_page_info(text: Option<&str>) -> PageExtract {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return PageExtract::default(),
    };

    PageExtract {
        identifier: extract_matricule(text),
        period: Some(extract_period(text)),
    }
}

/// First `PER[C|CO]<digits>` token, with `O` → `0`
pub fn extract_matricule(text: &str) -> Option<String> {
    MATRICULE_RE
        .find(text)
        .map(|m| m.as_str().replace('O', "0"))
}

/// Period label built from the first `dd/mm/yy` date, `""` when there is none
///
/// `01/10/25` → `OCT25`, `01/13/25` → `MOIS25`
pub fn extract_period(text: &str) -> String {
    match DATE_RE.captures(text) {
        Some(caps) => format!("{}{}", month_label(&caps[2]), &caps[3]),
        None => String::new(),
    }
}

/// French month abbreviation for a two-digit month number
pub fn month_label(month: &str) -> &'static str {
    match month {
        "01" => "JANV",
        "02" => "FEV",
        "03" => "MARS",
        "04" => "AVRIL",
        "05" => "MAI",
        "06" => "JUIN",
        "07" => "JUIL",
        "08" => "AOUT",
        "09" => "SEPT",
        "10" => "OCT",
        "11" => "NOV",
        "12" => "DEC",
        _ => UNKNOWN_MONTH,
    }
}
