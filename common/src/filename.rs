//! Canonical payslip file names
//!
//! Format: `<last 2 digits of matricule> <FIRSTNAME SURNAME> BULLETIN DE SALAIRE <period>`
//! e.g. `01 HERVE KOFFI BULLETIN DE SALAIRE SEPT25`.
//! The stem is used as-is by the mailer (attachment name) and by packaging.

use regex::Regex;

/// Fixed label between the name and the period
pub const PAYSLIP_LABEL: &str = "BULLETIN DE SALAIRE";

/// Extension appended to every split page
pub const PDF_EXTENSION: &str = "pdf";

lazy_static::lazy_static! {
    static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Build the filename stem (without extension) for a matched page
///
/// # Arguments
/// * `matricule` - employee code, e.g. `PERC001`
/// * `name` - display name from the directory, surname first
/// * `period` - period label, e.g. `OCT25` (may be empty)
///
/// # Examples
/// ```
/// use bulletin_split_common::payslip_stem;
///
/// let stem = payslip_stem("PERC001", "KOFFI N'GUESSAN HERVE", "OCT25");
/// assert_eq!(stem, "01 HERVE KOFFI BULLETIN DE SALAIRE OCT25");
/// ```
pub fn payslip_stem(matricule: &str, name: &str, period: &str) -> String {
    format!(
        "{} {} {} {}",
        matricule_suffix(matricule),
        short_name(name),
        PAYSLIP_LABEL,
        period
    )
}

/// Filename with extension for a matched page
pub fn payslip_filename(matricule: &str, name: &str, period: &str) -> String {
    format!("{}.{}", payslip_stem(matricule, name, period), PDF_EXTENSION)
}

/// Positional fallback for unmatched pages (1-based)
pub fn fallback_filename(page_index: usize) -> String {
    format!("page_{}.{}", page_index + 1, PDF_EXTENSION)
}

/// Last two characters of the last digit run, `"00"` when there are no digits
pub fn matricule_suffix(matricule: &str) -> String {
    match DIGITS_RE.find_iter(matricule).last() {
        Some(m) => {
            let digits = m.as_str();
            digits[digits.len().saturating_sub(2)..].to_string()
        }
        None => "00".to_string(),
    }
}

/// Keep ASCII letters, ASCII digits and whitespace, then uppercase
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// `"SURNAME MIDDLE FIRSTNAME"` → `"FIRSTNAME SURNAME"`
///
/// Middle tokens (compound surnames, second given names) are dropped.
/// Single-token names are returned sanitized but otherwise untouched.
pub fn short_name(name: &str) -> String {
    let sanitized = sanitize_name(name);
    let parts: Vec<&str> = sanitized.split_whitespace().collect();

    if parts.len() >= 2 {
        format!("{} {}", parts[parts.len() - 1], parts[0])
    } else {
        sanitized
    }
}
