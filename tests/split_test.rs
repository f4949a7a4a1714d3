//! End-to-end: spreadsheet + multi-page PDF → one file per page + report

mod common;

use bulletin_split::directory::Directory;
use bulletin_split::document::{PageSource, PdfDocument};
use bulletin_split::error::SplitError;
use bulletin_split::{report, splitter};
use bulletin_split_common::MatchStatus;
use tempfile::tempdir;

const PAGES: [&[&str]; 3] = [
    &["BULLETIN DE PAIE", "MATRICULE PERC001", "PERIODE DU 01/10/25 AU 31/10/25"],
    &["BULLETIN DE PAIE", "MATRICULE PERCO42", "PERIODE DU 01/10/25 AU 31/10/25"],
    &["BULLETIN DE PAIE", "MATRICULE PERC999", "PERIODE DU 01/10/25 AU 31/10/25"],
];

fn setup(dir: &std::path::Path) -> (Directory, PdfDocument) {
    let xlsx = dir.join("staff.xlsx");
    let pdf = dir.join("paie.pdf");
    common::write_directory(&xlsx);
    common::write_pdf(&pdf, &PAGES);
    (Directory::load(&xlsx).unwrap(), PdfDocument::load(&pdf).unwrap())
}

#[test]
fn test_page_text_extraction() {
    let dir = tempdir().unwrap();
    let (_, doc) = setup(dir.path());

    assert_eq!(doc.page_count(), 3);
    assert!(doc.page_text(0).unwrap().contains("PERC001"));
    assert!(doc.page_text(1).unwrap().contains("PERCO42"));
    assert!(matches!(
        doc.page_text(3),
        Err(SplitError::PageOutOfRange { index: 3, count: 3 })
    ));
}

#[test]
fn test_split_end_to_end() {
    let dir = tempdir().unwrap();
    let (directory, doc) = setup(dir.path());
    let out = dir.path().join("completed");

    let results = splitter::split_and_match(&doc, &directory, &out).unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].match_status, MatchStatus::Found);
    assert_eq!(results[0].output_filename, "01 HERVE KOFFI BULLETIN DE SALAIRE OCT25.pdf");
    assert_eq!(results[0].email, "herve@example.com");

    // PERCO42 is read as PERC042
    assert_eq!(results[1].identifier, "PERC042");
    assert_eq!(results[1].output_filename, "42 KONE AWA BULLETIN DE SALAIRE OCT25.pdf");

    assert_eq!(results[2].match_status, MatchStatus::NotFound);
    assert_eq!(results[2].identifier, "PERC999");
    assert_eq!(results[2].output_filename, "page_3.pdf");

    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.page_index, i);
        let written = PdfDocument::load(std::path::Path::new(&r.output_path)).unwrap();
        assert_eq!(written.page_count(), 1, "{} should hold one page", r.output_filename);
    }

    // each output holds its own source page
    let second = PdfDocument::load(&out.join(&results[1].output_filename)).unwrap();
    assert!(second.page_text(0).unwrap().contains("PERCO42"));
}

#[test]
fn test_report_round_trip_from_split() {
    let dir = tempdir().unwrap();
    let (directory, doc) = setup(dir.path());
    let out = dir.path().join("completed");

    let results = splitter::split_and_match(&doc, &directory, &out).unwrap();
    let json = out.join(report::REPORT_JSON);
    report::write_json(&results, &json).unwrap();
    report::write_xlsx(&results, &out.join(report::REPORT_XLSX)).unwrap();

    assert_eq!(report::read_json(&json).unwrap(), results);
    assert!(out.join(report::REPORT_XLSX).exists());

    let summary = report::summarize(&results);
    assert_eq!((summary.found, summary.not_found), (2, 1));
}

#[test]
fn test_resplit_overwrites() {
    let dir = tempdir().unwrap();
    let (directory, doc) = setup(dir.path());
    let out = dir.path().join("completed");

    let first = splitter::split_and_match(&doc, &directory, &out).unwrap();
    let second = splitter::split_and_match(&doc, &directory, &out).unwrap();
    assert_eq!(first, second);

    let pdfs = bulletin_split::package::list_pdfs(&out).unwrap();
    assert_eq!(pdfs.len(), 3);
}

#[test]
fn test_missing_pdf() {
    let dir = tempdir().unwrap();
    let result = PdfDocument::load(&dir.path().join("absent.pdf"));
    assert!(matches!(result, Err(SplitError::FileNotFound(_))));
}

#[test]
fn test_two_pages_same_matricule_both_written() {
    let dir = tempdir().unwrap();
    let xlsx = dir.path().join("staff.xlsx");
    let pdf = dir.path().join("paie.pdf");
    let out = dir.path().join("completed");
    common::write_directory(&xlsx);
    common::write_pdf(
        &pdf,
        &[
            &["MATRICULE PERC001", "01/10/25", "PAGE ONE"],
            &["MATRICULE PERC001", "01/10/25", "PAGE TWO"],
        ],
    );

    let directory = Directory::load(&xlsx).unwrap();
    let doc = PdfDocument::load(&pdf).unwrap();
    let results = splitter::split_and_match(&doc, &directory, &out).unwrap();

    assert_eq!(bulletin_split::package::list_pdfs(&out).unwrap().len(), 2);
    assert_eq!(results[1].output_filename, "page_2.pdf");

    let first = PdfDocument::load(std::path::Path::new(&results[0].output_path)).unwrap();
    let second = PdfDocument::load(std::path::Path::new(&results[1].output_path)).unwrap();
    assert!(first.page_text(0).unwrap().contains("PAGE ONE"));
    assert!(second.page_text(0).unwrap().contains("PAGE TWO"));
}
