//! Fixtures built at test time: staff spreadsheets and payslip PDFs

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const SHEET: &str = "EMAIL SALAIRE ";
pub const HEADER: [&str; 3] = ["MATRICULE", "NOM ET PERENOM", "EMAIL"];

/// Write a directory workbook with the given header and rows on `sheet`
pub fn write_workbook(path: &Path, sheet: &str, header: &[&str], rows: &[[&str; 3]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (col, title) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(i as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Standard directory used across the tests
pub fn write_directory(path: &Path) {
    write_workbook(
        path,
        SHEET,
        &HEADER,
        &[
            ["PERC001", "KOFFI N'GUESSAN HERVE", "herve@example.com"],
            ["PERC042", "AWA KONE", "awa@example.com"],
            ["PERC07", "YAO PAUL", ""],
        ],
    );
}

/// Write a PDF with one page per entry; each entry's lines are drawn as separate text blocks
pub fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), (780 - 20 * i as i64).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
}
