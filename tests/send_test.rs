//! split → report → send with the dry-run mailer and the JSON job store

mod common;

use bulletin_split::config::MailTemplate;
use bulletin_split::directory::Directory;
use bulletin_split::document::PdfDocument;
use bulletin_split::job::{DeliveryStatus, JobStatus, JobStore, JsonJobStore};
use bulletin_split::mailer::{self, DryRunMailer};
use bulletin_split::{report, splitter};
use tempfile::tempdir;

#[tokio::test]
async fn test_send_from_report() {
    let dir = tempdir().unwrap();
    let xlsx = dir.path().join("staff.xlsx");
    let pdf = dir.path().join("paie.pdf");
    let out = dir.path().join("completed");
    common::write_directory(&xlsx);
    common::write_pdf(
        &pdf,
        &[
            &["MATRICULE PERC001", "01/09/25"],
            &["MATRICULE PERC07", "01/09/25"],
            &["NO ID HERE"],
        ],
    );

    let directory = Directory::load(&xlsx).unwrap();
    let doc = PdfDocument::load(&pdf).unwrap();
    let results = splitter::split_and_match(&doc, &directory, &out).unwrap();
    report::write_json(&results, &out.join(report::REPORT_JSON)).unwrap();

    let results = report::read_json(&out.join(report::REPORT_JSON)).unwrap();
    let recipients = mailer::select_recipients(&results, &[], false);
    assert_eq!(recipients.len(), 2);

    let jobs_file = out.join("jobs.json");
    let mut store = JsonJobStore::open(&jobs_file).unwrap();
    let job = store.create().unwrap();

    let template = MailTemplate::default();
    let job = mailer::send_batch(&recipients, &template, &DryRunMailer, &mut store, &job.id)
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.count(DeliveryStatus::Sent), 1);
    // PERC07 has no e-mail in the directory
    assert_eq!(job.count(DeliveryStatus::Skipped), 1);
    assert_eq!(
        job.logs[0].filename.as_deref(),
        Some("01 HERVE KOFFI BULLETIN DE SALAIRE SEPT25.pdf")
    );

    // the job can be read back by a later process
    let reopened = JsonJobStore::open(&jobs_file).unwrap();
    assert_eq!(reopened.get(&job.id).unwrap().unwrap(), job);
}
