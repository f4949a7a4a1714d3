//! Payslip mailing
//!
//! One mail per recipient with its split page attached. Every recipient
//! gets a log entry in the job store:
//! - attachment missing → `failed` ("File not found")
//! - no e-mail address → `skipped` ("No email provided")
//! - transport error → `failed` (error text)
//!
//! There are no retries.

mod smtp;

pub use smtp::SmtpMailer;

use crate::config::MailTemplate;
use crate::error::{Result, SplitError};
use crate::job::{EmailLog, Job, JobStatus, JobStore};
use bulletin_split_common::{extract_matricule, PageResult};
use std::path::{Path, PathBuf};

pub const FILE_NOT_FOUND: &str = "File not found";
pub const NO_EMAIL: &str = "No email provided";

/// A fully-resolved message for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

impl OutgoingMail {
    /// File name shown to the recipient
    pub fn attachment_name(&self) -> String {
        self.attachment
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Pick the report rows to mail
///
/// Matched pages only, unless `include_unmatched`. A non-empty `only`
/// restricts to those matricules; `PERCO7` and `PERC07` are the same id.
pub fn select_recipients(
    results: &[PageResult],
    only: &[String],
    include_unmatched: bool,
) -> Vec<PageResult> {
    let wanted: Vec<String> = only
        .iter()
        .map(|id| {
            let id = id.trim().to_uppercase();
            extract_matricule(&id).unwrap_or(id)
        })
        .collect();

    results
        .iter()
        .filter(|r| include_unmatched || r.is_found())
        .filter(|r| wanted.is_empty() || wanted.contains(&r.identifier))
        .cloned()
        .collect()
}

#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Logs instead of sending; used with `--dry-run` or without SMTP credentials
#[derive(Debug, Default)]
pub struct DryRunMailer;

impl Mailer for DryRunMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tracing::info!(
            to = %mail.to_email,
            subject = %mail.subject,
            attachment = %mail.attachment_name(),
            "[dry-run] mail not sent"
        );
        Ok(())
    }
}

/// Send every recipient's page and record the outcome under `job_id`
///
/// The job ends `completed` once every recipient has a log entry. If the
/// store itself fails, the job is marked `failed` (best effort) and the
/// error is returned.
pub async fn send_batch<M, S>(
    recipients: &[PageResult],
    template: &MailTemplate,
    mailer: &M,
    store: &mut S,
    job_id: &str,
) -> Result<Job>
where
    M: Mailer,
    S: JobStore,
{
    send_batch_with(recipients, template, mailer, store, job_id, |_| {}).await
}

/// Same as [`send_batch`], calling `on_log` after each recipient
pub async fn send_batch_with<M, S, F>(
    recipients: &[PageResult],
    template: &MailTemplate,
    mailer: &M,
    store: &mut S,
    job_id: &str,
    mut on_log: F,
) -> Result<Job>
where
    M: Mailer,
    S: JobStore,
    F: FnMut(&EmailLog),
{
    tracing::info!(job = job_id, recipients = recipients.len(), "send batch started");

    for recipient in recipients {
        let entry = deliver(recipient, template, mailer).await;
        on_log(&entry);

        if let Err(e) = store.append_log(job_id, entry) {
            return Err(mark_failed(store, job_id, e));
        }
    }

    if let Err(e) = store.update_status(job_id, JobStatus::Completed) {
        return Err(mark_failed(store, job_id, e));
    }
    tracing::info!(job = job_id, "send batch completed");

    store
        .get(job_id)?
        .ok_or_else(|| SplitError::JobNotFound(job_id.to_string()))
}

/// Best-effort `failed` status after a store error; hands the error back
fn mark_failed<S: JobStore>(store: &mut S, job_id: &str, error: SplitError) -> SplitError {
    tracing::error!(job = job_id, error = %error, "job store failed");
    if let Err(mark) = store.update_status(job_id, JobStatus::Failed) {
        tracing::warn!(job = job_id, error = %mark, "could not mark job failed");
    }
    error
}

async fn deliver<M: Mailer>(
    recipient: &PageResult,
    template: &MailTemplate,
    mailer: &M,
) -> EmailLog {
    let filename = recipient.output_filename.as_str();
    let email = recipient.email.trim();

    if !Path::new(&recipient.output_path).exists() {
        tracing::warn!(file = filename, "attachment not found");
        return EmailLog::failed(email, filename, FILE_NOT_FOUND);
    }

    if email.is_empty() {
        return EmailLog::skipped(email, filename, NO_EMAIL);
    }

    let mail = OutgoingMail {
        to_email: email.to_string(),
        to_name: recipient.display_name.clone(),
        subject: template.subject.clone(),
        body: template.body.clone(),
        attachment: PathBuf::from(&recipient.output_path),
    };

    match mailer.send(&mail).await {
        Ok(()) => {
            tracing::info!(to = email, file = filename, "mail sent");
            EmailLog::sent(email, filename)
        }
        Err(e) => {
            tracing::warn!(to = email, error = %e, "mail failed");
            EmailLog::failed(email, filename, e.to_string())
        }
    }
}
