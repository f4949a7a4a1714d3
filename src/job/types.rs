use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Per-recipient delivery outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Skipped,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
            DeliveryStatus::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLog {
    pub recipient_email: String,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl EmailLog {
    pub fn sent(recipient_email: &str, filename: &str) -> Self {
        Self {
            recipient_email: recipient_email.to_string(),
            status: DeliveryStatus::Sent,
            error_message: None,
            filename: Some(filename.to_string()),
        }
    }

    pub fn failed(recipient_email: &str, filename: &str, error: impl Into<String>) -> Self {
        Self {
            recipient_email: recipient_email.to_string(),
            status: DeliveryStatus::Failed,
            error_message: Some(error.into()),
            filename: Some(filename.to_string()),
        }
    }

    pub fn skipped(recipient_email: &str, filename: &str, reason: impl Into<String>) -> Self {
        Self {
            recipient_email: recipient_email.to_string(),
            status: DeliveryStatus::Skipped,
            error_message: Some(reason.into()),
            filename: Some(filename.to_string()),
        }
    }
}

/// One send batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub logs: Vec<EmailLog>,
}

impl Job {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            status: JobStatus::Processing,
            created_at: Utc::now(),
            logs: Vec::new(),
        }
    }

    pub fn count(&self, status: DeliveryStatus) -> usize {
        self.logs.iter().filter(|l| l.status == status).count()
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}
