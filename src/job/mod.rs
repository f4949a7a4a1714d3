//! Send job bookkeeping
//!
//! A job is created per `send` run and collects one log entry per
//! recipient. The store is swappable: in-memory for tests and one-shot
//! runs, a JSON file so `job <id>` can be queried afterwards.

mod types;

pub use types::{DeliveryStatus, EmailLog, Job, JobStatus};

use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub trait JobStore {
    /// Create a new job in `processing` state
    fn create(&mut self) -> Result<Job>;

    fn update_status(&mut self, id: &str, status: JobStatus) -> Result<()>;

    fn append_log(&mut self, id: &str, entry: EmailLog) -> Result<()>;

    fn get(&self, id: &str) -> Result<Option<Job>>;
}

/// Jobs kept in a HashMap for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    jobs: HashMap<String, Job>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn job_mut(&mut self, id: &str) -> Result<&mut Job> {
        self.jobs
            .get_mut(id)
            .ok_or_else(|| SplitError::JobNotFound(id.to_string()))
    }
}

impl JobStore for MemoryJobStore {
    fn create(&mut self) -> Result<Job> {
        let job = Job::new();
        self.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update_status(&mut self, id: &str, status: JobStatus) -> Result<()> {
        self.job_mut(id)?.status = status;
        Ok(())
    }

    fn append_log(&mut self, id: &str, entry: EmailLog) -> Result<()> {
        self.job_mut(id)?.logs.push(entry);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Job>> {
        Ok(self.jobs.get(id).cloned())
    }
}

/// On-disk layout of the job file
#[derive(Debug, Serialize, Deserialize)]
struct JobFile {
    version: u32,
    jobs: HashMap<String, Job>,
}

/// Jobs persisted to a JSON file, rewritten after every change
#[derive(Debug)]
pub struct JsonJobStore {
    path: PathBuf,
    inner: MemoryJobStore,
}

impl JsonJobStore {
    const CURRENT_VERSION: u32 = 1;

    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let mut jobs = HashMap::new();

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let file: JobFile = serde_json::from_reader(reader)?;
            if file.version == Self::CURRENT_VERSION {
                jobs = file.jobs;
            } else {
                tracing::warn!(
                    path = %path.display(),
                    version = file.version,
                    "job file version mismatch, starting empty"
                );
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryJobStore { jobs },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, write it, then keep it; disk and memory stay in step
    fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut MemoryJobStore) -> Result<T>,
    {
        let mut next = self.inner.clone();
        let value = change(&mut next)?;
        self.save(&next)?;
        self.inner = next;
        Ok(value)
    }

    fn save(&self, store: &MemoryJobStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = JobFile {
            version: Self::CURRENT_VERSION,
            jobs: store.jobs.clone(),
        };
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &file)?;
        Ok(())
    }
}

impl JobStore for JsonJobStore {
    fn create(&mut self) -> Result<Job> {
        self.commit(|store| store.create())
    }

    fn update_status(&mut self, id: &str, status: JobStatus) -> Result<()> {
        self.commit(|store| store.update_status(id, status))
    }

    fn append_log(&mut self, id: &str, entry: EmailLog) -> Result<()> {
        self.commit(|store| store.append_log(id, entry))
    }

    fn get(&self, id: &str) -> Result<Option<Job>> {
        self.inner.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemoryJobStore::new();
        let job = store.create().unwrap();
        assert_eq!(job.status, JobStatus::Processing);

        store
            .append_log(&job.id, EmailLog::sent("a@example.com", "01 A B.pdf"))
            .unwrap();
        store
            .append_log(&job.id, EmailLog::skipped("", "page_2.pdf", "No email provided"))
            .unwrap();
        store.update_status(&job.id, JobStatus::Completed).unwrap();

        let loaded = store.get(&job.id).unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Completed);
        assert_eq!(loaded.logs.len(), 2);
        assert_eq!(loaded.count(DeliveryStatus::Sent), 1);
        assert_eq!(loaded.count(DeliveryStatus::Skipped), 1);
    }

    #[test]
    fn test_unknown_job() {
        let mut store = MemoryJobStore::new();
        assert!(store.get("nope").unwrap().is_none());
        assert!(matches!(
            store.update_status("nope", JobStatus::Failed),
            Err(SplitError::JobNotFound(_))
        ));
    }

    #[test]
    fn test_job_ids_are_unique() {
        let mut store = MemoryJobStore::new();
        let a = store.create().unwrap();
        let b = store.create().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("jobs.json");

        let id = {
            let mut store = JsonJobStore::open(&path).unwrap();
            let job = store.create().unwrap();
            store
                .append_log(&job.id, EmailLog::failed("b@example.com", "x.pdf", "SMTP Error"))
                .unwrap();
            store.update_status(&job.id, JobStatus::Failed).unwrap();
            job.id
        };

        let store = JsonJobStore::open(&path).unwrap();
        let job = store.get(&id).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.logs[0].error_message.as_deref(), Some("SMTP Error"));
    }

    #[test]
    fn test_json_store_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        let mut store = JsonJobStore::open(&path).unwrap();
        let job = store.create().unwrap();

        // a directory in place of the file makes the next write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.update_status(&job.id, JobStatus::Completed).is_err());
        let loaded = store.get(&job.id).unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Processing);
    }

    #[test]
    fn test_json_store_version_mismatch_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(&path, r#"{"version": 99, "jobs": {}}"#).unwrap();

        let store = JsonJobStore::open(&path).unwrap();
        assert!(store.get("anything").unwrap().is_none());
    }
}
