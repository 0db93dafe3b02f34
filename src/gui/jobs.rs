//! Background crawl jobs started from the web form

use crate::crawler::CrawlRequest;
use crate::output::{ProgressEvent, ProgressSink, Severity};
use crate::CrawlerError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Lifecycle of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// One line of the job log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug)]
struct JobProgress {
    state: JobState,
    log: Vec<LogEntry>,
    error: Option<String>,
}

/// A crawl started from the GUI
///
/// The job is the progress sink of its own crawl: every event is appended to
/// the log with the severity its marker symbol maps to.
#[derive(Debug)]
pub struct Job {
    pub id: u64,
    pub request: CrawlRequest,
    /// File name offered for download
    pub filename: String,
    progress: Mutex<JobProgress>,
}

/// Point-in-time copy of a job, as served to the browser
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub id: u64,
    pub url: String,
    pub filename: String,
    pub state: JobState,
    pub log: Vec<LogEntry>,
    pub error: Option<String>,
    /// True once the job succeeded and its output file exists
    pub download_ready: bool,
}

impl Job {
    fn new(id: u64, request: CrawlRequest, filename: String) -> Self {
        Self {
            id,
            request,
            filename,
            progress: Mutex::new(JobProgress {
                state: JobState::Running,
                log: Vec::new(),
                error: None,
            }),
        }
    }

    /// Records how the crawl ended
    pub fn complete(&self, result: Result<bool, CrawlerError>) {
        let mut progress = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        match result {
            Ok(true) => progress.state = JobState::Succeeded,
            Ok(false) => progress.state = JobState::Failed,
            Err(e) => {
                tracing::error!("Job {} failed: {}", self.id, e);
                let message = format!("❌ {}", e);
                progress.log.push(LogEntry {
                    severity: Severity::classify(&message),
                    message,
                });
                progress.error = Some(e.to_string());
                progress.state = JobState::Failed;
            }
        }
    }

    pub fn state(&self) -> JobState {
        self.progress.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    pub fn snapshot(&self) -> JobSnapshot {
        let progress = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        JobSnapshot {
            id: self.id,
            url: self.request.seed_url.clone(),
            filename: self.filename.clone(),
            state: progress.state,
            log: progress.log.clone(),
            error: progress.error.clone(),
            download_ready: progress.state == JobState::Succeeded
                && self.request.output_path.exists(),
        }
    }
}

impl ProgressSink for Job {
    fn report(&self, event: &ProgressEvent) {
        let message = event.to_string();
        let entry = LogEntry {
            severity: Severity::classify(&message),
            message,
        };
        self.progress
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .log
            .push(entry);
    }
}

/// Finished jobs kept by default before the oldest are evicted
pub const DEFAULT_FINISHED_JOB_RETENTION: usize = 100;

/// Jobs started since the server came up
///
/// Running jobs are always kept. Once more than `retention` jobs have
/// finished, the oldest finished ones are dropped when a new job is created.
/// Their output files stay on disk.
#[derive(Debug)]
pub struct JobStore {
    jobs: RwLock<HashMap<u64, Arc<Job>>>,
    next_id: AtomicU64,
    retention: usize,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::with_retention(DEFAULT_FINISHED_JOB_RETENTION)
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: usize) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            retention,
        }
    }

    /// Registers a new running job
    pub fn create(&self, request: CrawlRequest, filename: String) -> Arc<Job> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let job = Arc::new(Job::new(id, request, filename));

        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());
        evict_finished(&mut jobs, self.retention);
        jobs.insert(id, job.clone());
        job
    }

    pub fn get(&self, id: u64) -> Option<Arc<Job>> {
        self.jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.jobs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn evict_finished(jobs: &mut HashMap<u64, Arc<Job>>, retention: usize) {
    let mut finished: Vec<u64> = jobs
        .values()
        .filter(|job| job.state().is_terminal())
        .map(|job| job.id)
        .collect();

    if finished.len() <= retention {
        return;
    }

    finished.sort_unstable();
    let excess = finished.len() - retention;
    for id in &finished[..excess] {
        jobs.remove(id);
    }
    tracing::debug!("Evicted {} finished jobs", excess);
}
