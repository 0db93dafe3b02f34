//! Local web GUI
//!
//! A small axum server with a form for the seed URL and output file name.
//! Each submitted crawl runs as a background task; its page polls for
//! progress and offers the file for download once it is written.

mod jobs;
mod page;
mod server;

pub use jobs::{
    Job, JobSnapshot, JobState, JobStore, LogEntry, DEFAULT_FINISHED_JOB_RETENTION,
};
pub use page::{render_form, render_job};
pub use server::{build_router, sanitize_filename, serve, AppState};
