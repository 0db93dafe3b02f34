//! HTTP server for the web GUI
//!
//! Routes:
//! - `GET /` crawl form
//! - `POST /crawl` start a crawl, redirect to its job page
//! - `GET /jobs/:id` job progress page
//! - `GET /jobs/:id/status` job snapshot as JSON
//! - `GET /jobs/:id/download` the generated markdown file

use crate::config::Config;
use crate::crawler::{run_crawl, CrawlRequest};
use crate::gui::jobs::{JobSnapshot, JobStore};
use crate::gui::page::{render_form, render_job};
use crate::url::validate_seed;
use crate::CrawlerError;
use axum::extract::{Form, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state of the GUI server
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jobs: Arc<JobStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            jobs: Arc::new(JobStore::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CrawlForm {
    url: String,
    #[serde(default)]
    filename: String,
}

/// Builds the GUI router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/crawl", post(start_crawl))
        .route("/jobs/:id", get(job_page))
        .route("/jobs/:id/status", get(job_status))
        .route("/jobs/:id/download", get(download))
        .with_state(state)
}

/// Serves the GUI on `addr` until the process is stopped
pub async fn serve(config: Config, addr: &str) -> Result<(), CrawlerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CrawlerError::Gui(format!("cannot bind {}: {}", addr, e)))?;

    let local = listener.local_addr()?;
    tracing::info!("GUI listening on http://{}", local);

    let router = build_router(AppState::new(config));
    axum::serve(listener, router)
        .await
        .map_err(|e| CrawlerError::Gui(e.to_string()))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_form("", &state.config.gui.default_filename, None))
}

async fn start_crawl(State(state): State<AppState>, Form(form): Form<CrawlForm>) -> Response {
    let url = form.url.trim().to_string();

    if url.is_empty() {
        return form_error(&url, &form.filename, "Introduce una URL");
    }
    if let Err(e) = validate_seed(&url) {
        return form_error(&url, &form.filename, &e.to_string());
    }

    let requested = if form.filename.trim().is_empty() {
        state.config.gui.default_filename.as_str()
    } else {
        form.filename.as_str()
    };
    let Some(filename) = sanitize_filename(requested) else {
        return form_error(&url, &form.filename, "Nombre de archivo no válido");
    };

    let output_path = PathBuf::from(&state.config.gui.output_dir).join(&filename);
    let job = state
        .jobs
        .create(CrawlRequest::new(url, output_path), filename);
    tracing::info!(
        "Job {} started: {} -> {}",
        job.id,
        job.request.seed_url,
        job.request.output_path.display()
    );

    let config = state.config.clone();
    let task_job = job.clone();
    tokio::spawn(async move {
        let result = run_crawl(&config, &task_job.request, task_job.as_ref()).await;
        task_job.complete(result);
        tracing::info!("Job {} finished: {:?}", task_job.id, task_job.state());
    });

    Redirect::to(&format!("/jobs/{}", job.id)).into_response()
}

fn form_error(url: &str, filename: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(render_form(url, filename, Some(message))),
    )
        .into_response()
}

async fn job_page(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.jobs.get(id) {
        Some(job) => Html(render_job(&job.snapshot())).into_response(),
        None => (StatusCode::NOT_FOUND, "job not found").into_response(),
    }
}

async fn job_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JobSnapshot>, StatusCode> {
    state
        .jobs
        .get(id)
        .map(|job| Json(job.snapshot()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn download(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let Some(job) = state.jobs.get(id) else {
        return (StatusCode::NOT_FOUND, "job not found").into_response();
    };

    let snapshot = job.snapshot();
    if !snapshot.download_ready {
        return (StatusCode::NOT_FOUND, "no output available").into_response();
    }

    match tokio::fs::read(&job.request.output_path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", job.filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                "Failed to read {}: {}",
                job.request.output_path.display(),
                e
            );
            (StatusCode::NOT_FOUND, "no output available").into_response()
        }
    }
}

/// Reduces a user-supplied file name to a safe single path component
///
/// Only the last path component is kept and characters other than
/// alphanumerics, `.`, `_`, `-` and space are removed. Returns `None` when
/// nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = last
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        None
    } else {
        Some(cleaned.to_string())
    }
}
