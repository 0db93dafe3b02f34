//! GUI server tests: submit a crawl through the form and download the result

use crate::{mount_docs_site, test_config};
use omni_crawler::gui::{build_router, AppState};
use std::time::Duration;
use tempfile::tempdir;
use tokio::net::TcpListener;
use wiremock::MockServer;

async fn spawn_gui(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Polls the status endpoint until the job leaves the running state
async fn wait_for_job(client: &reqwest::Client, base: &str, id: u64) -> serde_json::Value {
    for _ in 0..200 {
        let snapshot: serde_json::Value = client
            .get(format!("{}/jobs/{}/status", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if snapshot["state"] != "running" {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("job {} did not finish", id);
}

#[tokio::test]
async fn test_gui_crawl_and_download() {
    let site = MockServer::start().await;
    mount_docs_site(&site).await;

    let dir = tempdir().unwrap();
    let mut config = test_config();
    config.gui.output_dir = dir.path().display().to_string();

    let base = spawn_gui(AppState::new(config)).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let seed = format!("{}/docs/", site.uri());
    let response = client
        .post(format!("{}/crawl", base))
        .form(&[("url", seed.as_str()), ("filename", "../site docs.md")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/jobs/1");

    let snapshot = wait_for_job(&client, &base, 1).await;
    assert_eq!(snapshot["state"], "succeeded", "{}", snapshot["error"]);
    assert_eq!(snapshot["url"], seed.as_str());
    assert_eq!(snapshot["filename"], "site docs.md");
    assert_eq!(snapshot["download_ready"], true);
    assert!(dir.path().join("site docs.md").exists());

    let page = client
        .get(format!("{}/jobs/1", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Bajar Markdown"));
    assert!(page.contains("log-celebrate"));

    let download = client
        .get(format!("{}/jobs/1/download", base))
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), reqwest::StatusCode::OK);
    assert!(download.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
    assert_eq!(
        download.headers()["content-disposition"],
        "attachment; filename=\"site docs.md\""
    );

    let body = download.text().await.unwrap();
    assert!(body.starts_with("# Documentación de "));
    assert_eq!(body.matches("## FUENTE: ").count(), 3);
}

#[tokio::test]
async fn test_gui_index_failure_marks_job_failed() {
    let site = MockServer::start().await;

    let dir = tempdir().unwrap();
    let mut config = test_config();
    config.gui.output_dir = dir.path().display().to_string();

    let base = spawn_gui(AppState::new(config)).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    client
        .post(format!("{}/crawl", base))
        .form(&[("url", format!("{}/docs/", site.uri()).as_str()), ("filename", "")])
        .send()
        .await
        .unwrap();

    let snapshot = wait_for_job(&client, &base, 1).await;
    assert_eq!(snapshot["state"], "failed");
    assert_eq!(snapshot["filename"], "docs.md");
    assert_eq!(snapshot["download_ready"], false);

    let log = snapshot["log"].as_array().unwrap();
    let last = log.last().unwrap();
    assert_eq!(last["severity"], "error");
    assert!(last["message"].as_str().unwrap().starts_with("❌ Error crítico:"));
    assert!(!dir.path().join("docs.md").exists());
}
