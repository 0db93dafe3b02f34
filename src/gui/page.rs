//! HTML pages served by the GUI

use crate::gui::jobs::{JobSnapshot, JobState};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }
h1 { margin-bottom: 0.2rem; }
.subtitle { color: #59636e; margin-top: 0; }
form { display: flex; gap: 0.75rem; align-items: flex-end; flex-wrap: wrap; margin: 1.5rem 0; }
label { display: flex; flex-direction: column; font-size: 0.9rem; gap: 0.3rem; }
label.url { flex: 3; }
label.file { flex: 1; }
input { padding: 0.5rem; border: 1px solid #d0d7de; border-radius: 6px; font-size: 1rem; }
button, a.button { padding: 0.55rem 1rem; border: 0; border-radius: 6px; background: #ff4b4b; color: white; font-size: 1rem; text-decoration: none; cursor: pointer; }
.log div { padding: 0.6rem 0.9rem; border-radius: 6px; margin: 0.4rem 0; }
.log-info { background: #e8f1fb; color: #0b4a8b; }
.log-success { background: #e6f6ea; color: #116329; }
.log-celebrate { background: #fff4d6; color: #7a4d00; font-weight: bold; }
.log-warning { background: #fff8c5; color: #7d4e00; }
.log-error { background: #ffebe9; color: #a40e26; }
"#;

/// Escapes text for HTML content and attribute values
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n{}<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(title),
        head_extra,
        STYLE,
        body
    )
}

/// Renders the crawl form
///
/// `url` and `filename` pre-fill the fields; `error` is shown above the form.
pub fn render_form(url: &str, filename: &str, error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<h1>🕷️ Omni-Crawler</h1>\n");
    body.push_str("<p class=\"subtitle\">Extractor de documentación para IA</p>\n");

    if let Some(error) = error {
        body.push_str(&format!(
            "<div class=\"log\"><div class=\"log-error\">❌ {}</div></div>\n",
            html_escape(error)
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/crawl\">\n\
         <label class=\"url\">URL de Documentación\n\
         <input type=\"url\" name=\"url\" value=\"{}\" placeholder=\"https://caddyserver.com/docs/\" required></label>\n\
         <label class=\"file\">Nombre Archivo\n\
         <input type=\"text\" name=\"filename\" value=\"{}\"></label>\n\
         <button type=\"submit\">🚀 Iniciar Extracción</button>\n\
         </form>\n",
        html_escape(url),
        html_escape(filename)
    ));

    layout("Omni-Crawler", "", &body)
}

/// Renders the progress page of a job
///
/// While the job runs the page refreshes itself every two seconds.
pub fn render_job(job: &JobSnapshot) -> String {
    let mut body = String::new();
    body.push_str("<h1>🕷️ Omni-Crawler</h1>\n");
    body.push_str(&format!(
        "<p class=\"subtitle\">{} → {}</p>\n",
        html_escape(&job.url),
        html_escape(&job.filename)
    ));

    body.push_str("<div class=\"log\">\n");
    for entry in &job.log {
        body.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            entry.severity.css_class(),
            html_escape(&entry.message)
        ));
    }
    if job.state == JobState::Running {
        body.push_str("<div class=\"log-info\">⏳ …</div>\n");
    }
    body.push_str("</div>\n");

    if job.download_ready {
        body.push_str(&format!(
            "<p><a class=\"button\" href=\"/jobs/{}/download\">📥 Bajar Markdown</a></p>\n",
            job.id
        ));
    }

    if job.state.is_terminal() {
        body.push_str("<p><a href=\"/\">← Nueva extracción</a></p>\n");
    }

    let refresh = if job.state == JobState::Running {
        "<meta http-equiv=\"refresh\" content=\"2\">\n"
    } else {
        ""
    };

    layout("Omni-Crawler", refresh, &body)
}
