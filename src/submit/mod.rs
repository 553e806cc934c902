//! Submission handler
//!
//! Drives one form submission end to end: snapshot the form, disable the
//! submit control, post to the matching service, then render the result or
//! raise an alert. The submit control is restored on every exit path.

mod guard;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::{ApiError, MatchClient, MatchReply};
use crate::matching::FALLBACK_ERROR_MESSAGE;
use crate::page::{render_results, Page};

use guard::{InFlight, SubmitGuard};

/// Alert for transport and parse failures.
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred while processing the request";
/// Alert for a 2xx reply that is not a match result.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "The server returned an unexpected response";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results were rendered into the page
    Rendered,
    /// The service answered with a non-success status
    Rejected,
    /// The request or its reply could not be processed
    Failed,
    /// Another submission was still in flight
    Ignored,
}

pub struct SubmissionHandler {
    client: MatchClient,
    in_flight: AtomicBool,
    diagnostics: bool,
}

impl SubmissionHandler {
    pub fn new(client: MatchClient) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            diagnostics: false,
        }
    }

    /// Log failures at error level with their cause.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handle one submission of `page`'s form.
    ///
    /// Overlapping submissions are rejected, not queued.
    pub async fn handle_submit(&self, page: &Page) -> SubmitOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            debug!("submission ignored: another request is in flight");
            return SubmitOutcome::Ignored;
        };

        let span = info_span!("submission", id = %Uuid::new_v4());
        self.submit(page).instrument(span).await
    }

    async fn submit(&self, page: &Page) -> SubmitOutcome {
        let form = page.with(|view| view.form.clone());
        let _control = SubmitGuard::engage(page);

        match self.client.submit_match(form).await {
            Ok(MatchReply::Matched(result)) => {
                info!(score = result.match_score, "match result received");
                page.with(|view| render_results(&mut view.results, &result));
                SubmitOutcome::Rendered
            }
            Ok(MatchReply::Rejected { status, message }) => {
                if self.diagnostics {
                    warn!(status, message = message.as_deref(), "match request rejected");
                } else {
                    debug!(status, message = message.as_deref(), "match request rejected");
                }
                let message = message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                page.with(|view| view.alert(message));
                SubmitOutcome::Rejected
            }
            Err(err) => {
                if self.diagnostics {
                    error!(error = %err, "match request failed");
                } else {
                    debug!(error = %err, "match request failed");
                }
                page.with(|view| view.alert(alert_message(&err)));
                SubmitOutcome::Failed
            }
        }
    }
}

fn alert_message(err: &ApiError) -> &'static str {
    match err {
        ApiError::MalformedResult(_) => MALFORMED_RESPONSE_MESSAGE,
        ApiError::Network(_) | ApiError::Form(_) | ApiError::InvalidBody(_) => {
            REQUEST_FAILED_MESSAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::matching::{FormField, MatchForm, JOB_DESCRIPTION_FIELD, RESUME_FIELD};
    use crate::page::{PageView, BUSY_LABEL, SUBMIT_LABEL};
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::io::Write;
    use std::net::SocketAddr;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use tokio::net::TcpListener;
    use tokio::sync::Notify;

    async fn spawn_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (addr, handle)
    }

    fn handler_for(addr: SocketAddr) -> SubmissionHandler {
        SubmissionHandler::new(MatchClient::with_url(
            format!("http://{addr}"),
            &ApiConfig::default(),
        ))
    }

    fn resume_fixture() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        file.write_all(b"PK fake docx").unwrap();
        file
    }

    fn page_for(resume: &NamedTempFile) -> Page {
        Page::new(PageView::new(MatchForm::new(vec![
            FormField::file(RESUME_FIELD, Some(resume.path().to_path_buf())),
            FormField::text(JOB_DESCRIPTION_FIELD, "Python and SQL, Go is a plus"),
        ])))
    }

    fn reply_with(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/match",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    fn assert_control_restored(page: &Page) {
        let view = page.snapshot();
        assert!(!view.submit.disabled, "submit control left disabled");
        assert_eq!(view.submit.label, SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn success_renders_results() {
        let (addr, server) = spawn_server(reply_with(
            StatusCode::OK,
            json!({
                "match_score": 72,
                "matching_skills": ["Python", "SQL"],
                "missing_skills": ["Go"],
            }),
        ))
        .await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Rendered);
        let view = page.snapshot();
        assert!(view.results.is_visible());
        assert_eq!(view.results.fill_percent, 72.0);
        assert_eq!(view.results.score_text, "72%");
        assert_eq!(view.results.matching_skills.texts(), vec!["Python", "SQL"]);
        assert_eq!(view.results.missing_skills.texts(), vec!["Go"]);
        assert!(view.alert_message().is_none());
        assert_control_restored(&page);

        server.abort();
    }

    #[tokio::test]
    async fn error_status_alerts_server_message() {
        let (addr, server) = spawn_server(reply_with(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Unsupported file type" }),
        ))
        .await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        let view = page.snapshot();
        assert_eq!(view.alert_message(), Some("Unsupported file type"));
        assert!(!view.results.is_visible());
        assert_control_restored(&page);

        server.abort();
    }

    #[tokio::test]
    async fn error_status_without_message_alerts_fallback() {
        let (addr, server) =
            spawn_server(reply_with(StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(page.snapshot().alert_message(), Some(FALLBACK_ERROR_MESSAGE));
        assert_control_restored(&page);

        server.abort();
    }

    #[tokio::test]
    async fn error_status_with_null_body_alerts_fallback() {
        let (addr, server) =
            spawn_server(reply_with(StatusCode::INTERNAL_SERVER_ERROR, Value::Null)).await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(page.snapshot().alert_message(), Some(FALLBACK_ERROR_MESSAGE));
        assert_control_restored(&page);

        server.abort();
    }

    #[tokio::test]
    async fn network_failure_alerts_generic_message() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let view = page.snapshot();
        assert_eq!(view.alert_message(), Some(REQUEST_FAILED_MESSAGE));
        assert!(!view.results.is_visible());
        assert_control_restored(&page);
    }

    #[tokio::test]
    async fn unreadable_resume_alerts_generic_message() {
        let page = Page::new(PageView::new(MatchForm::new(vec![FormField::file(
            RESUME_FIELD,
            Some("/no/such/resume.pdf".into()),
        )])));
        // Never contacted: the form fails to encode first.
        let handler = SubmissionHandler::new(MatchClient::with_url(
            "http://127.0.0.1:9",
            &ApiConfig::default(),
        ));

        let outcome = handler.handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(page.snapshot().alert_message(), Some(REQUEST_FAILED_MESSAGE));
        assert_control_restored(&page);
    }

    #[tokio::test]
    async fn malformed_success_alerts_distinct_message() {
        let (addr, server) = spawn_server(reply_with(
            StatusCode::OK,
            json!({ "match_score": "high", "matching_skills": [] }),
        ))
        .await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let view = page.snapshot();
        assert_eq!(view.alert_message(), Some(MALFORMED_RESPONSE_MESSAGE));
        assert!(!view.results.is_visible());
        assert_control_restored(&page);

        server.abort();
    }

    async fn alternating_payloads(State(calls): State<Arc<AtomicUsize>>) -> Json<Value> {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Json(json!({
                "match_score": 35.5,
                "matching_skills": ["java", "aws", "git"],
                "missing_skills": ["react", "docker"],
            }))
        } else {
            Json(json!({
                "match_score": 90,
                "matching_skills": ["rust"],
                "missing_skills": ["kubernetes"],
            }))
        }
    }

    #[tokio::test]
    async fn second_render_leaves_no_residue_from_first() {
        let app = Router::new()
            .route("/match", post(alternating_payloads))
            .with_state(Arc::new(AtomicUsize::new(0)));
        let (addr, server) = spawn_server(app).await;
        let resume = resume_fixture();
        let page = page_for(&resume);
        let handler = handler_for(addr);

        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Rendered);
        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Rendered);

        let view = page.snapshot();
        assert_eq!(view.results.score_text, "90%");
        assert_eq!(view.results.matching_skills.texts(), vec!["rust"]);
        assert_eq!(view.results.missing_skills.texts(), vec!["kubernetes"]);
        assert_control_restored(&page);

        server.abort();
    }

    async fn match_then_reject(
        State(calls): State<Arc<AtomicUsize>>,
    ) -> (StatusCode, Json<Value>) {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            (
                StatusCode::OK,
                Json(json!({
                    "match_score": 64,
                    "matching_skills": ["Python", "SQL"],
                    "missing_skills": ["Go"],
                })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Resume is empty" })),
            )
        }
    }

    #[tokio::test]
    async fn rejection_after_render_keeps_previous_results() {
        let app = Router::new()
            .route("/match", post(match_then_reject))
            .with_state(Arc::new(AtomicUsize::new(0)));
        let (addr, server) = spawn_server(app).await;
        let resume = resume_fixture();
        let page = page_for(&resume);
        let handler = handler_for(addr);

        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Rendered);
        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Rejected);

        let view = page.snapshot();
        assert_eq!(view.alert_message(), Some("Resume is empty"));
        assert!(view.results.is_visible());
        assert_eq!(view.results.score_text, "64%");
        assert_eq!(view.results.matching_skills.texts(), vec!["Python", "SQL"]);
        assert_eq!(view.results.missing_skills.texts(), vec!["Go"]);
        assert_control_restored(&page);

        server.abort();
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Warn-level output of one rejected submission.
    async fn warnings_for_rejection(diagnostics: bool) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let (addr, server) = spawn_server(reply_with(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Unsupported file type" }),
        ))
        .await;
        let resume = resume_fixture();
        let page = page_for(&resume);
        let handler = handler_for(addr).with_diagnostics(diagnostics);

        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Rejected);
        server.abort();
        logs.text()
    }

    #[tokio::test]
    async fn rejection_is_quiet_without_diagnostics() {
        let output = warnings_for_rejection(false).await;
        assert!(!output.contains("match request rejected"), "{output}");
    }

    #[tokio::test]
    async fn rejection_is_logged_with_diagnostics() {
        let output = warnings_for_rejection(true).await;
        assert!(output.contains("match request rejected"), "{output}");
        assert!(output.contains("Unsupported file type"), "{output}");
    }

    #[tokio::test]
    async fn empty_skill_lists_render_empty_regions() {
        let (addr, server) = spawn_server(reply_with(
            StatusCode::OK,
            json!({ "match_score": 12.5, "matching_skills": [], "missing_skills": [] }),
        ))
        .await;
        let resume = resume_fixture();
        let page = page_for(&resume);

        let outcome = handler_for(addr).handle_submit(&page).await;

        assert_eq!(outcome, SubmitOutcome::Rendered);
        let view = page.snapshot();
        assert!(view.results.is_visible());
        assert!(view.results.matching_skills.is_empty());
        assert!(view.results.missing_skills.is_empty());
        assert_control_restored(&page);

        server.abort();
    }

    async fn held_reply(State(release): State<Arc<Notify>>) -> Json<Value> {
        release.notified().await;
        Json(json!({
            "match_score": 50,
            "matching_skills": ["sql"],
            "missing_skills": [],
        }))
    }

    async fn wait_until_in_flight(handler: &SubmissionHandler) {
        for _ in 0..200 {
            if handler.is_in_flight() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("submission never started");
    }

    #[tokio::test]
    async fn overlapping_submission_is_ignored_while_busy() {
        let release = Arc::new(Notify::new());
        let app = Router::new()
            .route("/match", post(held_reply))
            .with_state(release.clone());
        let (addr, server) = spawn_server(app).await;
        let resume = resume_fixture();
        let page = page_for(&resume);
        let handler = Arc::new(handler_for(addr));

        let first = tokio::spawn({
            let handler = handler.clone();
            let page = page.clone();
            async move { handler.handle_submit(&page).await }
        });
        wait_until_in_flight(&handler).await;

        let busy = page.snapshot();
        assert!(busy.submit.disabled);
        assert_eq!(busy.submit.label, BUSY_LABEL);

        assert_eq!(handler.handle_submit(&page).await, SubmitOutcome::Ignored);
        assert!(page.snapshot().submit.disabled);

        release.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Rendered);
        assert!(!handler.is_in_flight());
        assert_control_restored(&page);

        server.abort();
    }

    #[tokio::test]
    async fn cancelled_submission_restores_control() {
        let release = Arc::new(Notify::new());
        let app = Router::new()
            .route("/match", post(held_reply))
            .with_state(release);
        let (addr, server) = spawn_server(app).await;
        let resume = resume_fixture();
        let page = page_for(&resume);
        let handler = handler_for(addr);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(200), handler.handle_submit(&page)).await;

        assert!(timed_out.is_err());
        assert!(!handler.is_in_flight());
        assert_control_restored(&page);
        assert!(!page.snapshot().results.is_visible());

        server.abort();
    }
}
