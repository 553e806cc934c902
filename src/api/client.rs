//! Matching service client
//!
//! Posts the resume form to the service and classifies its reply.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::{default_api_url, parse_bool_env, ApiConfig};
use crate::matching::{error_message, FormError, MatchForm, MatchResult};

/// Fixed endpoint path the form posts to.
pub const MATCH_ENDPOINT: &str = "/match";

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Response body is not JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Unexpected match result: {0}")]
    MalformedResult(#[source] serde_json::Error),
}

/// What the service answered.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchReply {
    /// 2xx with a well-formed result
    Matched(MatchResult),
    /// Non-2xx; `message` is the body's `error` string when present
    Rejected { status: u16, message: Option<String> },
}

/// Client for the matching service
#[derive(Debug, Clone)]
pub struct MatchClient {
    client: Client,
    base_url: String,
}

impl MatchClient {
    /// Create a client from config, applying environment overrides
    pub fn new(config: &ApiConfig) -> Self {
        let base_url = std::env::var("RESUME_MATCH_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| config.base_url.clone());

        Self::with_url(base_url, config)
    }

    /// Create with an explicit base URL; the rest comes from config and environment
    pub fn with_url(base_url: impl Into<String>, config: &ApiConfig) -> Self {
        let timeout_seconds = std::env::var("RESUME_MATCH_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .or(config.timeout_seconds);

        let verify_ssl =
            parse_bool_env("RESUME_MATCH_API_VERIFY_SSL").unwrap_or(config.verify_ssl);

        Self::with_settings(&base_url.into(), timeout_seconds, verify_ssl)
    }

    fn with_settings(base_url: &str, timeout_seconds: Option<u64>, verify_ssl: bool) -> Self {
        let mut builder = Client::builder().danger_accept_invalid_certs(!verify_ssl);
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds.max(1)));
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        MatchClient {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post the form and parse the reply.
    ///
    /// The body is parsed as JSON whatever the status; only a 2xx body must
    /// have the shape of a [`MatchResult`].
    pub async fn submit_match(&self, form: MatchForm) -> Result<MatchReply, ApiError> {
        let url = format!("{}{}", self.base_url, MATCH_ENDPOINT);
        let payload = form.into_multipart().await?;

        debug!(%url, "posting match form");
        let response = self.client.post(&url).multipart(payload).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "match response received");

        let value: Value = serde_json::from_str(&body).map_err(ApiError::InvalidBody)?;

        if status.is_success() {
            let result = serde_json::from_value(value).map_err(ApiError::MalformedResult)?;
            Ok(MatchReply::Matched(result))
        } else {
            Ok(MatchReply::Rejected {
                status: status.as_u16(),
                message: error_message(&value).map(str::to_string),
            })
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return default_api_url();
    }
    trimmed.trim_end_matches('/').to_string()
}
