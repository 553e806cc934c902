//! Match result
//!
//! Response payloads of the matching service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Alert shown when the service rejects a request without a usable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while processing the resume";

/// How well a resume matches a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage, expected within 0..=100 but not validated
    pub match_score: f64,
    /// Skills present in both the resume and the job description
    pub matching_skills: Vec<String>,
    /// Skills the job asks for that the resume lacks
    pub missing_skills: Vec<String>,
}

/// Server-supplied message from a non-success body.
///
/// Only a non-empty string counts; anything else falls back to
/// [`FALLBACK_ERROR_MESSAGE`].
pub fn error_message(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}
