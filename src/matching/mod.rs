//! Match module
//!
//! Form snapshots sent to the matching service and the results it returns.

pub mod form;
pub mod result;

pub use form::{FormError, FormField, MatchForm, JOB_DESCRIPTION_FIELD, RESUME_FIELD};
pub use result::{error_message, MatchResult, FALLBACK_ERROR_MESSAGE};
