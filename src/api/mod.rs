//! API module
//!
//! HTTP client for communicating with the matching service.

mod client;

pub use client::{ApiError, MatchClient, MatchReply};
