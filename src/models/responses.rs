use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, SchemeRecord, UserProfile};

/// Response for scheme listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeListResponse {
    pub schemes: Vec<SchemeRecord>,
    pub count: usize,
}

/// Response for structured search; `count` is the total before truncation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeSearchResponse {
    pub matched_schemes: Vec<MatchResult>,
    pub count: usize,
}

/// Response for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub matched_schemes: Vec<MatchResult>,
    pub extracted_profile: Option<UserProfile>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub assistant_configured: bool,
    pub schemes_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
