use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ChatMessage, UserProfile};

/// Structured scheme search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SchemeSearchRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    /// Upper bound is `matching.max_limit`, checked by the handler
    #[validate(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    10
}

/// Conversational request from the chat client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Query string for scheme listing and lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemeQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}
