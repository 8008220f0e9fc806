// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{SchemeRecord, Eligibility, UserProfile, MatchResult, ScoringWeights, ChatMessage};
pub use requests::{SchemeSearchRequest, ChatRequest, SchemeQuery};
pub use responses::{SchemeListResponse, SchemeSearchResponse, ChatResponse, HealthResponse, ErrorResponse};
