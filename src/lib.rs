//! Scheme Match - eligibility matching service for government welfare schemes
//!
//! This library provides the rule-based matcher behind the Sarkari Saathi
//! assistant. It scores a read-only scheme catalog against a partial user
//! profile, infers profile fields and category intent from chat messages,
//! and serves both through an HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, SchemeCategory, analyze_message, extract_profile_hints, match_schemes};
pub use crate::models::{SchemeRecord, Eligibility, UserProfile, MatchResult, ScoringWeights};
pub use crate::services::{SchemeCatalog, CatalogError};
