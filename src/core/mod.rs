// Core algorithm exports
pub mod criteria;
pub mod extractor;
pub mod matcher;
pub mod scoring;

pub use criteria::{AgeCriterion, age_matches};
pub use extractor::{SchemeCategory, MessageAnalysis, analyze_message, detect_category, extract_profile_hints};
pub use matcher::{Matcher, match_schemes};
pub use scoring::{calculate_match_score, match_reasons, score_scheme, MAX_SCORE};
