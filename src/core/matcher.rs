use std::sync::Arc;
use crate::core::{extractor, scoring::score_scheme};
use crate::models::{MatchResult, SchemeRecord, ScoringWeights, UserProfile};
use crate::services::SchemeCatalog;

/// Score and rank schemes against a profile
///
/// # Pipeline Stages
/// 1. Drop inactive schemes
/// 2. Category filter (exact, case-insensitive) when a category is given
/// 3. Scoring and reasons
/// 4. Stable descending sort by score
///
/// Ties keep the iteration order of `schemes`. Callers truncate afterwards.
pub fn match_schemes<'a, I>(
    schemes: I,
    profile: &UserProfile,
    category: Option<&str>,
    weights: &ScoringWeights,
) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a SchemeRecord>,
{
    let category = category.filter(|c| !c.is_empty());

    let mut matched: Vec<MatchResult> = schemes
        .into_iter()
        // Stage 1: active only
        .filter(|scheme| scheme.active)
        // Stage 2: category filter
        .filter(|scheme| category.map_or(true, |c| scheme.in_category(c)))
        // Stage 3: scoring
        .filter_map(|scheme| {
            let (match_score, match_reasons) = score_scheme(scheme, profile, weights);
            if match_score > 0 {
                Some(MatchResult {
                    scheme: scheme.clone(),
                    match_score,
                    match_reasons,
                })
            } else {
                None
            }
        })
        .collect();

    // Stage 4: `sort_by` is stable, so equal scores keep catalog order
    matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    matched
}

/// Matching engine bound to a read-only catalog
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<SchemeCatalog>,
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(catalog: Arc<SchemeCatalog>, weights: ScoringWeights) -> Self {
        Self { catalog, weights }
    }

    pub fn with_default_weights(catalog: Arc<SchemeCatalog>) -> Self {
        Self::new(catalog, ScoringWeights::default())
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank the catalog for a structured profile
    pub fn match_profile(&self, profile: &UserProfile, category: Option<&str>) -> Vec<MatchResult> {
        let matches = match_schemes(self.catalog.all(), profile, category, &self.weights);

        tracing::debug!(
            "Matched {} of {} schemes (category: {:?})",
            matches.len(),
            self.catalog.len(),
            category
        );

        matches
    }

    /// Rank the catalog using what a chat message reveals
    ///
    /// The message may enrich the profile and narrow the search to a
    /// detected category before matching.
    pub fn match_from_conversation(&self, message: &str, profile: &UserProfile) -> Vec<MatchResult> {
        let analysis = extractor::analyze_message(message, profile);
        let category = analysis.category.map(|c| c.as_str());

        tracing::debug!("Conversation category: {:?}", category);

        self.match_profile(&analysis.profile, category)
    }

    /// Profile fields learned from a single message, if any
    pub fn extract_profile_hints(&self, message: &str, profile: &UserProfile) -> Option<UserProfile> {
        extractor::extract_profile_hints(message, profile)
    }
}
