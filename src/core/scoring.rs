use crate::core::criteria::{age_matches, contains_ignore_case, declares_bpl, locations_overlap};
use crate::models::{SchemeRecord, ScoringWeights, UserProfile};

/// Highest score a scheme can receive
pub const MAX_SCORE: u32 = 100;

/// Reason emitted when no specific factor applies
pub const GENERAL_REASON: &str = "General eligibility scheme";

/// Calculate how well a scheme fits a profile (base weight up to 100)
///
/// Scoring is additive. Each factor contributes its weight when it can be
/// determined and holds; unknown profile fields contribute nothing:
///
/// | factor                          | default weight |
/// |---------------------------------|----------------|
/// | occupation listed               | 30             |
/// | farmer + agriculture category   | 25             |
/// | student + education/skill       | 25             |
/// | age criterion satisfied         | 20             |
/// | land ownership                  | 15             |
/// | below poverty line              | 25             |
/// | location overlap                | 15             |
/// | bank account                    | 10             |
/// | base                            | 5              |
pub fn calculate_match_score(
    scheme: &SchemeRecord,
    profile: &UserProfile,
    weights: &ScoringWeights,
) -> u32 {
    let eligibility = &scheme.eligibility;
    let category = scheme.category.to_lowercase();
    let mut score: u32 = 0;

    if let (Some(occupation), Some(eligible)) = (profile.occupation(), &eligibility.occupation) {
        let occupation = occupation.to_lowercase();
        if eligible.iter().any(|o| o.to_lowercase() == occupation) {
            score = score.saturating_add(weights.occupation);
        }
    }

    if profile.farmer() && category.contains("agriculture") {
        score = score.saturating_add(weights.farmer_agriculture);
    }

    if profile.student() && (category.contains("education") || category.contains("skill")) {
        score = score.saturating_add(weights.student_education);
    }

    if let (Some(age), Some(criterion)) = (profile.age(), &eligibility.age) {
        if age_matches(criterion, age) {
            score = score.saturating_add(weights.age);
        }
    }

    if profile.owns_land() && eligibility.land_ownership.as_deref() == Some("yes") {
        score = score.saturating_add(weights.land_ownership);
    }

    if profile.income().map_or(false, declares_bpl)
        && eligibility.economic_status.as_deref() == Some("below poverty line")
    {
        score = score.saturating_add(weights.below_poverty_line);
    }

    if let (Some(location), Some(eligible)) = (profile.location(), &eligibility.location) {
        if locations_overlap(location, eligible) {
            score = score.saturating_add(weights.location);
        }
    }

    if profile.banked() && eligibility.bank_account.unwrap_or(false) {
        score = score.saturating_add(weights.bank_account);
    }

    score = score.saturating_add(weights.base);

    score.min(MAX_SCORE)
}

/// Human-readable reasons why a scheme fits, never empty
///
/// The age reason is reported whenever the age is known, whether or not the
/// scheme's age criterion is satisfied.
pub fn match_reasons(scheme: &SchemeRecord, profile: &UserProfile) -> Vec<String> {
    let eligibility = &scheme.eligibility;
    let mut reasons = Vec::new();

    if let Some(occupation) = profile.occupation() {
        if eligibility
            .text_values()
            .any(|value| contains_ignore_case(value, occupation))
        {
            reasons.push(format!("Matches your occupation: {}", occupation));
        }
    }

    if profile.farmer() && contains_ignore_case(&scheme.category, "agriculture") {
        reasons.push("Designed for farmers like you".to_string());
    }

    if profile.age().is_some() {
        reasons.push("You meet the age criteria".to_string());
    }

    if let Some(location) = profile.location() {
        if eligibility.location.as_deref().map_or(false, |l| !l.is_empty()) {
            reasons.push(format!("Available in {} area", location));
        }
    }

    if reasons.is_empty() {
        reasons.push(GENERAL_REASON.to_string());
    }

    reasons
}

/// Score and explain a single scheme
pub fn score_scheme(
    scheme: &SchemeRecord,
    profile: &UserProfile,
    weights: &ScoringWeights,
) -> (u32, Vec<String>) {
    (
        calculate_match_score(scheme, profile, weights),
        match_reasons(scheme, profile),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Eligibility;
    use serde_json::Map;

    fn create_scheme(category: &str, eligibility: Eligibility) -> SchemeRecord {
        SchemeRecord {
            id: "scheme".to_string(),
            name: "Test Scheme".to_string(),
            name_hi: None,
            description: String::new(),
            description_hi: None,
            benefits: String::new(),
            benefits_hi: None,
            eligibility_text: String::new(),
            eligibility_text_hi: None,
            category: category.to_string(),
            active: true,
            eligibility,
            extra: Map::new(),
        }
    }

    fn farmer_profile() -> UserProfile {
        UserProfile {
            age: Some(35),
            occupation: Some("farmer".to_string()),
            is_farmer: Some(true),
            land_ownership: Some(true),
            location: Some("rural".to_string()),
            ..UserProfile::default()
        }
    }

    fn agriculture_eligibility() -> Eligibility {
        Eligibility {
            occupation: Some(vec!["farmer".to_string()]),
            age: Some("18-60 years".to_string()),
            land_ownership: Some("yes".to_string()),
            ..Eligibility::default()
        }
    }

    #[test]
    fn test_farmer_scores_95() {
        let scheme = create_scheme("Agriculture", agriculture_eligibility());
        let score = calculate_match_score(&scheme, &farmer_profile(), &ScoringWeights::default());

        // 30 occupation + 25 farmer/agri + 20 age + 15 land + 5 base
        assert_eq!(score, 95);
    }

    #[test]
    fn test_empty_profile_gets_base() {
        let scheme = create_scheme("Agriculture", agriculture_eligibility());
        let score = calculate_match_score(&scheme, &UserProfile::default(), &ScoringWeights::default());
        assert_eq!(score, 5);
    }

    #[test]
    fn test_score_capped_at_100() {
        let eligibility = Eligibility {
            location: Some("rural".to_string()),
            economic_status: Some("below poverty line".to_string()),
            bank_account: Some(true),
            ..agriculture_eligibility()
        };
        let scheme = create_scheme("Agriculture", eligibility);
        let profile = UserProfile {
            income: Some("BPL".to_string()),
            has_bank_account: Some(true),
            ..farmer_profile()
        };

        let score = calculate_match_score(&scheme, &profile, &ScoringWeights::default());
        assert_eq!(score, MAX_SCORE);
    }

    #[test]
    fn test_malformed_age_ignored() {
        let eligibility = Eligibility {
            age: Some("varies".to_string()),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Healthcare", eligibility);
        let profile = UserProfile {
            age: Some(30),
            ..UserProfile::default()
        };

        assert_eq!(calculate_match_score(&scheme, &profile, &ScoringWeights::default()), 5);
    }

    #[test]
    fn test_student_skill_category() {
        let scheme = create_scheme("Skill Development", Eligibility::default());
        let profile = UserProfile {
            is_student: Some(true),
            ..UserProfile::default()
        };

        assert_eq!(calculate_match_score(&scheme, &profile, &ScoringWeights::default()), 30);
    }

    #[test]
    fn test_occupation_case_insensitive() {
        let eligibility = Eligibility {
            occupation: Some(vec!["Street Vendor".to_string()]),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Employment", eligibility);
        let profile = UserProfile {
            occupation: Some("street vendor".to_string()),
            ..UserProfile::default()
        };

        assert_eq!(calculate_match_score(&scheme, &profile, &ScoringWeights::default()), 35);
    }

    #[test]
    fn test_bpl_requires_exact_status() {
        let eligibility = Eligibility {
            economic_status: Some("Below Poverty Line".to_string()),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Housing", eligibility);
        let profile = UserProfile {
            income: Some("below poverty line".to_string()),
            ..UserProfile::default()
        };

        assert_eq!(calculate_match_score(&scheme, &profile, &ScoringWeights::default()), 5);
    }

    #[test]
    fn test_farmer_reasons() {
        let eligibility = Eligibility {
            location: Some("rural".to_string()),
            ..agriculture_eligibility()
        };
        let scheme = create_scheme("Agriculture", eligibility);

        let reasons = match_reasons(&scheme, &farmer_profile());
        assert_eq!(
            reasons,
            vec![
                "Matches your occupation: farmer",
                "Designed for farmers like you",
                "You meet the age criteria",
                "Available in rural area",
            ]
        );
    }

    #[test]
    fn test_age_reason_reported_when_known() {
        let eligibility = Eligibility {
            age: Some("60 years and above".to_string()),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Social Security", eligibility);
        let profile = UserProfile {
            age: Some(20),
            ..UserProfile::default()
        };

        let (score, reasons) = score_scheme(&scheme, &profile, &ScoringWeights::default());
        assert_eq!(score, 5);
        assert_eq!(reasons, vec!["You meet the age criteria"]);
    }

    #[test]
    fn test_occupation_reason_substring() {
        let eligibility = Eligibility {
            occupation: Some(vec!["small farmers".to_string()]),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Agriculture", eligibility);
        let profile = UserProfile {
            occupation: Some("Farmer".to_string()),
            ..UserProfile::default()
        };

        let (score, reasons) = score_scheme(&scheme, &profile, &ScoringWeights::default());
        assert_eq!(score, 5);
        assert_eq!(reasons, vec!["Matches your occupation: Farmer"]);
    }

    #[test]
    fn test_zero_age_counts_as_unknown() {
        let eligibility = Eligibility {
            age: Some("0-5 years".to_string()),
            ..Eligibility::default()
        };
        let scheme = create_scheme("Healthcare", eligibility);
        let profile = UserProfile {
            age: Some(0),
            ..UserProfile::default()
        };

        let (score, reasons) = score_scheme(&scheme, &profile, &ScoringWeights::default());
        assert_eq!(score, 5);
        assert_eq!(reasons, vec![GENERAL_REASON]);
    }

    #[test]
    fn test_oversized_weights_saturate() {
        let weights = ScoringWeights {
            occupation: u32::MAX,
            base: u32::MAX,
            ..ScoringWeights::default()
        };
        let scheme = create_scheme("Agriculture", agriculture_eligibility());

        assert_eq!(calculate_match_score(&scheme, &farmer_profile(), &weights), MAX_SCORE);
    }

    #[test]
    fn test_general_reason_fallback() {
        let scheme = create_scheme("Healthcare", Eligibility::default());
        assert_eq!(match_reasons(&scheme, &UserProfile::default()), vec![GENERAL_REASON]);
    }
}
