use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::models::UserProfile;

/// Scheme categories that can be inferred from a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeCategory {
    Agriculture,
    Healthcare,
    Housing,
    Employment,
    Education,
    #[serde(rename = "Social Security")]
    SocialSecurity,
    #[serde(rename = "Financial Inclusion")]
    FinancialInclusion,
}

impl SchemeCategory {
    /// Detection order; the first category with a matching keyword wins
    pub const ALL: [SchemeCategory; 7] = [
        SchemeCategory::Agriculture,
        SchemeCategory::Healthcare,
        SchemeCategory::Housing,
        SchemeCategory::Employment,
        SchemeCategory::Education,
        SchemeCategory::SocialSecurity,
        SchemeCategory::FinancialInclusion,
    ];

    /// Catalog category name
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeCategory::Agriculture => "Agriculture",
            SchemeCategory::Healthcare => "Healthcare",
            SchemeCategory::Housing => "Housing",
            SchemeCategory::Employment => "Employment",
            SchemeCategory::Education => "Education",
            SchemeCategory::SocialSecurity => "Social Security",
            SchemeCategory::FinancialInclusion => "Financial Inclusion",
        }
    }

    /// English and Hindi intent keywords, lowercase
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SchemeCategory::Agriculture => &["farm", "farmer", "crop", "agriculture", "खेती", "किसान"],
            SchemeCategory::Healthcare => &["health", "medical", "hospital", "insurance", "स्वास्थ्य", "बीमारी"],
            SchemeCategory::Housing => &["house", "home", "housing", "shelter", "घर", "मकान"],
            SchemeCategory::Employment => &["job", "employment", "business", "enterprise", "रोजगार", "व्यवसाय"],
            SchemeCategory::Education => &["education", "study", "school", "skill", "शिक्षा", "पढ़ाई"],
            SchemeCategory::SocialSecurity => &["pension", "retirement", "old age", "पेंशन", "बुढ़ापा"],
            SchemeCategory::FinancialInclusion => &["bank", "account", "loan", "credit", "बैंक", "ऋण"],
        }
    }
}

impl std::fmt::Display for SchemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conversational cues. Farmer is applied before student, so a message with
// both ends up with occupation "student".
const FARMER_CUES: &[&str] = &["farmer", "खेती", "किसान"];
const STUDENT_CUES: &[&str] = &["student", "छात्र", "पढ़ाई"];

// Narrower cue sets used when reporting learned fields back to the caller
const FARMER_HINTS: &[&str] = &["farmer", "खेती"];
const STUDENT_HINTS: &[&str] = &["student", "छात्र"];

// Ages may be written with ASCII or Devanagari digits ("45 साल", "४५ साल")
static AGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9०-९]{1,2})\s*(?:year|साल|वर्ष)").expect("age pattern is valid")
});

/// Value of an ASCII or Devanagari decimal digit
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '०'..='९' => Some(c as u32 - '०' as u32),
        _ => None,
    }
}

fn parse_age(digits: &str) -> Option<u32> {
    digits
        .chars()
        .try_fold(0, |age, c| digit_value(c).map(|d| age * 10 + d))
}

/// Profile and category inferred from one chat message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageAnalysis {
    pub profile: UserProfile,
    pub category: Option<SchemeCategory>,
}

fn mentions_any(message: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| message.contains(cue))
}

/// First category, in declaration order, with a keyword present in the message
pub fn detect_category(message: &str) -> Option<SchemeCategory> {
    let message = message.to_lowercase();
    SchemeCategory::ALL
        .into_iter()
        .find(|category| mentions_any(&message, category.keywords()))
}

/// Apply occupation cues to a copy of `profile`
fn apply_occupation_cues(
    message: &str,
    profile: &UserProfile,
    farmer_cues: &[&str],
    student_cues: &[&str],
) -> UserProfile {
    let mut enhanced = profile.clone();

    if mentions_any(message, farmer_cues) {
        enhanced.is_farmer = Some(true);
        enhanced.occupation = Some("farmer".to_string());
    }

    if mentions_any(message, student_cues) {
        enhanced.is_student = Some(true);
        enhanced.occupation = Some("student".to_string());
    }

    enhanced
}

/// Enhance the profile and detect a category from a chat message
///
/// The input profile is left untouched.
pub fn analyze_message(message: &str, profile: &UserProfile) -> MessageAnalysis {
    let lowered = message.to_lowercase();

    MessageAnalysis {
        profile: apply_occupation_cues(&lowered, profile, FARMER_CUES, STUDENT_CUES),
        category: detect_category(&lowered),
    }
}

/// Profile fields learned from a message, or `None` when nothing changed
///
/// Picks up farmer/student cues and an age such as "25 years" or "25 साल".
pub fn extract_profile_hints(message: &str, profile: &UserProfile) -> Option<UserProfile> {
    let lowered = message.to_lowercase();
    let mut extracted = apply_occupation_cues(&lowered, profile, FARMER_HINTS, STUDENT_HINTS);

    if let Some(age) = AGE_PATTERN
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_age(m.as_str()))
    {
        extracted.age = Some(age);
    }

    if extracted != *profile {
        Some(extracted)
    } else {
        None
    }
}
