use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Government scheme record as stored in the catalog
///
/// Records are immutable once loaded. Fields the matcher does not read are
/// kept in `extra` so they pass through to API responses untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_hi: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_hi: Option<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_hi: Option<String>,
    #[serde(default)]
    pub eligibility_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_text_hi: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub eligibility: Eligibility,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemeRecord {
    /// Project display fields into the requested language
    ///
    /// Only "hi" has localized variants; any other code returns the record
    /// unchanged. Missing Hindi variants fall back to the English text.
    pub fn localized(&self, language: &str) -> SchemeRecord {
        let mut scheme = self.clone();
        if language != "hi" {
            return scheme;
        }

        if let Some(name) = &self.name_hi {
            scheme.name = name.clone();
        }
        if let Some(description) = &self.description_hi {
            scheme.description = description.clone();
        }
        if let Some(benefits) = &self.benefits_hi {
            scheme.benefits = benefits.clone();
        }
        if let Some(text) = &self.eligibility_text_hi {
            scheme.eligibility_text = text.clone();
        }
        scheme
    }

    /// Whether the scheme's category equals `category`, ignoring case
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Typed eligibility criteria
///
/// Decoding is lenient: a criterion of the wrong JSON shape is treated as
/// absent instead of rejecting the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    #[serde(default, deserialize_with = "lenient_text_list", skip_serializing_if = "Option::is_none")]
    pub occupation: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub land_ownership: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub economic_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag", skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<bool>,
}

impl Eligibility {
    /// All textual criterion values, in declaration order
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.occupation
            .iter()
            .flatten()
            .map(String::as_str)
            .chain(self.age.as_deref())
            .chain(self.land_ownership.as_deref())
            .chain(self.economic_status.as_deref())
            .chain(self.location.as_deref())
    }
}

fn default_true() -> bool {
    true
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(text) => Some(vec![text]),
        _ => None,
    })
}

/// Truthiness of an arbitrary JSON value; `null` is "not stated"
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::String(text) => Some(!text.is_empty()),
        Value::Number(number) => Some(number.as_f64().map_or(false, |n| n != 0.0)),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(fields) => Some(!fields.is_empty()),
    })
}

/// Partial user profile, supplied by the caller or inferred from chat
///
/// Every field may be unknown. Empty strings count as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub income: Option<String>,
    /// Demographic category (SC/ST/OBC/General); not used for scoring
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub land_ownership: Option<bool>,
    #[serde(default)]
    pub is_farmer: Option<bool>,
    #[serde(default)]
    pub is_student: Option<bool>,
    #[serde(default)]
    pub has_bank_account: Option<bool>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: None,
            occupation: None,
            location: None,
            income: None,
            category: None,
            land_ownership: None,
            is_farmer: None,
            is_student: None,
            has_bank_account: None,
            language: default_language(),
        }
    }
}

impl UserProfile {
    /// Age, with 0 treated as unknown
    pub fn age(&self) -> Option<u32> {
        self.age.filter(|age| *age > 0)
    }

    pub fn occupation(&self) -> Option<&str> {
        non_empty(self.occupation.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    pub fn income(&self) -> Option<&str> {
        non_empty(self.income.as_deref())
    }

    pub fn farmer(&self) -> bool {
        self.is_farmer.unwrap_or(false)
    }

    pub fn student(&self) -> bool {
        self.is_student.unwrap_or(false)
    }

    pub fn owns_land(&self) -> bool {
        self.land_ownership.unwrap_or(false)
    }

    pub fn banked(&self) -> bool {
        self.has_bank_account.unwrap_or(false)
    }

    /// Known fields as `(name, value)` pairs, for prompt context
    pub fn known_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        if let Some(age) = self.age() {
            fields.push(("age", age.to_string()));
        }
        let texts = [
            ("occupation", self.occupation()),
            ("location", self.location()),
            ("income", self.income()),
            ("category", non_empty(self.category.as_deref())),
        ];
        for (name, value) in texts {
            if let Some(value) = value {
                fields.push((name, value.to_string()));
            }
        }
        let flags = [
            ("land_ownership", self.owns_land()),
            ("is_farmer", self.farmer()),
            ("is_student", self.student()),
            ("has_bank_account", self.banked()),
        ];
        for (name, set) in flags {
            if set {
                fields.push((name, "true".to_string()));
            }
        }
        if !self.language.is_empty() {
            fields.push(("language", self.language.clone()));
        }

        fields
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn default_language() -> String {
    "en".to_string()
}

/// Scheme annotated with its match score and reasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub scheme: SchemeRecord,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
}

/// Additive weights for each scoring factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub occupation: u32,
    pub farmer_agriculture: u32,
    pub student_education: u32,
    pub age: u32,
    pub land_ownership: u32,
    pub below_poverty_line: u32,
    pub location: u32,
    pub bank_account: u32,
    pub base: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            occupation: 30,
            farmer_agriculture: 25,
            student_education: 25,
            age: 20,
            land_ownership: 15,
            below_poverty_line: 25,
            location: 15,
            bank_account: 10,
            base: 5,
        }
    }
}

/// Chat turn forwarded to the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
