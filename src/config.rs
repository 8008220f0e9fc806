use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::scoring::MAX_SCORE;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> String { "data/schemes.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_assistant_endpoint(),
            api_key: None,
            model: default_assistant_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_assistant_endpoint() -> String { "https://api.anthropic.com".to_string() }
fn default_assistant_model() -> String { "claude-sonnet-4-20250514".to_string() }
fn default_max_tokens() -> u32 { 2000 }
fn default_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_chat_limit")]
    pub chat_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_context_schemes")]
    pub context_schemes: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            chat_limit: default_chat_limit(),
            max_limit: default_max_limit(),
            context_schemes: default_context_schemes(),
        }
    }
}

fn default_search_limit() -> usize { 10 }
fn default_chat_limit() -> usize { 5 }
fn default_max_limit() -> usize { 50 }
fn default_context_schemes() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Per-factor weights; defaults reproduce the published scoring table
///
/// The table is product policy. Overrides exist for experiments only and must
/// keep `base >= MIN_BASE_WEIGHT` with every weight at most `MAX_SCORE`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_occupation_weight")]
    pub occupation: u32,
    #[serde(default = "default_category_weight")]
    pub farmer_agriculture: u32,
    #[serde(default = "default_category_weight")]
    pub student_education: u32,
    #[serde(default = "default_age_weight")]
    pub age: u32,
    #[serde(default = "default_land_weight")]
    pub land_ownership: u32,
    #[serde(default = "default_bpl_weight")]
    pub below_poverty_line: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(default = "default_bank_weight")]
    pub bank_account: u32,
    #[serde(default = "default_base_weight")]
    pub base: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            occupation: default_occupation_weight(),
            farmer_agriculture: default_category_weight(),
            student_education: default_category_weight(),
            age: default_age_weight(),
            land_ownership: default_land_weight(),
            below_poverty_line: default_bpl_weight(),
            location: default_location_weight(),
            bank_account: default_bank_weight(),
            base: default_base_weight(),
        }
    }
}

/// Smallest base weight; every active scheme scores at least this much
pub const MIN_BASE_WEIGHT: u32 = 5;

impl WeightsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base < MIN_BASE_WEIGHT {
            return Err(ConfigError::Message(format!(
                "scoring.weights.base must be at least {}, got {}",
                MIN_BASE_WEIGHT, self.base
            )));
        }

        let weights = [
            ("occupation", self.occupation),
            ("farmer_agriculture", self.farmer_agriculture),
            ("student_education", self.student_education),
            ("age", self.age),
            ("land_ownership", self.land_ownership),
            ("below_poverty_line", self.below_poverty_line),
            ("location", self.location),
            ("bank_account", self.bank_account),
            ("base", self.base),
        ];
        for (name, weight) in weights {
            if weight > MAX_SCORE {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be at most {}, got {}",
                    name, MAX_SCORE, weight
                )));
            }
        }

        Ok(())
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            occupation: config.occupation,
            farmer_agriculture: config.farmer_agriculture,
            student_education: config.student_education,
            age: config.age,
            land_ownership: config.land_ownership,
            below_poverty_line: config.below_poverty_line,
            location: config.location,
            bank_account: config.bank_account,
            base: config.base,
        }
    }
}

fn default_occupation_weight() -> u32 { 30 }
fn default_category_weight() -> u32 { 25 }
fn default_age_weight() -> u32 { 20 }
fn default_land_weight() -> u32 { 15 }
fn default_bpl_weight() -> u32 { 25 }
fn default_location_weight() -> u32 { 15 }
fn default_bank_weight() -> u32 { 10 }
fn default_base_weight() -> u32 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SCHEMES_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SCHEMES__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SCHEMES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        Self::validated(settings.try_deserialize()?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SCHEMES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        Self::validated(settings.try_deserialize()?)
    }

    fn validated(settings: Settings) -> Result<Self, ConfigError> {
        settings.scoring.weights.validate()?;
        Ok(settings)
    }
}

/// Apply well-known provider variables on top of the layered config
///
/// `ANTHROPIC_API_KEY` wins over `assistant.api_key`.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
        builder = builder.set_override("assistant.api_key", api_key)?;
    }

    builder.build()
}
