use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
const DEFAULT_OUTPUT_DIR: &str = "output/recipes";
const DEFAULT_LOG_DIR: &str = "output/logs";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const REQUIRED_KEYS: [&str; 2] = ["GEMINI_API_KEY", "PIXABAY_API_KEY"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Invalid value for {key}: '{value}' (expected a positive integer)")]
    Invalid { key: String, value: String },
}

/// Target counts fed into the generation prompts and the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSettings {
    pub min_ingredients: usize,
    pub max_ingredients: usize,
    pub min_steps: usize,
    pub max_steps: usize,
    pub faq_count: usize,
    pub tips_count: usize,
    pub variation_count: usize,
    pub storage_sections: usize,
    /// The SEO pass asks for this many keyword appearances, or one more.
    pub keyword_target: usize,
}

impl Default for RecipeSettings {
    fn default() -> Self {
        Self {
            min_ingredients: 6,
            max_ingredients: 12,
            min_steps: 4,
            max_steps: 8,
            faq_count: 7,
            tips_count: 7,
            variation_count: 4,
            storage_sections: 4,
            keyword_target: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub orientation: String,
    /// Pixabay hit field holding the preferred size variant.
    pub size_field: String,
    pub candidates: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            orientation: "horizontal".to_string(),
            size_field: "webformatURL".to_string(),
            candidates: 10,
        }
    }
}

/// Application configuration, built once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub pixabay_api_key: String,
    pub gemini_model: String,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub rust_log: String,
    pub recipe: RecipeSettings,
    pub images: ImageSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing));
        }

        let max_retries = match get("MAX_RETRIES") {
            Some(raw) => parse_positive("MAX_RETRIES", &raw)? as u32,
            None => DEFAULT_MAX_RETRIES,
        };
        let timeout_secs = match get("REQUEST_TIMEOUT") {
            Some(raw) => parse_positive("REQUEST_TIMEOUT", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY").unwrap_or_default(),
            pixabay_api_key: get("PIXABAY_API_KEY").unwrap_or_default(),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            output_dir: PathBuf::from(
                get("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            log_dir: PathBuf::from(get("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
            max_retries,
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            recipe: RecipeSettings::default(),
            images: ImageSettings::default(),
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied_when_only_keys_present() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g-key"),
            ("PIXABAY_API_KEY", "p-key"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key, "g-key");
        assert_eq!(config.pixabay_api_key, "p-key");
        assert_eq!(config.gemini_model, "gemini-1.5-pro-latest");
        assert_eq!(config.output_dir, PathBuf::from("output/recipes"));
        assert_eq!(config.log_dir, PathBuf::from("output/logs"));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.recipe, RecipeSettings::default());
    }

    #[test]
    fn test_missing_keys_are_all_listed() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingRequired(vec![
                "GEMINI_API_KEY".to_string(),
                "PIXABAY_API_KEY".to_string()
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing required configuration: GEMINI_API_KEY, PIXABAY_API_KEY"
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g-key"),
            ("PIXABAY_API_KEY", "   "),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingRequired(vec!["PIXABAY_API_KEY".to_string()])
        );
    }

    #[test]
    fn test_optional_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g"),
            ("PIXABAY_API_KEY", "p"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("OUTPUT_DIR", "/tmp/out"),
            ("MAX_RETRIES", "5"),
            ("REQUEST_TIMEOUT", "10"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_numeric_override_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g"),
            ("PIXABAY_API_KEY", "p"),
            ("MAX_RETRIES", "zero"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "MAX_RETRIES"));

        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g"),
            ("PIXABAY_API_KEY", "p"),
            ("REQUEST_TIMEOUT", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "REQUEST_TIMEOUT"));
    }
}
