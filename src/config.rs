use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime settings, loaded from a JSON file. Every field has a default so a
/// partial file (or none at all) still yields a working configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: Option<String>,
    pub request_timeout: u64,
    pub delay_between_requests: f64,
    pub max_reviews_per_asin: usize,
    pub stars: Vec<u8>,
    pub daily_asin_limit: usize,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.amazon.com/product-reviews/{asin}?pageNumber={page}"
                .to_string(),
            user_agent: None,
            request_timeout: 10,
            delay_between_requests: 1.0,
            max_reviews_per_asin: 1000,
            stars: vec![1, 2, 3, 4, 5],
            daily_asin_limit: 1000,
            output: OutputSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// "json" for a single array, "ndjson" for one object per line.
    pub format: String,
    pub path: String,
    pub indent: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            path: "data/reviews.json".to_string(),
            indent: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }
}

// ── Tests ──
