//! Configuration management.
//!
//! Settings come from a TOML (or JSON) file when one is given or found in
//! the working directory, then environment overrides are applied on top.
//! Every value has a default, so running without any file works.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{product_fields, product_layout, FieldSpec, PageLayout, DEFAULT_MAX_PAGES};
use crate::error::{HarvestError, Result};
use crate::scrapers::BrowserEngineConfig;
use crate::table::MergeColumns;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "harvest.toml";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub merge: MergeSettings,
    pub browser: BrowserEngineConfig,
}

/// Crawl pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Listing URL with a `{page}` placeholder for the 1-based page number.
    pub listing_url_template: String,
    /// Scheme and host that root-relative detail links are resolved against.
    pub origin: String,
    /// Path prefix identifying detail-page links.
    pub detail_prefix: String,
    pub max_pages: u32,
    /// Pause after each navigation, in milliseconds.
    pub settle_delay_ms: u64,
    /// Detail pages rendered concurrently.
    pub workers: usize,
    pub output: PathBuf,
    /// None, "impersonate", or a literal user agent. HTTP rendering only.
    pub user_agent: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub layout: PageLayout,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            listing_url_template: "https://www.trustradius.com/machine-learning?page={page}"
                .to_string(),
            origin: "https://www.trustradius.com".to_string(),
            detail_prefix: "/products/".to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            settle_delay_ms: 3000,
            workers: 1,
            output: PathBuf::from("machine_learning_products.csv"),
            user_agent: None,
            fields: product_fields(),
            layout: product_layout(),
        }
    }
}

/// Table merge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    pub source_a: PathBuf,
    pub source_b: PathBuf,
    pub output: PathBuf,
    /// Column identifying a platform in both inputs.
    pub identity_field: String,
    /// Column holding each input's rating text.
    pub rating_field: String,
    pub source_a_rating: String,
    pub source_b_rating: String,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            source_a: PathBuf::from("./data/trustradius-ml.csv"),
            source_b: PathBuf::from("./data/g2-ml.csv"),
            output: PathBuf::from("./data/merged_ratings.csv"),
            identity_field: "What is the name of this AI/ML software platform?".to_string(),
            rating_field: "What are the customer reviews and ratings of this platform?"
                .to_string(),
            source_a_rating: "TrustRadius Rating".to_string(),
            source_b_rating: "G2 Rating".to_string(),
        }
    }
}

impl MergeSettings {
    pub fn columns(&self) -> MergeColumns {
        MergeColumns {
            identity: self.identity_field.clone(),
            rating: self.rating_field.clone(),
            source_a_rating: self.source_a_rating.clone(),
            source_b_rating: self.source_b_rating.clone(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
    /// exists, or defaults. Environment overrides are applied last.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::load_from_path(path).await?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if tokio::fs::try_exists(default_path).await.unwrap_or(false) {
                    Self::load_from_path(default_path).await?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };
        Ok(settings.with_env_overrides())
    }

    /// Load settings from a specific file. JSON when the extension is
    /// `.json`, TOML otherwise.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let config_error = |message: String| HarvestError::Config {
            path: path.to_path_buf(),
            message,
        };

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| config_error(e.to_string()))?;

        let settings: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?,
            _ => toml::from_str(&contents).map_err(|e| config_error(e.to_string()))?,
        };

        debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Apply environment variable overrides.
    ///
    /// - `HARVEST_MAX_PAGES` - listing page cap
    /// - `BROWSER_URL`, `BROWSER_HEADLESS` - see [`BrowserEngineConfig`]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(max) = var("HARVEST_MAX_PAGES").and_then(|v| v.trim().parse().ok()) {
            self.catalog.max_pages = max;
        }
        self.browser = self.browser.with_overrides_from(&var);
        self
    }
}
