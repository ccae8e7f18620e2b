//! Storefront configuration.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use maison_data::FetchClient;
use serde::{Deserialize, Serialize};

/// Settings for talking to the backend and rendering the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Commerce backend REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Social feed proxy endpoint. The homepage hides the feed when unset.
    #[serde(default)]
    pub social_feed_url: Option<String>,

    /// Key sent to the social feed proxy. Server-side only.
    #[serde(default, skip_serializing)]
    pub social_feed_api_key: Option<String>,

    /// Public origin, used for absolute sitemap URLs.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Key-value store holding shopper state.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Default listing page size.
    #[serde(default = "default_products_per_page")]
    pub products_per_page: u32,

    /// Environment-specific overrides.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environments: HashMap<String, EnvironmentConfig>,
}

/// Per-environment overrides. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub social_feed_url: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
}

fn default_api_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_store_name() -> String {
    "default".to_string()
}

fn default_products_per_page() -> u32 {
    24
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            social_feed_url: None,
            social_feed_api_key: None,
            site_url: default_site_url(),
            store_name: default_store_name(),
            products_per_page: default_products_per_page(),
            environments: HashMap::new(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Defaults overridden by `MAISON_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `MAISON_*` overrides from `lookup`. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("MAISON_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = get("MAISON_SOCIAL_FEED_URL") {
            self.social_feed_url = Some(v);
        }
        if let Some(v) = get("MAISON_SOCIAL_FEED_API_KEY") {
            self.social_feed_api_key = Some(v);
        }
        if let Some(v) = get("MAISON_SITE_URL") {
            self.site_url = v;
        }
        if let Some(v) = get("MAISON_STORE_NAME") {
            self.store_name = v;
        }
        if let Some(v) = get("MAISON_PRODUCTS_PER_PAGE") {
            self.products_per_page = v
                .parse()
                .with_context(|| format!("MAISON_PRODUCTS_PER_PAGE is not a number: {}", v))?;
        }
        Ok(())
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> StorefrontConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref url) = env_config.api_base_url {
                config.api_base_url = url.clone();
            }
            if let Some(ref url) = env_config.social_feed_url {
                config.social_feed_url = Some(url.clone());
            }
            if let Some(ref url) = env_config.site_url {
                config.site_url = url.clone();
            }
            if let Some(ref name) = env_config.store_name {
                config.store_name = name.clone();
            }
        }

        config
    }

    /// A backend client for this configuration.
    pub fn client(&self) -> FetchClient {
        FetchClient::new().with_base_url(self.api_base_url.clone())
    }

    /// Absolute URL for a site path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
