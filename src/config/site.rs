//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub games_dir: String,
    pub blog_dir: String,
    pub pages_dir: String,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Code highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gamefolio".to_string(),
            description: String::new(),
            author: String::new(),
            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            games_dir: "games".to_string(),
            blog_dir: "blog".to_string(),
            pages_dir: "pages".to_string(),

            home: HomeConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// How many games the home page lists
    pub games: usize,
    /// How many recent posts the home page lists
    pub posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { games: 6, posts: 3 }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}
