//! gamefolio: a flat-file personal site and game catalog server
//!
//! Content lives on disk: YAML records for games, Markdown documents with
//! optional front-matter for blog posts and pages. Nothing is cached; every
//! request re-reads the content tree and renders through embedded templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main site handle
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Root of the content tree
    pub content_dir: std::path::PathBuf,
    /// YAML game records
    pub games_dir: std::path::PathBuf,
    /// Markdown blog posts
    pub blog_dir: std::path::PathBuf,
    /// Markdown pages
    pub pages_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let games_dir = content_dir.join(&config.games_dir);
        let blog_dir = content_dir.join(&config.blog_dir);
        let pages_dir = content_dir.join(&config.pages_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            games_dir,
            blog_dir,
            pages_dir,
        })
    }
}
