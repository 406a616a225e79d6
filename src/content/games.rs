//! Games loader - YAML game records

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::model::{file_stem, GameRecord};
use crate::Site;

/// Loads game records from the games directory
pub struct GamesLoader<'a> {
    site: &'a Site,
}

impl<'a> GamesLoader<'a> {
    /// Create a new games loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load every game record: featured first, then by title
    /// (case-insensitive), ties in filename order
    pub fn list(&self) -> Vec<GameRecord> {
        let games_dir = &self.site.games_dir;
        if !games_dir.exists() {
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(games_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_yaml_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        let mut games = Vec::new();
        for path in paths {
            let Some(mut game) = load_record(&path) else {
                continue;
            };
            if game.is_empty() {
                continue;
            }
            if game.slug.is_empty() {
                game.slug = file_stem(&path);
            }
            games.push(game);
        }

        games.sort_by_key(|g| (!g.featured, g.title.to_lowercase()));

        games
    }

    /// Look up a single game by slug
    pub fn get(&self, slug: &str) -> Option<GameRecord> {
        let path = ["yml", "yaml"]
            .iter()
            .map(|ext| self.site.games_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.exists())?;

        let mut game = load_record(&path)?;
        if game.slug.is_empty() {
            game.slug = slug.to_string();
        }
        Some(game)
    }
}

/// Parse one game file. Empty documents come back as a default record;
/// unreadable or malformed ones are None.
fn load_record(path: &Path) -> Option<GameRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read game {:?}: {}", path, e);
            return None;
        }
    };

    if content.trim().is_empty() {
        return Some(GameRecord::default());
    }

    match serde_yaml::from_str::<GameRecord>(&content) {
        Ok(game) => Some(game),
        Err(e) => {
            tracing::warn!("Skipping malformed game {:?}: {}", path, e);
            None
        }
    }
}

/// Check if a file is a YAML file
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}
