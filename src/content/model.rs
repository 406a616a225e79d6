//! Content models

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{FrontMatter, MarkdownRenderer};

/// A game record loaded from a YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    /// URL-safe identifier, filename stem unless set in the document
    pub slug: String,

    /// Display title
    pub title: String,

    /// Featured games sort ahead of everything else
    pub featured: bool,

    /// Any other keys from the document, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl GameRecord {
    /// True when the document carried no usable content
    pub(crate) fn is_empty(&self) -> bool {
        self.slug.is_empty() && self.title.is_empty() && !self.featured && self.extra.is_empty()
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub slug: String,

    /// Front-matter title, or derived from the slug
    pub title: String,

    /// Publication date; undated posts sort after every dated one
    pub date: Option<NaiveDate>,

    /// Rendered HTML body
    pub html: String,
}

/// A standalone page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub html: String,
}

/// Intermediate result of parsing one Markdown document
#[derive(Debug, Clone)]
pub(crate) struct ParsedDocument {
    pub title: Option<String>,
    /// Raw date value, unparsed
    pub date: Option<String>,
    pub html: String,
    /// Original source text
    #[allow(dead_code)]
    pub raw: String,
}

impl ParsedDocument {
    /// Parse and render one Markdown file
    pub(crate) fn load(path: &Path, renderer: &MarkdownRenderer) -> Option<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                return None;
            }
        };

        let (fm, body) = FrontMatter::parse(&raw);
        let html = renderer.render(body);

        Some(Self {
            title: fm.title,
            date: fm.date,
            html,
            raw,
        })
    }

    /// The document date as an ISO-8601 calendar date, if it parses
    pub(crate) fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(super::frontmatter::parse_iso_date)
    }
}

/// Display title for a slug: hyphens become spaces, words are capitalized
pub(crate) fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filename without its extension
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
