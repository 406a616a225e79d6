//! Page loader - standalone Markdown pages

use super::markdown::MarkdownRenderer;
use super::model::{title_from_slug, Page, ParsedDocument};
use crate::Site;

/// Loads standalone pages; pages have no listing, only lookup by slug
pub struct PageLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> PageLoader<'a> {
    /// Create a new page loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        Self { site, renderer }
    }

    /// Look up a page by slug
    pub fn get(&self, slug: &str) -> Option<Page> {
        let path = ["md", "markdown"]
            .iter()
            .map(|ext| self.site.pages_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.exists())?;

        let doc = ParsedDocument::load(&path, &self.renderer)?;
        let title = match doc.title {
            Some(title) if !title.is_empty() => title,
            _ => title_from_slug(slug),
        };

        Some(Page {
            slug: slug.to_string(),
            title,
            html: doc.html,
        })
    }
}
