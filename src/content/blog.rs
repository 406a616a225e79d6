//! Blog loader - Markdown posts with front-matter

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::MarkdownRenderer;
use super::model::{file_stem, title_from_slug, BlogPost, ParsedDocument};
use crate::Site;

/// Loads blog posts from the blog directory
pub struct BlogLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> BlogLoader<'a> {
    /// Create a new blog loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        Self { site, renderer }
    }

    /// Load every post, newest first; undated posts follow in filename order
    pub fn list(&self) -> Vec<BlogPost> {
        let blog_dir = &self.site.blog_dir;
        if !blog_dir.exists() {
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(blog_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        let mut posts = Vec::new();
        for path in paths {
            if let Some(post) = self.load_post(&path) {
                posts.push(post);
            }
        }

        posts.sort_by_key(|p| (p.date.is_none(), Reverse(p.date)));

        posts
    }

    /// Look up a single post by slug
    pub fn get(&self, slug: &str) -> Option<BlogPost> {
        let path = ["md", "markdown"]
            .iter()
            .map(|ext| self.site.blog_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.exists())?;

        self.load_post(&path)
    }

    fn load_post(&self, path: &Path) -> Option<BlogPost> {
        let doc = ParsedDocument::load(path, &self.renderer)?;
        let slug = file_stem(path);
        let date = doc.parse_date();
        let title = match doc.title {
            Some(title) if !title.is_empty() => title,
            _ => title_from_slug(&slug),
        };

        Some(BlogPost {
            slug,
            title,
            date,
            html: doc.html,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn site_with_posts(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let blog_dir = dir.path().join("content/blog");
        fs::create_dir_all(&blog_dir).unwrap();
        for (name, content) in files {
            fs::write(blog_dir.join(name), content).unwrap();
        }
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_newest_first_undated_last() {
        let (_dir, site) = site_with_posts(&[
            ("old.md", "---\ntitle: Old\ndate: 2020-01-01\n---\ntext"),
            ("new.md", "---\ntitle: New\ndate: 2024-06-01\n---\ntext"),
            ("zzz-undated.md", "no date here"),
            ("aaa-undated.md", "none here either"),
        ]);
        let posts = BlogLoader::new(&site).list();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "aaa-undated", "zzz-undated"]);
    }

    #[test]
    fn test_invalid_date_treated_as_undated() {
        let (_dir, site) = site_with_posts(&[
            ("dated.md", "---\ndate: 2023-03-03\n---\ntext"),
            ("broken.md", "---\ndate: sometime in march\n---\ntext"),
        ]);
        let posts = BlogLoader::new(&site).list();
        assert_eq!(posts[0].slug, "dated");
        assert_eq!(
            posts[0].date,
            Some(NaiveDate::from_ymd_opt(2023, 3, 3).unwrap())
        );
        assert_eq!(posts[1].slug, "broken");
        assert_eq!(posts[1].date, None);
    }

    #[test]
    fn test_title_fallback_from_slug() {
        let (_dir, site) = site_with_posts(&[("my-post.md", "Some body text.")]);
        let posts = BlogLoader::new(&site).list();
        assert_eq!(posts[0].title, "My Post");
    }

    #[test]
    fn test_frontmatter_title_wins() {
        let (_dir, site) =
            site_with_posts(&[("my-post.md", "---\ntitle: A Proper Title\n---\ntext")]);
        let post = BlogLoader::new(&site).get("my-post").unwrap();
        assert_eq!(post.title, "A Proper Title");
    }

    #[test]
    fn test_body_is_rendered() {
        let (_dir, site) = site_with_posts(&[("p.md", "---\ntitle: P\n---\nSome **bold** text")]);
        let post = BlogLoader::new(&site).get("p").unwrap();
        assert!(post.html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(BlogLoader::new(&site).list().is_empty());
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, site) = site_with_posts(&[("real.md", "text")]);
        assert!(BlogLoader::new(&site).get("nonexistent").is_none());
    }
}
