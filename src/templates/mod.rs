//! Embedded site templates using the Tera template engine
//!
//! All templates are compiled into the binary; there is no theme directory
//! to resolve at runtime.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;

/// Template renderer with embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Loader output is already HTML; autoescaping would double-escape it
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("games_index.html", include_str!("site/games_index.html")),
            ("game_detail.html", include_str!("site/game_detail.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("page.html", include_str!("site/page.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template_name, context)
    }
}

/// Tera filter: format an ISO date string for display
fn date_format_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
    }

    // Not a date we recognize; show it unchanged
    Ok(tera::Value::String(s))
}

/// Site globals injected into every render
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context() -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &SiteData::from_config(&SiteConfig::default()));
        ctx.insert("now_year", &2025);
        ctx
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("404.html", &base_context()).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Gamefolio"));
    }

    #[test]
    fn test_render_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut ctx = base_context();
        ctx.insert(
            "page",
            &crate::content::Page {
                slug: "about".to_string(),
                title: "About".to_string(),
                html: "<p>Hello.</p>".to_string(),
            },
        );
        let html = renderer.render("page.html", &ctx).unwrap();
        assert!(html.contains("<h1>About</h1>"));
        // no autoescaping of rendered markdown
        assert!(html.contains("<p>Hello.</p>"));
    }

    #[test]
    fn test_render_game_detail_with_extra_values() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut game = crate::content::GameRecord {
            slug: "g".to_string(),
            title: "G".to_string(),
            featured: true,
            ..Default::default()
        };
        game.extra.insert(
            "engine".to_string(),
            serde_yaml::Value::String("godot".to_string()),
        );
        game.extra.insert(
            "platforms".to_string(),
            serde_yaml::from_str("[windows, linux]").unwrap(),
        );

        let mut ctx = base_context();
        ctx.insert("game", &game);
        let html = renderer.render("game_detail.html", &ctx).unwrap();
        assert!(html.contains("godot"));
        assert!(html.contains("windows, linux"));
        assert!(html.contains("Featured"));
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let post = crate::content::BlogPost {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            html: String::new(),
        };
        let game = crate::content::GameRecord {
            slug: "g".to_string(),
            title: "G".to_string(),
            ..Default::default()
        };

        let mut ctx = base_context();
        ctx.insert("featured", &Some(&game));
        ctx.insert("games", &vec![&game]);
        ctx.insert("posts", &vec![&post]);
        let html = renderer.render("home.html", &ctx).unwrap();
        assert!(html.contains("/games/g"));
        assert!(html.contains("January 01, 2025"));
    }

    #[test]
    fn test_date_format_filter() {
        let out = date_format_filter(
            &tera::Value::String("2025-01-01".to_string()),
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, tera::Value::String("January 01, 2025".to_string()));

        let out =
            date_format_filter(&tera::Value::String("not a date".to_string()), &HashMap::new())
                .unwrap();
        assert_eq!(out, tera::Value::String("not a date".to_string()));
    }
}
