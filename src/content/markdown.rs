//! Markdown rendering with syntax highlighting and [TOC] expansion

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

lazy_static! {
    /// A line consisting solely of the [TOC] marker
    static ref TOC_MARKER: Regex = Regex::new(r"(?m)^\[TOC\][ \t]*$").unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
            line_numbers: true,
        }
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML. Best-effort: malformed input still renders.
    pub fn render(&self, markdown: &str) -> String {
        let options = markdown_options();

        // [TOC] lines become a generated table of contents; heading anchors
        // below use the same id sequence, so links always resolve.
        let source = if TOC_MARKER.is_match(markdown) {
            let toc = self.build_toc(markdown, options);
            TOC_MARKER
                .replace_all(markdown, regex::NoExpand(&toc))
                .into_owned()
        } else {
            markdown.to_owned()
        };

        let mut events: Vec<Event> = Vec::new();
        let mut anchors = AnchorSet::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();
        let mut heading_buf: Option<(HeadingLevel, Vec<Event>)> = None;

        for event in Parser::new_ext(&source, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.take().as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading_buf = Some((level, Vec::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, inner)) = heading_buf.take() {
                        let id = anchors.assign(&plain_text(&inner));
                        events.push(Event::Start(Tag::Heading {
                            level,
                            id: Some(CowStr::from(id)),
                            classes: Vec::new(),
                            attrs: Vec::new(),
                        }));
                        events.extend(inner);
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                }
                other => match heading_buf.as_mut() {
                    Some((_, inner)) => inner.push(other),
                    None => events.push(other),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Build the table-of-contents HTML block for a document
    fn build_toc(&self, markdown: &str, options: Options) -> String {
        let headings = collect_headings(markdown, options);
        if headings.is_empty() {
            return String::new();
        }

        let mut anchors = AnchorSet::new();
        let base = headings
            .iter()
            .map(|(level, _)| heading_depth(*level))
            .min()
            .unwrap_or(1);
        let mut depth = base;

        let mut out = String::from("<div class=\"toc\">\n<ul>\n");
        for (level, text) in &headings {
            let level = heading_depth(*level);
            while depth < level {
                out.push_str("<ul>\n");
                depth += 1;
            }
            while depth > level {
                out.push_str("</ul>\n");
                depth -= 1;
            }
            let id = anchors.assign(text);
            out.push_str(&format!(
                "<li><a href=\"#{}\">{}</a></li>\n",
                id,
                html_escape(text)
            ));
        }
        while depth > base {
            out.push_str("</ul>\n");
            depth -= 1;
        }
        out.push_str("</ul>\n</div>\n");
        out
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let theme = match theme {
            Some(theme) => theme,
            None => return plain_code_block(code, lang),
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Ok(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            Err(_) => plain_code_block(code, lang),
        }
    }

    /// Add a line-number gutter to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let line_count = lines.len();

        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in lines.iter().enumerate() {
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            code_lines.push_str(line);
            if i < line_count - 1 {
                gutter.push('\n');
                code_lines.push('\n');
            }
        }

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code_lines
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_GFM
}

/// Collect heading levels and texts in document order
fn collect_headings(markdown: &str, options: Options) -> Vec<(HeadingLevel, String)> {
    let mut headings = Vec::new();
    let mut current: Option<(HeadingLevel, String)> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }

    headings
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Concatenated text content of buffered inline events
fn plain_text(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(text),
            _ => {}
        }
    }
    out
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Stable, deduplicated anchor ids for headings
struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    fn assign(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        id
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_toc_marker_expansion() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[TOC]\n\n# Intro\n\n## Details\n\ntext\n");
        assert!(html.contains(r#"class="toc""#));
        assert!(html.contains(r##"<a href="#intro">Intro</a>"##));
        assert!(html.contains(r##"<a href="#details">Details</a>"##));
        assert!(html.contains(r#"<h2 id="details">"#));
    }

    #[test]
    fn test_duplicate_heading_anchors() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Setup\n\ntext\n\n# Setup\n");
        assert!(html.contains(r#"<h1 id="setup">"#));
        assert!(html.contains(r#"<h1 id="setup-1">"#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let input = "[TOC]\n\n# A\n\n```rust\nlet x = 1;\n```\n\n# A\n";
        assert_eq!(renderer.render(input), renderer.render(input));
    }

    #[test]
    fn test_no_toc_without_marker() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Intro\n\nJust a heading mentioning [TOC] inline.");
        assert!(!html.contains(r#"class="toc""#));
    }
}
