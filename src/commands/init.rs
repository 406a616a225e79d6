//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/games"))?;
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("content/pages"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    // Create default _config.yml
    let config_content = r#"# Gamefolio configuration

# Site
title: Gamefolio
description: ''
author: ''
url: http://localhost:4000

# Directory
content_dir: content
games_dir: games
blog_dir: blog
pages_dir: pages

# Home page
home:
  games: 6
  posts: 3

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Sample game record
    let sample_game = r#"title: My First Game
featured: true
tagline: A tiny sample game record
platforms:
  - windows
  - linux
"#;

    fs::write(
        target_dir.join("content/games/my-first-game.yml"),
        sample_game,
    )?;

    // Sample blog post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome to your new site. This post lives in `content/blog` and is rendered
straight from Markdown on every request, so edits show up on refresh.

## Writing

Drop a `.md` file into `content/blog`. A front-matter block at the top sets
the title and date:

```yaml
title: My Post
date: {}
```

Posts without a date sort after dated ones. Game records are plain YAML files
in `content/games`; set `featured: true` to pin one to the top of the list.
"#,
        now.format("%Y-%m-%d"),
        now.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("content/blog/hello-world.md"), sample_post)?;

    // Sample about page
    let about_page = "---\ntitle: About\n---\n\nTell visitors who you are and what you make.\n";
    fs::write(target_dir.join("content/pages/about.md"), about_page)?;

    // Minimal stylesheet
    let stylesheet = r#"body {
  max-width: 48rem;
  margin: 0 auto;
  padding: 0 1rem;
  font-family: system-ui, sans-serif;
  line-height: 1.6;
}

nav a {
  margin-right: 1rem;
}

.badge {
  font-size: 0.75rem;
  padding: 0.1rem 0.4rem;
  border: 1px solid currentColor;
  border-radius: 0.25rem;
}

time {
  color: #666;
  margin-left: 0.5rem;
}
"#;
    fs::write(target_dir.join("static/style.css"), stylesheet)?;

    Ok(())
}
