//! List site content

use anyhow::Result;

use crate::content::{BlogLoader, GamesLoader};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "game" | "games" => {
            let games = GamesLoader::new(site).list();
            println!("Games ({}):", games.len());
            for game in games {
                let marker = if game.featured { "*" } else { " " };
                println!("  {} {} [{}]", marker, game.title, game.slug);
            }
        }
        "post" | "posts" => {
            let posts = BlogLoader::new(site).list();
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "no date".to_string());
                println!("  {} - {} [{}]", date, post.title, post.slug);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: games, posts", content_type);
        }
    }

    Ok(())
}
