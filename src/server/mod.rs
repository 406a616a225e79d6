//! Site server
//!
//! Handlers rebuild their loaders on every request, so content edits show up
//! on the next refresh without a cache to invalidate.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Datelike;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{BlogLoader, GamesLoader, PageLoader};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Site;

/// Server state shared by all handlers
struct ServerState {
    site: Site,
    templates: TemplateRenderer,
}

/// Errors a handler can surface to the client
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl ServerState {
    /// Context carrying the globals every template expects
    fn base_context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &SiteData::from_config(&self.site.config));
        ctx.insert("now_year", &chrono::Local::now().year());
        ctx
    }

    /// The rendered 404 page
    fn not_found(&self) -> Result<Response, ServeError> {
        let html = self.templates.render("404.html", &self.base_context())?;
        Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
    }
}

/// Start the site server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let templates = TemplateRenderer::new()?;
    let state = Arc::new(ServerState {
        site: site.clone(),
        templates,
    });

    let static_dir = site.base_dir.join("static");

    let app = Router::new()
        .route("/", get(home))
        .route("/games", get(games_index))
        .route("/games/:slug", get(game_detail))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/pages/:slug", get(page_detail))
        .route("/about", get(about))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home(State(state): State<Arc<ServerState>>) -> Result<Response, ServeError> {
    let games = GamesLoader::new(&state.site).list();
    let posts = BlogLoader::new(&state.site).list();

    let featured = games
        .iter()
        .find(|g| g.featured)
        .or_else(|| games.first())
        .cloned();

    let home = &state.site.config.home;
    let mut ctx = state.base_context();
    ctx.insert("featured", &featured);
    ctx.insert("games", &games.iter().take(home.games).collect::<Vec<_>>());
    ctx.insert("posts", &posts.iter().take(home.posts).collect::<Vec<_>>());

    Ok(Html(state.templates.render("home.html", &ctx)?).into_response())
}

async fn games_index(State(state): State<Arc<ServerState>>) -> Result<Response, ServeError> {
    let games = GamesLoader::new(&state.site).list();

    let mut ctx = state.base_context();
    ctx.insert("games", &games);

    Ok(Html(state.templates.render("games_index.html", &ctx)?).into_response())
}

async fn game_detail(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServeError> {
    let Some(game) = GamesLoader::new(&state.site).get(&slug) else {
        return state.not_found();
    };

    let mut ctx = state.base_context();
    ctx.insert("game", &game);

    Ok(Html(state.templates.render("game_detail.html", &ctx)?).into_response())
}

async fn blog_index(State(state): State<Arc<ServerState>>) -> Result<Response, ServeError> {
    let posts = BlogLoader::new(&state.site).list();

    let mut ctx = state.base_context();
    ctx.insert("posts", &posts);

    Ok(Html(state.templates.render("blog_index.html", &ctx)?).into_response())
}

async fn blog_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServeError> {
    let Some(post) = BlogLoader::new(&state.site).get(&slug) else {
        return state.not_found();
    };

    let mut ctx = state.base_context();
    ctx.insert("post", &post);

    Ok(Html(state.templates.render("blog_post.html", &ctx)?).into_response())
}

async fn page_detail(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServeError> {
    render_page(&state, &slug)
}

async fn about(State(state): State<Arc<ServerState>>) -> Result<Response, ServeError> {
    render_page(&state, "about")
}

async fn fallback(State(state): State<Arc<ServerState>>) -> Result<Response, ServeError> {
    state.not_found()
}

fn render_page(state: &ServerState, slug: &str) -> Result<Response, ServeError> {
    let Some(page) = PageLoader::new(&state.site).get(slug) else {
        return state.not_found();
    };

    let mut ctx = state.base_context();
    ctx.insert("page", &page);

    Ok(Html(state.templates.render("page.html", &ctx)?).into_response())
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
