//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    handler::Handler,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;

use cloudsetup_content::{Category, ContentResolver, Locale, Platform, ResolverConfig};
use cloudsetup_static::assets::AssetPipeline;
use cloudsetup_static::{pages, routes, search, PageError, SiteOrigin, SiteRenderer, SiteSettings};

use crate::watcher::{ChangeKind, FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Guide content root
    pub content_dir: PathBuf,

    /// Static files served at the site root
    pub public_dir: Option<PathBuf>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site name
    pub site_name: String,

    /// Canonical origin for SEO links
    pub origin: SiteOrigin,
}

impl DevServerConfig {
    pub fn new(origin: SiteOrigin) -> Self {
        Self {
            content_dir: PathBuf::from("content/guides"),
            public_dir: Some(PathBuf::from("public")),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            site_name: "CloudSetup.guide".to_string(),
            origin,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
pub struct AppState {
    resolver: ContentResolver,
    renderer: SiteRenderer,
    hmr: HmrHub,
}

impl AppState {
    /// State for interactive authoring: content is re-read on every request
    /// and malformed content is reported instead of hidden.
    pub fn new(config: &DevServerConfig) -> Self {
        Self {
            resolver: ContentResolver::new(ResolverConfig::authoring(config.content_dir.clone())),
            renderer: SiteRenderer::new(SiteSettings {
                name: config.site_name.clone(),
                origin: config.origin.clone(),
                live_reload: true,
            }),
            hmr: HmrHub::new(),
        }
    }

    pub fn hmr(&self) -> &HmrHub {
        &self.hmr
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let raw_addr = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| ServerError::InvalidAddress(raw_addr.clone()))?;

        let state = Arc::new(AppState::new(&self.config));

        let extra_paths: Vec<PathBuf> = self.config.public_dir.iter().cloned().collect();
        let (watcher, mut rx) = FileWatcher::new(&self.config.content_dir, &extra_paths)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let watch_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&watch_state, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, self.config.public_dir.clone());

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the dev server router.
pub fn router(state: Arc<AppState>, public_dir: Option<PathBuf>) -> Router {
    let not_found = fallback_handler.with_state(Arc::clone(&state));

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/{locale}", get(home_handler))
        .route("/{locale}/guides/{slug}", get(guide_handler))
        .route("/{locale}/platforms/{platform}", get(platform_handler))
        .route("/{locale}/categories/{category}", get(category_handler))
        .route(routes::STYLESHEET, get(css_handler))
        .route(routes::SCRIPT, get(js_handler))
        .route(routes::SEARCH_INDEX, get(search_index_handler))
        .route("/__hmr", get(ws_handler))
        .route("/__hmr.js", get(hmr_script_handler));

    let app = match public_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir).fallback(not_found)),
        None => app.fallback_service(not_found),
    };

    app.with_state(state)
}

/// Handle file watch events.
fn handle_watch_event(state: &AppState, event: WatchEvent) {
    match (event.kind, &event.slug) {
        (ChangeKind::Metadata, Some(slug)) => {
            tracing::info!("Metadata changed: {}", slug);
        }
        (ChangeKind::Body, Some(slug)) => {
            tracing::info!(
                "Body changed: {} ({})",
                slug,
                event.locale.map(|l| l.as_str()).unwrap_or("unknown locale")
            );
        }
        _ => {
            tracing::debug!("File changed: {}", event.path.display());
        }
    }

    state.hmr.send(HmrMessage::Reload);
}

async fn root_handler() -> Redirect {
    Redirect::temporary(&routes::home(Locale::default()))
}

async fn home_handler(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> Response {
    let Ok(locale) = locale.parse::<Locale>() else {
        return not_found_response(&state, Locale::default());
    };

    render_blocking(&state, locale, move |state| {
        pages::home_page(&state.renderer, &state.resolver, locale).map(Some)
    })
    .await
}

async fn guide_handler(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    let Ok(locale) = locale.parse::<Locale>() else {
        return not_found_response(&state, Locale::default());
    };

    render_blocking(&state, locale, move |state| {
        pages::guide_page(&state.renderer, &state.resolver, &slug, locale)
    })
    .await
}

async fn platform_handler(
    State(state): State<Arc<AppState>>,
    Path((locale, platform)): Path<(String, String)>,
) -> Response {
    let (Ok(locale), Ok(platform)) = (locale.parse::<Locale>(), platform.parse::<Platform>()) else {
        return not_found_response(&state, Locale::default());
    };

    render_blocking(&state, locale, move |state| {
        pages::platform_page(&state.renderer, &state.resolver, platform, locale).map(Some)
    })
    .await
}

async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path((locale, category)): Path<(String, String)>,
) -> Response {
    let (Ok(locale), Ok(category)) = (locale.parse::<Locale>(), category.parse::<Category>()) else {
        return not_found_response(&state, Locale::default());
    };

    render_blocking(&state, locale, move |state| {
        pages::category_page(&state.renderer, &state.resolver, category, locale).map(Some)
    })
    .await
}

/// Unknown paths render the not-found page in the locale of the first segment.
async fn fallback_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let locale = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or_default();

    not_found_response(&state, locale)
}

async fn search_index_handler(State(state): State<Arc<AppState>>) -> Response {
    let built = tokio::task::spawn_blocking(move || search::build_index(&state.resolver)).await;

    match built {
        Ok(Ok(entries)) => Json(entries).into_response(),
        Ok(Err(e)) => {
            tracing::error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => task_failed(e),
    }
}

async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for the HMR WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.hmr.subscribe();

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(),
    )
}

/// Resolve and render a page on the blocking pool.
///
/// Content resolution reads the filesystem and fans listings out over rayon.
async fn render_blocking<F>(state: &Arc<AppState>, locale: Locale, render: F) -> Response
where
    F: FnOnce(&AppState) -> Result<Option<String>, PageError> + Send + 'static,
{
    let worker = Arc::clone(state);

    match tokio::task::spawn_blocking(move || render(&worker)).await {
        Ok(result) => page_response(state, locale, result),
        Err(e) => task_failed(e),
    }
}

fn page_response(
    state: &AppState,
    locale: Locale,
    result: Result<Option<String>, PageError>,
) -> Response {
    match result {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found_response(state, locale),
        Err(PageError::Content(e)) => {
            tracing::error!("{}", e);
            match state.renderer.render_error(locale, &e.to_string()) {
                Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
                Err(render_err) => internal_error(render_err),
            }
        }
        Err(PageError::Template(e)) => internal_error(e),
    }
}

fn not_found_response(state: &AppState, locale: Locale) -> Response {
    match state.renderer.render_not_found(locale) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

fn task_failed(err: tokio::task::JoinError) -> Response {
    tracing::error!("Render task failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Render task failed").into_response()
}

fn internal_error(err: minijinja::Error) -> Response {
    tracing::error!("Failed to render template: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to render template: {}", err),
    )
        .into_response()
}
