use axum::{
    Router,
    extract::{FromRef, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use reqwest::Client;
use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration, time::Instant};
use tower_http::compression::CompressionLayer;

use crate::{
    Res,
    api::{self, proxy},
    config::Config,
    info, session, warning,
};

/// State shared by all handlers.
///
/// Holds nothing visitor-specific: per-visitor data lives in the session
/// cookie and the bearer token is bound to a fresh client per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Res<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        let key = session::signing_key(&config);

        Ok(AppState {
            config: Arc::new(config),
            http,
            key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Assembles the full route table.
pub fn router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .route("/logout", get(api::logout))
        .route("/status", get(api::status));

    let proxy = Router::new()
        .route("/me", get(proxy::me))
        .route("/search", get(proxy::search))
        .route("/tracks/{id}", get(proxy::track))
        .route(
            "/tracks/{id}/save",
            get(proxy::check_saved)
                .put(proxy::save_track)
                .delete(proxy::remove_track),
        )
        .route("/tracks/{id}/saved", get(proxy::check_saved))
        .route("/albums/{id}", get(proxy::album))
        .route("/artists/{id}", get(proxy::artist))
        .route("/recently-played", get(proxy::recently_played))
        .route("/top-tracks", get(proxy::top_tracks))
        .route("/recommendations", get(proxy::recommendations));

    Router::new()
        .route("/health", get(api::health))
        .nest("/auth", auth)
        .nest("/api", proxy)
        .fallback(api::not_found)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// With `open_browser` set, the login page is opened in the default browser
/// once the listener is up.
pub async fn start_api_server(config: Config, open_browser: bool) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;

    let state = AppState::new(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!("Auth endpoint: http://{}/auth/login", addr);
    info!("API base: http://{}/api", addr);

    if open_browser {
        let login_url = format!("http://{}/auth/login", addr);
        if webbrowser::open(&login_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                login_url
            );
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} - {} - {}ms",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, shutting down gracefully");
    }
}
