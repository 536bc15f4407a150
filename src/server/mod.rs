pub mod auth;
pub mod oauth;
pub mod pages;
pub mod pods;
pub mod session;

use crate::adapters::FsPodStore;
use crate::config::ServerConfig;
use crate::domain::model::Pod;
use crate::domain::ports::PodStore;
use crate::server::oauth::GoogleAuth;
use crate::server::session::SessionStore;
use crate::utils::error::Result;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// The currently loaded pod collection. Replaced wholesale on every
/// load; never mutated in place.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub version: String,
    pub pods: Vec<Pod>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn PodStore>,
    pub sessions: SessionStore,
    pub oauth: GoogleAuth,
    pub directory: Arc<RwLock<Option<DirectorySnapshot>>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let oauth = GoogleAuth::new(&config);
        Self::with_oauth(config, oauth)
    }

    pub fn with_oauth(config: ServerConfig, oauth: GoogleAuth) -> Self {
        let store: Arc<dyn PodStore> = Arc::new(FsPodStore::new(config.pods_dir.clone()));
        Self {
            config: Arc::new(config),
            store,
            sessions: SessionStore::new(),
            oauth,
            directory: Arc::new(RwLock::new(None)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/pods/:version", get(pods::pods_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/", get(pages::index_handler))
        .route("/healthz", get(pages::healthz_handler))
        .route("/auth/google", get(auth::google_login_handler))
        .route("/auth/google/callback", get(auth::google_callback_handler))
        .route("/auth/logout", get(auth::logout_handler))
        .route("/auth/status", get(auth::status_handler))
        .merge(api)
        .with_state(state)
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::new(config);
    let port = state.config.port;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
