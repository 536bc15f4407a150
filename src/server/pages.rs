use crate::core::{loader, renderer};
use crate::server::{AppState, DirectorySnapshot};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub version: Option<String>,
    pub error: Option<String>,
}

/// GET / — sign-in page for anonymous visitors; for authenticated users
/// the directory is reloaded for the requested version and the held
/// snapshot is replaced wholesale before rendering.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Response {
    if state.sessions.authenticate(&headers).await.is_none() {
        return Html(renderer::render_login_page(params.error.as_deref())).into_response();
    }

    let version = params
        .version
        .unwrap_or_else(|| state.config.default_version.clone());

    match loader::load_version(state.store.as_ref(), &version).await {
        Ok(pods) => {
            let snapshot = DirectorySnapshot {
                version: version.clone(),
                pods,
            };
            let page = renderer::render_page(&snapshot.version, &snapshot.pods);
            *state.directory.write().await = Some(snapshot);
            Html(page).into_response()
        }
        Err(err) => {
            tracing::error!("Error loading version {}: {}", version, err);
            *state.directory.write().await = None;
            Html(renderer::render_error_page()).into_response()
        }
    }
}

pub async fn healthz_handler() -> &'static str {
    "ok"
}
