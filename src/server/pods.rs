use crate::core::loader;
use crate::server::AppState;
use crate::utils::error::DirectoryError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// GET /api/pods/:version — the server-side twin of the browser loader.
pub async fn pods_handler(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Response {
    match loader::load_version(state.store.as_ref(), &version).await {
        Ok(pods) => Json(pods).into_response(),
        Err(DirectoryError::VersionNotFound { version }) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("Version {} not found", version)})),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Error loading pods: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to load pods"})),
            )
                .into_response()
        }
    }
}
