use crate::server::oauth::email_domain;
use crate::server::session::{
    clear_session_cookie, cookie_token, session_cookie, UserProfile,
};
use crate::server::AppState;
use crate::utils::error::Result;
use axum::extract::{Query, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

const AUTH_FAILED_REDIRECT: &str = "/?error=auth_failed";

/// Gate for the protected API: no valid session means 401, never a crash.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.sessions.authenticate(request.headers()).await {
        Some(_) => next.run(request).await,
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized", "authenticated": false})),
        )
            .into_response(),
    }
}

pub async fn google_login_handler(State(state): State<AppState>) -> Response {
    if !state.config.oauth_configured() {
        tracing::warn!("OAuth login requested but credentials are not configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "OAuth is not configured"})),
        )
            .into_response();
    }

    let csrf_state = state.sessions.issue_state().await;
    match state.oauth.authorize_url(&csrf_state) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(err) => {
            tracing::error!("Could not build authorization URL: {}", err);
            Redirect::to(AUTH_FAILED_REDIRECT).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn google_callback_handler(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    match complete_login(&state, params).await {
        Ok(token) => {
            let mut response = Redirect::to("/").into_response();
            if let Ok(cookie) = HeaderValue::from_str(&session_cookie(&token)) {
                response.headers_mut().insert(SET_COOKIE, cookie);
            }
            response
        }
        Err(err) => {
            tracing::warn!("OAuth callback rejected: {}", err);
            Redirect::to(AUTH_FAILED_REDIRECT).into_response()
        }
    }
}

async fn complete_login(state: &AppState, params: CallbackParams) -> Result<String> {
    use crate::utils::error::DirectoryError;

    if let Some(error) = params.error {
        return Err(DirectoryError::AuthError {
            message: format!("Provider returned error: {}", error),
        });
    }
    let code = params.code.ok_or_else(|| DirectoryError::AuthError {
        message: "Missing authorization code".to_string(),
    })?;
    let csrf_state = params.state.ok_or_else(|| DirectoryError::AuthError {
        message: "Missing state parameter".to_string(),
    })?;
    if !state.sessions.take_state(&csrf_state).await {
        return Err(DirectoryError::AuthError {
            message: "Unknown or expired state parameter".to_string(),
        });
    }

    let access_token = state.oauth.exchange_code(&code).await?;
    let profile = state.oauth.fetch_profile(&access_token).await?;

    let email = profile.email.unwrap_or_default();
    let allowed = email_domain(&email)
        .map(|domain| domain.eq_ignore_ascii_case(&state.config.allowed_domain))
        .unwrap_or(false);
    if !allowed {
        return Err(DirectoryError::AuthError {
            message: format!(
                "Access restricted to @{} accounts only",
                state.config.allowed_domain
            ),
        });
    }

    let user = UserProfile {
        id: profile.sub,
        name: profile.name.unwrap_or_else(|| email.clone()),
        email,
        picture: profile.picture,
    };
    tracing::info!("Authenticated {}", user.email);
    Ok(state.sessions.create(user).await)
}

pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_token(&headers) {
        state.sessions.destroy(&token).await;
    }
    let mut response = Json(json!({"message": "Logged out successfully"})).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&clear_session_cookie()) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

pub async fn status_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.sessions.authenticate(&headers).await {
        Some(user) => Json(json!({
            "authenticated": true,
            "user": {
                "email": user.email,
                "name": user.name,
                "picture": user.picture,
            }
        }))
        .into_response(),
        None => Json(json!({"authenticated": false})).into_response(),
    }
}
