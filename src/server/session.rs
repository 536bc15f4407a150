use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "pod_session";

/// Matches the original 8 hour session lifetime.
const SESSION_TTL_HOURS: i64 = 8;
const STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: UserProfile,
    expires_at: DateTime<Utc>,
}

/// In-memory session store keyed by opaque random tokens. Also tracks
/// pending OAuth state values between redirect and callback.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pending_states: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, user: UserProfile) -> String {
        let token = random_token();
        let entry = SessionEntry {
            user,
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
        };
        self.sessions.write().await.insert(token.clone(), entry);
        token
    }

    pub async fn get(&self, token: &str) -> Option<UserProfile> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.user.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Resolve the session cookie from request headers.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Option<UserProfile> {
        let token = cookie_token(headers)?;
        self.get(&token).await
    }

    pub async fn issue_state(&self) -> String {
        let state = random_token();
        let mut states = self.pending_states.write().await;
        states.retain(|_, expires| *expires > Utc::now());
        states.insert(
            state.clone(),
            Utc::now() + Duration::minutes(STATE_TTL_MINUTES),
        );
        state
    }

    /// One-shot: a state value is consumed on first use.
    pub async fn take_state(&self, state: &str) -> bool {
        let mut states = self.pending_states.write().await;
        match states.remove(state) {
            Some(expires) => expires > Utc::now(),
            None => false,
        }
    }

    pub fn expiry_seconds() -> i64 {
        Duration::hours(SESSION_TTL_HOURS).num_seconds()
    }
}

pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some(value) = pair.strip_prefix(SESSION_COOKIE) {
                if let Some(token) = value.strip_prefix('=') {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SessionStore::expiry_seconds()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
