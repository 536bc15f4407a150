use crate::config::ServerConfig;
use crate::utils::error::{DirectoryError, Result};
use serde::Deserialize;
use url::Url;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Minimal Google OAuth 2.0 authorization-code client: build the
/// redirect URL, exchange the code, fetch the userinfo profile.
#[derive(Clone)]
pub struct GoogleAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleAuth {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_endpoints(
            config,
            GOOGLE_AUTH_URL.to_string(),
            GOOGLE_TOKEN_URL.to_string(),
            GOOGLE_USERINFO_URL.to_string(),
        )
    }

    /// Endpoint override used by tests to point at a mock server.
    pub fn with_endpoints(
        config: &ServerConfig,
        auth_url: String,
        token_url: String,
        userinfo_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            callback_url: config.callback_url(),
            auth_url,
            token_url,
            userinfo_url,
        }
    }

    pub fn authorize_url(&self, state: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|err| DirectoryError::ConfigError {
            message: format!("Invalid OAuth authorization URL: {}", err),
        })?;
        Ok(url.into())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::AuthError {
                message: format!("Token exchange failed with status {}", response.status()),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::AuthError {
                message: format!("Userinfo fetch failed with status {}", response.status()),
            });
        }

        Ok(response.json().await?)
    }
}

pub fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}
