use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_url, Validate,
};
use clap::Parser;

pub const DEFAULT_SESSION_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, Parser)]
#[command(name = "pod-directory")]
#[command(about = "Organizational directory server for pod JSON descriptors")]
pub struct ServerConfig {
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    #[arg(long, env = "PODS_DIR", default_value = "./pods")]
    pub pods_dir: String,

    #[arg(long, env = "DEFAULT_VERSION", default_value = "v1")]
    pub default_version: String,

    #[arg(long, env = "GOOGLE_CLIENT_ID", default_value = "")]
    pub google_client_id: String,

    #[arg(long, env = "GOOGLE_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub google_client_secret: String,

    #[arg(long, env = "ALLOWED_DOMAIN", default_value = "ovo.com")]
    pub allowed_domain: String,

    /// Defaults to http://localhost:<port>/auth/google/callback
    #[arg(long, env = "CALLBACK_URL")]
    pub callback_url: Option<String>,

    #[arg(
        long,
        env = "SESSION_SECRET",
        default_value = DEFAULT_SESSION_SECRET,
        hide_env_values = true
    )]
    pub session_secret: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn callback_url(&self) -> String {
        self.callback_url.clone().unwrap_or_else(|| {
            format!("http://localhost:{}/auth/google/callback", self.port)
        })
    }

    pub fn oauth_configured(&self) -> bool {
        !self.google_client_id.is_empty() && !self.google_client_secret.is_empty()
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_path("pods_dir", &self.pods_dir)?;
        validate_non_empty_string("default_version", &self.default_version)?;
        validate_non_empty_string("allowed_domain", &self.allowed_domain)?;
        validate_non_empty_string("session_secret", &self.session_secret)?;
        if let Some(url) = &self.callback_url {
            validate_url("callback_url", url)?;
        }
        Ok(())
    }
}
