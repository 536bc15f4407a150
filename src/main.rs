use clap::Parser;
use pod_directory::utils::{logger, validation::Validate};
use pod_directory::{server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    logger::init_server_logger(config.verbose);

    tracing::info!("Starting pod-directory server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if !config.oauth_configured() {
        tracing::warn!(
            "Google OAuth credentials not configured. Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET"
        );
    }
    if config.session_secret == pod_directory::config::DEFAULT_SESSION_SECRET {
        tracing::warn!("SESSION_SECRET is the default value; change it in production");
    }

    server::serve(config).await?;

    Ok(())
}
