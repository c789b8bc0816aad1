use std::net::SocketAddr;

use anyhow::{anyhow, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talent_profile_server::{app, open_database, security::hash_secret, AppState, Config};

const USAGE: &str = "usage: talent-profile-server [hash-key <secret>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talent_profile_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `hash-key <secret>` prints an entry for API_KEY_HASHES and exits
    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        if command != "hash-key" {
            bail!("unknown command '{}'\n{}", command, USAGE);
        }
        let secret = args.next().ok_or_else(|| anyhow!(USAGE))?;
        let hash = hash_secret(&secret).map_err(|e| anyhow!("failed to hash secret: {}", e))?;
        println!("{}", hash);
        return Ok(());
    }

    tracing::info!("Starting Talent Profile Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}, API keys configured: {}",
        config.environment,
        config.server_address(),
        config.api_key_hashes.len()
    );

    let db = open_database(&config.database_path)?;

    let addr: SocketAddr = config.server_address().parse()?;
    let app = app(AppState::new(db, config));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
