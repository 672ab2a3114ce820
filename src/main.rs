use media_uploader::config::Config;
use media_uploader::handlers::{self, AppState};
use media_uploader::media::MediaUrlResolver;
use media_uploader::storage::create_storage;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_uploader=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting media uploader service");
    tracing::info!(
        "Bucket: {}, upload folder: {}",
        config.b2_bucket_name,
        config.upload_folder
    );

    let storage = create_storage(&config)?;
    let resolver = Arc::new(MediaUrlResolver::new(storage, config.upload_folder.clone()));

    let state = AppState {
        resolver,
        config: config.clone(),
    };
    let app = handlers::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
