use blog::{AppState, app, config::Config, db};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::init_schema(&pool).await?;
    info!("Connected to {}", config.database_url);

    let state = AppState {
        posts: db::PostRepository::new(pool),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running on http://{}", config.bind_addr);
    info!("Routes:");
    info!("  GET  /                - List posts");
    info!("  GET  /posts/new/      - New post form");
    info!("  POST /posts/create/   - Create post");
    info!("  GET  /posts/show/     - Show post (?id=)");
    info!("  GET  /posts/edit/     - Edit post form (?id=)");
    info!("  POST /posts/update/   - Update post");
    info!("  POST /posts/delete/   - Delete post");
    info!("  GET  /health          - Health check");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
    }
}
