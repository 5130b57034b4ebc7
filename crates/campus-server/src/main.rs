mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use campus_api::CampusApi;
use campus_db::{SeedData, SessionStore, Storage};

use crate::config::Config;
use crate::routes::{AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campus_server=debug,campus_api=debug,campus_db=debug,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    let medium = config.open_medium()?;
    let storage = Storage::new(medium.clone(), SeedData::builtin()?);
    let api = CampusApi::new(storage, config.latency);

    let state: AppState = Arc::new(AppStateInner {
        api: api.clone(),
        sessions: SessionStore::new(Some(medium)),
    });

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Campus server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    api.auto_reply().shutdown();
    info!("Campus server stopped");
    Ok(())
}
