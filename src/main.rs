#![warn(clippy::all)]

use std::sync::Arc;

use tracing_subscriber::fmt::format::FmtSpan;

use quiz_api::config::Config;
use quiz_api::routes;
use quiz_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = Config::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let addr = config.socket_addr()?;

    let store: Store = match &config.database_url {
        Some(db_url) => {
            let store = PgStore::new(db_url, config.max_connections).await?;
            store.run_migrations().await?;
            tracing::info!("Connected to Postgres, migrations applied");
            Arc::new(store)
        }
        None => {
            tracing::warn!("No database_url configured, quizzes are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!("quiz-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Listening on {}", addr);

    warp::serve(routes::routes(store)).run(addr).await;

    Ok(())
}
