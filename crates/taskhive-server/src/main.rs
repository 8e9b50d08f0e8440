//! TaskHive Server — application entry point.
//!
//! Bootstraps tracing, connects to SurrealDB, and applies pending
//! schema migrations. The REST API layer sits on top of this binary.

use taskhive_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("taskhive=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting TaskHive server...");

    let config = DbConfig::from_env();
    let _manager = match DbManager::bootstrap(&config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize the database");
            std::process::exit(1);
        }
    };

    tracing::info!("Database ready");

    // TODO: start the REST API server once the HTTP layer lands.

    tracing::info!("TaskHive server stopped.");
}
