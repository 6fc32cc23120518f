use std::sync::Arc;

use tracing::{info, warn};

use firmo_llm::{BooleanOracle, SemanticOracle};
use firmo_rules::RuleEngine;
use firmo_server::router::build_router;
use firmo_server::state::AppState;
use firmo_server::store::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    firmo_core::config::load_dotenv();
    let config = firmo_core::Config::from_env();
    config.log_summary();

    // Without an oracle the server still runs; LLM conditions just
    // evaluate to no-match.
    let oracle: Option<Arc<dyn BooleanOracle>> = match firmo_llm::create_provider(&config.oracle) {
        Ok(provider) => Some(Arc::new(SemanticOracle::new(provider))),
        Err(err) => {
            warn!("semantic oracle disabled: {}", err);
            None
        }
    };

    let state = Arc::new(AppState {
        db: Database::new(),
        engine: RuleEngine::new(oracle),
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}
