//! Server implementation
//!
//! HTTP server startup, graceful shutdown, background task lifecycle.

use crate::core::{Config, ServerState};
use crate::routes;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create the server around already-initialized state.
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<(), BoxError> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let tasks = state.start_background_tasks();

        let app = routes::build_app().with_state(state.clone());

        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Arcade server listening on http://{}", addr);
        tracing::info!(
            "Environment: {} | Database: {}",
            self.config.environment,
            self.config.db_path
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tasks.shutdown().await;

        Ok(())
    }
}
