//! Reports API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/history", get(handler::history_for_period))
}
