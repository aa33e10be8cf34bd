//! Device Config API module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/devices", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::upsert))
        .route(
            "/{category}",
            get(handler::get_by_category).delete(handler::delete),
        )
}
