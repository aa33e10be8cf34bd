//! Bookings API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/active", get(handler::list_active))
        .route("/refresh", post(handler::refresh))
        .route("/group", post(handler::create_group))
        .route("/group/{group_id}", get(handler::get_group))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/pause", post(handler::pause))
        .route("/{id}/resume", post(handler::resume))
        .route("/{id}/extend", post(handler::extend))
        .route("/{id}/complete", post(handler::complete))
}
