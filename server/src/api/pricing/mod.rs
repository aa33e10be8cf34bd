//! Pricing API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::replace_category))
        .route("/quote", post(handler::quote))
        .route("/{category}", delete(handler::delete_category))
        .route(
            "/happy-hours",
            get(handler::list_windows).post(handler::create_window),
        )
        .route(
            "/happy-hours/pricing",
            get(handler::list_happy_hours_prices).post(handler::create_happy_hours_price),
        )
        .route(
            "/happy-hours/pricing/{id}",
            put(handler::update_happy_hours_price).delete(handler::delete_happy_hours_price),
        )
        .route(
            "/happy-hours/{id}",
            put(handler::update_window).delete(handler::delete_window),
        )
}
