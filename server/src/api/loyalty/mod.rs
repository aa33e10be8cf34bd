//! Loyalty API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/loyalty", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/members", get(handler::list_members))
        .route("/members/{id}", get(handler::get_member).put(handler::update_member))
        .route("/member/{phone}", get(handler::get_member_by_phone))
        .route("/config", get(handler::get_config).put(handler::update_config))
        .route("/rewards", get(handler::list_rewards).post(handler::create_reward))
        .route(
            "/rewards/{id}",
            put(handler::update_reward).delete(handler::delete_reward),
        )
        .route("/redeem", post(handler::redeem))
        .route("/redemptions", get(handler::list_redemptions))
}
