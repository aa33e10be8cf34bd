//! Credit Ledger API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/credits", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_accounts))
        .route("/lookup/{phone}", get(handler::get_account_by_phone))
        .route("/entries/{id}/paid", post(handler::mark_entry_paid))
        .route("/{id}", get(handler::get_account))
        .route("/{id}/payments", post(handler::record_payment))
}
