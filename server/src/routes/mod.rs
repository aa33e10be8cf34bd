//! Router assembly and the HTTP middleware stack

use axum::Router;
use http::HeaderName;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;

/// Request ID generator: a fresh UUID per request in `x-request-id`
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        http::HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(api::bookings::router())
        .merge(api::history::router())
        .merge(api::pricing::router())
        .merge(api::promotions::router())
        .merge(api::loyalty::router())
        .merge(api::credits::router())
        .merge(api::food_items::router())
        .merge(api::devices::router())
        .merge(api::expenses::router())
        .merge(api::reports::router())
        .merge(api::settings::router())
        // Health API - public probe endpoints
        .merge(api::health::router())
}

/// Build the application with the full middleware stack applied
pub fn build_app() -> Router<ServerState> {
    let request_id = HeaderName::from_static("x-request-id");
    build_router().layer(
        ServiceBuilder::new()
            // The id must exist before TraceLayer so request spans carry it
            .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
            .layer(TraceLayer::new_for_http())
            // Echo the id on the response before it passes back through the trace
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CompressionLayer::new())
            // CORS - the POS front-end is served from another origin in dev
            .layer(CorsLayer::permissive()),
    )
}
