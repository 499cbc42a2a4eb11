use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))

        // Intents
        .route("/intents", post(handlers::create_intent).get(handlers::list_intents))
        .route(
            "/intents/:intent_id",
            get(handlers::get_intent).delete(handlers::cancel_intent),
        )

        // Matching and settlement
        .route("/solve/:intent_id", post(handlers::solve_chain))
        .route("/settle", post(handlers::settle_chain))
        .route("/settlements", get(handlers::list_settlements))
        .route("/settlements/:settlement_id", get(handlers::get_settlement))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
