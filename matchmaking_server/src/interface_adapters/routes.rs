use crate::interface_adapters::handlers::pool::{health, list_pool};
use crate::interface_adapters::handlers::queue::{enqueue, status, withdraw};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

// Build the HTTP router for matchmaking endpoints.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/matchmaking/queue", post(enqueue))
        .route(
            "/matchmaking/queue/{player_id}",
            get(status).delete(withdraw),
        )
        .route("/matchmaking/pool", get(list_pool))
        .with_state(state)
}
