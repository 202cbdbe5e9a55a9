// API module - HTTP endpoints

pub mod events;
pub mod health;
pub mod pages;
pub mod state;

use axum::{routing::get, Router};

use state::AppState;

/// Every route the server exposes, with state applied
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(pages::router())
        .merge(events::router())
        .with_state(state)
}
