pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod middleware;
pub mod membership;
pub mod routes;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::MembershipStore;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let store = MembershipStore::new(pool, config.operation_timeout);

    tracing::info!(
        "Approval capacity policy: {:?}, member mutation policy: {:?}",
        config.approval_capacity,
        config.member_mutation
    );

    let state: SharedState = Arc::new(AppState::new(store, config));

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
