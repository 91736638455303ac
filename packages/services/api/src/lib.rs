//! Pinboard API
//!
//! A small multi-tenant resource API: accounts and the posts they own,
//! guarded by token authentication and ownership-based authorization.
//!
//! Request flow: `request_id` → `authenticate` (identity resolver, fills the
//! per-request access decision) → per-route gate layer → handler. The gate
//! must see a resolved decision, so the resolver is a router-wide layer and
//! the gates are route layers inside it.

use axum::handler::Handler;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pinboard_core::permissions::{Requirements, ResourceKind};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schema;
pub mod state;

use middleware::GateLayer;
use state::AppState;

/// Build the router: every route declares its requirements here, at
/// registration time.
pub fn create_router(state: AppState) -> Router {
    let account_owner = GateLayer::new(state.clone(), ResourceKind::Account, Requirements::OWNER);
    let post_owner = GateLayer::new(state.clone(), ResourceKind::Post, Requirements::OWNER);

    Router::new()
        .route("/health", get(health))
        .route("/login", post(handlers::login::login))
        .route(
            "/account",
            get(handlers::account::list).post(handlers::account::create),
        )
        .route(
            "/account/{id}",
            get(handlers::account::detail)
                .patch(handlers::account::update.layer(account_owner.clone()))
                .delete(handlers::account::remove.layer(account_owner)),
        )
        .route(
            "/post",
            get(handlers::post::list)
                .post(handlers::post::create.layer(post_owner.clone())),
        )
        .route(
            "/post/{id}",
            get(handlers::post::detail)
                .patch(handlers::post::update.layer(post_owner.clone()))
                .delete(handlers::post::remove.layer(post_owner)),
        )
        .layer(from_fn_with_state(state.clone(), middleware::authenticate))
        .layer(from_fn(middleware::request_id))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}
