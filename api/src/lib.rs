// ============================================================================
// SERVER-RENDERED BLOG POSTS OVER SQLITE
// ============================================================================

// - List, create, show, edit, update and delete posts as HTML pages
// - Differential updates that only write changed columns
// - One error path: every handler failure is logged and answered with a 500
// - Structured logging and per-request tracing

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod states;
pub mod views;

pub use states::AppState;

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use routes::{
    health::health_check,
    post::{
        CREATE_ROUTE, DELETE_ROUTE, EDIT_ROUTE, LIST_ROUTE, NEW_ROUTE, SHOW_ROUTE, UPDATE_ROUTE,
        create_post, delete_post, edit_post, list_posts, new_post, show_post, update_post,
    },
};

/// Build the router
///
/// Post routes accept any method, so a wrong verb on a mutating route reaches
/// the handler and fails through `AppError` like every other failure. Paths
/// without a route render the list.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(LIST_ROUTE, any(list_posts))
        .route(NEW_ROUTE, any(new_post))
        .route(CREATE_ROUTE, any(create_post))
        .route(SHOW_ROUTE, any(show_post))
        .route(EDIT_ROUTE, any(edit_post))
        .route(UPDATE_ROUTE, any(update_post))
        .route(DELETE_ROUTE, any(delete_post))
        .route("/health", get(health_check))
        .fallback(list_posts)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
