pub mod config;
pub mod errors;
pub mod handlers;
pub mod kv;
pub mod models;
pub mod resource;
pub mod sanitize;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::records;
use crate::models::{Bookings, Reviews};
use crate::state::AppState;

/// Builds the application router. Shared between `main` and the
/// integration tests so both serve the exact same routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/bookings",
            get(records::list::<Bookings>)
                .post(records::create::<Bookings>)
                .delete(records::delete::<Bookings>)
                .options(records::preflight)
                .fallback(records::method_not_allowed),
        )
        .route(
            "/reviews",
            get(records::list::<Reviews>)
                .post(records::create::<Reviews>)
                .delete(records::delete::<Reviews>)
                .options(records::preflight)
                .fallback(records::method_not_allowed),
        )
        .route(
            "/notify",
            post(handlers::notify::send)
                .options(records::preflight)
                .fallback(records::method_not_allowed),
        )
        .route("/test", get(handlers::health::health))
        .layer(cors)
        .with_state(state)
}
