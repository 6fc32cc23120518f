//! HTTP router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        .route("/users", post(api::users::create_user))
        .route("/rules", post(api::rules::create_rules))
        .route("/companies", get(api::companies::list_companies))
        .route("/companies/import", post(api::companies::import_companies))
        .route(
            "/companies/import/csv",
            post(api::companies::import_companies_csv),
        )
        .route("/companies/process", post(api::rules::process_companies))
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
