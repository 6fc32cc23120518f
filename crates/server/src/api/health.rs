//! Server readiness and record counts.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthOut {
    pub status: String,
    pub users: usize,
    pub companies: usize,
    pub rules: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server status and record counts", body = HealthOut)
    )
)]
pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthOut> {
    Json(HealthOut {
        status: "ok".to_string(),
        users: state.db.user_count(),
        companies: state.db.company_count(),
        rules: state.db.rule_count(),
    })
}
