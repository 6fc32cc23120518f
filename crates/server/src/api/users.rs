//! User management endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

/// Request body for POST /users.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUser {
    pub user_name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserOut {
    pub id: Uuid,
    pub user_name: String,
}

/// Create a user; when the name is taken, return the existing record.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "Created or already-existing user", body = UserOut)
    )
)]
pub(crate) async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUser>,
) -> (StatusCode, Json<UserOut>) {
    let user = state.db.find_or_create_user(&payload.user_name);
    (
        StatusCode::CREATED,
        Json(UserOut {
            id: user.id,
            user_name: user.user_name,
        }),
    )
}
