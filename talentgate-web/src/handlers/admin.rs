//! Platform admin handlers

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

/// List all user accounts (platform admins only)
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Value>, ApiError> {
    let users = state.users.list().await?;

    let users: Vec<Value> = users
        .iter()
        .map(|u| {
            json!({
                "id": u.id,
                "email": u.email,
                "roles": u.roles,
                "created_at": u.created_at,
            })
        })
        .collect();

    Ok(Json(json!({ "users": users })))
}
