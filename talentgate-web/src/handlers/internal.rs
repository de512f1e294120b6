//! Service-to-service endpoints
//!
//! Guarded by `ServiceCaller`: a verified service token for a recognized
//! service name, with the optional `X-Service-Name` cross-check.

use crate::auth::ServiceCaller;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use talentgate_auth::UserIdentity;
use talentgate_core::{CompanyId, UserId};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct MembershipQuery {
    pub user_id: UserId,
    pub company_id: CompanyId,
}

/// User lookup for neighboring services
pub async fn get_user(
    State(state): State<AppState>,
    ServiceCaller(caller): ServiceCaller,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserIdentity>, ApiError> {
    debug!("Internal user lookup for {} by {}", user_id, caller.service);

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(user.to_identity()))
}

/// Membership lookup for neighboring services
pub async fn get_membership(
    State(state): State<AppState>,
    ServiceCaller(caller): ServiceCaller,
    Query(query): Query<MembershipQuery>,
) -> Result<Json<Value>, ApiError> {
    debug!(
        "Internal membership lookup ({}, {}) by {}",
        query.user_id, query.company_id, caller.service
    );

    let membership = state
        .companies
        .membership(query.user_id, query.company_id)
        .await?;

    Ok(Json(json!({ "membership": membership })))
}
