//! Company and membership handlers
//!
//! These endpoints exercise every relationship predicate: company creation
//! needs a hiring-capable role, reads need an active membership, member
//! management needs company-admin standing.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use talentgate_auth::{guard, policy, ForbiddenReason, Role};
use talentgate_core::{CompanyId, MembershipRole, MembershipStatus, UserId};
use tracing::info;

/// Roles allowed to create a company
const HIRING_ROLES: &[Role] = &[
    Role::Recruiter,
    Role::CompanyAdmin,
    Role::Admin,
    Role::SuperAdmin,
];

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: UserId,
    pub role: MembershipRole,
}

#[derive(Debug, Deserialize)]
pub struct SetMemberStatusRequest {
    pub status: MembershipStatus,
}

/// Create a company owned by the caller
pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = guard::require(Some(identity), ForbiddenReason::InsufficientRole, |u| {
        policy::has_any_role(u, HIRING_ROLES)
    })?;

    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("Company name is required".to_string()));
    }

    let company = state.companies.create(request.name.trim(), identity.id).await?;

    // The owner starts as an active company admin so membership-guarded
    // reads work immediately
    state
        .companies
        .add_member(
            company.id,
            identity.id,
            MembershipRole::CompanyAdmin,
            MembershipStatus::Active,
        )
        .await?;

    info!("Company {} created by user {}", company.id, identity.id);
    Ok(Json(json!({ "company": company })))
}

/// Company details, visible to active members
pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Result<Json<Value>, ApiError> {
    let company = state
        .companies
        .find(company_id)
        .await?
        .ok_or(ApiError::NotFound("Company"))?;

    let membership = state
        .companies
        .active_membership(identity.id, company_id)
        .await?;
    guard::require(Some(identity), ForbiddenReason::NotCompanyMember, |u| {
        policy::is_active_member(u, membership.as_ref())
    })?;

    Ok(Json(json!({ "company": company })))
}

/// Member list, visible to active members
pub async fn list_members(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(company_id): Path<CompanyId>,
) -> Result<Json<Value>, ApiError> {
    state
        .companies
        .find(company_id)
        .await?
        .ok_or(ApiError::NotFound("Company"))?;

    let membership = state
        .companies
        .active_membership(identity.id, company_id)
        .await?;
    guard::require(Some(identity), ForbiddenReason::NotCompanyMember, |u| {
        policy::is_active_member(u, membership.as_ref())
    })?;

    let members = state.companies.list_members(company_id).await?;
    Ok(Json(json!({ "members": members })))
}

/// Invite a user into the company; membership starts pending
pub async fn add_member(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(company_id): Path<CompanyId>,
    Json(request): Json<AddMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    let company = state
        .companies
        .find(company_id)
        .await?
        .ok_or(ApiError::NotFound("Company"))?;

    let identity = guard::require(Some(identity), ForbiddenReason::NotCompanyAdmin, |u| {
        policy::is_company_admin(u, &company)
    })?;

    state
        .users
        .find_by_id(request.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let membership = state
        .companies
        .add_member(
            company_id,
            request.user_id,
            request.role,
            MembershipStatus::Pending,
        )
        .await?;

    info!(
        "User {} invited to company {} by {}",
        request.user_id, company_id, identity.id
    );
    Ok(Json(json!({ "membership": membership })))
}

/// Update a member's status (single-row update)
pub async fn set_member_status(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((company_id, user_id)): Path<(CompanyId, UserId)>,
    Json(request): Json<SetMemberStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let company = state
        .companies
        .find(company_id)
        .await?
        .ok_or(ApiError::NotFound("Company"))?;

    let identity = guard::require(Some(identity), ForbiddenReason::NotCompanyAdmin, |u| {
        policy::is_company_admin(u, &company)
    })?;

    let updated = state
        .companies
        .set_member_status(company_id, user_id, request.status)
        .await?;
    if !updated {
        return Err(ApiError::NotFound("Membership"));
    }

    info!(
        "Membership ({}, {}) set to {} by {}",
        user_id, company_id, request.status, identity.id
    );
    Ok(Json(json!({
        "user_id": user_id,
        "company_id": company_id,
        "status": request.status,
    })))
}
