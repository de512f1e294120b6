//! Authentication handlers: registration, login, refresh, logout, who-am-I

use crate::auth::{AuthUser, OptionalAuthUser};
use crate::error::ApiError;
use crate::store::StoredUser;
use crate::AppState;
use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use talentgate_auth::{guard, policy, ForbiddenReason, Role};
use talentgate_core::UserId;
use tracing::{debug, info};

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Self-signup defaults to the candidate role
    pub roles: Option<Vec<Role>>,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request; revokes the named refresh token
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Logout-all request; revokes every session of the target account
#[derive(Debug, Deserialize)]
pub struct LogoutAllRequest {
    /// Defaults to the caller's own account
    pub user_id: Option<UserId>,
}

/// Public user information
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub roles: Vec<Role>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserInfo {
    fn from_stored(user: &StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            created_at: user.created_at,
        }
    }
}

/// Login/registration response carrying the token pair
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("User registration attempt: {}", request.email);

    if request.email.is_empty() || !request.email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }
    if request.password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let roles = request.roles.unwrap_or_else(|| vec![Role::Candidate]);
    let user = state
        .users
        .create_user(&request.email, &request.password, roles)
        .await?;

    info!("User registered: {}", user.email);
    issue_pair(&state, &user).await
}

/// Authenticate with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("Login attempt: {}", request.email);

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !user.verify_password(&request.password) {
        debug!("Invalid password for: {}", request.email);
        return Err(ApiError::InvalidCredentials);
    }

    info!("User logged in: {}", user.email);
    issue_pair(&state, &user).await
}

/// Exchange a live refresh token for a new access token
///
/// The signed token must verify AND its server-side record must still be
/// usable: an expired or revoked record never yields a new access token,
/// regardless of the token's own `exp` claim.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = state
        .verifier
        .verify_refresh(&request.refresh_token)
        .map_err(|failure| {
            debug!("Refresh token rejected: {}", failure);
            ApiError::InvalidToken
        })?;

    let record = state
        .refresh_tokens
        .find(&request.refresh_token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    if record.user_id != user_id || !record.is_usable(Utc::now()) {
        debug!("Refresh record unusable for user {}", user_id);
        return Err(ApiError::InvalidToken);
    }

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    let access_token = state
        .issuer
        .issue_access_token(user.id, &user.email, user.roles.clone())?;

    info!("Access token refreshed for user {}", user.id);
    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": state.issuer.access_ttl_seconds(),
    })))
}

/// Revoke a refresh token (logout)
///
/// The session owner or a platform admin may revoke it.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<Value>, ApiError> {
    let owner_id = state
        .verifier
        .verify_refresh(&request.refresh_token)
        .map_err(|failure| {
            debug!("Logout token rejected: {}", failure);
            ApiError::InvalidToken
        })?;

    let identity = guard::require(Some(identity), ForbiddenReason::NotResourceOwner, |u| {
        policy::is_self_or_admin(u, owner_id)
    })?;

    state.refresh_tokens.revoke(&request.refresh_token).await?;

    info!("Session revoked for user {} by {}", owner_id, identity.id);
    Ok(Json(json!({
        "message": "Logged out successfully",
        "user_id": owner_id,
    })))
}

/// Revoke every refresh token of an account
///
/// The account owner or a platform admin may do this (credential rotation,
/// account lockout).
pub async fn logout_all(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<LogoutAllRequest>,
) -> Result<Json<Value>, ApiError> {
    let target = request.user_id.unwrap_or(identity.id);

    let identity = guard::require(Some(identity), ForbiddenReason::NotResourceOwner, |u| {
        policy::is_self_or_admin(u, target)
    })?;

    let revoked = state.refresh_tokens.revoke_all_for_user(target).await?;

    info!(
        "All sessions ({}) revoked for user {} by {}",
        revoked, target, identity.id
    );
    Ok(Json(json!({
        "message": "All sessions revoked",
        "user_id": target,
        "revoked_sessions": revoked,
    })))
}

/// Session probe for frontends: tells "not logged in" apart from "logged in"
/// without requiring a credential; a present-but-invalid one is still a 401
pub async fn session(OptionalAuthUser(identity): OptionalAuthUser) -> Json<Value> {
    match identity {
        Some(user) => Json(json!({
            "authenticated": true,
            "user": {
                "id": user.id,
                "email": user.email,
                "roles": user.roles,
            },
        })),
        None => Json(json!({ "authenticated": false })),
    }
}

/// Current user information (the canonical who-am-I endpoint other services
/// fall back on)
pub async fn me(AuthUser(identity): AuthUser) -> Json<Value> {
    Json(json!({
        "id": identity.id,
        "email": identity.email,
        "roles": identity.roles,
    }))
}

async fn issue_pair(state: &AppState, user: &StoredUser) -> Result<Json<AuthResponse>, ApiError> {
    let access_token = state
        .issuer
        .issue_access_token(user.id, &user.email, user.roles.clone())?;
    let refresh_token = state.issuer.issue_refresh_token(user.id)?;

    let expires_at = Utc::now() + state.issuer.refresh_ttl();
    state
        .refresh_tokens
        .insert(user.id, &refresh_token, expires_at)
        .await?;

    Ok(Json(AuthResponse {
        user: UserInfo::from_stored(user),
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.issuer.access_ttl_seconds(),
    }))
}
