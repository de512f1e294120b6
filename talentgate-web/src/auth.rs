//! Request identity extractors
//!
//! Absence of a credential is checked here, before the verifier is invoked;
//! that keeps "no credential" (401 missing_token) distinguishable from "bad
//! credential" (401 invalid_token) and lets optional-auth endpoints see the
//! difference.

use crate::{error::ApiError, AppState};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use talentgate_auth::{ForbiddenReason, Rejection, ServiceIdentity, UserIdentity};
use tracing::{debug, warn};

/// Header carrying the service credential
pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";
/// Optional cross-check header naming the calling service
pub const SERVICE_NAME_HEADER: &str = "x-service-name";

/// Extract the bearer token from the Authorization header, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// Authenticated user (verified access token required)
pub struct AuthUser(pub UserIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(&parts.headers).ok_or(ApiError::MissingToken)?;

        match app_state.verifier.verify_access(token) {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(failure) => {
                debug!("Access token rejected: {}", failure);
                Err(ApiError::InvalidToken)
            }
        }
    }
}

/// Optional user extractor: no header yields `None`, a present-but-invalid
/// credential is still rejected
pub struct OptionalAuthUser(pub Option<UserIdentity>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if bearer_token(&parts.headers).is_none() {
            return Ok(OptionalAuthUser(None));
        }
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        Ok(OptionalAuthUser(Some(identity)))
    }
}

/// Platform admin extractor: authenticated user holding an admin role
pub struct AdminUser(pub UserIdentity);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;

        if identity.roles.iter().any(|r| r.is_platform_admin()) {
            Ok(AdminUser(identity))
        } else {
            warn!("Admin access required but user {} is not admin", identity.id);
            Err(Rejection::Forbidden(ForbiddenReason::InsufficientRole).into())
        }
    }
}

/// Verified service-to-service caller
///
/// Requires `X-Service-Token` with kind `service`, a recognized service
/// name, and (when `X-Service-Name` is present) a matching cross-check.
pub struct ServiceCaller(pub ServiceIdentity);

impl<S> FromRequestParts<S> for ServiceCaller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(SERVICE_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let identity = app_state.verifier.verify_service(token).map_err(|failure| {
            debug!("Service token rejected: {}", failure);
            ApiError::InvalidToken
        })?;

        if !app_state.config.auth.is_known_service(&identity.service) {
            warn!("Unknown service presented a valid token: {}", identity.service);
            return Err(ApiError::UnknownService);
        }

        if let Some(claimed) = parts
            .headers
            .get(SERVICE_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            if claimed != identity.service {
                warn!(
                    "Service name mismatch: token says {}, header says {}",
                    identity.service, claimed
                );
                return Err(ApiError::ServiceNameMismatch);
            }
        }

        Ok(ServiceCaller(identity))
    }
}
