//! Wire claims carried inside signed tokens

use crate::roles::Role;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use talentgate_core::UserId;

/// Token kind marker, distinguishing user credentials from service ones
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Service,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
            TokenKind::Service => write!(f, "service"),
        }
    }
}

/// JWT claims structure
///
/// User tokens carry `sub`/`email`/`roles`; service tokens carry only
/// `service` and must never carry end-user roles.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<UserId>,
    /// User email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Roles snapshot taken at mint time, not re-checked per request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Token kind (access, refresh, or service)
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Calling service name (service tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Claims {
    /// Create new access token claims
    pub fn new_access(user_id: UserId, email: String, roles: Vec<Role>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: Some(user_id),
            email: Some(email),
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind: TokenKind::Access,
            service: None,
        }
    }

    /// Create new refresh token claims
    pub fn new_refresh(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: Some(user_id),
            email: None,
            roles: vec![],
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind: TokenKind::Refresh,
            service: None,
        }
    }

    /// Create new service token claims
    pub fn new_service(service_name: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: None,
            email: None,
            roles: vec![],
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind: TokenKind::Service,
            service: Some(service_name),
        }
    }

    /// Check if the claims are past their expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
