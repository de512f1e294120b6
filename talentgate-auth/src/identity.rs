//! Typed request identities produced by the verifier

use crate::roles::Role;
use serde::{Deserialize, Serialize};
use talentgate_core::UserId;

/// Authenticated human user
///
/// An empty `roles` set is a valid, authenticated identity; it fails every
/// role predicate (403) rather than being treated as anonymous (401). This
/// semantic applies uniformly across services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
    pub roles: Vec<Role>,
}

impl UserIdentity {
    pub fn new(id: UserId, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            email: email.into(),
            roles,
        }
    }

    /// Check if the identity holds a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Authenticated machine-to-machine caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub service: String,
}

/// Either kind of verified caller
#[derive(Debug, Clone)]
pub enum Identity {
    User(UserIdentity),
    Service(ServiceIdentity),
}
