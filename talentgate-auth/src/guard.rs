//! Guard composition
//!
//! `require` composes an optional verified identity with a policy predicate.
//! The two rejection classes map to distinct status codes at the edge:
//! `Unauthenticated` (401) means "present a credential"; `Forbidden` (403)
//! means "this credential is insufficient, do not retry with the same one".

use crate::identity::UserIdentity;

/// Why no identity could be established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    MissingToken,
    InvalidToken,
    ServiceNameMismatch,
    UnknownService,
}

impl UnauthenticatedReason {
    /// Machine-readable reason code for error bodies
    pub fn code(&self) -> &'static str {
        match self {
            UnauthenticatedReason::MissingToken => "missing_token",
            UnauthenticatedReason::InvalidToken => "invalid_token",
            UnauthenticatedReason::ServiceNameMismatch => "service_name_mismatch",
            UnauthenticatedReason::UnknownService => "unknown_service",
        }
    }
}

/// Which policy predicate the verified identity failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    InsufficientRole,
    NotResourceOwner,
    NotCompanyAdmin,
    NotCompanyMember,
}

impl ForbiddenReason {
    /// Machine-readable reason code for error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ForbiddenReason::InsufficientRole => "insufficient_role",
            ForbiddenReason::NotResourceOwner => "not_resource_owner",
            ForbiddenReason::NotCompanyAdmin => "not_company_admin",
            ForbiddenReason::NotCompanyMember => "not_company_member",
        }
    }
}

/// A rejected request, tagged with its failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Unauthenticated: {}", .0.code())]
    Unauthenticated(UnauthenticatedReason),
    #[error("Forbidden: {}", .0.code())]
    Forbidden(ForbiddenReason),
}

/// Accept the identity if present and passing the predicate
///
/// `None` means the caller presented no verifiable credential and yields
/// `Unauthenticated`; a present identity failing the predicate yields
/// `Forbidden` with the given reason.
pub fn require<P>(
    identity: Option<UserIdentity>,
    reason: ForbiddenReason,
    predicate: P,
) -> Result<UserIdentity, Rejection>
where
    P: FnOnce(&UserIdentity) -> bool,
{
    let identity =
        identity.ok_or(Rejection::Unauthenticated(UnauthenticatedReason::MissingToken))?;
    if predicate(&identity) {
        Ok(identity)
    } else {
        Err(Rejection::Forbidden(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy;
    use crate::roles::Role;

    fn candidate() -> UserIdentity {
        UserIdentity::new(7, "candidate@example.com", vec![Role::Candidate])
    }

    #[test]
    fn missing_identity_is_unauthenticated() {
        let result = require(None, ForbiddenReason::InsufficientRole, |_| true);
        assert_eq!(
            result.unwrap_err(),
            Rejection::Unauthenticated(UnauthenticatedReason::MissingToken)
        );
    }

    #[test]
    fn failed_predicate_is_forbidden_not_unauthenticated() {
        let result = require(Some(candidate()), ForbiddenReason::InsufficientRole, |u| {
            policy::has_any_role(u, &[Role::Admin])
        });
        assert_eq!(
            result.unwrap_err(),
            Rejection::Forbidden(ForbiddenReason::InsufficientRole)
        );
    }

    #[test]
    fn passing_predicate_returns_the_identity() {
        let identity = require(Some(candidate()), ForbiddenReason::InsufficientRole, |u| {
            policy::has_any_role(u, &[Role::Candidate])
        })
        .unwrap();
        assert_eq!(identity.id, 7);
    }

    #[test]
    fn reason_codes_are_distinct() {
        assert_ne!(
            UnauthenticatedReason::ServiceNameMismatch.code(),
            UnauthenticatedReason::InvalidToken.code()
        );
    }
}
