//! Talentgate Auth
//!
//! The inter-service trust core: signed identity tokens, a verifier with a
//! typed failure taxonomy, pure policy predicates, and the guard that
//! composes the two. Every Talentgate service embeds this crate and verifies
//! tokens locally against the shared secret; no network round-trip is needed
//! in the common path.

pub mod claims;
pub mod guard;
pub mod identity;
pub mod issuer;
pub mod keys;
pub mod policy;
pub mod roles;
pub mod source;
pub mod verifier;

// Re-export main types
pub use claims::{Claims, TokenKind};
pub use guard::{require, ForbiddenReason, Rejection, UnauthenticatedReason};
pub use identity::{Identity, ServiceIdentity, UserIdentity};
pub use issuer::{IssueError, TokenIssuer};
pub use keys::Keys;
pub use roles::Role;
pub use source::{IdentitySource, LocalVerifier};
pub use verifier::{TokenVerifier, VerificationFailure};
