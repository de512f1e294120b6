//! Pluggable identity resolution
//!
//! `IdentitySource` is the seam between "how a user token becomes an
//! identity" and the code that needs one: the default implementation decodes
//! locally, and `talentgate-client` provides a remote-with-fallback strategy
//! behind the same trait.

use crate::identity::UserIdentity;
use crate::verifier::{TokenVerifier, VerificationFailure};
use async_trait::async_trait;

/// Resolves a user token into a verified identity
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn resolve_user(&self, token: &str) -> Result<UserIdentity, VerificationFailure>;
}

/// Stateless local verification against the shared secret
#[derive(Clone)]
pub struct LocalVerifier {
    verifier: TokenVerifier,
}

impl LocalVerifier {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl IdentitySource for LocalVerifier {
    async fn resolve_user(&self, token: &str) -> Result<UserIdentity, VerificationFailure> {
        self.verifier.verify_access(token)
    }
}
