//! Local token verification
//!
//! Every service runs this verifier against the same shared secret, so a
//! token minted by the auth service validates anywhere without a network
//! round-trip. Signature comparison is constant-time (ring HMAC via
//! jsonwebtoken) and precedes claims parsing.

use crate::claims::{Claims, TokenKind};
use crate::identity::{Identity, ServiceIdentity, UserIdentity};
use crate::keys::Keys;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, Validation};
use talentgate_core::{AuthConfig, UserId};
use tracing::debug;

/// Why a presented token was rejected
///
/// Absence of a token is never a verification failure; callers check for a
/// missing credential before invoking the verifier. All variants surface
/// externally as a coarse 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFailure {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    BadSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Wrong token kind: expected {expected}, found {found}")]
    WrongKind {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("Token is missing required claim '{0}'")]
    MissingClaims(&'static str),
}

/// Validates token signature, expiry, kind, and claim shape
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Keys,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            keys: Keys::new(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify an access token and extract the user identity
    pub fn verify_access(&self, token: &str) -> Result<UserIdentity, VerificationFailure> {
        let claims = self.decode(token)?;
        if claims.kind != TokenKind::Access {
            return Err(VerificationFailure::WrongKind {
                expected: "access",
                found: claims.kind,
            });
        }
        Self::user_identity(claims)
    }

    /// Verify a refresh token and extract its subject
    pub fn verify_refresh(&self, token: &str) -> Result<UserId, VerificationFailure> {
        let claims = self.decode(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(VerificationFailure::WrongKind {
                expected: "refresh",
                found: claims.kind,
            });
        }
        claims.sub.ok_or(VerificationFailure::MissingClaims("sub"))
    }

    /// Verify a service token and extract the service identity
    pub fn verify_service(&self, token: &str) -> Result<ServiceIdentity, VerificationFailure> {
        let claims = self.decode(token)?;
        if claims.kind != TokenKind::Service {
            return Err(VerificationFailure::WrongKind {
                expected: "service",
                found: claims.kind,
            });
        }
        let service = claims
            .service
            .ok_or(VerificationFailure::MissingClaims("service"))?;
        Ok(ServiceIdentity { service })
    }

    /// Verify a token that may identify either a user or a service
    ///
    /// Refresh tokens are never a valid request credential.
    pub fn verify_any(&self, token: &str) -> Result<Identity, VerificationFailure> {
        let claims = self.decode(token)?;
        match claims.kind {
            TokenKind::Access => Self::user_identity(claims).map(Identity::User),
            TokenKind::Service => {
                let service = claims
                    .service
                    .ok_or(VerificationFailure::MissingClaims("service"))?;
                Ok(Identity::Service(ServiceIdentity { service }))
            }
            TokenKind::Refresh => Err(VerificationFailure::WrongKind {
                expected: "access or service",
                found: TokenKind::Refresh,
            }),
        }
    }

    fn user_identity(claims: Claims) -> Result<UserIdentity, VerificationFailure> {
        let id = claims.sub.ok_or(VerificationFailure::MissingClaims("sub"))?;
        let email = claims
            .email
            .ok_or(VerificationFailure::MissingClaims("email"))?;
        Ok(UserIdentity {
            id,
            email,
            roles: claims.roles,
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, VerificationFailure> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation).map_or_else(
            |e| {
                let failure = match e.kind() {
                    ErrorKind::ExpiredSignature => VerificationFailure::Expired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName
                    | ErrorKind::Crypto(_) => VerificationFailure::BadSignature,
                    _ => VerificationFailure::Malformed,
                };
                debug!("Token verification failed: {} ({})", failure, e);
                Err(failure)
            },
            |data| Ok(data.claims),
        )
    }
}
