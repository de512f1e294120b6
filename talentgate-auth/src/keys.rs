//! Signing key material

use jsonwebtoken::{DecodingKey, EncodingKey};

/// JWT signing and verification keys derived from the shared secret
///
/// Built from `AuthConfig` at startup rather than from a process-global, so
/// the shared-secret contract stays explicit in each service's wiring.
#[derive(Clone)]
pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}
