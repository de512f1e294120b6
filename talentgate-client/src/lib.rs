//! Talentgate Client
//!
//! SDK used by services to call their neighbors: short-lived service token
//! minting with brief caching, an outbound HTTP client that attaches the
//! service credential headers, and a remote who-am-I verifier that degrades
//! to local verification when the auth service is unreachable.

pub mod http;
pub mod remote;
pub mod service_token;

// Re-export main types
pub use http::{ClientError, ServiceClient};
pub use remote::{FallbackVerifier, RemoteError, RemoteVerifier};
pub use service_token::ServiceTokenProvider;
