//! Talentgate Core
//!
//! Shared domain types, configuration, and error handling used by every
//! Talentgate service crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export main types
pub use config::AuthConfig;
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use types::{
    Company, CompanyId, CompanyMembership, MembershipRole, MembershipStatus, UserId,
};
