//! Persistent stores
//!
//! Point lookups and single-row updates only; tables are bootstrapped with
//! `CREATE TABLE IF NOT EXISTS` at startup.

pub mod companies;
pub mod refresh_tokens;
pub mod users;

pub use companies::CompanyStore;
pub use refresh_tokens::{RefreshTokenRecord, RefreshTokenStore};
pub use users::{StoredUser, UserStore};
