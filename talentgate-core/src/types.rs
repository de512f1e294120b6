//! Core data type definitions

use serde::{Deserialize, Serialize};

/// User identifier (the `sub` claim of user tokens)
pub type UserId = i64;

/// Company identifier
pub type CompanyId = i64;

/// A company on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// User who owns this company; authoritative for company-admin checks
    pub admin_id: UserId,
}

/// In-company role granted through a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipRole {
    #[serde(rename = "ADMIN_ENTREPRISE")]
    CompanyAdmin,
    #[serde(rename = "RECRUTEUR")]
    Recruiter,
}

impl std::fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipRole::CompanyAdmin => write!(f, "ADMIN_ENTREPRISE"),
            MembershipRole::Recruiter => write!(f, "RECRUTEUR"),
        }
    }
}

impl std::str::FromStr for MembershipRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN_ENTREPRISE" => Ok(MembershipRole::CompanyAdmin),
            "RECRUTEUR" => Ok(MembershipRole::Recruiter),
            _ => Err(format!("Unknown membership role: {}", s)),
        }
    }
}

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Active,
    Inactive,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Pending => write!(f, "pending"),
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MembershipStatus::Pending),
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            _ => Err(format!("Unknown membership status: {}", s)),
        }
    }
}

/// Relationship between a user and a company
///
/// At most one membership row per (user, company) pair is authoritative;
/// the store enforces uniqueness on that pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyMembership {
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub role: MembershipRole,
    pub status: MembershipStatus,
}

impl CompanyMembership {
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}
