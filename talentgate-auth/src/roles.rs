//! Platform role model
//!
//! Roles are a closed enum rather than free-form strings: a signed token
//! carrying an unrecognized role string fails claims parsing outright.

use serde::{Deserialize, Serialize};

/// Platform-level roles carried in user tokens
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_CANDIDAT")]
    Candidate,
    #[serde(rename = "ROLE_RECRUITER")]
    Recruiter,
    #[serde(rename = "ROLE_COMPANY_ADMIN")]
    CompanyAdmin,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    /// Whether this role grants platform-wide administrative access
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Candidate => write!(f, "ROLE_CANDIDAT"),
            Role::Recruiter => write!(f, "ROLE_RECRUITER"),
            Role::CompanyAdmin => write!(f, "ROLE_COMPANY_ADMIN"),
            Role::Admin => write!(f, "ROLE_ADMIN"),
            Role::SuperAdmin => write!(f, "ROLE_SUPER_ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_CANDIDAT" => Ok(Role::Candidate),
            "ROLE_RECRUITER" => Ok(Role::Recruiter),
            "ROLE_COMPANY_ADMIN" => Ok(Role::CompanyAdmin),
            "ROLE_ADMIN" => Ok(Role::Admin),
            "ROLE_SUPER_ADMIN" => Ok(Role::SuperAdmin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_round_trip_wire_strings() {
        for role in [
            Role::Candidate,
            Role::Recruiter,
            Role::CompanyAdmin,
            Role::Admin,
            Role::SuperAdmin,
        ] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert!(Role::from_str("ROLE_INTERN").is_err());
        assert!(serde_json::from_str::<Role>("\"ROLE_INTERN\"").is_err());
    }

    #[test]
    fn platform_admin_roles() {
        assert!(Role::Admin.is_platform_admin());
        assert!(Role::SuperAdmin.is_platform_admin());
        assert!(!Role::CompanyAdmin.is_platform_admin());
        assert!(!Role::Candidate.is_platform_admin());
    }
}
