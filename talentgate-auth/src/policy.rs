//! Authorization predicates
//!
//! Each predicate is a pure boolean function over an identity (and sometimes
//! a resource). Relationship lookups happen in the caller; the membership row
//! is passed in so the predicate itself stays side-effect-free.

use crate::identity::UserIdentity;
use crate::roles::Role;
use talentgate_core::{Company, CompanyMembership, UserId};

/// True if the identity holds at least one of the given roles
pub fn has_any_role(identity: &UserIdentity, roles: &[Role]) -> bool {
    roles.iter().any(|role| identity.has_role(*role))
}

/// True if the identity is the target user or holds a platform admin role
pub fn is_self_or_admin(identity: &UserIdentity, target_user_id: UserId) -> bool {
    identity.id == target_user_id || identity.roles.iter().any(|r| r.is_platform_admin())
}

/// True if the identity owns the company, or holds the super-admin role
///
/// Only `SuperAdmin` bypasses the ownership check; plain `Admin` does not.
pub fn is_company_admin(identity: &UserIdentity, company: &Company) -> bool {
    company.admin_id == identity.id || identity.has_role(Role::SuperAdmin)
}

/// True if an active membership exists for the identity, or the identity
/// holds the super-admin role
pub fn is_active_member(identity: &UserIdentity, membership: Option<&CompanyMembership>) -> bool {
    if identity.has_role(Role::SuperAdmin) {
        return true;
    }
    membership.is_some_and(|m| m.user_id == identity.id && m.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentgate_core::{MembershipRole, MembershipStatus};

    fn user(id: UserId, roles: Vec<Role>) -> UserIdentity {
        UserIdentity::new(id, "user@example.com", roles)
    }

    fn company(admin_id: UserId) -> Company {
        Company {
            id: 10,
            name: "Acme".to_string(),
            admin_id,
        }
    }

    fn membership(user_id: UserId, status: MembershipStatus) -> CompanyMembership {
        CompanyMembership {
            user_id,
            company_id: 10,
            role: MembershipRole::Recruiter,
            status,
        }
    }

    #[test]
    fn has_any_role_is_exact_intersection() {
        let identity = user(1, vec![Role::Candidate]);
        assert!(has_any_role(&identity, &[Role::Candidate, Role::Admin]));
        assert!(!has_any_role(&identity, &[Role::Admin]));
        assert!(!has_any_role(&user(1, vec![]), &[Role::Admin]));
        assert!(!has_any_role(&identity, &[]));
    }

    #[test]
    fn self_or_admin_accepts_subject_and_platform_admins() {
        assert!(is_self_or_admin(&user(5, vec![]), 5));
        assert!(is_self_or_admin(&user(1, vec![Role::Admin]), 5));
        assert!(is_self_or_admin(&user(1, vec![Role::SuperAdmin]), 5));
        assert!(!is_self_or_admin(&user(1, vec![Role::CompanyAdmin]), 5));
    }

    #[test]
    fn company_admin_requires_ownership_or_super_admin() {
        let acme = company(5);
        assert!(is_company_admin(&user(5, vec![]), &acme));
        assert!(is_company_admin(&user(1, vec![Role::SuperAdmin]), &acme));
        // Plain platform Admin does not bypass the ownership check
        assert!(!is_company_admin(&user(1, vec![Role::Admin]), &acme));
        assert!(!is_company_admin(&user(1, vec![Role::CompanyAdmin]), &acme));
    }

    #[test]
    fn active_member_requires_active_status() {
        let identity = user(5, vec![]);
        assert!(is_active_member(
            &identity,
            Some(&membership(5, MembershipStatus::Active))
        ));
        assert!(!is_active_member(
            &identity,
            Some(&membership(5, MembershipStatus::Pending))
        ));
        assert!(!is_active_member(
            &identity,
            Some(&membership(5, MembershipStatus::Inactive))
        ));
        assert!(!is_active_member(&identity, None));
        // Someone else's row never qualifies
        assert!(!is_active_member(
            &identity,
            Some(&membership(6, MembershipStatus::Active))
        ));
        // Super admin bypass
        assert!(is_active_member(&user(1, vec![Role::SuperAdmin]), None));
    }
}
