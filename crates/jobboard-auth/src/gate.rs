//! Authorization gates
//!
//! Pure checks consulted by handlers. Role checks run before any resource is
//! loaded; ownership checks run after the caller has loaded the resource and
//! already answered "not found" itself.

use crate::error::{AuthError, AuthResult};
use crate::types::{Identity, Principal, Role, UserId};

/// What the caller intends to do with an owned resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Modify a single resource; only the literal owner may do this
    Update,
    /// Enumerate resources; admins see everyone's
    List,
    /// Remove a resource; admins may remove anyone's
    Delete,
}

impl Access {
    fn admin_bypass(self) -> bool {
        matches!(self, Self::List | Self::Delete)
    }
}

/// Require an authenticated caller whose role is in `allowed`.
///
/// Anonymous callers get [`AuthError::Unauthenticated`]; authenticated
/// callers with any other role get [`AuthError::Forbidden`].
pub fn require_role<'a>(identity: &'a Identity, allowed: &[Role]) -> AuthResult<&'a Principal> {
    let principal = identity.principal().ok_or(AuthError::Unauthenticated)?;

    if allowed.contains(&principal.role) {
        Ok(principal)
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Require that `principal` owns the resource owned by `owner_id`.
///
/// Admins bypass this for [`Access::List`] and [`Access::Delete`] but never
/// for [`Access::Update`].
pub fn require_ownership(principal: &Principal, owner_id: UserId, access: Access) -> AuthResult<()> {
    if principal.user_id == owner_id {
        return Ok(());
    }
    if principal.is_admin() && access.admin_bypass() {
        return Ok(());
    }
    Err(AuthError::NotOwner)
}

/// Owner filter for list operations: `None` means every owner.
pub fn list_scope(principal: &Principal) -> Option<UserId> {
    if principal.is_admin() && Access::List.admin_bypass() {
        None
    } else {
        Some(principal.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsets() -> Vec<Vec<Role>> {
        (0..(1 << Role::ALL.len()))
            .map(|mask: usize| {
                Role::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_require_role_every_combination() {
        for role in Role::ALL {
            let identity = Identity::Authenticated(Principal::new(1, role));
            for allowed in subsets() {
                let result = require_role(&identity, &allowed);
                if allowed.contains(&role) {
                    assert_eq!(result.unwrap().role, role);
                } else {
                    assert!(
                        matches!(result, Err(AuthError::Forbidden)),
                        "{} passed {:?}",
                        role,
                        allowed
                    );
                }
            }
        }
    }

    #[test]
    fn test_require_role_rejects_anonymous() {
        for allowed in subsets() {
            assert!(matches!(
                require_role(&Identity::Anonymous, &allowed),
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    #[test]
    fn test_admin_has_no_implicit_capabilities() {
        let admin = Identity::Authenticated(Principal::new(1, Role::Admin));
        assert!(require_role(&admin, &[Role::Employer]).is_err());
        assert!(require_role(&admin, &[Role::JobSeeker]).is_err());
    }

    #[test]
    fn test_owner_passes_every_access() {
        for role in Role::ALL {
            let principal = Principal::new(42, role);
            for access in [Access::Update, Access::List, Access::Delete] {
                assert!(require_ownership(&principal, 42, access).is_ok());
            }
        }
    }

    #[test]
    fn test_non_owner_fails_every_access() {
        for role in [Role::Employer, Role::JobSeeker] {
            let principal = Principal::new(1, role);
            for access in [Access::Update, Access::List, Access::Delete] {
                assert!(matches!(
                    require_ownership(&principal, 2, access),
                    Err(AuthError::NotOwner)
                ));
            }
        }
    }

    #[test]
    fn test_admin_bypass_is_list_and_delete_only() {
        let admin = Principal::new(1, Role::Admin);

        assert!(require_ownership(&admin, 2, Access::List).is_ok());
        assert!(require_ownership(&admin, 2, Access::Delete).is_ok());
        assert!(matches!(
            require_ownership(&admin, 2, Access::Update),
            Err(AuthError::NotOwner)
        ));
    }

    #[test]
    fn test_list_scope() {
        assert_eq!(list_scope(&Principal::new(1, Role::Admin)), None);
        assert_eq!(list_scope(&Principal::new(5, Role::Employer)), Some(5));
        assert_eq!(list_scope(&Principal::new(9, Role::JobSeeker)), Some(9));
    }
}
