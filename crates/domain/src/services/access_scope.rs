//! Base-scoped access rules.
//!
//! Every read and write path funnels through [`resolve_scope`]:
//!
//! - admin / logistics_officer: unrestricted; a requested base is used as-is.
//! - base_commander: a requested base must equal their own; with no request
//!   the result is narrowed to their own base.
//! - base_commander without an assigned base: forbidden.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Principal, Role};

/// Which bases a query or mutation may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseScope {
    /// Every base.
    All,
    /// Exactly one base.
    Base(Uuid),
}

impl BaseScope {
    /// The single base this scope is narrowed to, if any.
    pub fn base_id(&self) -> Option<Uuid> {
        match self {
            BaseScope::All => None,
            BaseScope::Base(id) => Some(*id),
        }
    }

    pub fn permits(&self, base_id: Uuid) -> bool {
        match self {
            BaseScope::All => true,
            BaseScope::Base(id) => *id == base_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("Access denied. You can only access resources at your assigned base.")]
    OutsideAssignedBase,

    #[error("Access denied. No base is assigned to your account.")]
    NoAssignedBase,

    #[error("Access denied. Your role is not permitted to perform this action.")]
    RoleNotPermitted,
}

/// Resolves the base constraint for `principal` given an optional requested base.
pub fn resolve_scope(
    principal: &Principal,
    requested_base_id: Option<Uuid>,
) -> Result<BaseScope, ScopeError> {
    if principal.role.is_unrestricted() {
        return Ok(requested_base_id.map_or(BaseScope::All, BaseScope::Base));
    }

    let own_base = principal.base_id.ok_or(ScopeError::NoAssignedBase)?;
    match requested_base_id {
        Some(requested) if requested != own_base => Err(ScopeError::OutsideAssignedBase),
        _ => Ok(BaseScope::Base(own_base)),
    }
}

/// Checks that `principal` may act on something located at `base_id`.
pub fn require_base_access(principal: &Principal, base_id: Uuid) -> Result<(), ScopeError> {
    resolve_scope(principal, Some(base_id)).map(|_| ())
}

/// Checks that `principal` holds one of `allowed`.
pub fn require_role(principal: &Principal, allowed: &[Role]) -> Result<(), ScopeError> {
    if principal.has_any_role(allowed) {
        Ok(())
    } else {
        Err(ScopeError::RoleNotPermitted)
    }
}

/// Constraint for transfer listings, which involve two bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferScope {
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Option<Uuid>,
    /// Match rows where either side equals this base.
    pub either_base_id: Option<Uuid>,
}

/// Two-sided variant of [`resolve_scope`] for transfer history.
///
/// A base commander may filter on either side as long as their own base is
/// one of the requested sides; with no side requested, results are narrowed
/// to transfers touching their base.
pub fn transfer_scope(
    principal: &Principal,
    from_base_id: Option<Uuid>,
    to_base_id: Option<Uuid>,
) -> Result<TransferScope, ScopeError> {
    let requested = TransferScope {
        from_base_id,
        to_base_id,
        either_base_id: None,
    };

    if principal.role.is_unrestricted() {
        return Ok(requested);
    }

    let own_base = principal.base_id.ok_or(ScopeError::NoAssignedBase)?;
    match (from_base_id, to_base_id) {
        (Some(from), Some(to)) if from != own_base && to != own_base => {
            Err(ScopeError::OutsideAssignedBase)
        }
        (Some(from), None) if from != own_base => Err(ScopeError::OutsideAssignedBase),
        (None, Some(to)) if to != own_base => Err(ScopeError::OutsideAssignedBase),
        (None, None) => Ok(TransferScope {
            either_base_id: Some(own_base),
            ..requested
        }),
        _ => Ok(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role, base_id: Option<Uuid>) -> Principal {
        Principal::new(Uuid::new_v4(), role, base_id)
    }

    #[test]
    fn test_unrestricted_roles_use_request_as_is() {
        let requested = Uuid::new_v4();
        for role in [Role::Admin, Role::LogisticsOfficer] {
            let p = principal(role, None);
            assert_eq!(resolve_scope(&p, None), Ok(BaseScope::All));
            assert_eq!(
                resolve_scope(&p, Some(requested)),
                Ok(BaseScope::Base(requested))
            );
        }
    }

    #[test]
    fn test_commander_narrowed_to_own_base() {
        let own = Uuid::new_v4();
        let p = principal(Role::BaseCommander, Some(own));
        assert_eq!(resolve_scope(&p, None), Ok(BaseScope::Base(own)));
        assert_eq!(resolve_scope(&p, Some(own)), Ok(BaseScope::Base(own)));
    }

    #[test]
    fn test_commander_other_base_forbidden() {
        let p = principal(Role::BaseCommander, Some(Uuid::new_v4()));
        assert_eq!(
            resolve_scope(&p, Some(Uuid::new_v4())),
            Err(ScopeError::OutsideAssignedBase)
        );
    }

    #[test]
    fn test_commander_without_base_forbidden() {
        let p = principal(Role::BaseCommander, None);
        assert_eq!(resolve_scope(&p, None), Err(ScopeError::NoAssignedBase));
    }

    #[test]
    fn test_require_base_access() {
        let own = Uuid::new_v4();
        let commander = principal(Role::BaseCommander, Some(own));
        assert!(require_base_access(&commander, own).is_ok());
        assert!(require_base_access(&commander, Uuid::new_v4()).is_err());
        assert!(require_base_access(&principal(Role::Admin, None), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_require_role() {
        let p = principal(Role::BaseCommander, Some(Uuid::new_v4()));
        assert!(require_role(&p, &[Role::Admin, Role::BaseCommander]).is_ok());
        assert_eq!(
            require_role(&p, &[Role::Admin, Role::LogisticsOfficer]),
            Err(ScopeError::RoleNotPermitted)
        );
    }

    #[test]
    fn test_scope_permits() {
        let id = Uuid::new_v4();
        assert!(BaseScope::All.permits(id));
        assert!(BaseScope::Base(id).permits(id));
        assert!(!BaseScope::Base(id).permits(Uuid::new_v4()));
        assert_eq!(BaseScope::All.base_id(), None);
    }

    #[test]
    fn test_transfer_scope_commander_rules() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = principal(Role::BaseCommander, Some(own));

        let narrowed = transfer_scope(&p, None, None).unwrap();
        assert_eq!(narrowed.either_base_id, Some(own));

        assert!(transfer_scope(&p, Some(own), Some(other)).is_ok());
        assert!(transfer_scope(&p, Some(other), Some(own)).is_ok());
        assert!(transfer_scope(&p, Some(own), None).is_ok());
        assert_eq!(
            transfer_scope(&p, Some(other), Some(Uuid::new_v4())),
            Err(ScopeError::OutsideAssignedBase)
        );
        assert_eq!(
            transfer_scope(&p, None, Some(other)),
            Err(ScopeError::OutsideAssignedBase)
        );
    }

    #[test]
    fn test_transfer_scope_unrestricted() {
        let from = Uuid::new_v4();
        let scope = transfer_scope(&principal(Role::LogisticsOfficer, None), Some(from), None)
            .unwrap();
        assert_eq!(scope.from_base_id, Some(from));
        assert_eq!(scope.either_base_id, None);
    }
}
