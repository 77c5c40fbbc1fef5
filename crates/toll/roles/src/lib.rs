//! # toll-roles
//!
//! Role registry: one membership set per [`Role`]. Every mutating ledger entry point checks
//! membership here before doing anything else.
//!
//! Administration follows [`Role::admin_role`]: holders of `Admin` manage the five
//! operational roles, holders of `DefaultAdmin` manage `Admin` and `DefaultAdmin`.
#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use toll_types::{Account, LedgerError, LedgerEvent, Role};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleRegistry {
    members: BTreeMap<Role, BTreeSet<Account>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: Role, account: &Account) -> bool {
        self.members
            .get(&role)
            .is_some_and(|holders| holders.contains(account))
    }

    /// Fail with `Unauthorized` unless `account` holds `role`.
    pub fn ensure_role(&self, role: Role, account: &Account) -> Result<(), LedgerError> {
        if !self.has_role(role, account) {
            return Err(LedgerError::Unauthorized {
                role,
                account: *account,
            });
        }
        Ok(())
    }

    /// Holders of `role`, in account order.
    pub fn members(&self, role: Role) -> impl Iterator<Item = &Account> {
        self.members.get(&role).into_iter().flatten()
    }

    /// Grant `role` to `account` on behalf of `actor`.
    ///
    /// Returns `None` when `account` already holds the role: nothing changes and no event
    /// is emitted.
    pub fn grant(
        &mut self,
        role: Role,
        account: Account,
        actor: Account,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        self.ensure_role(role.admin_role(), &actor)?;
        Ok(self.insert(role, account, actor))
    }

    /// Revoke `role` from `account` on behalf of `actor`.
    ///
    /// Returns `None` when `account` does not hold the role.
    pub fn revoke(
        &mut self,
        role: Role,
        account: Account,
        actor: Account,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        self.ensure_role(role.admin_role(), &actor)?;
        Ok(self.remove(role, account, actor))
    }

    /// Drop one of the caller's own roles. Needs no admin rights.
    pub fn renounce(&mut self, role: Role, caller: Account) -> Option<LedgerEvent> {
        self.remove(role, caller, caller)
    }

    /// Unchecked grant, used at genesis and when restoring persisted memberships.
    pub fn insert(&mut self, role: Role, account: Account, actor: Account) -> Option<LedgerEvent> {
        if !self.members.entry(role).or_default().insert(account) {
            return None;
        }
        info!(role = %role, account = %account, actor = %actor, "Role granted");
        Some(LedgerEvent::RoleGranted {
            role,
            account,
            actor,
        })
    }

    fn remove(&mut self, role: Role, account: Account, actor: Account) -> Option<LedgerEvent> {
        let removed = self
            .members
            .get_mut(&role)
            .is_some_and(|holders| holders.remove(&account));
        if !removed {
            return None;
        }
        info!(role = %role, account = %account, actor = %actor, "Role revoked");
        Some(LedgerEvent::RoleRevoked {
            role,
            account,
            actor,
        })
    }
}
