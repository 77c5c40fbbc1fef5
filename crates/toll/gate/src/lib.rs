//! # toll-gate
//!
//! Access gate consulted before any balance mutation: a deny-list of accounts barred from
//! sending or receiving, and a process-wide pause switch.
//!
//! Idempotent toggles are rejected rather than silently accepted: denying a denied
//! account, undenying an allowed one, pausing while paused and unpausing while running all
//! fail with a named error.
#![deny(unsafe_code)]

use std::collections::BTreeSet;

use toll_types::{Account, LedgerError, LedgerEvent};
use tracing::{debug, info, warn};

/// Deny-list plus pause flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessGate {
    denied: BTreeSet<Account>,
    paused: bool,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a gate from persisted state.
    pub fn from_parts(denied: BTreeSet<Account>, paused: bool) -> Self {
        Self { denied, paused }
    }

    pub fn is_denied(&self, account: &Account) -> bool {
        self.denied.contains(account)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Denied accounts, in account order.
    pub fn denied(&self) -> impl Iterator<Item = &Account> {
        self.denied.iter()
    }

    /// Add `account` to the deny-list.
    pub fn deny(&mut self, account: Account, actor: Account) -> Result<LedgerEvent, LedgerError> {
        if !self.denied.insert(account) {
            return Err(LedgerError::AlreadyDenied(account));
        }
        info!(account = %account, actor = %actor, "Account denied");
        Ok(LedgerEvent::Denied { account, actor })
    }

    /// Remove `account` from the deny-list.
    pub fn undeny(&mut self, account: Account, actor: Account) -> Result<LedgerEvent, LedgerError> {
        if !self.denied.remove(&account) {
            return Err(LedgerError::NotDenied(account));
        }
        info!(account = %account, actor = %actor, "Account undenied");
        Ok(LedgerEvent::Undenied { account, actor })
    }

    pub fn pause(&mut self, actor: Account) -> Result<LedgerEvent, LedgerError> {
        if self.paused {
            return Err(LedgerError::AlreadyPaused);
        }
        self.paused = true;
        warn!(actor = %actor, "Ledger paused");
        Ok(LedgerEvent::Paused { actor })
    }

    pub fn unpause(&mut self, actor: Account) -> Result<LedgerEvent, LedgerError> {
        if !self.paused {
            return Err(LedgerError::NotPaused);
        }
        self.paused = false;
        info!(actor = %actor, "Ledger unpaused");
        Ok(LedgerEvent::Unpaused { actor })
    }

    pub fn ensure_not_paused(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::SystemPaused);
        }
        Ok(())
    }

    /// Gate a balance movement from `from` to `to`.
    ///
    /// Checks, in order: pause, sender deny-list, recipient deny-list. The zero account is
    /// exempt from the deny-list checks but not from pause, so mints and burns stop while
    /// paused like any transfer.
    pub fn check_movement(&self, from: &Account, to: &Account) -> Result<(), LedgerError> {
        self.ensure_not_paused()?;

        if !from.is_zero() && self.is_denied(from) {
            return Err(LedgerError::SenderDenied(*from));
        }
        if !to.is_zero() && self.is_denied(to) {
            return Err(LedgerError::RecipientDenied(*to));
        }

        debug!(from = %from, to = %to, "Access gate passed");
        Ok(())
    }
}
