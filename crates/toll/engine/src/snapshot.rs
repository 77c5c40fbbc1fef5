use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use toll_fees::FeePolicy;
use toll_gate::AccessGate;
use toll_roles::RoleRegistry;
use toll_store::LedgerStore;
use toll_types::{Account, Amount, LedgerError, Role};
use tracing::info;

use crate::journal::EventJournal;
use crate::ledger::TokenLedger;

/// Holders of one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMembership {
    pub role: Role,
    pub members: Vec<Account>,
}

/// The complete durable state of a ledger.
///
/// Maps and member lists are ordered, so two ledgers in the same state produce
/// byte-identical snapshots and equal [`digest`](LedgerSnapshot::digest)s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub name: String,
    pub symbol: String,
    pub total_supply: Amount,
    pub balances: BTreeMap<Account, Amount>,
    pub denied: BTreeSet<Account>,
    pub paused: bool,
    pub fee_rate_bps: u16,
    pub fee_collector: Account,
    /// One entry per role, in [`Role::ALL`] order.
    pub roles: Vec<RoleMembership>,
}

impl LedgerSnapshot {
    /// blake3 digest of the canonical JSON encoding.
    pub fn digest(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        blake3::hash(&bytes).to_hex().to_string()
    }
}

impl TokenLedger {
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            total_supply: self.store.total_supply(),
            balances: self.store.balances().clone(),
            denied: self.gate.denied().copied().collect(),
            paused: self.gate.is_paused(),
            fee_rate_bps: self.fees.rate_bps(),
            fee_collector: self.fees.collector(),
            roles: Role::ALL
                .iter()
                .map(|role| RoleMembership {
                    role: *role,
                    members: self.roles.members(*role).copied().collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a ledger from a snapshot, re-validating every invariant.
    ///
    /// The restored ledger starts with an empty journal.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let fees = FeePolicy::new(snapshot.fee_rate_bps, snapshot.fee_collector)?;

        let store = LedgerStore::from_balances(snapshot.balances)?;
        if store.total_supply() != snapshot.total_supply {
            return Err(LedgerError::InvariantViolation(format!(
                "snapshot total supply {} does not match balance sum {}",
                snapshot.total_supply,
                store.total_supply()
            )));
        }

        let mut roles = RoleRegistry::new();
        for membership in snapshot.roles {
            for account in membership.members {
                roles.insert(membership.role, account, account);
            }
        }

        let ledger = Self {
            name: snapshot.name,
            symbol: snapshot.symbol,
            store,
            gate: AccessGate::from_parts(snapshot.denied, snapshot.paused),
            fees,
            roles,
            journal: EventJournal::new(),
        };

        info!(
            name = %ledger.name,
            accounts = ledger.store.balances().len(),
            total_supply = ledger.store.total_supply(),
            "Ledger restored from snapshot"
        );
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toll_types::INITIAL_SUPPLY;

    fn deployer() -> Account {
        Account::repeat_byte(0xd0)
    }

    fn collector() -> Account {
        Account::repeat_byte(0xcc)
    }

    fn alice() -> Account {
        Account::repeat_byte(1)
    }

    fn busy_ledger() -> TokenLedger {
        let mut ledger =
            TokenLedger::new("Toll Token", "TOLL", 250, collector(), deployer()).unwrap();
        ledger.transfer(deployer(), alice(), 4_000).unwrap();
        ledger.add_to_blacklist(deployer(), alice()).unwrap();
        ledger.grant_role(deployer(), Role::Minter, alice()).unwrap();
        ledger.pause(deployer()).unwrap();
        ledger
    }

    #[test]
    fn snapshot_captures_durable_state() {
        let snapshot = busy_ledger().snapshot();
        assert_eq!(snapshot.total_supply, INITIAL_SUPPLY);
        assert_eq!(snapshot.balances[&alice()], 3_900);
        assert_eq!(snapshot.balances[&collector()], 100);
        assert!(snapshot.denied.contains(&alice()));
        assert!(snapshot.paused);
        assert_eq!(snapshot.roles.len(), Role::ALL.len());

        let minters = snapshot
            .roles
            .iter()
            .find(|m| m.role == Role::Minter)
            .unwrap();
        assert_eq!(minters.members, vec![alice(), deployer()]);
    }

    #[test]
    fn restore_reproduces_state() {
        let ledger = busy_ledger();
        let snapshot = ledger.snapshot();
        let restored = TokenLedger::restore(snapshot.clone()).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.snapshot().digest(), snapshot.digest());
        assert!(restored.journal().is_empty());
        assert!(restored.is_blacklisted(&alice()));
        assert!(restored.has_role(Role::Minter, &alice()));
    }

    #[test]
    fn snapshot_survives_json() {
        let snapshot = busy_ledger().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn digest_changes_with_state() {
        let mut ledger = busy_ledger();
        let before = ledger.snapshot().digest();
        ledger.unpause(deployer()).unwrap();
        assert_ne!(ledger.snapshot().digest(), before);
    }

    #[test]
    fn restore_rejects_supply_mismatch() {
        let mut snapshot = busy_ledger().snapshot();
        snapshot.total_supply += 1;
        assert!(matches!(
            TokenLedger::restore(snapshot),
            Err(LedgerError::InvariantViolation(_))
        ));
    }

    #[test]
    fn restore_rejects_invalid_fee_policy() {
        let mut snapshot = busy_ledger().snapshot();
        snapshot.fee_rate_bps = 2_000;
        assert!(matches!(
            TokenLedger::restore(snapshot),
            Err(LedgerError::RateTooHigh { .. })
        ));

        let mut snapshot = busy_ledger().snapshot();
        snapshot.fee_collector = Account::ZERO;
        assert_eq!(
            TokenLedger::restore(snapshot).unwrap_err(),
            LedgerError::InvalidCollector
        );
    }
}
