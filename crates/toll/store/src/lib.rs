//! # toll-store
//!
//! The balance ledger: account → balance plus total supply.
//!
//! Invariant: the sum of all balances equals total supply after every call. Multi-leg
//! mutations go through [`LedgerStore::apply`], which validates every leg against a
//! scratch view before touching stored balances, so a failing leg leaves the store exactly
//! as it was.
#![deny(unsafe_code)]

mod changeset;

use std::collections::BTreeMap;

use toll_types::{Account, Amount, LedgerError};
use tracing::debug;

pub use changeset::{ChangeSet, Leg, SupplyChange};

/// Account balances and total supply.
///
/// Keys exist only once an account has been credited; absence means zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerStore {
    balances: BTreeMap<Account, Amount>,
    total_supply: Amount,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted balances, deriving total supply.
    pub fn from_balances(balances: BTreeMap<Account, Amount>) -> Result<Self, LedgerError> {
        let total_supply = balances
            .values()
            .try_fold(0 as Amount, |acc, b| acc.checked_add(*b))
            .ok_or(LedgerError::Overflow)?;
        Ok(Self {
            balances,
            total_supply,
        })
    }

    pub fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// All accounts that have ever been credited, in account order.
    pub fn balances(&self) -> &BTreeMap<Account, Amount> {
        &self.balances
    }

    /// Mint-path credit: increases both the balance and total supply.
    pub fn credit(&mut self, account: Account, amount: Amount) -> Result<(), LedgerError> {
        self.apply(&ChangeSet::mint(amount).credit(account, amount))
    }

    /// Burn-path debit: decreases both the balance and total supply.
    pub fn debit(&mut self, account: Account, amount: Amount) -> Result<(), LedgerError> {
        self.apply(&ChangeSet::burn(amount).debit(account, amount))
    }

    /// Apply every leg of `changes`, or none of them.
    pub fn apply(&mut self, changes: &ChangeSet) -> Result<(), LedgerError> {
        changes.check_conservation()?;

        let mut scratch: BTreeMap<Account, Amount> = BTreeMap::new();
        for leg in changes.legs() {
            match *leg {
                Leg::Debit { account, amount } => {
                    let current = self.scratch_balance(&scratch, &account);
                    let next = current.checked_sub(amount).ok_or(
                        LedgerError::InsufficientBalance {
                            account,
                            balance: current,
                            needed: amount,
                        },
                    )?;
                    scratch.insert(account, next);
                }
                Leg::Credit { account, amount } => {
                    let current = self.scratch_balance(&scratch, &account);
                    let next = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
                    scratch.insert(account, next);
                }
            }
        }

        let total_supply = match changes.supply() {
            SupplyChange::Neutral => Some(self.total_supply),
            SupplyChange::Increase(n) => self.total_supply.checked_add(n),
            SupplyChange::Decrease(n) => self.total_supply.checked_sub(n),
        }
        .ok_or(LedgerError::Overflow)?;

        // Everything validated; commit. A zero balance for an account with no stored
        // entry is not a credit and must not create a key.
        for (account, balance) in scratch {
            if balance == 0 && !self.balances.contains_key(&account) {
                continue;
            }
            self.balances.insert(account, balance);
        }
        self.total_supply = total_supply;

        debug!(
            legs = changes.legs().len(),
            total_supply = self.total_supply,
            "Change set applied"
        );
        Ok(())
    }

    fn scratch_balance(&self, scratch: &BTreeMap<Account, Amount>, account: &Account) -> Amount {
        scratch
            .get(account)
            .copied()
            .unwrap_or_else(|| self.balance_of(account))
    }
}
