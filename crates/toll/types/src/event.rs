use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::role::Role;
use crate::Amount;

/// An event emitted by a committed state transition.
///
/// Events are only ever produced by operations that commit; a rejected operation emits
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Balance movement. `from` is zero for mints, `to` is zero for burns.
    Transfer {
        from: Account,
        to: Account,
        value: Amount,
    },
    /// A fee-bearing transfer split `amount` into `fee` (to the collector) and `net`.
    FeeCollected {
        from: Account,
        to: Account,
        amount: Amount,
        fee: Amount,
        net: Amount,
    },
    Denied {
        account: Account,
        actor: Account,
    },
    Undenied {
        account: Account,
        actor: Account,
    },
    Paused {
        actor: Account,
    },
    Unpaused {
        actor: Account,
    },
    RateUpdated {
        old_bps: u16,
        new_bps: u16,
        actor: Account,
    },
    CollectorUpdated {
        old: Account,
        new: Account,
        actor: Account,
    },
    RoleGranted {
        role: Role,
        account: Account,
        actor: Account,
    },
    RoleRevoked {
        role: Role,
        account: Account,
        actor: Account,
    },
}

impl LedgerEvent {
    /// Event name as it appears in logs and journal entries.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Transfer { .. } => "Transfer",
            LedgerEvent::FeeCollected { .. } => "FeeCollected",
            LedgerEvent::Denied { .. } => "Denied",
            LedgerEvent::Undenied { .. } => "Undenied",
            LedgerEvent::Paused { .. } => "Paused",
            LedgerEvent::Unpaused { .. } => "Unpaused",
            LedgerEvent::RateUpdated { .. } => "RateUpdated",
            LedgerEvent::CollectorUpdated { .. } => "CollectorUpdated",
            LedgerEvent::RoleGranted { .. } => "RoleGranted",
            LedgerEvent::RoleRevoked { .. } => "RoleRevoked",
        }
    }
}

/// Which path of the transfer state-transition function ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Account to account.
    Transfer,
    /// Zero account to account; total supply grows.
    Mint,
    /// Account to zero account; total supply shrinks.
    Burn,
}

/// Outcome of a committed balance movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub kind: TransferKind,
    pub from: Account,
    pub to: Account,
    /// Gross amount debited from `from` (or minted).
    pub amount: Amount,
    /// Portion credited to the fee collector.
    pub fee: Amount,
    /// Portion credited to `to`.
    pub net: Amount,
    /// Emitted events, in emission order.
    pub events: Vec<LedgerEvent>,
}

impl TransferReceipt {
    pub fn fee_charged(&self) -> bool {
        self.fee > 0
    }
}
