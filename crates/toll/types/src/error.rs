use thiserror::Error;

use crate::account::Account;
use crate::role::Role;
use crate::Amount;

/// A rejected ledger state transition.
///
/// Every variant is a deterministic rejection, never a transient fault: nothing is retried
/// and no state is changed by a call that returns one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // --- Access control ---
    #[error("unauthorized: account {account} lacks {role}")]
    Unauthorized { role: Role, account: Account },

    // --- Deny-list ---
    #[error("account {0} is already denied")]
    AlreadyDenied(Account),

    #[error("account {0} is not denied")]
    NotDenied(Account),

    #[error("sender {0} is denied")]
    SenderDenied(Account),

    #[error("recipient {0} is denied")]
    RecipientDenied(Account),

    // --- Pause ---
    #[error("ledger is already paused")]
    AlreadyPaused,

    #[error("ledger is not paused")]
    NotPaused,

    #[error("ledger is paused")]
    SystemPaused,

    // --- Balances ---
    #[error("insufficient balance: account {account} holds {balance}, needs {needed}")]
    InsufficientBalance {
        account: Account,
        balance: Amount,
        needed: Amount,
    },

    #[error("arithmetic overflow: amount exceeds the representable range")]
    Overflow,

    #[error("invalid sender: the zero account cannot send")]
    InvalidSender,

    #[error("invalid receiver: the zero account cannot receive")]
    InvalidReceiver,

    // --- Fee policy ---
    #[error("fee rate {rate_bps} bps exceeds maximum {max_bps} bps")]
    RateTooHigh { rate_bps: u16, max_bps: u16 },

    #[error("fee collector cannot be the zero account")]
    InvalidCollector,

    // --- Internal consistency ---
    #[error("ledger invariant violated: {0}")]
    InvariantViolation(String),
}

impl LedgerError {
    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Unauthorized { .. } => "unauthorized",
            LedgerError::AlreadyDenied(_) => "already_denied",
            LedgerError::NotDenied(_) => "not_denied",
            LedgerError::SenderDenied(_) => "sender_denied",
            LedgerError::RecipientDenied(_) => "recipient_denied",
            LedgerError::AlreadyPaused => "already_paused",
            LedgerError::NotPaused => "not_paused",
            LedgerError::SystemPaused => "system_paused",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::Overflow => "overflow",
            LedgerError::InvalidSender => "invalid_sender",
            LedgerError::InvalidReceiver => "invalid_receiver",
            LedgerError::RateTooHigh { .. } => "rate_too_high",
            LedgerError::InvalidCollector => "invalid_collector",
            LedgerError::InvariantViolation(_) => "invariant_violation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            account: Account::repeat_byte(1),
            balance: 5,
            needed: 10,
        };
        let s = err.to_string();
        assert!(s.contains("holds 5"));
        assert!(s.contains("needs 10"));
    }

    #[test]
    fn unauthorized_names_role() {
        let err = LedgerError::Unauthorized {
            role: Role::Pauser,
            account: Account::repeat_byte(9),
        };
        assert!(err.to_string().contains("PAUSER_ROLE"));
        assert_eq!(err.kind(), "unauthorized");
    }

    #[test]
    fn rate_too_high_display() {
        let err = LedgerError::RateTooHigh {
            rate_bps: 1001,
            max_bps: 1000,
        };
        assert!(err.to_string().contains("1001"));
    }
}
