//! # toll-types
//!
//! Shared vocabulary for the Toll Ledger workspace:
//!
//! - [`Account`]: fixed-width 20-byte identifier, with the all-zero value reserved as the
//!   zero account (mint source / burn sink)
//! - [`Amount`]: base-unit token quantity
//! - [`Role`]: capabilities that gate the mutating entry points
//! - [`LedgerEvent`] / [`TransferReceipt`]: the audit surface of committed transitions
//! - [`LedgerError`]: every rejected state transition, shared by all components
#![deny(unsafe_code)]

pub mod account;
pub mod error;
pub mod event;
pub mod role;

pub use account::{Account, AccountParseError};
pub use error::LedgerError;
pub use event::{LedgerEvent, TransferKind, TransferReceipt};
pub use role::Role;

/// Token quantity in base units.
pub type Amount = u128;

/// Number of fractional decimal places of one whole token.
pub const DECIMALS: u8 = 18;

/// Base units in one whole token.
pub const ONE_TOKEN: Amount = 1_000_000_000_000_000_000;

/// Supply credited to the deployer at genesis: 1000 whole tokens.
pub const INITIAL_SUPPLY: Amount = 1_000 * ONE_TOKEN;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Highest transfer fee rate the policy accepts (10%).
pub const MAX_FEE_BPS: u16 = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_supply_is_one_thousand_whole_tokens() {
        assert_eq!(INITIAL_SUPPLY, 1_000 * 10u128.pow(DECIMALS as u32));
    }

    #[test]
    fn max_fee_is_ten_percent() {
        assert_eq!(BPS_DENOMINATOR / MAX_FEE_BPS, 10);
    }
}
