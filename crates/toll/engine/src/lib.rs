//! # toll-engine
//!
//! The Toll Ledger: a fungible-token ledger with role-gated administration, a deny-list,
//! a global pause switch and a basis-point transfer fee.
//!
//! [`TokenLedger`] composes the component crates:
//!
//! - `toll-store`: balances and total supply, mutated only through atomic change sets
//! - `toll-gate`: deny-list and pause switch
//! - `toll-fees`: fee rate, collector and fee arithmetic
//! - `toll-roles`: role membership and admin hierarchy
//!
//! Every balance movement (transfer, mint, burn) goes through [`TransferEngine`], which
//! plans the whole transition before anything is written. Committed operations are
//! appended to a hash-chained [`EventJournal`].
//!
//! ```no_run
//! use toll_engine::{Account, LedgerConfig, TokenLedger};
//!
//! let config = LedgerConfig::load("toll.toml")?;
//! let mut ledger = config.build()?;
//! let bob: Account = "0x2222222222222222222222222222222222222222".parse()?;
//! let receipt = ledger.transfer(config.deployer, bob, 1_000)?;
//! assert_eq!(receipt.amount, 1_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod journal;
pub mod ledger;
pub mod operation;
pub mod snapshot;
pub mod transfer;

pub use config::{ConfigError, FeeConfig, LedgerConfig};
pub use journal::{EventJournal, JournalEntry};
pub use ledger::TokenLedger;
pub use operation::{Operation, Rejection, ReplayReport};
pub use snapshot::{LedgerSnapshot, RoleMembership};
pub use transfer::{MovementPlan, TransferEngine};

pub use toll_fees::{FeeInfo, FeeQuote};
pub use toll_types::{
    Account, Amount, LedgerError, LedgerEvent, Role, TransferKind, TransferReceipt, DECIMALS,
    INITIAL_SUPPLY, MAX_FEE_BPS,
};
