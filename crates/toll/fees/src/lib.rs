//! # toll-fees
//!
//! Transfer fee policy: a rate in basis points (0..=1000 out of 10000) and the account that
//! collects the fee portion of every fee-bearing transfer.
//!
//! Fee arithmetic truncates: `fee = floor(amount * rate / 10000)`. Rounding remainders
//! always stay with the payer/recipient, never the collector.
#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use toll_types::{Account, Amount, LedgerError, LedgerEvent, BPS_DENOMINATOR, MAX_FEE_BPS};
use tracing::info;

/// Split of a gross amount into fee and net.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee: Amount,
    pub net: Amount,
}

/// Read-only view of the current policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeInfo {
    pub rate_bps: u16,
    pub collector: Account,
    pub max_rate_bps: u16,
}

/// Current fee rate and fee collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeePolicy {
    rate_bps: u16,
    collector: Account,
}

impl FeePolicy {
    /// Create a policy, validating both the rate and the collector.
    pub fn new(rate_bps: u16, collector: Account) -> Result<Self, LedgerError> {
        validate_rate(rate_bps)?;
        validate_collector(&collector)?;
        Ok(Self {
            rate_bps,
            collector,
        })
    }

    pub fn rate_bps(&self) -> u16 {
        self.rate_bps
    }

    pub fn collector(&self) -> Account {
        self.collector
    }

    pub fn is_enabled(&self) -> bool {
        self.rate_bps > 0
    }

    pub fn info(&self) -> FeeInfo {
        FeeInfo {
            rate_bps: self.rate_bps,
            collector: self.collector,
            max_rate_bps: MAX_FEE_BPS,
        }
    }

    /// Split `amount` at the current rate.
    pub fn quote(&self, amount: Amount) -> FeeQuote {
        let fee = fee_for(amount, self.rate_bps);
        FeeQuote {
            fee,
            net: amount - fee,
        }
    }

    pub fn set_rate(&mut self, new_bps: u16, actor: Account) -> Result<LedgerEvent, LedgerError> {
        validate_rate(new_bps)?;
        let old_bps = self.rate_bps;
        self.rate_bps = new_bps;
        info!(old_bps, new_bps, actor = %actor, "Transfer fee rate updated");
        Ok(LedgerEvent::RateUpdated {
            old_bps,
            new_bps,
            actor,
        })
    }

    pub fn set_collector(
        &mut self,
        new: Account,
        actor: Account,
    ) -> Result<LedgerEvent, LedgerError> {
        validate_collector(&new)?;
        let old = self.collector;
        self.collector = new;
        info!(old = %old, new = %new, actor = %actor, "Fee collector updated");
        Ok(LedgerEvent::CollectorUpdated { old, new, actor })
    }
}

/// `floor(amount * rate_bps / 10000)`, exact for every `amount`.
///
/// Splits `amount` into whole multiples of the denominator and a remainder so the product
/// never exceeds the integer range.
pub fn fee_for(amount: Amount, rate_bps: u16) -> Amount {
    if rate_bps == 0 {
        return 0;
    }
    let denominator = Amount::from(BPS_DENOMINATOR);
    let rate = Amount::from(rate_bps);
    (amount / denominator) * rate + (amount % denominator) * rate / denominator
}

fn validate_rate(rate_bps: u16) -> Result<(), LedgerError> {
    if rate_bps > MAX_FEE_BPS {
        return Err(LedgerError::RateTooHigh {
            rate_bps,
            max_bps: MAX_FEE_BPS,
        });
    }
    Ok(())
}

fn validate_collector(collector: &Account) -> Result<(), LedgerError> {
    if collector.is_zero() {
        return Err(LedgerError::InvalidCollector);
    }
    Ok(())
}
