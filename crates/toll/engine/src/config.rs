//! Genesis configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toll_types::{Account, LedgerError};

use crate::ledger::TokenLedger;

/// Errors loading a [`LedgerConfig`] or building the ledger it describes.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid genesis parameters: {0}")]
    Ledger(#[from] LedgerError),
}

/// Everything needed to construct a ledger at genesis.
///
/// ```toml
/// name = "Toll Token"
/// symbol = "TOLL"
/// deployer = "0x1111111111111111111111111111111111111111"
///
/// [fees]
/// rate_bps = 250
/// collector = "0xcccccccccccccccccccccccccccccccccccccccc"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub name: String,
    pub symbol: String,
    /// Receives the initial supply and every role.
    pub deployer: Account,
    pub fees: FeeConfig,
}

/// Initial fee policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Transfer fee in basis points, at most 1000.
    #[serde(default)]
    pub rate_bps: u16,
    pub collector: Account,
}

impl LedgerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Construct the genesis ledger this config describes.
    pub fn build(&self) -> Result<TokenLedger, ConfigError> {
        Ok(TokenLedger::from_config(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        name = "Toll Token"
        symbol = "TOLL"
        deployer = "0x1111111111111111111111111111111111111111"

        [fees]
        rate_bps = 250
        collector = "0xcccccccccccccccccccccccccccccccccccccccc"
    "#;

    #[test]
    fn parses_sample() {
        let config = LedgerConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.symbol, "TOLL");
        assert_eq!(config.deployer, Account::repeat_byte(0x11));
        assert_eq!(config.fees.rate_bps, 250);
        assert_eq!(config.fees.collector, Account::repeat_byte(0xcc));
    }

    #[test]
    fn rate_defaults_to_zero() {
        let config = LedgerConfig::from_toml_str(
            r#"
            name = "Free"
            symbol = "FREE"
            deployer = "0x1111111111111111111111111111111111111111"

            [fees]
            collector = "0xcccccccccccccccccccccccccccccccccccccccc"
            "#,
        )
        .unwrap();
        assert_eq!(config.fees.rate_bps, 0);
    }

    #[test]
    fn rejects_malformed_account() {
        let err = LedgerConfig::from_toml_str(
            r#"
            name = "Bad"
            symbol = "BAD"
            deployer = "0x1234"

            [fees]
            collector = "0xcccccccccccccccccccccccccccccccccccccccc"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = LedgerConfig::load("/nonexistent/path/toll.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));

        let err = TokenLedger::load("/nonexistent/path/toll.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn build_creates_genesis_ledger() {
        let ledger = LedgerConfig::from_toml_str(SAMPLE).unwrap().build().unwrap();
        assert_eq!(ledger.symbol(), "TOLL");
        assert_eq!(ledger.transfer_fee_info().rate_bps, 250);
        assert!(ledger.has_role(toll_types::Role::DefaultAdmin, &Account::repeat_byte(0x11)));
    }

    #[test]
    fn build_rejects_excessive_fee_rate() {
        let config = LedgerConfig::from_toml_str(
            r#"
            name = "Greedy"
            symbol = "GRD"
            deployer = "0x1111111111111111111111111111111111111111"

            [fees]
            rate_bps = 1001
            collector = "0xcccccccccccccccccccccccccccccccccccccccc"
            "#,
        )
        .unwrap();

        let err = config.build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Ledger(LedgerError::RateTooHigh {
                rate_bps: 1001,
                max_bps: 1000
            })
        ));
    }

    #[test]
    fn build_rejects_zero_collector() {
        let config = LedgerConfig {
            name: "Toll Token".into(),
            symbol: "TOLL".into(),
            deployer: Account::repeat_byte(0x11),
            fees: FeeConfig {
                rate_bps: 0,
                collector: Account::ZERO,
            },
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::Ledger(LedgerError::InvalidCollector))
        ));
    }
}
