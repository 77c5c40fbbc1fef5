use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Opaque 20-byte account identifier.
///
/// Renders as a `0x`-prefixed lowercase hex string and serializes the same way, so
/// accounts can be used directly as JSON object keys and TOML values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Account(pub [u8; 20]);

impl Account {
    /// The zero account: "no account". Source of mints, sink of burns.
    pub const ZERO: Account = Account([0u8; 20]);

    /// An account whose every byte is `byte`.
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self)
    }
}

/// Failure to parse an [`Account`] from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountParseError {
    #[error("account must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("account must be 40 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("account contains invalid hex: {0}")]
    InvalidHex(String),
}

impl FromStr for Account {
    type Err = AccountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AccountParseError::MissingPrefix(s.to_string()))?;

        if digits.len() != 40 {
            return Err(AccountParseError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AccountParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_account_is_zero() {
        assert!(Account::ZERO.is_zero());
        assert!(Account::default().is_zero());
        assert!(!Account::repeat_byte(1).is_zero());
    }

    #[test]
    fn display_is_prefixed_hex() {
        let account = Account::repeat_byte(0xab);
        assert_eq!(account.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn parse_accepts_display_form() {
        let account = Account::repeat_byte(0x7f);
        let parsed: Account = account.to_string().parse().unwrap();
        assert_eq!(parsed, account);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let err = "ab".repeat(20).parse::<Account>().unwrap_err();
        assert!(matches!(err, AccountParseError::MissingPrefix(_)));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = "0x1234".parse::<Account>().unwrap_err();
        assert_eq!(err, AccountParseError::InvalidLength(4));
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = format!("0x{}", "zz".repeat(20)).parse::<Account>().unwrap_err();
        assert!(matches!(err, AccountParseError::InvalidHex(_)));
    }

    #[test]
    fn serializes_as_string() {
        let account = Account::repeat_byte(2);
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, format!("\"{}\"", account));
        let restored: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, account);
    }

    #[test]
    fn ordering_follows_bytes() {
        assert!(Account::ZERO < Account::repeat_byte(1));
        assert!(Account::repeat_byte(1) < Account::repeat_byte(2));
    }
}
