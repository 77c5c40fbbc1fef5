//! Ledger calls as data, for batch application and replay.

use serde::{Deserialize, Serialize};
use toll_types::{Account, Amount, LedgerError, LedgerEvent, Role};
use tracing::info;

use crate::ledger::TokenLedger;

/// One mutating call against a [`TokenLedger`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Mint {
        caller: Account,
        amount: Amount,
    },
    MintTo {
        caller: Account,
        to: Account,
        amount: Amount,
    },
    Burn {
        caller: Account,
        amount: Amount,
    },
    BurnFrom {
        caller: Account,
        from: Account,
        amount: Amount,
    },
    Transfer {
        caller: Account,
        to: Account,
        amount: Amount,
    },
    AddToBlacklist {
        caller: Account,
        account: Account,
    },
    RemoveFromBlacklist {
        caller: Account,
        account: Account,
    },
    Pause {
        caller: Account,
    },
    Unpause {
        caller: Account,
    },
    SetTransferFeePercentage {
        caller: Account,
        rate_bps: u16,
    },
    SetFeeCollector {
        caller: Account,
        collector: Account,
    },
    GrantRole {
        caller: Account,
        role: Role,
        account: Account,
    },
    RevokeRole {
        caller: Account,
        role: Role,
        account: Account,
    },
    RenounceRole {
        caller: Account,
        role: Role,
    },
}

impl Operation {
    pub fn caller(&self) -> Account {
        match self {
            Operation::Mint { caller, .. }
            | Operation::MintTo { caller, .. }
            | Operation::Burn { caller, .. }
            | Operation::BurnFrom { caller, .. }
            | Operation::Transfer { caller, .. }
            | Operation::AddToBlacklist { caller, .. }
            | Operation::RemoveFromBlacklist { caller, .. }
            | Operation::Pause { caller }
            | Operation::Unpause { caller }
            | Operation::SetTransferFeePercentage { caller, .. }
            | Operation::SetFeeCollector { caller, .. }
            | Operation::GrantRole { caller, .. }
            | Operation::RevokeRole { caller, .. }
            | Operation::RenounceRole { caller, .. } => *caller,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Mint { .. } => "mint",
            Operation::MintTo { .. } => "mint_to",
            Operation::Burn { .. } => "burn",
            Operation::BurnFrom { .. } => "burn_from",
            Operation::Transfer { .. } => "transfer",
            Operation::AddToBlacklist { .. } => "add_to_blacklist",
            Operation::RemoveFromBlacklist { .. } => "remove_from_blacklist",
            Operation::Pause { .. } => "pause",
            Operation::Unpause { .. } => "unpause",
            Operation::SetTransferFeePercentage { .. } => "set_transfer_fee_percentage",
            Operation::SetFeeCollector { .. } => "set_fee_collector",
            Operation::GrantRole { .. } => "grant_role",
            Operation::RevokeRole { .. } => "revoke_role",
            Operation::RenounceRole { .. } => "renounce_role",
        }
    }
}

/// An operation that failed during [`TokenLedger::replay`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub operation: Operation,
    pub error: LedgerError,
}

/// Outcome of replaying a batch of operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<Rejection>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl TokenLedger {
    /// Dispatch one operation, returning the events it emitted.
    pub fn apply(&mut self, operation: &Operation) -> Result<Vec<LedgerEvent>, LedgerError> {
        let events = match *operation {
            Operation::Mint { caller, amount } => self.mint(caller, amount)?.events,
            Operation::MintTo { caller, to, amount } => self.mint_to(caller, to, amount)?.events,
            Operation::Burn { caller, amount } => self.burn(caller, amount)?.events,
            Operation::BurnFrom {
                caller,
                from,
                amount,
            } => self.burn_from(caller, from, amount)?.events,
            Operation::Transfer { caller, to, amount } => {
                self.transfer(caller, to, amount)?.events
            }
            Operation::AddToBlacklist { caller, account } => {
                vec![self.add_to_blacklist(caller, account)?]
            }
            Operation::RemoveFromBlacklist { caller, account } => {
                vec![self.remove_from_blacklist(caller, account)?]
            }
            Operation::Pause { caller } => vec![self.pause(caller)?],
            Operation::Unpause { caller } => vec![self.unpause(caller)?],
            Operation::SetTransferFeePercentage { caller, rate_bps } => {
                vec![self.set_transfer_fee_percentage(caller, rate_bps)?]
            }
            Operation::SetFeeCollector { caller, collector } => {
                vec![self.set_fee_collector(caller, collector)?]
            }
            Operation::GrantRole {
                caller,
                role,
                account,
            } => self.grant_role(caller, role, account)?.into_iter().collect(),
            Operation::RevokeRole {
                caller,
                role,
                account,
            } => self.revoke_role(caller, role, account)?.into_iter().collect(),
            Operation::RenounceRole { caller, role } => {
                self.renounce_role(caller, role).into_iter().collect()
            }
        };
        Ok(events)
    }

    /// Apply every operation in order. A rejected operation leaves the ledger untouched
    /// and replay moves on to the next one.
    pub fn replay<'a>(
        &mut self,
        operations: impl IntoIterator<Item = &'a Operation>,
    ) -> ReplayReport {
        let mut report = ReplayReport::default();
        for (index, operation) in operations.into_iter().enumerate() {
            match self.apply(operation) {
                Ok(_) => report.applied += 1,
                Err(error) => report.rejected.push(Rejection {
                    index,
                    operation: operation.clone(),
                    error,
                }),
            }
        }

        info!(
            applied = report.applied,
            rejected = report.rejected.len(),
            total_supply = self.total_supply(),
            "Replay finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployer() -> Account {
        Account::repeat_byte(0xd0)
    }

    fn collector() -> Account {
        Account::repeat_byte(0xcc)
    }

    fn alice() -> Account {
        Account::repeat_byte(1)
    }

    fn bob() -> Account {
        Account::repeat_byte(2)
    }

    fn ledger() -> TokenLedger {
        TokenLedger::new("Toll Token", "TOLL", 250, collector(), deployer()).unwrap()
    }

    #[test]
    fn apply_returns_emitted_events() {
        let mut ledger = ledger();
        let events = ledger
            .apply(&Operation::Transfer {
                caller: deployer(),
                to: alice(),
                amount: 1_000,
            })
            .unwrap();
        let names: Vec<_> = events.iter().map(LedgerEvent::name).collect();
        assert_eq!(names, vec!["FeeCollected", "Transfer", "Transfer"]);

        let events = ledger
            .apply(&Operation::GrantRole {
                caller: deployer(),
                role: Role::Minter,
                account: deployer(),
            })
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn replay_skips_rejections() {
        let ops = vec![
            Operation::MintTo {
                caller: deployer(),
                to: alice(),
                amount: 1_000,
            },
            Operation::Pause { caller: alice() },
            Operation::Transfer {
                caller: alice(),
                to: bob(),
                amount: 1_000,
            },
        ];

        let mut ledger = ledger();
        let report = ledger.replay(&ops);

        assert_eq!(report.applied, 2);
        assert!(!report.is_clean());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(
            report.rejected[0].error,
            LedgerError::Unauthorized {
                role: Role::Pauser,
                account: alice()
            }
        );
        assert_eq!(ledger.balance_of(&bob()), 975);
    }

    #[test]
    fn operations_round_trip_through_json() {
        let op = Operation::SetTransferFeePercentage {
            caller: deployer(),
            rate_bps: 100,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.starts_with("{\"set_transfer_fee_percentage\""));
        assert_eq!(serde_json::from_str::<Operation>(&json).unwrap(), op);
        assert_eq!(op.caller(), deployer());
        assert_eq!(op.name(), "set_transfer_fee_percentage");
    }
}
