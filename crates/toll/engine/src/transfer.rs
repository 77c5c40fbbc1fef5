use toll_fees::{FeePolicy, FeeQuote};
use toll_gate::AccessGate;
use toll_store::{ChangeSet, LedgerStore};
use toll_types::{Account, Amount, LedgerError, LedgerEvent, TransferKind, TransferReceipt};
use tracing::debug;

/// A validated balance movement: the change set to apply and the receipt to hand back
/// once it commits.
#[derive(Clone, Debug)]
pub struct MovementPlan {
    pub changes: ChangeSet,
    pub receipt: TransferReceipt,
}

/// The transfer state-transition function.
///
/// Planning is pure: it reads the store, gate and fee policy, runs every precondition and
/// produces the complete change set and event list. Nothing is mutated until the caller
/// applies the plan, so a rejected movement has no effects at all.
pub struct TransferEngine<'a> {
    store: &'a LedgerStore,
    gate: &'a AccessGate,
    fees: &'a FeePolicy,
}

impl<'a> TransferEngine<'a> {
    pub fn new(store: &'a LedgerStore, gate: &'a AccessGate, fees: &'a FeePolicy) -> Self {
        Self { store, gate, fees }
    }

    /// Plan moving `amount` from `from` to `to`.
    ///
    /// A zero `from` is a mint, a zero `to` is a burn. Preconditions run in order and the
    /// first failure wins:
    /// 1. ledger not paused
    /// 2. `from` not denied
    /// 3. `to` not denied
    /// 4. `amount` covered by `from`'s balance (skipped for mints)
    pub fn plan(
        &self,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<MovementPlan, LedgerError> {
        if from.is_zero() && to.is_zero() {
            return Err(LedgerError::InvalidReceiver);
        }

        self.gate.check_movement(&from, &to)?;

        if !from.is_zero() {
            let balance = self.store.balance_of(&from);
            if amount > balance {
                return Err(LedgerError::InsufficientBalance {
                    account: from,
                    balance,
                    needed: amount,
                });
            }
        }

        let plan = if from.is_zero() {
            Self::plain(TransferKind::Mint, ChangeSet::mint(amount), from, to, amount)
        } else if to.is_zero() {
            Self::plain(TransferKind::Burn, ChangeSet::burn(amount), from, to, amount)
        } else {
            self.plan_transfer(from, to, amount)
        };

        debug!(
            from = %from,
            to = %to,
            amount,
            fee = plan.receipt.fee,
            kind = ?plan.receipt.kind,
            "Movement planned"
        );
        Ok(plan)
    }

    fn plan_transfer(&self, from: Account, to: Account, amount: Amount) -> MovementPlan {
        let FeeQuote { fee, net } = if self.fees.is_enabled() {
            self.fees.quote(amount)
        } else {
            FeeQuote { fee: 0, net: amount }
        };

        if fee == 0 {
            return Self::plain(TransferKind::Transfer, ChangeSet::transfer(), from, to, amount);
        }

        let collector = self.fees.collector();
        let changes = ChangeSet::transfer()
            .debit(from, amount)
            .credit(collector, fee)
            .credit(to, net);

        // FeeCollected first, then the collector credit, then the recipient credit.
        let events = vec![
            LedgerEvent::FeeCollected {
                from,
                to,
                amount,
                fee,
                net,
            },
            LedgerEvent::Transfer {
                from,
                to: collector,
                value: fee,
            },
            LedgerEvent::Transfer {
                from,
                to,
                value: net,
            },
        ];

        MovementPlan {
            changes,
            receipt: TransferReceipt {
                kind: TransferKind::Transfer,
                from,
                to,
                amount,
                fee,
                net,
                events,
            },
        }
    }

    /// Fee-free movement: one debit and/or one credit of the full amount.
    fn plain(
        kind: TransferKind,
        changes: ChangeSet,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> MovementPlan {
        let changes = match kind {
            TransferKind::Mint => changes.credit(to, amount),
            TransferKind::Burn => changes.debit(from, amount),
            TransferKind::Transfer => changes.debit(from, amount).credit(to, amount),
        };

        MovementPlan {
            changes,
            receipt: TransferReceipt {
                kind,
                from,
                to,
                amount,
                fee: 0,
                net: amount,
                events: vec![LedgerEvent::Transfer {
                    from,
                    to,
                    value: amount,
                }],
            },
        }
    }
}
