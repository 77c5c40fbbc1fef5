use toll_types::{Account, Amount, LedgerError};

/// One balance movement inside a [`ChangeSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leg {
    Debit { account: Account, amount: Amount },
    Credit { account: Account, amount: Amount },
}

/// Effect of a change set on total supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyChange {
    /// Pure transfer: credits equal debits.
    Neutral,
    /// Mint: credits exceed debits by the amount.
    Increase(Amount),
    /// Burn: debits exceed credits by the amount.
    Decrease(Amount),
}

/// An ordered set of balance legs applied all-or-nothing by
/// [`LedgerStore::apply`](crate::LedgerStore::apply).
///
/// Legs are evaluated in insertion order, so a debit followed by a credit of the same
/// account (a self-transfer) sees the debited balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeSet {
    legs: Vec<Leg>,
    supply: SupplyChange,
}

impl ChangeSet {
    /// A supply-neutral change set.
    pub fn transfer() -> Self {
        Self {
            legs: Vec::new(),
            supply: SupplyChange::Neutral,
        }
    }

    /// A change set that grows total supply by `amount`.
    pub fn mint(amount: Amount) -> Self {
        Self {
            legs: Vec::new(),
            supply: SupplyChange::Increase(amount),
        }
    }

    /// A change set that shrinks total supply by `amount`.
    pub fn burn(amount: Amount) -> Self {
        Self {
            legs: Vec::new(),
            supply: SupplyChange::Decrease(amount),
        }
    }

    pub fn debit(mut self, account: Account, amount: Amount) -> Self {
        self.legs.push(Leg::Debit { account, amount });
        self
    }

    pub fn credit(mut self, account: Account, amount: Amount) -> Self {
        self.legs.push(Leg::Credit { account, amount });
        self
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn supply(&self) -> SupplyChange {
        self.supply
    }

    /// Check that the legs move exactly the supply change declared for the set.
    pub fn check_conservation(&self) -> Result<(), LedgerError> {
        let mut debits: Amount = 0;
        let mut credits: Amount = 0;
        for leg in &self.legs {
            match leg {
                Leg::Debit { amount, .. } => {
                    debits = debits.checked_add(*amount).ok_or(LedgerError::Overflow)?
                }
                Leg::Credit { amount, .. } => {
                    credits = credits.checked_add(*amount).ok_or(LedgerError::Overflow)?
                }
            }
        }

        let balanced = match self.supply {
            SupplyChange::Neutral => credits == debits,
            SupplyChange::Increase(n) => debits.checked_add(n) == Some(credits),
            SupplyChange::Decrease(n) => credits.checked_add(n) == Some(debits),
        };

        if !balanced {
            return Err(LedgerError::InvariantViolation(format!(
                "change set moves {} in and {} out but declares {:?}",
                credits, debits, self.supply
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account::repeat_byte(1)
    }

    fn bob() -> Account {
        Account::repeat_byte(2)
    }

    #[test]
    fn balanced_transfer_passes() {
        let set = ChangeSet::transfer()
            .debit(alice(), 100)
            .credit(bob(), 75)
            .credit(alice(), 25);
        assert!(set.check_conservation().is_ok());
        assert_eq!(set.legs().len(), 3);
    }

    #[test]
    fn unbalanced_transfer_is_rejected() {
        let set = ChangeSet::transfer().debit(alice(), 100).credit(bob(), 99);
        assert!(matches!(
            set.check_conservation(),
            Err(LedgerError::InvariantViolation(_))
        ));
    }

    #[test]
    fn mint_must_credit_the_declared_amount() {
        assert!(ChangeSet::mint(50).credit(bob(), 50).check_conservation().is_ok());
        assert!(ChangeSet::mint(50).credit(bob(), 40).check_conservation().is_err());
    }

    #[test]
    fn burn_must_debit_the_declared_amount() {
        assert!(ChangeSet::burn(50).debit(bob(), 50).check_conservation().is_ok());
        assert!(ChangeSet::burn(50).debit(bob(), 60).check_conservation().is_err());
    }

    #[test]
    fn leg_totals_overflow_is_reported() {
        let set = ChangeSet::transfer()
            .credit(alice(), Amount::MAX)
            .credit(bob(), 1);
        assert_eq!(set.check_conservation(), Err(LedgerError::Overflow));
    }
}
