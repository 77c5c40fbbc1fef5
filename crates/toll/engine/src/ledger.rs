use std::path::Path;

use toll_fees::{FeeInfo, FeePolicy, FeeQuote};
use toll_gate::AccessGate;
use toll_roles::RoleRegistry;
use toll_store::LedgerStore;
use toll_types::{
    Account, Amount, LedgerError, LedgerEvent, Role, TransferKind, TransferReceipt, DECIMALS,
    INITIAL_SUPPLY,
};
use tracing::{info, warn};

use crate::config::{ConfigError, LedgerConfig};
use crate::journal::EventJournal;
use crate::transfer::TransferEngine;

/// The token ledger: balances, deny-list, pause switch, fee policy and roles behind one set
/// of entry points.
///
/// Every mutating entry point takes the calling account, checks its role first, and then
/// either commits completely (state updated, events journaled) or returns an error with
/// nothing changed. Mutation takes `&mut self`, so calls are serialized by construction.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    pub(crate) name: String,
    pub(crate) symbol: String,
    pub(crate) store: LedgerStore,
    pub(crate) gate: AccessGate,
    pub(crate) fees: FeePolicy,
    pub(crate) roles: RoleRegistry,
    pub(crate) journal: EventJournal,
}

impl TokenLedger {
    /// Genesis: validate the fee policy, grant every role to `deployer` and credit it the
    /// initial supply.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        fee_rate_bps: u16,
        fee_collector: Account,
        deployer: Account,
    ) -> Result<Self, LedgerError> {
        let fees = FeePolicy::new(fee_rate_bps, fee_collector)?;
        if deployer.is_zero() {
            return Err(LedgerError::InvalidReceiver);
        }

        let mut roles = RoleRegistry::new();
        let mut events: Vec<LedgerEvent> = Role::ALL
            .iter()
            .filter_map(|role| roles.insert(*role, deployer, deployer))
            .collect();

        let mut store = LedgerStore::new();
        store.credit(deployer, INITIAL_SUPPLY)?;
        events.push(LedgerEvent::Transfer {
            from: Account::ZERO,
            to: deployer,
            value: INITIAL_SUPPLY,
        });

        let mut journal = EventJournal::new();
        journal.record("genesis", deployer, events);

        let ledger = Self {
            name: name.into(),
            symbol: symbol.into(),
            store,
            gate: AccessGate::new(),
            fees,
            roles,
            journal,
        };

        info!(
            name = %ledger.name,
            symbol = %ledger.symbol,
            deployer = %deployer,
            fee_rate_bps,
            collector = %fee_collector,
            "Ledger created"
        );
        Ok(ledger)
    }

    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(
            config.name.clone(),
            config.symbol.clone(),
            config.fees.rate_bps,
            config.fees.collector,
            config.deployer,
        )
    }

    /// Load a TOML genesis config from `path` and construct the ledger it describes.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        LedgerConfig::load(path)?.build()
    }

    // --- Read-only queries ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn total_supply(&self) -> Amount {
        self.store.total_supply()
    }

    pub fn balance_of(&self, account: &Account) -> Amount {
        self.store.balance_of(account)
    }

    pub fn is_blacklisted(&self, account: &Account) -> bool {
        self.gate.is_denied(account)
    }

    pub fn paused(&self) -> bool {
        self.gate.is_paused()
    }

    pub fn has_role(&self, role: Role, account: &Account) -> bool {
        self.roles.has_role(role, account)
    }

    pub fn role_members(&self, role: Role) -> impl Iterator<Item = &Account> {
        self.roles.members(role)
    }

    /// Fee split a transfer of `amount` would incur right now.
    pub fn calculate_transfer_fee(&self, amount: Amount) -> FeeQuote {
        self.fees.quote(amount)
    }

    pub fn transfer_fee_info(&self) -> FeeInfo {
        self.fees.info()
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    // --- Balance movements ---

    /// Mint `amount` to the caller.
    pub fn mint(
        &mut self,
        caller: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        self.run("mint", caller, |ledger| {
            ledger.roles.ensure_role(Role::Minter, &caller)?;
            ledger.settle("mint", caller, Account::ZERO, caller, amount)
        })
    }

    pub fn mint_to(
        &mut self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        self.run("mint_to", caller, |ledger| {
            ledger.roles.ensure_role(Role::Minter, &caller)?;
            if to.is_zero() {
                return Err(LedgerError::InvalidReceiver);
            }
            ledger.settle("mint_to", caller, Account::ZERO, to, amount)
        })
    }

    /// Burn `amount` of the caller's own balance.
    pub fn burn(
        &mut self,
        caller: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        self.run("burn", caller, |ledger| {
            ledger.roles.ensure_role(Role::Burner, &caller)?;
            ledger.settle("burn", caller, caller, Account::ZERO, amount)
        })
    }

    pub fn burn_from(
        &mut self,
        caller: Account,
        from: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        self.run("burn_from", caller, |ledger| {
            ledger.roles.ensure_role(Role::Burner, &caller)?;
            if from.is_zero() {
                return Err(LedgerError::InvalidSender);
            }
            ledger.settle("burn_from", caller, from, Account::ZERO, amount)
        })
    }

    /// Public transfer from the caller to `to`, subject to pause, deny-list and fee.
    pub fn transfer(
        &mut self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        self.run("transfer", caller, |ledger| {
            if caller.is_zero() {
                return Err(LedgerError::InvalidSender);
            }
            if to.is_zero() {
                return Err(LedgerError::InvalidReceiver);
            }
            ledger.settle("transfer", caller, caller, to, amount)
        })
    }

    // --- Access gate ---

    pub fn add_to_blacklist(
        &mut self,
        caller: Account,
        account: Account,
    ) -> Result<LedgerEvent, LedgerError> {
        self.run("add_to_blacklist", caller, |ledger| {
            ledger.roles.ensure_role(Role::BlacklistManager, &caller)?;
            let event = ledger.gate.deny(account, caller)?;
            Ok(ledger.commit_one("add_to_blacklist", caller, event))
        })
    }

    pub fn remove_from_blacklist(
        &mut self,
        caller: Account,
        account: Account,
    ) -> Result<LedgerEvent, LedgerError> {
        self.run("remove_from_blacklist", caller, |ledger| {
            ledger.roles.ensure_role(Role::BlacklistManager, &caller)?;
            let event = ledger.gate.undeny(account, caller)?;
            Ok(ledger.commit_one("remove_from_blacklist", caller, event))
        })
    }

    pub fn pause(&mut self, caller: Account) -> Result<LedgerEvent, LedgerError> {
        self.run("pause", caller, |ledger| {
            ledger.roles.ensure_role(Role::Pauser, &caller)?;
            let event = ledger.gate.pause(caller)?;
            Ok(ledger.commit_one("pause", caller, event))
        })
    }

    pub fn unpause(&mut self, caller: Account) -> Result<LedgerEvent, LedgerError> {
        self.run("unpause", caller, |ledger| {
            ledger.roles.ensure_role(Role::Pauser, &caller)?;
            let event = ledger.gate.unpause(caller)?;
            Ok(ledger.commit_one("unpause", caller, event))
        })
    }

    // --- Fee policy ---

    pub fn set_transfer_fee_percentage(
        &mut self,
        caller: Account,
        rate_bps: u16,
    ) -> Result<LedgerEvent, LedgerError> {
        self.run("set_transfer_fee_percentage", caller, |ledger| {
            ledger.roles.ensure_role(Role::FeeManager, &caller)?;
            let event = ledger.fees.set_rate(rate_bps, caller)?;
            Ok(ledger.commit_one("set_transfer_fee_percentage", caller, event))
        })
    }

    pub fn set_fee_collector(
        &mut self,
        caller: Account,
        collector: Account,
    ) -> Result<LedgerEvent, LedgerError> {
        self.run("set_fee_collector", caller, |ledger| {
            ledger.roles.ensure_role(Role::FeeManager, &caller)?;
            let event = ledger.fees.set_collector(collector, caller)?;
            Ok(ledger.commit_one("set_fee_collector", caller, event))
        })
    }

    // --- Roles ---

    /// Grant `role` to `account`. `None` means the account already held it.
    pub fn grant_role(
        &mut self,
        caller: Account,
        role: Role,
        account: Account,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        self.run("grant_role", caller, |ledger| {
            let event = ledger.roles.grant(role, account, caller)?;
            ledger.journal.record("grant_role", caller, event.iter().cloned().collect());
            Ok(event)
        })
    }

    /// Revoke `role` from `account`. `None` means the account did not hold it.
    pub fn revoke_role(
        &mut self,
        caller: Account,
        role: Role,
        account: Account,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        self.run("revoke_role", caller, |ledger| {
            let event = ledger.roles.revoke(role, account, caller)?;
            ledger.journal.record("revoke_role", caller, event.iter().cloned().collect());
            Ok(event)
        })
    }

    /// Drop one of the caller's own roles. A caller that does not hold `role` gets `None`
    /// and nothing is journaled.
    pub fn renounce_role(&mut self, caller: Account, role: Role) -> Option<LedgerEvent> {
        let event = self.roles.renounce(role, caller)?;
        Some(self.commit_one("renounce_role", caller, event))
    }

    // --- Internals ---

    /// Plan, apply and journal one balance movement.
    fn settle(
        &mut self,
        operation: &str,
        actor: Account,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        let plan = TransferEngine::new(&self.store, &self.gate, &self.fees).plan(from, to, amount)?;
        self.store.apply(&plan.changes)?;
        self.journal
            .record(operation, actor, plan.receipt.events.clone());

        if plan.receipt.kind != TransferKind::Transfer {
            let account = if from.is_zero() { to } else { from };
            info!(
                kind = ?plan.receipt.kind,
                account = %account,
                amount,
                total_supply = self.store.total_supply(),
                "Supply changed"
            );
        }
        Ok(plan.receipt)
    }

    fn commit_one(&mut self, operation: &str, actor: Account, event: LedgerEvent) -> LedgerEvent {
        self.journal.record(operation, actor, vec![event.clone()]);
        event
    }

    fn run<T>(
        &mut self,
        operation: &'static str,
        caller: Account,
        body: impl FnOnce(&mut Self) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        body(self).inspect_err(|err| {
            warn!(
                operation,
                caller = %caller,
                kind = err.kind(),
                error = %err,
                "Operation rejected"
            );
        })
    }
}
