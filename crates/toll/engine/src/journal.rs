use serde::{Deserialize, Serialize};
use toll_types::{Account, LedgerError, LedgerEvent};
use tracing::debug;

/// One committed operation and the events it emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub sequence: u64,
    pub operation: String,
    pub actor: Account,
    pub events: Vec<LedgerEvent>,
    pub previous_hash: Option<String>,
    pub entry_hash: String,
}

/// Append-only, hash-chained record of committed operations.
///
/// Only committed operations are recorded; a rejected call never reaches the journal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventJournal {
    entries: Vec<JournalEntry>,
}

#[derive(Serialize)]
struct HashMaterial<'a> {
    sequence: u64,
    operation: &'a str,
    actor: &'a Account,
    events: &'a [LedgerEvent],
    previous_hash: Option<&'a str>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a journal from persisted entries, verifying sequence and hash chain.
    pub fn from_entries(entries: Vec<JournalEntry>) -> Result<Self, LedgerError> {
        for (expected, entry) in entries.iter().enumerate() {
            if entry.sequence != expected as u64 {
                return Err(LedgerError::InvariantViolation(format!(
                    "journal sequence gap at position {} (found {})",
                    expected, entry.sequence
                )));
            }
        }

        let journal = Self { entries };
        if !journal.verify_chain() {
            return Err(LedgerError::InvariantViolation(
                "journal hash chain verification failed".to_string(),
            ));
        }
        Ok(journal)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_hash(&self) -> Option<&str> {
        self.entries.last().map(|e| e.entry_hash.as_str())
    }

    /// Every recorded event, in emission order.
    pub fn events(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.entries.iter().flat_map(|e| e.events.iter())
    }

    pub fn record(
        &mut self,
        operation: &str,
        actor: Account,
        events: Vec<LedgerEvent>,
    ) -> &JournalEntry {
        let sequence = self.entries.len() as u64;
        let previous_hash = self.last_hash().map(str::to_string);
        let entry_hash = compute_entry_hash(
            sequence,
            operation,
            &actor,
            &events,
            previous_hash.as_deref(),
        );

        debug!(
            sequence,
            operation,
            events = events.len(),
            hash = %entry_hash,
            "Journal entry recorded"
        );

        self.entries.push(JournalEntry {
            sequence,
            operation: operation.to_string(),
            actor,
            events,
            previous_hash,
            entry_hash,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn verify_chain(&self) -> bool {
        let mut previous_hash: Option<&str> = None;
        for entry in &self.entries {
            if entry.previous_hash.as_deref() != previous_hash {
                return false;
            }
            let expected = compute_entry_hash(
                entry.sequence,
                &entry.operation,
                &entry.actor,
                &entry.events,
                previous_hash,
            );
            if entry.entry_hash != expected {
                return false;
            }
            previous_hash = Some(entry.entry_hash.as_str());
        }
        true
    }
}

fn compute_entry_hash(
    sequence: u64,
    operation: &str,
    actor: &Account,
    events: &[LedgerEvent],
    previous_hash: Option<&str>,
) -> String {
    let material = HashMaterial {
        sequence,
        operation,
        actor,
        events,
        previous_hash,
    };
    let bytes = serde_json::to_vec(&material).unwrap_or_default();
    blake3::hash(&bytes).to_hex().to_string()
}
