//! Ledger boundary — the player's balance account
//!
//! The account itself belongs to the host app. The engine only checks funds,
//! withdraws the wager and deposits payouts. [`MemoryLedger`] is an in-process
//! account for tests and simulation.

use parking_lot::Mutex;
use serde::Serialize;

/// Balance account consumed by the round engine
///
/// Implementations must not call back into the machine from these methods;
/// they run while the machine holds its state lock.
pub trait Ledger: Send + Sync {
    /// Current balance
    fn balance(&self) -> f64;

    /// Whether a wager of `amount` can be covered
    fn has_sufficient_funds(&self, amount: f64) -> bool {
        amount.is_finite() && amount >= 0.0 && self.balance() >= amount
    }

    /// Debit `amount`
    fn withdraw(&self, amount: f64, memo: &str);

    /// Credit `amount`
    fn deposit(&self, amount: f64, memo: &str);
}

/// Direction of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Withdrawal,
    Deposit,
}

/// One recorded balance movement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: f64,
    pub memo: String,
    pub balance_after: f64,
}

#[derive(Debug, Default)]
struct MemoryLedgerInner {
    balance: f64,
    journal: Vec<LedgerEntry>,
}

/// In-memory account with a transaction journal
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<MemoryLedgerInner>,
}

impl MemoryLedger {
    pub fn new(opening_balance: f64) -> Self {
        Self {
            inner: Mutex::new(MemoryLedgerInner {
                balance: opening_balance,
                journal: Vec::new(),
            }),
        }
    }

    /// Copy of every recorded movement, oldest first
    pub fn journal(&self) -> Vec<LedgerEntry> {
        self.inner.lock().journal.clone()
    }

    pub fn count(&self, kind: EntryKind) -> usize {
        self.inner
            .lock()
            .journal
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    fn record(&self, kind: EntryKind, amount: f64, memo: &str) {
        let mut inner = self.inner.lock();
        match kind {
            EntryKind::Withdrawal => inner.balance -= amount,
            EntryKind::Deposit => inner.balance += amount,
        }
        let balance_after = inner.balance;
        inner.journal.push(LedgerEntry {
            kind,
            amount,
            memo: memo.to_string(),
            balance_after,
        });
        log::debug!("[Ledger] {kind:?} {amount:.2} ({memo}) -> {balance_after:.2}");
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self) -> f64 {
        self.inner.lock().balance
    }

    fn withdraw(&self, amount: f64, memo: &str) {
        self.record(EntryKind::Withdrawal, amount, memo);
    }

    fn deposit(&self, amount: f64, memo: &str) {
        self.record(EntryKind::Deposit, amount, memo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_tracks_balance() {
        let ledger = MemoryLedger::new(100.0);
        ledger.withdraw(5.0, "bet");
        ledger.deposit(20.0, "win");

        assert_eq!(ledger.balance(), 115.0);
        let journal = ledger.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].kind, EntryKind::Withdrawal);
        assert_eq!(journal[0].balance_after, 95.0);
        assert_eq!(journal[1].memo, "win");
        assert_eq!(ledger.count(EntryKind::Deposit), 1);
    }

    #[test]
    fn test_sufficient_funds() {
        let ledger = MemoryLedger::new(10.0);
        assert!(ledger.has_sufficient_funds(10.0));
        assert!(!ledger.has_sufficient_funds(10.01));
        assert!(!ledger.has_sufficient_funds(f64::NAN));
        assert!(!ledger.has_sufficient_funds(-1.0));
    }
}
