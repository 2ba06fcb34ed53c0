//! Traits for feed abstraction
//!
//! The reconciliation engine never reads files itself. Anything that can hand over
//! parsed ledger transactions or bank statements (CSV exports, an in-memory fixture,
//! a database query) implements one of these traits.

use crate::types::*;

/// Source of internal ledger transactions
pub trait TransactionSource {
    /// Load every transaction in feed order
    fn transactions(&self) -> ReconciliationResult<Vec<Transaction>>;
}

/// Source of statements reported by a single bank
pub trait StatementSource {
    /// Bank code stamped onto every statement this source yields
    fn bank_code(&self) -> &str;

    /// Load every statement in feed order
    fn statements(&self) -> ReconciliationResult<Vec<BankStatement>>;
}

impl<T: TransactionSource + ?Sized> TransactionSource for &T {
    fn transactions(&self) -> ReconciliationResult<Vec<Transaction>> {
        (**self).transactions()
    }
}

impl<T: StatementSource + ?Sized> StatementSource for &T {
    fn bank_code(&self) -> &str {
        (**self).bank_code()
    }

    fn statements(&self) -> ReconciliationResult<Vec<BankStatement>> {
        (**self).statements()
    }
}
