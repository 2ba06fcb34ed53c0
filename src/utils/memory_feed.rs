//! In-memory feed implementation for testing

use crate::traits::*;
use crate::types::*;

/// In-memory ledger or statement feed for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    bank_code: String,
    transactions: Vec<Transaction>,
    statements: Vec<BankStatement>,
}

impl MemoryFeed {
    /// Create a ledger feed holding the given transactions
    pub fn ledger(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Self::default()
        }
    }

    /// Create a bank feed; every statement is restamped with `bank_code`
    pub fn statements(bank_code: impl Into<String>, statements: Vec<BankStatement>) -> Self {
        let bank_code = bank_code.into();
        let statements = statements
            .into_iter()
            .map(|statement| BankStatement {
                bank_code: bank_code.clone(),
                ..statement
            })
            .collect();
        Self {
            bank_code,
            statements,
            ..Self::default()
        }
    }

    /// Append a transaction
    pub fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Append a statement, stamping it with this feed's bank code
    pub fn push_statement(&mut self, mut statement: BankStatement) {
        statement.bank_code = self.bank_code.clone();
        self.statements.push(statement);
    }

    /// Clear all data (useful for testing)
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.statements.clear();
    }
}

impl TransactionSource for MemoryFeed {
    fn transactions(&self) -> ReconciliationResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}

impl StatementSource for MemoryFeed {
    fn bank_code(&self) -> &str {
        &self.bank_code
    }

    fn statements(&self) -> ReconciliationResult<Vec<BankStatement>> {
        Ok(self.statements.clone())
    }
}
