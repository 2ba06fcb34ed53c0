//! Core types and data structures for the reconciliation system

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::currency::CurrencyValue;

/// Timestamp format used by ledger and statement feeds
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the company; the bank reports it as a negative amount
    Debit,
    /// Money arriving; the bank reports it as a positive amount
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "debit",
            TransactionKind::Credit => "credit",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ReconciliationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(TransactionKind::Debit),
            "credit" => Ok(TransactionKind::Credit),
            _ => Err(ReconciliationError::InvalidTransactionKind(s.to_string())),
        }
    }
}

/// Internal ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger identifier, referenced by bank statements
    pub id: String,
    /// Amount with the sign recorded in the ledger
    pub amount: CurrencyValue,
    pub kind: TransactionKind,
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: impl Into<String>,
        amount: CurrencyValue,
        kind: TransactionKind,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            kind,
            timestamp,
        }
    }

    /// Create a debit transaction
    pub fn debit(id: impl Into<String>, amount: CurrencyValue, timestamp: NaiveDateTime) -> Self {
        Self::new(id, amount, TransactionKind::Debit, timestamp)
    }

    /// Create a credit transaction
    pub fn credit(id: impl Into<String>, amount: CurrencyValue, timestamp: NaiveDateTime) -> Self {
        Self::new(id, amount, TransactionKind::Credit, timestamp)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.id,
            self.kind,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.amount
        )
    }
}

/// Movement reported by a bank statement feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankStatement {
    /// Code of the bank whose feed produced this statement
    pub bank_code: String,
    /// Ledger transaction id this movement refers to
    pub reference_id: String,
    /// Negative for outflows, positive for inflows
    pub amount: CurrencyValue,
    pub date: NaiveDateTime,
}

impl BankStatement {
    /// Create a new bank statement
    pub fn new(
        bank_code: impl Into<String>,
        reference_id: impl Into<String>,
        amount: CurrencyValue,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            bank_code: bank_code.into(),
            reference_id: reference_id.into(),
            amount,
            date,
        }
    }
}

impl fmt::Display for BankStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}, {}",
            self.bank_code,
            self.reference_id,
            self.date.format(TIMESTAMP_FORMAT),
            self.amount
        )
    }
}

/// Parse a feed timestamp in `YYYY-MM-DD HH:MM:SS` form
pub fn parse_timestamp(value: &str) -> ReconciliationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| ReconciliationError::InvalidTimestamp(value.to_string()))
}

/// Errors that can occur while building records or reconciling them
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Time not in valid format: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid row shape: expected {expected} columns, found {found}")]
    InvalidRowShape { expected: usize, found: usize },
    #[error("Invalid date window bound: {0}")]
    InvalidDateWindow(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidTransactionKind(String),
    #[error("Duplicate transaction id in window: {0}")]
    DuplicateTransactionId(String),
    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ReconciliationError>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReconciliationError {
    /// Attach a feed line number to this error
    pub fn at_line(self, line: usize) -> Self {
        ReconciliationError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// The underlying error with any line context stripped
    pub fn root(&self) -> &ReconciliationError {
        match self {
            ReconciliationError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for reconciliation operations
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;
