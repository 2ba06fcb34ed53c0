//! Internal ledger export
//!
//! Expected layout:
//!   id,amount,type,time
//!   T1,-500.00,DEBIT,2025-01-03 10:00:00

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::currency::CurrencyValue;
use crate::traits::TransactionSource;
use crate::types::*;

const LEDGER_COLUMNS: usize = 4;

/// Parse ledger CSV rows into transactions
pub fn read_transactions<R: Read>(reader: R) -> ReconciliationResult<Vec<Transaction>> {
    super::read_rows(reader, LEDGER_COLUMNS, |row| {
        Ok(Transaction {
            id: row[0].to_string(),
            amount: CurrencyValue::parse(&row[1])?,
            kind: row[2].parse()?,
            timestamp: parse_timestamp(&row[3])?,
        })
    })
}

/// Ledger feed backed by a CSV file
#[derive(Debug, Clone)]
pub struct LedgerCsvFeed {
    path: PathBuf,
}

impl LedgerCsvFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for LedgerCsvFeed {
    fn transactions(&self) -> ReconciliationResult<Vec<Transaction>> {
        let transactions = read_transactions(File::open(&self.path)?)?;
        log::info!(
            "Read {} ledger records from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_ledger_rows() {
        let csv = "\
id,amount,type,time
T1,-500.00,DEBIT,2025-01-03 10:00:00
T2,1250.5,credit,2025-01-03 12:15:00
";
        let transactions = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, "T1");
        assert_eq!(transactions[0].amount, CurrencyValue::from_minor_units(-50_000));
        assert_eq!(transactions[0].kind, TransactionKind::Debit);
        assert_eq!(transactions[1].kind, TransactionKind::Credit);
        // single fraction digit counts minor units
        assert_eq!(transactions[1].amount, CurrencyValue::from_minor_units(125_005));
    }

    #[test]
    fn test_header_only_feed_is_empty() {
        let transactions = read_transactions("id,amount,type,time\n".as_bytes()).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_wrong_column_count_reports_line() {
        let csv = "\
id,amount,type,time
T1,-500.00,DEBIT,2025-01-03 10:00:00
T2,100.00,CREDIT
";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ReconciliationError::AtLine { line: 2, .. }));
        assert!(matches!(
            err.root(),
            ReconciliationError::InvalidRowShape { expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_bad_amount_and_timestamp() {
        let bad_amount = "id,amount,type,time\nT1,abc,DEBIT,2025-01-03 10:00:00\n";
        let err = read_transactions(bad_amount.as_bytes()).unwrap_err();
        assert!(matches!(err.root(), ReconciliationError::InvalidAmount(_)));

        let bad_time = "id,amount,type,time\nT1,1.00,DEBIT,03/01/2025\n";
        let err = read_transactions(bad_time.as_bytes()).unwrap_err();
        assert!(matches!(err.root(), ReconciliationError::InvalidTimestamp(ref v) if v == "03/01/2025"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let csv = "id,amount,type,time\nT1,1.00,REFUND,2025-01-03 10:00:00\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err.root(), ReconciliationError::InvalidTransactionKind(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let feed = LedgerCsvFeed::new("does/not/exist.csv");
        let err = feed.transactions().unwrap_err();
        assert!(matches!(err, ReconciliationError::Io(_)));
    }
}
