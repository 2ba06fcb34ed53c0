//! Bank statement exports, one file per bank
//!
//! Expected layout:
//!   unique_identifier,amount,date
//!   T1,-500.00,2025-01-03 11:00:00

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::currency::CurrencyValue;
use crate::traits::StatementSource;
use crate::types::*;

const STATEMENT_COLUMNS: usize = 3;

/// Parse statement CSV rows, stamping each with `bank_code`
pub fn read_statements<R: Read>(reader: R, bank_code: &str) -> ReconciliationResult<Vec<BankStatement>> {
    super::read_rows(reader, STATEMENT_COLUMNS, |row| {
        Ok(BankStatement {
            bank_code: bank_code.to_string(),
            reference_id: row[0].to_string(),
            amount: CurrencyValue::parse(&row[1])?,
            date: parse_timestamp(&row[2])?,
        })
    })
}

/// Derive a bank code from a statement file name.
///
/// `exports/bca_statements.csv` gives `bca`. A name without `_` falls back to the
/// file stem (`BNI.csv` gives `BNI`), not the whole file name with its extension.
pub fn bank_code_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some((code, _)) = file_name.split_once('_') {
        return code.to_string();
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or(file_name)
}

/// Statement feed backed by a CSV file
#[derive(Debug, Clone)]
pub struct StatementCsvFeed {
    path: PathBuf,
    bank_code: String,
}

impl StatementCsvFeed {
    pub fn new(path: impl Into<PathBuf>, bank_code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            bank_code: bank_code.into(),
        }
    }

    /// Create a feed whose bank code comes from the file name
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bank_code = bank_code_from_path(&path);
        Self { path, bank_code }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatementSource for StatementCsvFeed {
    fn bank_code(&self) -> &str {
        &self.bank_code
    }

    fn statements(&self) -> ReconciliationResult<Vec<BankStatement>> {
        let statements = read_statements(File::open(&self.path)?, &self.bank_code)?;
        log::info!(
            "Read {} {} statement records from {}",
            statements.len(),
            self.bank_code,
            self.path.display()
        );
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_statement_rows() {
        let csv = "\
unique_identifier,amount,date
T1,-500.00,2025-01-03 11:00:00
X9, 20.00 ,2025-01-03 13:00:00
";
        let statements = read_statements(csv.as_bytes(), "bca").unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements.iter().all(|s| s.bank_code == "bca"));
        assert_eq!(statements[0].reference_id, "T1");
        assert_eq!(statements[1].amount, CurrencyValue::from_minor_units(2_000));
    }

    #[test]
    fn test_wrong_column_count() {
        let csv = "unique_identifier,amount,date\nT1,-500.00,2025-01-03 11:00:00,extra\n";
        let err = read_statements(csv.as_bytes(), "bca").unwrap_err();
        assert!(matches!(
            err.root(),
            ReconciliationError::InvalidRowShape { expected: 3, found: 4 }
        ));
    }

    #[test]
    fn test_bank_code_from_path() {
        assert_eq!(bank_code_from_path(Path::new("bca_statements.csv")), "bca");
        assert_eq!(bank_code_from_path(Path::new("data/mandiri_jan_2025.csv")), "mandiri");
        assert_eq!(bank_code_from_path(Path::new("/tmp/BNI.csv")), "BNI");
    }

    #[test]
    fn test_from_path_stamps_derived_code() {
        let feed = StatementCsvFeed::from_path("exports/bca_statements.csv");
        assert_eq!(feed.bank_code(), "bca");
        assert_eq!(feed.path(), Path::new("exports/bca_statements.csv"));
    }
}
