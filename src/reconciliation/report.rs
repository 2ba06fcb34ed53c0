//! Reconciliation summary and its text rendering

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::currency::CurrencyValue;
use crate::types::*;

const RULE: &str = "===============================================================";

/// Non-zero difference found on a matched ledger/bank pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub transaction_id: String,
    pub bank_code: String,
    pub ledger_amount: CurrencyValue,
    pub statement_amount: CurrencyValue,
    /// Positive when the bank saw more money than the ledger expected
    pub diff: CurrencyValue,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Distinct in-window transactions considered for matching
    pub transactions_processed: usize,
    /// In-window statements considered for matching
    pub statements_processed: usize,
    pub matched_count: usize,
    /// Sum of every matched pair's difference
    pub aggregate_discrepancy: CurrencyValue,
    /// Matched pairs whose amounts did not cancel, in statement order
    pub discrepancies: Vec<Discrepancy>,
    /// Ledger transactions no statement referred to, in ledger order
    pub unmatched_transactions: Vec<Transaction>,
    /// Statements without a ledger counterpart, grouped by bank code
    pub unmatched_statements: BTreeMap<String, Vec<BankStatement>>,
    /// Ids overwritten by a later in-window transaction
    pub duplicate_transaction_ids: Vec<String>,
}

impl ReportSummary {
    /// Total unmatched statements across all banks
    pub fn unmatched_statement_count(&self) -> usize {
        self.unmatched_statements.values().map(Vec::len).sum()
    }

    /// Whether every record matched and every matched pair cancelled out
    pub fn is_reconciled(&self) -> bool {
        self.aggregate_discrepancy.is_zero()
            && self.unmatched_transactions.is_empty()
            && self.unmatched_statements.is_empty()
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=========================== Summary ===========================")?;
        writeln!(f, "Total transactions processed: {}", self.transactions_processed)?;
        writeln!(f, "Total matched transactions: {}", self.matched_count)?;
        writeln!(f, "Discrepancies: {}", self.aggregate_discrepancy)?;
        for discrepancy in &self.discrepancies {
            writeln!(
                f,
                "  {} ({}): ledger {}, bank {}, diff {}",
                discrepancy.transaction_id,
                discrepancy.bank_code,
                discrepancy.ledger_amount,
                discrepancy.statement_amount,
                discrepancy.diff
            )?;
        }
        if !self.duplicate_transaction_ids.is_empty() {
            writeln!(
                f,
                "Duplicate transaction ids (last entry kept): {}",
                self.duplicate_transaction_ids.join(", ")
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Total unmatched transactions: {}",
            self.unmatched_transactions.len()
        )?;
        writeln!(f, "Details:")?;
        for transaction in &self.unmatched_transactions {
            writeln!(f, "{}", transaction)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Total unmatched bank statements: {}",
            self.unmatched_statement_count()
        )?;
        writeln!(f, "Details:")?;
        for statements in self.unmatched_statements.values() {
            for statement in statements {
                writeln!(f, "{}", statement)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ReportSummary {
        let ts = parse_timestamp("2025-01-03 10:00:00").unwrap();
        let mut unmatched_statements = BTreeMap::new();
        unmatched_statements.insert(
            "mandiri".to_string(),
            vec![
                BankStatement::new("mandiri", "X1", CurrencyValue::from_minor_units(100), ts),
                BankStatement::new("mandiri", "X2", CurrencyValue::from_minor_units(200), ts),
            ],
        );
        unmatched_statements.insert(
            "bca".to_string(),
            vec![BankStatement::new("bca", "X3", CurrencyValue::from_minor_units(-300), ts)],
        );

        ReportSummary {
            transactions_processed: 2,
            statements_processed: 4,
            matched_count: 1,
            aggregate_discrepancy: CurrencyValue::from_minor_units(2_000),
            discrepancies: vec![Discrepancy {
                transaction_id: "T1".to_string(),
                bank_code: "bca".to_string(),
                ledger_amount: CurrencyValue::from_minor_units(-50_000),
                statement_amount: CurrencyValue::from_minor_units(-48_000),
                diff: CurrencyValue::from_minor_units(2_000),
            }],
            unmatched_transactions: vec![Transaction::credit(
                "T2",
                CurrencyValue::from_minor_units(1_000),
                ts,
            )],
            unmatched_statements,
            duplicate_transaction_ids: Vec::new(),
        }
    }

    #[test]
    fn test_unmatched_statement_count_spans_banks() {
        let summary = sample_summary();
        assert_eq!(summary.unmatched_statement_count(), 3);
        assert!(!summary.is_reconciled());
    }

    #[test]
    fn test_empty_summary_is_reconciled() {
        assert!(ReportSummary::default().is_reconciled());
    }

    #[test]
    fn test_render_lists_banks_in_code_order() {
        let rendered = sample_summary().to_string();

        assert!(rendered.contains("Total transactions processed: 2"));
        assert!(rendered.contains("Total matched transactions: 1"));
        assert!(rendered.contains("Discrepancies: 20.00"));
        assert!(rendered.contains("T1 (bca): ledger -500.00, bank -480.00, diff 20.00"));
        assert!(rendered.contains("Total unmatched transactions: 1"));
        assert!(rendered.contains("T2, credit, 2025-01-03 10:00:00, 10.00"));
        assert!(rendered.contains("Total unmatched bank statements: 3"));

        let bca = rendered.find("bca X3").unwrap();
        let mandiri_first = rendered.find("mandiri X1").unwrap();
        let mandiri_second = rendered.find("mandiri X2").unwrap();
        assert!(bca < mandiri_first);
        assert!(mandiri_first < mandiri_second);
    }

    #[test]
    fn test_summary_serializes_amounts_as_minor_units() {
        let json = serde_json::to_value(sample_summary()).unwrap();
        assert_eq!(json["aggregate_discrepancy"], 2_000);
        assert_eq!(json["unmatched_statements"]["bca"][0]["reference_id"], "X3");
    }
}
