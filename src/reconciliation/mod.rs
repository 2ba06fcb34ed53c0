//! Reconciliation engine matching ledger transactions against bank statements

pub mod config;
pub mod report;

pub use config::*;
pub use report::*;

use std::collections::{BTreeMap, HashMap};

use crate::currency::CurrencyValue;
use crate::traits::*;
use crate::types::*;
use crate::window::DateWindow;

/// Matches bank statements to ledger transactions by reference id
///
/// The engine keeps no state between runs: every call to [`reconcile`] builds its
/// own candidate map and accumulators, so one engine can serve many runs.
///
/// [`reconcile`]: ReconciliationEngine::reconcile
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: ReconciliationConfig,
}

/// In-window transactions keyed by id, remembering feed order
struct Candidates<'a> {
    slots: Vec<Option<&'a Transaction>>,
    index: HashMap<&'a str, usize>,
    duplicates: Vec<String>,
}

impl<'a> Candidates<'a> {
    fn build(
        transactions: &'a [Transaction],
        window: &DateWindow,
        policy: DuplicatePolicy,
    ) -> ReconciliationResult<Self> {
        let mut candidates = Self {
            slots: Vec::new(),
            index: HashMap::new(),
            duplicates: Vec::new(),
        };

        for transaction in transactions.iter().filter(|t| window.contains(&t.timestamp)) {
            let slot = candidates.slots.len();
            if let Some(previous) = candidates.index.insert(transaction.id.as_str(), slot) {
                if policy == DuplicatePolicy::Reject {
                    return Err(ReconciliationError::DuplicateTransactionId(
                        transaction.id.clone(),
                    ));
                }
                log::warn!(
                    "Transaction id {} appears more than once in the window, keeping the later entry",
                    transaction.id
                );
                candidates.slots[previous] = None;
                candidates.duplicates.push(transaction.id.clone());
            }
            candidates.slots.push(Some(transaction));
        }

        Ok(candidates)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    /// Remove and return the transaction with the given id
    fn take(&mut self, id: &str) -> Option<&'a Transaction> {
        let slot = self.index.remove(id)?;
        self.slots[slot].take()
    }

    fn remaining(self) -> Vec<Transaction> {
        self.slots.into_iter().flatten().cloned().collect()
    }
}

/// Signed difference between bank and ledger for a matched pair.
///
/// A debit is offset by a negative bank amount, so its ledger magnitude is used
/// whichever sign the ledger stored it with. A credit is compared on its signed
/// ledger amount, which keeps refunds and reversals recorded as negative credits
/// exact. Positive means the bank saw more money than expected.
pub fn pair_discrepancy(transaction: &Transaction, statement: &BankStatement) -> CurrencyValue {
    match transaction.kind {
        TransactionKind::Debit => statement.amount + transaction.amount.abs(),
        TransactionKind::Credit => statement.amount - transaction.amount,
    }
}

impl ReconciliationEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Reconcile in-window transactions against in-window statements.
    ///
    /// Only fails when the duplicate policy is [`DuplicatePolicy::Reject`] and two
    /// in-window transactions share an id.
    pub fn reconcile(
        &self,
        transactions: &[Transaction],
        statements: &[BankStatement],
        window: &DateWindow,
    ) -> ReconciliationResult<ReportSummary> {
        let mut candidates = Candidates::build(transactions, window, self.config.duplicate_policy)?;
        let transactions_processed = candidates.len();
        log::debug!(
            "{} of {} transactions fall within {}",
            transactions_processed,
            transactions.len(),
            window
        );

        let mut statements_processed = 0;
        let mut matched_count = 0;
        let mut aggregate_discrepancy = CurrencyValue::zero();
        let mut discrepancies = Vec::new();
        let mut unmatched_statements: BTreeMap<String, Vec<BankStatement>> = BTreeMap::new();

        for statement in statements.iter().filter(|s| window.contains(&s.date)) {
            statements_processed += 1;

            match candidates.take(&statement.reference_id) {
                Some(transaction) => {
                    matched_count += 1;
                    let diff = pair_discrepancy(transaction, statement);
                    aggregate_discrepancy += diff;

                    if !diff.is_zero() {
                        log::debug!(
                            "Transaction {} differs from {} statement by {}",
                            transaction.id,
                            statement.bank_code,
                            diff
                        );
                        discrepancies.push(Discrepancy {
                            transaction_id: transaction.id.clone(),
                            bank_code: statement.bank_code.clone(),
                            ledger_amount: transaction.amount,
                            statement_amount: statement.amount,
                            diff,
                        });
                    }
                }
                None => unmatched_statements
                    .entry(statement.bank_code.clone())
                    .or_default()
                    .push(statement.clone()),
            }
        }

        let duplicate_transaction_ids = std::mem::take(&mut candidates.duplicates);
        let unmatched_transactions = candidates.remaining();

        log::info!(
            "Reconciled {}: {} processed, {} matched, discrepancy {}",
            window,
            transactions_processed,
            matched_count,
            aggregate_discrepancy
        );

        Ok(ReportSummary {
            transactions_processed,
            statements_processed,
            matched_count,
            aggregate_discrepancy,
            discrepancies,
            unmatched_transactions,
            unmatched_statements,
            duplicate_transaction_ids,
        })
    }

    /// Load records from the given sources and reconcile them.
    ///
    /// Statement feeds are concatenated in the order given. A feed that fails to
    /// load aborts the run unless `skip_unreadable_feeds` is set.
    pub fn reconcile_sources<L, S>(
        &self,
        ledger: &L,
        feeds: &[S],
        window: &DateWindow,
    ) -> ReconciliationResult<ReportSummary>
    where
        L: TransactionSource + ?Sized,
        S: StatementSource,
    {
        let transactions = ledger.transactions()?;

        let mut statements = Vec::new();
        for feed in feeds {
            match feed.statements() {
                Ok(loaded) => statements.extend(loaded),
                Err(err) if self.config.skip_unreadable_feeds => {
                    log::warn!("Skipping {} statement feed: {}", feed.bank_code(), err);
                }
                Err(err) => return Err(err),
            }
        }

        self.reconcile(&transactions, &statements, window)
    }
}
