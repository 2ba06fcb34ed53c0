//! # Reconciliation Core
//!
//! Reconciles an internal ledger of transactions against one or more bank
//! statement feeds over a bounded date window.
//!
//! ## Features
//!
//! - **Fixed-point currency**: amounts held as signed minor units, never floats
//! - **Half-open date windows**: a single-day window covers the whole day
//! - **Reference matching**: 1:1 matching of statements to ledger entries by id
//! - **Discrepancy reporting**: sign-aware per-pair differences and their total
//! - **Feed abstraction**: CSV feeds plus trait-based sources for anything else
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{
//!     parse_timestamp, BankStatement, CurrencyValue, DateWindow, ReconciliationEngine,
//!     Transaction,
//! };
//!
//! let transactions = vec![Transaction::debit(
//!     "T1",
//!     CurrencyValue::parse("-500").unwrap(),
//!     parse_timestamp("2025-01-03 10:00:00").unwrap(),
//! )];
//! let statements = vec![BankStatement::new(
//!     "BCA",
//!     "T1",
//!     CurrencyValue::parse("-500").unwrap(),
//!     parse_timestamp("2025-01-03 11:00:00").unwrap(),
//! )];
//! let window = DateWindow::parse("2025-01-03", "2025-01-03").unwrap();
//!
//! let summary = ReconciliationEngine::new()
//!     .reconcile(&transactions, &statements, &window)
//!     .unwrap();
//! assert_eq!(summary.matched_count, 1);
//! assert!(summary.aggregate_discrepancy.is_zero());
//! ```
//!
//! ## Amount parsing
//!
//! [`CurrencyValue::parse`] does not scale short fractions: `"7.5"` is read as
//! seven units and five minor units (`7.05`). Feeds are expected to carry two
//! fraction digits.

pub mod currency;
pub mod feed;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use currency::*;
pub use feed::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
pub use window::*;
