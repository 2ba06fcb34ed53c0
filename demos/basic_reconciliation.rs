//! Basic reconciliation example

use reconciliation_core::utils::MemoryFeed;
use reconciliation_core::{
    parse_timestamp, BankStatement, CurrencyValue, DateWindow, ReconciliationEngine, Transaction,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Reconciliation Core - Basic Example\n");

    // 1. The company ledger for the first week of January
    let ledger = MemoryFeed::ledger(vec![
        Transaction::debit("INV-1001", CurrencyValue::parse("-1500.00")?, parse_timestamp("2025-01-03 09:00:00")?),
        Transaction::credit("PAY-2001", CurrencyValue::parse("820.00")?, parse_timestamp("2025-01-03 11:30:00")?),
        Transaction::debit("INV-1002", CurrencyValue::parse("-64.90")?, parse_timestamp("2025-01-04 15:10:00")?),
        Transaction::credit("PAY-2002", CurrencyValue::parse("45.00")?, parse_timestamp("2025-01-05 08:00:00")?),
    ]);

    // 2. What the banks reported
    let bca = MemoryFeed::statements(
        "BCA",
        vec![
            BankStatement::new("BCA", "INV-1001", CurrencyValue::parse("-1500.00")?, parse_timestamp("2025-01-03 09:05:00")?),
            BankStatement::new("BCA", "PAY-2001", CurrencyValue::parse("815.00")?, parse_timestamp("2025-01-03 12:00:00")?),
        ],
    );
    let mandiri = MemoryFeed::statements(
        "MANDIRI",
        vec![
            BankStatement::new("MANDIRI", "INV-1002", CurrencyValue::parse("-64.90")?, parse_timestamp("2025-01-04 16:00:00")?),
            BankStatement::new("MANDIRI", "FEE-0001", CurrencyValue::parse("-2.50")?, parse_timestamp("2025-01-05 00:00:00")?),
        ],
    );

    // 3. Reconcile the window
    let window = DateWindow::parse("2025-01-03", "2025-01-05")?;
    let summary = ReconciliationEngine::new().reconcile_sources(&ledger, &[bca, mandiri], &window)?;

    println!("Window: {}\n", window);
    print!("{}", summary);

    if summary.is_reconciled() {
        println!("\nLedger and banks agree.");
    } else {
        println!("\nFollow-up needed before closing the period.");
    }

    Ok(())
}
