use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reconciliation_core::{
    DateWindow, DuplicatePolicy, LedgerCsvFeed, ReconciliationConfig, ReconciliationEngine,
    StatementCsvFeed,
};

/// Reconcile a ledger export against bank statement exports
#[derive(Parser, Debug)]
#[command(name = "reconcile", version, about)]
struct Cli {
    /// Ledger CSV file (id,amount,type,time)
    #[arg(short, long)]
    transactions: PathBuf,

    /// Bank statement CSV file, optionally prefixed with its bank code (CODE=path).
    /// Without a prefix the code is taken from the file name (bca_statements.csv -> bca).
    #[arg(short, long = "statements", required = true)]
    statements: Vec<String>,

    /// First day of the window (YYYY-MM-DD), inclusive
    #[arg(long)]
    start: String,

    /// Last day of the window (YYYY-MM-DD), inclusive
    #[arg(long)]
    end: String,

    /// Output the summary as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Fail when two transactions in the window share an id
    #[arg(long)]
    reject_duplicate_ids: bool,

    /// Skip statement files that fail to load instead of aborting
    #[arg(long)]
    skip_unreadable_feeds: bool,
}

impl Cli {
    fn config(&self) -> ReconciliationConfig {
        let policy = if self.reject_duplicate_ids {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::LastWriteWins
        };
        ReconciliationConfig::new()
            .with_duplicate_policy(policy)
            .with_skip_unreadable_feeds(self.skip_unreadable_feeds)
    }

    fn statement_feeds(&self) -> Vec<StatementCsvFeed> {
        self.statements
            .iter()
            .map(|arg| match arg.split_once('=') {
                Some((code, path)) if !code.is_empty() => StatementCsvFeed::new(path, code),
                _ => StatementCsvFeed::from_path(arg),
            })
            .collect()
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let window = DateWindow::parse(&cli.start, &cli.end).context("Invalid reconciliation window")?;
    let ledger = LedgerCsvFeed::new(&cli.transactions);
    let feeds = cli.statement_feeds();
    let engine = ReconciliationEngine::with_config(cli.config());

    let summary = engine
        .reconcile_sources(&ledger, &feeds, &window)
        .with_context(|| format!("Failed to reconcile {}", cli.transactions.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}
