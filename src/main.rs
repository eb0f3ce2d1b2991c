use clap::Parser;
use custodia::application::ledger::AccountLedger;
use custodia::application::lending::LendingEngine;
use custodia::application::processor::OperationProcessor;
use custodia::domain::address::Address;
use custodia::domain::event::EventLog;
use custodia::domain::ports::{AccountStoreBox, LoanStoreBox};
use custodia::infrastructure::in_memory::{InMemoryAccountStore, InMemoryLoanStore};
use custodia::infrastructure::vault::InMemoryVault;
use custodia::interfaces::csv::account_writer::AccountWriter;
use custodia::interfaces::csv::operation_reader::OperationReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Admin identity for admin-gated operations (0x-prefixed hex)
    #[arg(long, default_value = "0x00000000000000000000000000000000000000ad")]
    admin: Address,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn open_stores(db_path: Option<PathBuf>) -> Result<(AccountStoreBox, LoanStoreBox)> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = custodia::infrastructure::rocksdb::RocksDbStore::open(path)
                .into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' \
                 feature is not enabled. Falling back to In-Memory storage."
            );
            Ok((
                Box::new(InMemoryAccountStore::new()),
                Box::new(InMemoryLoanStore::new()),
            ))
        }
        None => Ok((
            Box::new(InMemoryAccountStore::new()),
            Box::new(InMemoryLoanStore::new()),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (account_store, loan_store) = open_stores(cli.db_path)?;
    let vault = Arc::new(InMemoryVault::new());
    let events = EventLog::new();

    let ledger = Arc::new(AccountLedger::new(
        account_store,
        vault.clone(),
        events.clone(),
        cli.admin,
    ));
    // The lending engine gets the admin capability at construction; there is
    // no runtime role-granting step.
    let lending = LendingEngine::new(loan_store, ledger.clone(), events, cli.admin);
    let processor = OperationProcessor::new(ledger, lending, vault);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for op_result in reader.operations() {
        match op_result {
            Ok(op) => {
                if let Err(e) = processor.process(op).await {
                    eprintln!("Error processing operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
            }
        }
    }

    let accounts = processor.ledger().all_accounts().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
