use crate::domain::account::Account;
use crate::error::Result;
use std::io::Write;

/// Writes the final account table as CSV: `owner,balance,active`.
///
/// Rows are sorted by owner so output is deterministic regardless of the
/// backing store's iteration order.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, mut accounts: Vec<Account>) -> Result<()> {
        accounts.sort_by_key(|account| account.owner);
        self.writer.write_record(["owner", "balance", "active"])?;
        for account in accounts {
            self.writer.write_record([
                account.owner.to_string(),
                account.balance.to_string(),
                account.active.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
