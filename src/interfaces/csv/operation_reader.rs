use crate::domain::operation::Operation;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads boundary operations from a CSV source.
///
/// Wraps `csv::Reader` and yields an iterator over `Result<Operation>`,
/// trimming whitespace and tolerating flexible record lengths so short rows
/// (no `to`, no `amount`) parse cleanly.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes operations, streaming large files
    /// without loading them into memory.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
