use crate::application::command::CommandRecord;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads order commands from a CSV source.
///
/// Expects the header `action, product, index, quantity`. Whitespace is
/// trimmed and short records are accepted, so `reset` can be written alone.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Wraps `source`; the header row is consumed on the first read.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes commands. A malformed row yields an error for that
    /// row only; reading continues with the next one.
    pub fn commands(self) -> impl Iterator<Item = Result<CommandRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
