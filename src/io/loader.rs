use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::{
    common::error::LedgerError,
    domain::ledger::Ledger,
    io::reader::{decompress, read_events},
    worker::processor::Processor,
};

/// Loads a GnuCash file, gzip compressed or not.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Ledger, LedgerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LedgerError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loading GnuCash file");
    load(decompress(BufReader::new(file))?)
}

/// Loads the account hierarchy from an uncompressed XML document.
pub fn load<R: BufRead>(input: R) -> Result<Ledger, LedgerError> {
    let started = Instant::now();

    let mut processor = Processor::new();
    for event in read_events(input) {
        processor.process(event?);
    }

    let (accounts, transactions) = processor.attached();
    let ledger = processor.finish()?;
    info!(
        elapsed = ?started.elapsed(),
        accounts,
        transactions,
        "GnuCash data loaded"
    );
    Ok(ledger)
}
