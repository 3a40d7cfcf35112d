use std::path::PathBuf;

/// Fatal failures while loading a ledger. Structural inconsistencies in the
/// document (missing parents, orphaned splits, count mismatches) are logged
/// instead and never show up here.
#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("failed to open ledger file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read ledger: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed ledger XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),
    #[error("invalid split value `{value}`: {reason}")]
    InvalidValue { value: String, reason: String },
    #[error("no root account found")]
    NoRoot,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("environment variable {0} is not set")]
    MissingConfig(&'static str),
    #[error(transparent)]
    Load(#[from] LedgerError),
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("failed to set up logging: {0}")]
    Logging(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
