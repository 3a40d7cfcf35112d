//! Read-only queries over a GnuCash XML ledger.
//!
//! [`load_from_file`] streams a (possibly gzipped) GnuCash file into an
//! immutable [`Ledger`]; [`AccountRef`] answers lookups and balances over the
//! account tree.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;

pub use common::{amount::Amount, error::LedgerError};
pub use domain::{
    account::AccountRef,
    balance::{Balance, BalanceOptions},
    ledger::Ledger,
    transaction::Transaction,
};
pub use io::loader::{load, load_from_file};
