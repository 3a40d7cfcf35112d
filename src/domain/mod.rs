pub mod account;
pub mod balance;
pub mod ledger;
pub mod transaction;
