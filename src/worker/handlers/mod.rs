pub mod account;
pub mod count;
pub mod transaction;
