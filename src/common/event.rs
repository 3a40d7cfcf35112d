use crate::common::amount::Amount;

/// Represents a recognized ledger element that is sent from the reader to the
/// worker for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// `<gnc:count-data cd:type="...">N</gnc:count-data>`, value left as raw text.
    CountData { kind: String, value: String },
    Account(AccountRecord),
    Transaction(TransactionRecord),
}

/// An `<gnc:account>` element as found in the file. Missing child elements
/// decode to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub parent_id: String,
    pub commodity_space: String,
}

/// An `<gnc:transaction>` element with its posted date already truncated to
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub num: String,
    pub date: String,
    pub splits: Vec<SplitRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitRecord {
    pub value: Amount,
    pub account_id: String,
}
