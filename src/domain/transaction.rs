use crate::common::amount::Amount;

/// One split posted to an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Free-form tag from the transaction's `num` field, possibly empty.
    pub num: String,
    /// Posting date, `YYYY-MM-DD`.
    pub date: String,
    pub value: Amount,
}

impl Transaction {
    pub fn new(num: impl Into<String>, date: impl Into<String>, value: Amount) -> Self {
        Self {
            num: num.into(),
            date: date.into(),
            value,
        }
    }
}
