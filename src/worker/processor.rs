use std::collections::HashSet;

use tracing::warn;

use crate::{
    common::{error::LedgerError, event::LedgerEvent},
    domain::ledger::Ledger,
    worker::handlers::{
        account::{self, Outcome},
        count::{self, DeclaredCounts},
        transaction,
    },
};

/// Builds the account tree from the reader's events.
///
/// Holds the load-time state: the ledger once its root has been seen, the IDs
/// of template accounts, and the declared and attached counts.
#[derive(Debug, Default)]
pub struct Processor {
    ledger: Option<Ledger>,
    templates: HashSet<String>,
    declared: DeclaredCounts,
    accounts: usize,
    transactions: usize,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, event: LedgerEvent) {
        match event {
            LedgerEvent::CountData { kind, value } => {
                count::handle(&mut self.declared, &kind, &value);
            }
            LedgerEvent::Account(record) => {
                if account::handle(&mut self.ledger, &mut self.templates, record) == Outcome::Attached {
                    self.accounts += 1;
                }
            }
            LedgerEvent::Transaction(record) => {
                if transaction::handle(self.ledger.as_mut(), &self.templates, record) > 0 {
                    self.transactions += 1;
                }
            }
        }
    }

    /// Accounts and transactions attached so far.
    pub fn attached(&self) -> (usize, usize) {
        (self.accounts, self.transactions)
    }

    /// Ends the load. Count mismatches are only reported; a document without
    /// a root account is an error.
    pub fn finish(self) -> Result<Ledger, LedgerError> {
        if let Some(expected) = self.declared.accounts {
            if expected != self.accounts {
                warn!(read = self.accounts, expected, "account count mismatch");
            }
        }
        if let Some(expected) = self.declared.transactions {
            if expected != self.transactions {
                warn!(read = self.transactions, expected, "transaction count mismatch");
            }
        }
        self.ledger.ok_or(LedgerError::NoRoot)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::common::{
        amount::Amount,
        event::{AccountRecord, SplitRecord, TransactionRecord},
    };

    fn account(id: &str, name: &str, kind: &str, parent: &str, space: &str) -> LedgerEvent {
        LedgerEvent::Account(AccountRecord {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            parent_id: parent.into(),
            commodity_space: space.into(),
        })
    }

    fn transaction(date: &str, splits: &[(&str, &str)]) -> LedgerEvent {
        LedgerEvent::Transaction(TransactionRecord {
            num: String::new(),
            date: date.into(),
            splits: splits
                .iter()
                .map(|(value, account)| SplitRecord {
                    value: Amount::from_str(value).unwrap(),
                    account_id: account.to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn builds_tree_and_counts_attached_records() {
        let mut processor = Processor::new();
        for event in [
            LedgerEvent::CountData { kind: "account".into(), value: "2".into() },
            account("r", "Root Account", "ROOT", "", ""),
            account("b", "Bank", "BANK", "r", "CURRENCY"),
            account("t", "tmpl", "BANK", "", "template"),
            transaction("2019-01-01", &[("10", "b"), ("0", "t")]),
            transaction("2019-01-02", &[("0", "t")]),
        ] {
            processor.process(event);
        }

        assert_eq!(processor.attached(), (2, 1));
        let ledger = processor.finish().unwrap();
        assert_eq!(ledger.account_count(), 2);
        assert_eq!(ledger.transaction_count(), 1);
        assert!(ledger.account("t").is_none());
    }

    #[test]
    fn finishing_without_root_fails() {
        let mut processor = Processor::new();
        processor.process(account("b", "Bank", "BANK", "r", "CURRENCY"));

        assert!(matches!(processor.finish(), Err(LedgerError::NoRoot)));
    }
}
