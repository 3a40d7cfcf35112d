use std::collections::HashSet;

use tracing::warn;

use crate::{
    common::event::TransactionRecord,
    domain::{ledger::Ledger, transaction::Transaction},
};

/// Posts every split of `record` to its account and returns how many splits
/// found one. Splits of template accounts are dropped silently.
pub fn handle(
    mut ledger: Option<&mut Ledger>,
    templates: &HashSet<String>,
    record: TransactionRecord,
) -> usize {
    let mut posted = 0;
    for split in record.splits {
        let trn = Transaction::new(record.num.as_str(), record.date.as_str(), split.value);
        let found = match ledger.as_deref_mut() {
            Some(ledger) => ledger.post(&split.account_id, trn),
            None => false,
        };

        if found {
            posted += 1;
        } else if !templates.contains(&split.account_id) {
            warn!(account = %split.account_id, date = %record.date, "account not found in index for split");
        }
    }
    posted
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        common::{amount::Amount, event::SplitRecord},
        domain::account::Account,
    };

    fn split(value: &str, account: &str) -> SplitRecord {
        SplitRecord {
            value: Amount::from_str(value).unwrap(),
            account_id: account.into(),
        }
    }

    fn ledger_with_bank() -> Ledger {
        let mut ledger = Ledger::with_root(Account::new("r", "Root Account", "ROOT"));
        ledger.attach("r", Account::new("bank", "Bank", "BANK")).unwrap();
        ledger.attach("r", Account::new("books", "Books", "EXPENSE")).unwrap();
        ledger
    }

    #[test]
    fn splits_are_posted_to_their_accounts() {
        let mut ledger = ledger_with_bank();
        let record = TransactionRecord {
            num: "CB".into(),
            date: "2019-06-10".into(),
            splits: vec![split("30.05", "books"), split("-30.05", "bank")],
        };

        assert_eq!(handle(Some(&mut ledger), &HashSet::new(), record), 2);

        let books = ledger.account("books").unwrap().transactions();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].num, "CB");
        assert_eq!(books[0].date, "2019-06-10");
        assert_eq!(books[0].value, Amount::from_str("30.05").unwrap());
        assert_eq!(
            ledger.account("bank").unwrap().transactions()[0].value,
            Amount::from_str("-30.05").unwrap()
        );
    }

    #[test]
    fn orphan_and_template_splits_are_dropped() {
        let mut ledger = ledger_with_bank();
        let templates = HashSet::from(["tmpl".to_string()]);
        let record = TransactionRecord {
            num: String::new(),
            date: "2019-07-15".into(),
            splits: vec![split("10", "ghost"), split("0", "tmpl"), split("-10", "bank")],
        };

        assert_eq!(handle(Some(&mut ledger), &templates, record), 1);
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn only_orphan_splits_are_reported() {
        let mut ledger = ledger_with_bank();
        let templates = HashSet::from(["tmpl".to_string()]);
        let record = TransactionRecord {
            num: String::new(),
            date: "2019-07-15".into(),
            splits: vec![split("10", "ghost"), split("0", "tmpl"), split("-10", "bank")],
        };

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            handle(Some(&mut ledger), &templates, record)
        });

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let reported: Vec<&str> = logs
            .lines()
            .filter(|line| line.contains("account not found in index for split"))
            .collect();
        assert_eq!(reported.len(), 1, "{logs}");
        assert!(reported[0].contains("account=ghost"));
        assert!(!logs.contains("tmpl"));
    }

    #[test]
    fn nothing_is_posted_before_the_root_exists() {
        let record = TransactionRecord {
            num: String::new(),
            date: "2019-07-15".into(),
            splits: vec![split("10", "bank")],
        };
        assert_eq!(handle(None, &HashSet::new(), record), 0);
    }
}
