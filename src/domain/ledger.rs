use std::collections::HashMap;

use crate::domain::{account::Account, account::AccountRef, transaction::Transaction};

/// Why an account could not be attached to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    MissingParent,
    DuplicateId,
}

/// A loaded account hierarchy.
///
/// Accounts live in a flat arena with the root in slot 0; `index` maps the
/// file's account IDs to slots. Once returned by the loader the ledger is
/// read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub(crate) fn with_root(mut root: Account) -> Self {
        root.parent = None;
        root.children.clear();
        let index = HashMap::from([(root.id.clone(), 0)]);
        Self {
            accounts: vec![root],
            index,
        }
    }

    /// Appends `account` to the children of `parent_id` and indexes it.
    pub(crate) fn attach(&mut self, parent_id: &str, mut account: Account) -> Result<usize, AttachError> {
        let parent = *self.index.get(parent_id).ok_or(AttachError::MissingParent)?;
        if self.index.contains_key(&account.id) {
            return Err(AttachError::DuplicateId);
        }

        let slot = self.accounts.len();
        account.parent = Some(parent);
        account.children.clear();
        self.index.insert(account.id.clone(), slot);
        self.accounts.push(account);
        self.accounts[parent].children.push(slot);
        Ok(slot)
    }

    /// Posts `trn` to the account with this ID. Returns false when the ID is
    /// unknown.
    pub(crate) fn post(&mut self, account_id: &str, trn: Transaction) -> bool {
        match self.index.get(account_id) {
            Some(&slot) => {
                self.accounts[slot].transactions.push(trn);
                true
            }
            None => false,
        }
    }

    pub(crate) fn node(&self, slot: usize) -> &Account {
        &self.accounts[slot]
    }

    pub fn root(&self) -> AccountRef<'_> {
        AccountRef {
            ledger: self,
            slot: 0,
        }
    }

    /// Direct index lookup over the whole tree.
    pub fn account(&self, id: &str) -> Option<AccountRef<'_>> {
        self.index
            .get(id)
            .map(|&slot| AccountRef { ledger: self, slot })
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.accounts.iter().map(|a| a.transactions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::common::amount::Amount;

    #[test]
    fn root_is_indexed_and_parentless() {
        let ledger = Ledger::with_root(Account::new("r", "Root Account", "ROOT"));
        let root = ledger.root();
        assert_eq!(root.id(), "r");
        assert!(root.parent().is_none());
        assert_eq!(ledger.account("r"), Some(root));
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn attach_keeps_first_seen_order() {
        let mut ledger = Ledger::with_root(Account::new("r", "Root Account", "ROOT"));
        ledger.attach("r", Account::new("b", "B", "BANK")).unwrap();
        ledger.attach("r", Account::new("a", "A", "BANK")).unwrap();

        let names: Vec<&str> = ledger.root().children().map(|c| c.name()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(ledger.account("a").and_then(|a| a.parent()), Some(ledger.root()));
    }

    #[test]
    fn attach_rejects_unknown_parent_and_duplicate_id() {
        let mut ledger = Ledger::with_root(Account::new("r", "Root Account", "ROOT"));
        ledger.attach("r", Account::new("a", "A", "BANK")).unwrap();

        assert_eq!(
            ledger.attach("nope", Account::new("b", "B", "BANK")),
            Err(AttachError::MissingParent)
        );
        assert_eq!(
            ledger.attach("r", Account::new("a", "Again", "BANK")),
            Err(AttachError::DuplicateId)
        );
        assert_eq!(ledger.account_count(), 2);
        assert_eq!(ledger.account("a").map(|a| a.name()), Some("A"));
    }

    #[test]
    fn post_attaches_to_known_accounts_only() {
        let mut ledger = Ledger::with_root(Account::new("r", "Root Account", "ROOT"));
        let value = Amount::from_str("12.5").unwrap();

        assert!(ledger.post("r", Transaction::new("", "2019-06-10", value.clone())));
        assert!(!ledger.post("ghost", Transaction::new("", "2019-06-10", value)));
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.root().transactions()[0].date, "2019-06-10");
    }
}
