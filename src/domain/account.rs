use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::domain::ledger::Ledger;
use crate::domain::transaction::Transaction;

/// A node of the accounts hierarchy, stored in the [`Ledger`] arena.
///
/// `parent` and `children` are arena slots. Each account keeps only the
/// transactions posted directly to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            parent: None,
            children: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Borrowed view of one account inside a loaded [`Ledger`].
///
/// All lookups are driven by [`AccountRef::walk_bfs`] and start at the
/// account they are called on.
#[derive(Clone, Copy)]
pub struct AccountRef<'a> {
    pub(crate) ledger: &'a Ledger,
    pub(crate) slot: usize,
}

impl<'a> AccountRef<'a> {
    fn node(self) -> &'a Account {
        self.ledger.node(self.slot)
    }

    fn at(self, slot: usize) -> AccountRef<'a> {
        AccountRef {
            ledger: self.ledger,
            slot,
        }
    }

    pub fn id(self) -> &'a str {
        &self.node().id
    }

    pub fn name(self) -> &'a str {
        &self.node().name
    }

    /// Account type, e.g. `ROOT`, `BANK` or `EXPENSE`.
    pub fn kind(self) -> &'a str {
        &self.node().kind
    }

    pub fn parent(self) -> Option<AccountRef<'a>> {
        self.node().parent.map(|slot| self.at(slot))
    }

    pub fn children(self) -> impl Iterator<Item = AccountRef<'a>> {
        self.node().children.iter().map(move |&slot| self.at(slot))
    }

    pub fn transactions(self) -> &'a [Transaction] {
        &self.node().transactions
    }

    /// This account followed by its parent chain up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = AccountRef<'a>> {
        std::iter::successors(Some(self), |account| account.parent())
    }

    /// Traverses the subtree breadth-first, starting with this account, and
    /// returns the accounts for which `accept` is true in visiting order.
    pub fn walk_bfs<F>(self, mut accept: F) -> Vec<AccountRef<'a>>
    where
        F: FnMut(AccountRef<'a>) -> bool,
    {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([self.slot]);
        while let Some(slot) = queue.pop_front() {
            let account = self.at(slot);
            if accept(account) {
                found.push(account);
            }
            queue.extend(account.node().children.iter().copied());
        }
        found
    }

    /// Every account below this one, breadth-first.
    pub fn descendants(self) -> Vec<AccountRef<'a>> {
        let mut all = self.walk_bfs(|_| true);
        all.remove(0);
        all
    }

    /// The account with this ID inside the subtree, this account included.
    ///
    /// Answers from the ledger index and checks that `self` is an ancestor of
    /// the hit, which gives the same result as a breadth-first search without
    /// visiting the subtree.
    pub fn find_by_id(self, id: &str) -> Option<AccountRef<'a>> {
        self.ledger
            .account(id)
            .filter(|found| found.ancestors().any(|a| a.slot == self.slot))
    }

    pub fn find_by_name(self, name: &str) -> Vec<AccountRef<'a>> {
        self.walk_bfs(|account| account.name() == name)
    }

    pub fn find_by_type(self, kind: &str) -> Vec<AccountRef<'a>> {
        self.walk_bfs(|account| account.kind() == kind)
    }

    /// Number of accounts of each type in the subtree, this account included.
    pub fn type_counts(self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        self.walk_bfs(|account| {
            *counts.entry(account.kind()).or_insert(0) += 1;
            false
        });
        counts
    }
}

impl PartialEq for AccountRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ledger, other.ledger) && self.slot == other.slot
    }
}

impl Eq for AccountRef<'_> {}

impl fmt::Debug for AccountRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}
