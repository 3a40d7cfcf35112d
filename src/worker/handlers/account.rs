use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    common::event::AccountRecord,
    domain::{
        account::Account,
        ledger::{AttachError, Ledger},
    },
};

/// Commodity space of the placeholder accounts used by scheduled transactions.
pub const TEMPLATE_SPACE: &str = "template";
pub const ROOT_TYPE: &str = "ROOT";
pub const ROOT_NAME: &str = "Root Account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Attached,
    Template,
    Dropped,
}

pub fn handle(
    ledger: &mut Option<Ledger>,
    templates: &mut HashSet<String>,
    record: AccountRecord,
) -> Outcome {
    if record.commodity_space == TEMPLATE_SPACE {
        debug!(account = %record.name, id = %record.id, "skipping template account");
        templates.insert(record.id);
        return Outcome::Template;
    }

    // the format writes the root account before any other one
    if ledger.is_none() && is_root(&record) {
        *ledger = Some(Ledger::with_root(Account::new(record.id, record.name, record.kind)));
        return Outcome::Attached;
    }

    let account = Account::new(record.id.as_str(), record.name.as_str(), record.kind);
    let attached = match ledger.as_mut() {
        Some(ledger) => ledger.attach(&record.parent_id, account),
        None => Err(AttachError::MissingParent),
    };

    match attached {
        Ok(_) => Outcome::Attached,
        Err(AttachError::MissingParent) => {
            warn!(
                account = %record.name,
                parent = %record.parent_id,
                "parent not found in index, dropping account"
            );
            Outcome::Dropped
        }
        Err(AttachError::DuplicateId) => {
            warn!(account = %record.name, id = %record.id, "duplicate account id, dropping account");
            Outcome::Dropped
        }
    }
}

fn is_root(record: &AccountRecord) -> bool {
    record.kind == ROOT_TYPE && record.name == ROOT_NAME
}
