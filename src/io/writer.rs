use std::{collections::BTreeMap, io::Write};

use crate::domain::{account::AccountRef, balance::Balance};

#[derive(serde::Serialize)]
/// Output row for one account: `id,name,type,parent,transactions`.
///
/// `parent` is the parent's ID, empty for the root. `transactions` counts the
/// transactions posted directly to the account.
struct AccountRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    parent: &'a str,
    transactions: usize,
}

#[derive(serde::Serialize)]
struct TypeRow<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    count: usize,
}

#[derive(serde::Serialize)]
struct BalanceRow<'a> {
    id: &'a str,
    to: &'a str,
    value: String,
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer)
}

/// Writes accounts to a CSV writer, in the order given.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use gnc_ledger::io::{loader::load, writer::write_accounts};
///
/// let xml = r#"<gnc-v2 xmlns:gnc="http://www.gnucash.org/XML/gnc"
///                      xmlns:act="http://www.gnucash.org/XML/act">
///   <gnc:account><act:name>Root Account</act:name><act:id>r</act:id><act:type>ROOT</act:type></gnc:account>
/// </gnc-v2>"#;
/// let ledger = load(xml.as_bytes()).unwrap();
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &[ledger.root()]).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "id,name,type,parent,transactions\nr,Root Account,ROOT,,0\n");
/// ```
pub fn write_accounts<W: Write>(writer: W, accounts: &[AccountRef<'_>]) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);

    for account in accounts {
        let row = AccountRow {
            id: account.id(),
            name: account.name(),
            kind: account.kind(),
            parent: account.parent().map_or("", |p| p.id()),
            transactions: account.transactions().len(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `type,count` rows, sorted by type.
pub fn write_account_types<W: Write>(
    writer: W,
    counts: &BTreeMap<&str, usize>,
) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    for (&kind, count) in counts {
        wtr.serialize(TypeRow {
            kind,
            count: *count,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a single `id,to,value` row.
pub fn write_balance<W: Write>(
    writer: W,
    account: AccountRef<'_>,
    balance: &Balance,
) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    wtr.serialize(BalanceRow {
        id: account.id(),
        to: &balance.to,
        value: balance.value.to_string(),
    })?;
    wtr.flush()?;
    Ok(())
}
