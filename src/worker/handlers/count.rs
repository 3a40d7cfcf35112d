use tracing::warn;

/// Totals announced by the `count-data` elements. They are only used to flag
/// suspicious loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclaredCounts {
    pub accounts: Option<usize>,
    pub transactions: Option<usize>,
}

pub fn handle(declared: &mut DeclaredCounts, kind: &str, value: &str) {
    let Ok(count) = value.trim().parse::<usize>() else {
        warn!(kind, value, "ignoring unreadable count-data");
        return;
    };
    match kind {
        "account" => declared.accounts = Some(count),
        "transaction" => declared.transactions = Some(count),
        _ => {}
    }
}
