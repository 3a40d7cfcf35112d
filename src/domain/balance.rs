use chrono::Local;

use crate::common::amount::Amount;
use crate::domain::account::AccountRef;
use crate::domain::transaction::Transaction;

/// Filters for [`AccountRef::balance`]. `None` and empty strings both mean
/// "no restriction"; an unset `to` resolves to today's date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Only count transactions whose `num` equals this tag.
    pub num: Option<String>,
    /// Add the balances of all sub-accounts.
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    /// The upper bound the balance was computed at.
    pub to: String,
    pub value: Amount,
}

/// `BalanceOptions` with defaults resolved. Dates are zero padded ISO strings,
/// so lexical comparison orders them correctly.
struct Window<'o> {
    from: &'o str,
    to: &'o str,
    num: Option<&'o str>,
}

impl Window<'_> {
    fn accepts(&self, trn: &Transaction) -> bool {
        trn.date.as_str() >= self.from
            && trn.date.as_str() <= self.to
            && self.num.is_none_or(|num| trn.num == num)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

impl<'a> AccountRef<'a> {
    /// Signed sum of the transactions posted to this account within the
    /// options' window. Sub-accounts only contribute when `recursive` is set.
    pub fn balance(self, options: &BalanceOptions) -> Balance {
        let to = non_empty(&options.to).map_or_else(today, str::to_owned);
        let window = Window {
            from: non_empty(&options.from).unwrap_or(""),
            to: &to,
            num: non_empty(&options.num),
        };
        let value = self.sum_within(&window, options.recursive);
        Balance { to, value }
    }

    fn sum_within(self, window: &Window<'_>, recursive: bool) -> Amount {
        let own: Amount = self
            .transactions()
            .iter()
            .filter(|trn| window.accepts(trn))
            .map(|trn| &trn.value)
            .sum();
        if !recursive {
            return own;
        }
        self.children()
            .fold(own, |acc, child| acc + child.sum_within(window, true))
    }
}
