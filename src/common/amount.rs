use bigdecimal::{BigDecimal, ParseBigDecimalError, Zero};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A signed monetary value as posted in the ledger.
///
/// GnuCash stores every split value as an exact rational (`"-950/100"`), so the
/// value is kept as an arbitrary precision decimal instead of a float. Sign is
/// preserved verbatim and no currency conversion happens.
///
/// # Examples
/// ```
/// use gnc_ledger::common::amount::Amount;
///
/// let amount = Amount::from_rational("-950/100").unwrap();
/// assert_eq!(amount.to_string(), "-9.5");
/// assert_eq!(amount, "-9.50".parse().unwrap());
/// ```
pub struct Amount(BigDecimal);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigDecimal::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses the `numerator/denominator` form used for split values.
    ///
    /// Both parts must be integers and the denominator must not be zero.
    pub fn from_rational(text: &str) -> Result<Self, ParseBigDecimalError> {
        let (numerator, denominator) = text.trim().split_once('/').ok_or_else(|| {
            ParseBigDecimalError::Other(format!("expected numerator/denominator, got `{text}`"))
        })?;

        let numerator: i64 = numerator.trim().parse()?;
        let denominator: i64 = denominator.trim().parse()?;
        if denominator == 0 {
            return Err(ParseBigDecimalError::Other("zero denominator".into()));
        }

        Ok(Amount(
            BigDecimal::from(numerator) / BigDecimal::from(denominator),
        ))
    }
}

impl std::str::FromStr for Amount {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Empty);
        }
        Ok(Amount(t.parse()?))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for Amount {
    type Output = Amount;
    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(self.0 + &rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_zero() {
        assert!(Amount::zero().is_zero());
        assert_eq!(Amount::zero(), Amount::default());
    }

    #[test]
    fn test_from_rational_valid() {
        assert_eq!(Amount::from_rational("3005/100").unwrap(), amount("30.05"));
        assert_eq!(Amount::from_rational("-950/100").unwrap(), amount("-9.5"));
        assert_eq!(Amount::from_rational("100000/100").unwrap(), amount("1000"));
        assert_eq!(Amount::from_rational("0/1").unwrap(), Amount::zero());
        assert_eq!(Amount::from_rational(" 25/-5 ").unwrap(), amount("-5"));
    }

    #[test]
    fn test_from_rational_keeps_exact_digits() {
        assert_eq!(Amount::from_rational("3005/100").unwrap().to_string(), "30.05");
        assert_eq!(Amount::from_rational("1/8").unwrap().to_string(), "0.125");
    }

    #[test]
    fn test_from_rational_invalid() {
        assert!(Amount::from_rational("").is_err());
        assert!(Amount::from_rational("100").is_err());
        assert!(Amount::from_rational("abc/100").is_err());
        assert!(Amount::from_rational("10/x").is_err());
        assert!(Amount::from_rational("1.5/100").is_err());
        assert!(Amount::from_rational("10/0").is_err());
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn test_add() {
        assert_eq!(amount("1000") + amount("-9.5"), amount("990.5"));
        assert_eq!(Amount::zero() + &amount("0.01"), amount("0.01"));
    }

    #[test]
    fn test_sum() {
        let values = vec![amount("1000"), amount("-9.5"), amount("-0.5")];
        let by_ref: Amount = values.iter().sum();
        let by_value: Amount = values.into_iter().sum();
        assert_eq!(by_ref, amount("990"));
        assert_eq!(by_value, amount("990"));
    }

    #[test]
    fn test_ordering() {
        assert!(amount("-10") < amount("0.5"));
        assert!(amount("1490.0") == amount("1490"));
    }
}
