//! Price display using decimal arithmetic.
//!
//! Fixture prices are plain numbers in the store currency. Amounts are kept as
//! [`Decimal`] so cart totals never pick up floating point noise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store currency.
    #[must_use]
    pub const fn store(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format with two decimal places (e.g., "₹1299.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }

    /// Format whole units with Indian digit grouping (e.g., "₹1,25,000").
    ///
    /// Used for auction amounts, which are always whole rupees.
    #[must_use]
    pub fn display_grouped(&self) -> String {
        let whole = self.amount.trunc().abs().to_string();
        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{}",
            self.currency_code.symbol(),
            group_indian(&whole)
        )
    }
}

/// Insert separators as `xx,xx,xxx`: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(head.get(start..end).unwrap_or_default());
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::store(Decimal::new(129_999, 2)).display(), "₹1299.99");
        assert_eq!(Price::store(Decimal::new(500, 0)).display(), "₹500.00");
    }

    #[test]
    fn test_display_grouped_indian_style() {
        assert_eq!(Price::store(Decimal::new(999, 0)).display_grouped(), "₹999");
        assert_eq!(Price::store(Decimal::new(1_000, 0)).display_grouped(), "₹1,000");
        assert_eq!(
            Price::store(Decimal::new(125_000, 0)).display_grouped(),
            "₹1,25,000"
        );
        assert_eq!(
            Price::store(Decimal::new(12_345_678, 0)).display_grouped(),
            "₹1,23,45,678"
        );
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(CurrencyCode::default().symbol(), "₹");
        assert_eq!(CurrencyCode::GBP.symbol(), "£");
    }
}
