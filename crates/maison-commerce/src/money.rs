//! Money type for representing prices.
//!
//! Amounts are integers in the currency's minor unit, so cart and order
//! totals never accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the smallest currency unit (paise, cents).
    pub amount: i64,
    #[serde(rename = "currencyCode")]
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum values of one currency. None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Whole percentage saved relative to a higher compare-at price.
    pub fn percent_off(&self, compare_at: &Money) -> Option<u8> {
        if self.currency != compare_at.currency || compare_at.amount <= self.amount || compare_at.amount <= 0 {
            return None;
        }
        let saved = (compare_at.amount - self.amount) * 100 / compare_at.amount;
        u8::try_from(saved).ok().filter(|p| *p > 0)
    }

    /// Format for display, e.g. "₹1,499.00" or "$49.99".
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(149_900, Currency::INR).display(), "\u{20b9}1,499.00");
        assert_eq!(Money::new(123_456_789, Currency::EUR).display(), "\u{20ac}1,234,567.89");
        assert_eq!(Money::new(-250, Currency::GBP).display(), "-\u{00a3}2.50");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000, Currency::INR);
        let b = Money::new(300, Currency::INR);
        assert_eq!(a.try_add(&b).unwrap().amount, 1300);
        assert_eq!(a.try_subtract(&b).unwrap().amount, 700);
        assert_eq!(a.try_multiply(3).unwrap().amount, 3000);
        assert!(Money::new(i64::MAX, Currency::INR).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert!(inr.try_add(&usd).is_none());
    }

    #[test]
    fn test_money_try_sum() {
        let prices = [Money::new(100, Currency::USD), Money::new(250, Currency::USD)];
        assert_eq!(Money::try_sum(prices.iter(), Currency::USD).unwrap().amount, 350);
        assert!(Money::try_sum(prices.iter(), Currency::INR).is_none());

        let huge = [Money::new(i64::MAX, Currency::USD), Money::new(1, Currency::USD)];
        assert!(Money::try_sum(huge.iter(), Currency::USD).is_none());
        assert_eq!(Money::try_sum([].iter(), Currency::INR), Some(Money::zero(Currency::INR)));
    }

    #[test]
    fn test_percent_off() {
        let price = Money::new(7500, Currency::INR);
        assert_eq!(price.percent_off(&Money::new(10000, Currency::INR)), Some(25));
        assert_eq!(price.percent_off(&Money::new(7500, Currency::INR)), None);
        assert_eq!(price.percent_off(&Money::new(5000, Currency::INR)), None);
    }

    #[test]
    fn test_money_wire_format() {
        let m = Money::new(4999, Currency::USD);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json, serde_json::json!({"amount": 4999, "currencyCode": "USD"}));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
