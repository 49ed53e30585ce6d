use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            other => other,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Monetary amount in minor units (cents). Fares never go negative.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Formats the amount with the currency symbol. Whole amounts drop the
    /// fractional part (`$299`), others keep two digits (`$12.50`).
    pub fn format_with(&self, currency: &CurrencyCode) -> String {
        let whole = self.cents / 100;
        let fraction = self.cents % 100;
        let symbol = currency.symbol();
        let spacer = if symbol.chars().count() > 1 { " " } else { "" };
        if fraction == 0 {
            format!("{symbol}{spacer}{whole}")
        } else {
            format!("{symbol}{spacer}{whole}.{fraction:02}")
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&CurrencyCode::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_dollar_amounts_drop_cents() {
        assert_eq!(Money::from_dollars(299).to_string(), "$299");
    }

    #[test]
    fn fractional_amounts_keep_two_digits() {
        assert_eq!(Money::from_cents(1250).to_string(), "$12.50");
        assert_eq!(Money::from_cents(1205).to_string(), "$12.05");
    }

    #[test]
    fn unknown_codes_use_the_code_as_prefix() {
        let chf = CurrencyCode::new("chf");
        assert_eq!(Money::from_dollars(40).format_with(&chf), "CHF 40");
    }

    #[test]
    fn sums_saturate_instead_of_wrapping() {
        let total: Money = [Money::from_cents(u64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), u64::MAX);
    }
}
