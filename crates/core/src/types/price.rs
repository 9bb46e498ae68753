//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole rupees today, but amounts are kept as `Decimal`
//! so line totals and subtotals never pick up float rounding.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not cents).
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

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn lkr(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::LKR)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// The amount without grouping or currency, e.g. `8500`.
    #[must_use]
    pub fn plain_amount(&self) -> String {
        self.amount.normalize().to_string()
    }

    /// The amount with thousands grouping, e.g. `8,500`.
    #[must_use]
    pub fn grouped_amount(&self) -> String {
        group_thousands(&self.plain_amount())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.grouped_amount(), self.currency_code.code())
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add)
            .unwrap_or_else(|| Self::zero(CurrencyCode::default()))
    }
}

/// ISO 4217 currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    /// Sri Lankan rupee.
    #[default]
    LKR,
    USD,
}

impl CurrencyCode {
    /// The ISO code shown next to amounts.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LKR => "LKR",
            Self::USD => "USD",
        }
    }
}

/// Insert `,` between groups of three integer digits.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = plain
        .strip_prefix('-')
        .map_or(("", plain), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::lkr(8500).to_string(), "8,500 LKR");
        assert_eq!(Price::lkr(12000).to_string(), "12,000 LKR");
        assert_eq!(Price::lkr(1_250_000).to_string(), "1,250,000 LKR");
        assert_eq!(Price::lkr(950).to_string(), "950 LKR");
    }

    #[test]
    fn test_plain_amount_is_ungrouped() {
        assert_eq!(Price::lkr(12000).plain_amount(), "12000");
        assert_eq!(
            Price::new(Decimal::new(25050, 1), CurrencyCode::LKR).plain_amount(),
            "2505"
        );
    }

    #[test]
    fn test_fractional_amounts_keep_decimals() {
        let price = Price::new(Decimal::new(123_456, 2), CurrencyCode::LKR);
        assert_eq!(price.grouped_amount(), "1,234.56");
    }

    #[test]
    fn test_multiply_by_quantity() {
        assert_eq!(Price::lkr(12000) * 2, Price::lkr(24000));
        assert_eq!(Price::lkr(3200) * 0, Price::lkr(0));
    }

    #[test]
    fn test_sum_of_prices() {
        let total: Price = [Price::lkr(1800), Price::lkr(2500)].into_iter().sum();
        assert_eq!(total, Price::lkr(4300));

        let empty: Price = std::iter::empty().sum();
        assert_eq!(empty, Price::zero(CurrencyCode::LKR));
    }
}
