//! Money type for representing monetary values.
//!
//! Amounts are exact decimals. Arithmetic keeps full precision (a tax of
//! 8% on 59.98 stays 4.7984); rounding to the currency's minor unit only
//! happens when a value is presented.

use crate::CommerceError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    MXN,
    COP,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::MXN => "MXN",
            Currency::COP => "COP",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::MXN => "MX$",
            Currency::COP => "COL$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "MXN" => Some(Currency::MXN),
            "COP" => Some(Currency::COP),
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
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a US dollar amount.
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::USD)
    }

    /// Create a Money value from minor units (e.g., cents).
    ///
    /// ```
    /// use sava_commerce::money::{Money, Currency};
    /// let price = Money::from_minor(4999, Currency::USD);
    /// assert_eq!(price.display(), "$49.99");
    /// ```
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor, currency.decimal_places()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Add another Money value of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by an item quantity.
    pub fn checked_mul_quantity(&self, quantity: i64) -> Result<Money, CommerceError> {
        self.checked_mul_rate(Decimal::from(quantity))
    }

    /// Multiply by a decimal factor (e.g., a tax rate).
    pub fn checked_mul_rate(&self, factor: Decimal) -> Result<Money, CommerceError> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    /// Round to the currency's minor unit, half away from zero.
    pub fn rounded(&self) -> Money {
        let places = self.currency.decimal_places();
        let mut amount = self
            .amount
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(places);
        Money::new(amount, self.currency)
    }

    /// Format as a display string (e.g., "$1,249.99").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        match amount.strip_prefix('-') {
            Some(positive) => format!("-{}{}", self.currency.symbol(), positive),
            None => format!("{}{}", self.currency.symbol(), amount),
        }
    }

    /// Format as a display string without symbol (e.g., "1,249.99").
    pub fn display_amount(&self) -> String {
        let text = self.rounded().amount.to_string();
        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        match fraction {
            Some(fraction) => format!("{sign}{grouped}.{fraction}"),
            None => format!("{sign}{grouped}"),
        }
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(minor: i64) -> Money {
        Money::from_minor(minor, Currency::USD)
    }

    #[test]
    fn test_money_from_minor() {
        let m = usd(4999);
        assert_eq!(m.amount, Decimal::new(4999, 2));
        assert_eq!(m.currency, Currency::USD);

        let m = Money::from_minor(100, Currency::JPY);
        assert_eq!(m.amount, Decimal::from(100));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(usd(4999).display(), "$49.99");
        assert_eq!(usd(0).display(), "$0.00");
        assert_eq!(usd(123_456_789).display(), "$1,234,567.89");
        assert_eq!(usd(-1050).display(), "-$10.50");
        assert_eq!(Money::from_minor(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::usd(Decimal::from(10)).display(), "$10.00");
    }

    #[test]
    fn test_rounding_keeps_full_precision_until_display() {
        let tax = usd(5998).checked_mul_rate(Decimal::new(8, 2)).unwrap();
        assert_eq!(tax.amount, Decimal::new(47984, 4));
        assert_eq!(tax.rounded().amount, Decimal::new(480, 2));
        assert_eq!(tax.display(), "$4.80");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let m = Money::usd(Decimal::new(12345, 3)); // 12.345
        assert_eq!(m.display(), "$12.35");
    }

    #[test]
    fn test_money_addition() {
        let c = usd(1000).checked_add(&usd(500)).unwrap();
        assert_eq!(c, usd(1500));
    }

    #[test]
    fn test_money_multiply() {
        assert_eq!(usd(2999).checked_mul_quantity(2).unwrap(), usd(5998));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let eur = Money::from_minor(1000, Currency::EUR);
        let err = usd(1000).checked_add(&eur).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_try_sum() {
        let values = [usd(100), usd(250), usd(5)];
        assert_eq!(Money::try_sum(values.iter(), Currency::USD).unwrap(), usd(355));
        assert!(Money::try_sum([].iter(), Currency::USD).unwrap().is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("cop"), Some(Currency::COP));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
