//! Order totals calculation.
//!
//! `total = subtotal + tax + shipping`, with tax applied to the subtotal
//! only and flat shipping waived once the subtotal is strictly above the
//! free-shipping threshold. Values keep full precision; call
//! [`Totals::rounded`] when presenting them.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax and shipping parameters used by [`compute_totals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax (0.08 = 8%).
    pub tax_rate: Decimal,
    /// Flat shipping charge.
    pub shipping_flat: Money,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            shipping_flat: Money::from_minor(599, Currency::USD),
            free_shipping_threshold: Money::from_minor(5000, Currency::USD),
        }
    }
}

impl PricingPolicy {
    /// Create a validated policy.
    pub fn new(
        tax_rate: Decimal,
        shipping_flat: Money,
        free_shipping_threshold: Money,
    ) -> Result<Self, CommerceError> {
        if tax_rate.is_sign_negative() && !tax_rate.is_zero() {
            return Err(CommerceError::field("tax_rate", "must not be negative"));
        }
        if shipping_flat.is_negative() {
            return Err(CommerceError::field("shipping_flat", "must not be negative"));
        }
        if free_shipping_threshold.is_negative() {
            return Err(CommerceError::field(
                "free_shipping_threshold",
                "must not be negative",
            ));
        }
        if shipping_flat.currency != free_shipping_threshold.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: shipping_flat.currency.code().to_string(),
                got: free_shipping_threshold.currency.code().to_string(),
            });
        }
        Ok(Self {
            tax_rate,
            shipping_flat,
            free_shipping_threshold,
        })
    }

    /// Currency all totals are computed in.
    pub fn currency(&self) -> Currency {
        self.shipping_flat.currency
    }

    /// Check if a subtotal ships free.
    pub fn qualifies_for_free_shipping(&self, subtotal: &Money) -> bool {
        subtotal.amount > self.free_shipping_threshold.amount
    }

    /// Shipping charged for a subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            Money::zero(self.currency())
        } else {
            self.shipping_flat
        }
    }

    /// How much more must be spent before shipping is free.
    ///
    /// `None` once the subtotal already qualifies. Because the threshold
    /// is exclusive, reaching the returned amount exactly is not enough;
    /// the storefront shows it as "spend more than".
    pub fn remaining_for_free_shipping(&self, subtotal: &Money) -> Option<Money> {
        if self.qualifies_for_free_shipping(subtotal) {
            return None;
        }
        Some(Money::new(
            self.free_shipping_threshold.amount - subtotal.amount,
            self.currency(),
        ))
    }

    /// Tax rate as a whole-number percentage for labels (8 for 0.08).
    pub fn tax_percent(&self) -> Decimal {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
    }
}

/// Computed order totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Final amount.
    pub total: Money,
}

impl Totals {
    /// Totals rounded to the currency's minor unit for presentation.
    pub fn rounded(&self) -> Totals {
        Totals {
            subtotal: self.subtotal.rounded(),
            tax: self.tax.rounded(),
            shipping: self.shipping.rounded(),
            total: self.total.rounded(),
        }
    }

    /// Check if shipping was waived.
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Compute subtotal, tax, shipping and total for a set of line items.
///
/// An empty set still pays the flat shipping charge.
///
/// ```
/// use sava_commerce::prelude::*;
///
/// let totals = compute_totals(&[], &PricingPolicy::default()).unwrap();
/// assert_eq!(totals.total.display(), "$5.99");
/// ```
pub fn compute_totals(
    items: &[LineItem],
    policy: &PricingPolicy,
) -> Result<Totals, CommerceError> {
    let currency = policy.currency();

    let line_totals = items
        .iter()
        .map(LineItem::line_total)
        .collect::<Result<Vec<_>, _>>()?;
    let subtotal = Money::try_sum(line_totals.iter(), currency)?;

    let tax = subtotal.checked_mul_rate(policy.tax_rate)?;
    let shipping = policy.shipping_for(&subtotal);
    let total = subtotal.checked_add(&tax)?.checked_add(&shipping)?;

    Ok(Totals {
        subtotal,
        tax,
        shipping,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn line(id: &str, cents: i64, quantity: i64) -> LineItem {
        let product = Product::new(id, id, Money::from_minor(cents, Currency::USD));
        LineItem::from_product(&product, quantity).unwrap()
    }

    #[test]
    fn test_free_shipping_over_threshold() {
        let totals = compute_totals(&[line("p1", 2999, 2)], &PricingPolicy::default()).unwrap();

        assert_eq!(totals.subtotal.amount, Decimal::new(5998, 2));
        assert!(totals.is_free_shipping());
        assert_eq!(totals.tax.amount, Decimal::new(47984, 4));
        assert_eq!(totals.total.amount, Decimal::new(647784, 4));

        let shown = totals.rounded();
        assert_eq!(shown.tax.display(), "$4.80");
        assert_eq!(shown.total.display(), "$64.78");
    }

    #[test]
    fn test_small_order_pays_shipping() {
        let totals = compute_totals(&[line("p1", 1000, 1)], &PricingPolicy::default()).unwrap();

        assert_eq!(totals.subtotal.display(), "$10.00");
        assert_eq!(totals.tax.display(), "$0.80");
        assert_eq!(totals.shipping.display(), "$5.99");
        assert_eq!(totals.total.display(), "$16.79");
    }

    #[test]
    fn test_empty_cart_still_pays_shipping() {
        let totals = compute_totals(&[], &PricingPolicy::default()).unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total.display(), "$5.99");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = PricingPolicy::default();
        let at = compute_totals(&[line("p1", 5000, 1)], &policy).unwrap();
        assert_eq!(at.shipping.display(), "$5.99");

        let above = compute_totals(&[line("p1", 5001, 1)], &policy).unwrap();
        assert!(above.is_free_shipping());
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let items = [line("a", 1234, 3), line("b", 99, 7), line("c", 45000, 1)];
        let totals = compute_totals(&items, &PricingPolicy::default()).unwrap();
        assert_eq!(
            totals.total.amount,
            totals.subtotal.amount + totals.tax.amount + totals.shipping.amount
        );
    }

    #[test]
    fn test_zero_tax_rate() {
        let policy = PricingPolicy::new(
            Decimal::ZERO,
            Money::from_minor(599, Currency::USD),
            Money::from_minor(5000, Currency::USD),
        )
        .unwrap();
        let totals = compute_totals(&[line("p1", 1000, 1)], &policy).unwrap();
        assert!(totals.tax.is_zero());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = PricingPolicy::new(
            Decimal::new(-1, 2),
            Money::from_minor(599, Currency::USD),
            Money::from_minor(5000, Currency::USD),
        );
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_mixed_currency_lines_fail() {
        let product = Product::new("eu", "eu", Money::from_minor(100, Currency::EUR));
        let euro_line = LineItem::from_product(&product, 1).unwrap();
        let result = compute_totals(&[euro_line], &PricingPolicy::default());
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = PricingPolicy::default();
        let remaining = policy
            .remaining_for_free_shipping(&Money::from_minor(3500, Currency::USD))
            .unwrap();
        assert_eq!(remaining.display(), "$15.00");
        assert!(policy
            .remaining_for_free_shipping(&Money::from_minor(6000, Currency::USD))
            .is_none());
        assert_eq!(policy.tax_percent(), Decimal::from(8));
    }
}
