//! Standalone totals calculator.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _, Result};
use rust_decimal::Decimal;
use sava_commerce::prelude::*;
use serde::Serialize;

use super::TotalsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct TotalsReport {
    subtotal: String,
    tax: String,
    shipping: String,
    total: String,
    free_shipping: bool,
    exact: Totals,
}

/// Run the totals command.
pub fn run(args: TotalsArgs, ctx: &Context) -> Result<()> {
    let policy = policy(&args, &ctx.settings.pricing)?;
    let currency = policy.currency();
    let items = args
        .items
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_item(i, raw, currency))
        .collect::<Result<Vec<_>>>()?;

    let totals = compute_totals(&items, &policy)?;
    let shown = totals.rounded();

    if ctx.output.is_json() {
        ctx.output.json(&TotalsReport {
            subtotal: shown.subtotal.display(),
            tax: shown.tax.display(),
            shipping: shown.shipping.display(),
            total: shown.total.display(),
            free_shipping: totals.is_free_shipping(),
            exact: totals,
        });
        return Ok(());
    }

    ctx.output.header("Totals");
    ctx.output.kv("subtotal", &shown.subtotal.display());
    ctx.output.kv(&format!("tax ({}%)", policy.tax_percent()), &shown.tax.display());
    ctx.output.kv("shipping", &shown.shipping.display());
    ctx.output.kv("total", &shown.total.display());
    Ok(())
}

fn policy(args: &TotalsArgs, configured: &PricingPolicy) -> Result<PricingPolicy> {
    let currency = configured.currency();
    let amount = |value: &Option<String>, fallback: Money, name: &str| -> Result<Money> {
        match value {
            Some(v) => Ok(Money::new(
                Decimal::from_str(v.trim()).with_context(|| format!("Invalid --{name}: {v}"))?,
                currency,
            )),
            None => Ok(fallback),
        }
    };

    let tax_rate = match &args.tax_rate {
        Some(v) => Decimal::from_str(v.trim()).with_context(|| format!("Invalid --tax-rate: {v}"))?,
        None => configured.tax_rate,
    };
    Ok(PricingPolicy::new(
        tax_rate,
        amount(&args.shipping, configured.shipping_flat, "shipping")?,
        amount(&args.threshold, configured.free_shipping_threshold, "threshold")?,
    )?)
}

/// Parse `PRICExQUANTITY` (quantity defaults to 1).
fn parse_item(index: usize, raw: &str, currency: Currency) -> Result<LineItem> {
    let (price, quantity) = match raw.trim().split_once(['x', 'X', '*']) {
        Some((price, quantity)) => (price, quantity),
        None => (raw.trim(), "1"),
    };
    let price = Decimal::from_str(price.trim().trim_start_matches('$'))
        .map_err(|_| anyhow!("Invalid price in item '{raw}'"))?;
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid quantity in item '{raw}'"))?;
    if price.is_sign_negative() {
        bail!("Price must not be negative in item '{raw}'");
    }

    let id = format!("item_{}", index + 1);
    let product = Product::new(id.as_str(), id.as_str(), Money::new(price, currency));
    Ok(LineItem::from_product(&product, quantity)?)
}
