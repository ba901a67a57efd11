//! Checkout command.

use anyhow::{bail, Result};
use sava_commerce::checkout::{Address, OrderDraft};
use sava_storefront::Page;

use super::{fail, with_session, CheckoutArgs};
use crate::context::Context;
use crate::render;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| {
        let labels = session.lang.labels();
        session.navigate_to(Page::Checkout);

        let response = shop.checkout(session);
        ctx.output.notices(&response.notices);
        let review = match response.redirected_to() {
            Some(Page::Auth) => bail!("{}: run `sava account sign-in` first", labels.signin_required),
            Some(_) => bail!("{}", labels.cart_empty),
            None => match response.view() {
                Some(view) => view.clone(),
                None => bail!("Checkout is unavailable"),
            },
        };

        if args.dry_run {
            if ctx.output.is_json() {
                ctx.output.json(&review);
            } else {
                render::checkout(&ctx.output, &review);
            }
            return Ok(());
        }

        let mut address = Address::new(
            args.name.unwrap_or(review.full_name),
            args.email.unwrap_or(review.email),
            args.street,
            args.city,
            args.postal_code,
        );
        if let Some(phone) = args.phone {
            address = address.with_phone(phone);
        }

        let order = shop
            .place_order(session, OrderDraft::new(address, args.payment))
            .map_err(|err| fail(shop, err))?;

        if ctx.output.is_json() {
            ctx.output.json(&order);
            return Ok(());
        }
        ctx.output.success(labels.order_placed);
        ctx.output.kv("order", &format!("#{}", order.short_id()));
        ctx.output.kv("total", &order.totals.total.rounded().display());
        ctx.output.kv("payment", labels.payment_method(order.payment_method));
        ctx.output.kv("ship to", &order.shipping_address.one_line());
        Ok(())
    })
}
