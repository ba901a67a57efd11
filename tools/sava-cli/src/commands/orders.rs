//! Order history command.

use anyhow::{bail, Result};

use super::{with_session, OrdersArgs};
use crate::context::Context;
use crate::render;

/// Run the orders command.
pub fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| {
        let response = shop.orders(session, args.page);
        ctx.output.notices(&response.notices);

        let Some(view) = response.view() else {
            bail!("{}", session.lang.labels().signin_required);
        };
        if ctx.output.is_json() {
            ctx.output.json(view);
        } else {
            render::orders(&ctx.output, view);
        }
        Ok(())
    })
}
