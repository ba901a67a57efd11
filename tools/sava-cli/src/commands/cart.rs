//! Cart commands.

use anyhow::Result;
use sava_commerce::ProductId;

use super::{fail, with_session, CartArgs, CartCommand};
use crate::context::Context;
use crate::render;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| {
        let labels = session.lang.labels();
        match args.command {
            Some(CartCommand::Show) | None => {}
            Some(CartCommand::Add { id, quantity }) => {
                let count = shop
                    .add_to_cart(session, &ProductId::new(&id), quantity)
                    .map_err(|err| fail(shop, err))?;
                ctx.output
                    .success(&format!("{} ({} × {id}, {count} in cart)", labels.added_to_cart, quantity));
                return Ok(());
            }
            Some(CartCommand::Update { id, quantity }) => {
                let updated = shop
                    .update_cart_item(session, &ProductId::new(&id), quantity)
                    .map_err(|err| fail(shop, err))?;
                if !updated {
                    ctx.output.warn(&format!("'{id}' is not in the cart, nothing changed"));
                    return Ok(());
                }
            }
            Some(CartCommand::Remove { id }) => {
                let removed = shop
                    .remove_from_cart(session, &ProductId::new(&id))
                    .map_err(|err| fail(shop, err))?;
                if !removed {
                    ctx.output.warn(&format!("'{id}' is not in the cart"));
                }
            }
            Some(CartCommand::Clear) => {
                shop.clear_cart(session).map_err(|err| fail(shop, err))?;
                ctx.output.success("Cart cleared");
                return Ok(());
            }
        }

        let response = shop.cart(session);
        ctx.output.notices(&response.notices);
        if let Some(view) = response.view() {
            if ctx.output.is_json() {
                ctx.output.json(view);
            } else {
                render::cart(&ctx.output, view);
            }
        }
        Ok(())
    })
}
