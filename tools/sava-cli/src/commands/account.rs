//! Account and session commands.

use anyhow::{anyhow, bail, Result};
use sava_storefront::{Lang, SignedIn};

use super::{fail, with_session, AccountArgs, AccountCommand};
use crate::context::Context;
use crate::render;

/// Run the account command.
pub fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| match args.command {
        Some(AccountCommand::Show) | None => {
            let response = shop.account(session);
            ctx.output.notices(&response.notices);
            let Some(view) = response.view() else {
                bail!("{}", session.lang.labels().signin_required);
            };
            if ctx.output.is_json() {
                ctx.output.json(view);
            } else {
                render::account(&ctx.output, view);
            }
            Ok(())
        }
        Some(AccountCommand::SignIn { email, password }) => {
            let signed_in = shop
                .sign_in(session, &email, &password)
                .map_err(|err| fail(shop, err))?;
            report_sign_in(ctx, &signed_in);
            Ok(())
        }
        Some(AccountCommand::SignUp {
            email,
            password,
            name,
        }) => {
            let signed_in = shop
                .sign_up(session, &email, &password, &name)
                .map_err(|err| fail(shop, err))?;
            report_sign_in(ctx, &signed_in);
            Ok(())
        }
        Some(AccountCommand::SignOut) => {
            shop.sign_out(session);
            ctx.output.success("Signed out");
            Ok(())
        }
        Some(AccountCommand::Lang { lang }) => {
            session.lang = Lang::parse(&lang).ok_or_else(|| anyhow!("Unsupported language '{}' (ES or EN)", lang))?;
            ctx.output.success(&format!("Language set to {:?}", session.lang));
            Ok(())
        }
    })
}

fn report_sign_in(ctx: &Context, signed_in: &SignedIn) {
    if ctx.output.is_json() {
        ctx.output.json(&signed_in.user);
        return;
    }
    ctx.output.success(&format!("Welcome, {}", signed_in.user.first_name()));
    for product_id in &signed_in.skipped {
        ctx.output
            .warn(&format!("'{product_id}' from your guest cart could not be added (stock)"));
    }
    ctx.output.kv("next", signed_in.next.as_str());
}
