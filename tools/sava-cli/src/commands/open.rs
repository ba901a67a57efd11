//! Navigate to a page and render it.

use anyhow::{anyhow, Result};
use sava_storefront::{Outcome, Page};

use super::{with_session, OpenArgs};
use crate::context::Context;
use crate::render;

/// Follow at most this many redirects.
const MAX_REDIRECTS: usize = 3;

/// Run the open command.
pub fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let page = Page::parse(&args.page).ok_or_else(|| anyhow!("Unknown page '{}'", args.page))?;

    with_session(ctx, |shop, session| {
        session.navigate_to(page);
        for _ in 0..MAX_REDIRECTS {
            let response = shop.route(session);
            ctx.output.notices(&response.notices);
            match response.outcome {
                Outcome::Render(view) => {
                    render::page(&ctx.output, session.lang.labels(), &view);
                    return Ok(());
                }
                Outcome::Redirect(next) => {
                    tracing::debug!(from = %session.page, to = %next, "redirect");
                    session.navigate_to(next);
                }
            }
        }
        Err(anyhow!("Too many redirects opening '{}'", page))
    })
}
