//! Catalog browsing commands.

use anyhow::{bail, Result};
use sava_commerce::ProductId;
use sava_store::CatalogStore;
use sava_storefront::Outcome;

use super::{with_session, CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::render;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List {
            category,
            search,
            page,
        }) => list(category, search, page, ctx),
        None => list(None, None, 1, ctx),
        Some(CatalogCommand::Show { id }) => show(&id, ctx),
        Some(CatalogCommand::Categories) => categories(ctx),
    }
}

fn list(category: Option<String>, search: Option<String>, page: usize, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| {
        session.selected_category = category.filter(|c| !c.trim().is_empty());
        session.search(search.unwrap_or_default());

        let response = shop.products(session, page);
        ctx.output.notices(&response.notices);
        if let Some(view) = response.view() {
            if ctx.output.is_json() {
                ctx.output.json(view);
            } else {
                render::product_list(&ctx.output, view);
            }
        }
        Ok(())
    })
}

fn show(id: &str, ctx: &Context) -> Result<()> {
    with_session(ctx, |shop, session| {
        session.view_product(ProductId::new(id));

        let response = shop.product_detail(session);
        ctx.output.notices(&response.notices);
        match &response.outcome {
            Outcome::Render(view) if ctx.output.is_json() => ctx.output.json(view),
            Outcome::Render(view) => render::product_detail(&ctx.output, session.lang.labels(), view),
            Outcome::Redirect(_) => bail!("Product '{}' is not available", id),
        }
        Ok(())
    })
}

fn categories(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let categories = shop
        .store()
        .get_categories()
        .map_err(|err| super::fail(&shop, err.into()))?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }
    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.list_item(category);
    }
    Ok(())
}
