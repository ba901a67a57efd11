//! Text rendering of storefront views.

use console::style;
use sava_storefront::i18n::Labels;
use sava_storefront::views::*;

use crate::output::{stars, status_badge, Output};

/// Print any page view; JSON mode prints the view itself.
pub fn page(out: &Output, labels: &Labels, view: &PageView) {
    if out.is_json() {
        out.json(view);
        return;
    }
    match view {
        PageView::Home(view) => home(out, labels, view),
        PageView::Products(view) => product_list(out, view),
        PageView::ProductDetail(view) => product_detail(out, labels, view),
        PageView::Cart(view) => cart(out, view),
        PageView::Checkout(view) => checkout(out, view),
        PageView::Auth(view) => auth(out, view),
        PageView::Account(view) => account(out, view),
        PageView::Orders(view) => orders(out, view),
        PageView::About(view) => about(out, view),
    }
}

fn product_rows(out: &Output, products: &[ProductCard]) {
    let widths = [10, 30, 12, 12, 7];
    out.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in products {
        let name = if product.in_stock {
            product.name.clone()
        } else {
            style(&product.name).dim().to_string()
        };
        out.table_row(
            &[
                product.id.as_str(),
                &name,
                &product.category,
                &product.price,
                &format!("{:.1}", product.rating),
            ],
            &widths,
        );
    }
}

pub fn home(out: &Output, labels: &Labels, view: &HomeView) {
    out.header(&view.title);
    if !view.categories.is_empty() {
        out.kv("categories", &view.categories.join(", "));
    }
    out.header(labels.page_featured_products);
    product_rows(out, &view.featured);
}

pub fn product_list(out: &Output, view: &ProductListView) {
    out.header(&view.title);
    if let Some(category) = &view.selected_category {
        out.kv("category", category);
    }
    if !view.search_query.is_empty() {
        out.kv("search", &view.search_query);
    }
    if let Some(message) = &view.empty_message {
        out.info(message);
        return;
    }
    product_rows(out, &view.products);
    let pages = &view.pagination;
    out.kv(
        "showing",
        &format!(
            "{}-{} of {} (page {}/{})",
            pages.start_item(),
            pages.end_item(),
            pages.total,
            pages.page,
            pages.total_pages
        ),
    );
}

pub fn product_detail(out: &Output, labels: &Labels, view: &ProductDetailView) {
    let product = &view.product;
    out.header(&product.name);
    out.kv("id", product.id.as_str());
    out.kv("category", &product.category);
    out.kv("price", &product.price);
    out.kv(
        "rating",
        &format!(
            "{} {:.1} ({} {})",
            stars(product.rating_stars),
            product.rating,
            product.reviews_count,
            labels.reviews
        ),
    );
    out.kv("stock", &view.stock_label);
    if view.max_quantity > 0 {
        out.kv(labels.quantity, &format!("1-{}", view.max_quantity));
    }
    if let Some(description) = &view.description {
        out.kv("description", description);
    }
}

fn lines(out: &Output, lines: &[CartLineView]) {
    let widths = [10, 30, 10, 4, 12];
    out.table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for line in lines {
        out.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &line.unit_price,
                &line.quantity.to_string(),
                &line.line_total,
            ],
            &widths,
        );
    }
}

fn summary(out: &Output, summary: &CartSummary) {
    out.header(&summary.heading);
    out.kv(&summary.subtotal_label, &summary.subtotal);
    out.kv(&summary.tax_label, &summary.tax);
    out.kv(&summary.shipping_label, &summary.shipping);
    out.kv(&summary.total_label, &style(&summary.total).bold().to_string());
    if let Some(remaining) = &summary.remaining_for_free_shipping {
        out.info(&format!("Spend more than {remaining} more for free shipping"));
    }
}

pub fn cart(out: &Output, view: &CartView) {
    out.header(&format!("{} ({})", view.title, view.item_count));
    if let Some(message) = &view.empty_message {
        out.info(message);
        return;
    }
    lines(out, &view.lines);
    if let Some(totals) = &view.summary {
        summary(out, totals);
    }
}

pub fn checkout(out: &Output, view: &CheckoutView) {
    out.header(&view.title);
    out.kv("name", &view.full_name);
    out.kv("email", &view.email);
    lines(out, &view.lines);
    summary(out, &view.summary);
    out.header("Payment");
    for option in &view.payment_options {
        out.list_item(&format!("{} ({})", option.label, option.method.as_str()));
    }
}

pub fn order(out: &Output, view: &OrderSummaryView) {
    out.table_row(
        &[
            &format!("#{}", view.short_id),
            &view.placed_at,
            &status_badge(view.status, &view.status_label),
            &format!("{} items", view.item_count),
            &view.total,
        ],
        &[10, 17, 16, 9, 12],
    );
}

pub fn orders(out: &Output, view: &OrderListView) {
    out.header(&view.title);
    if let Some(message) = &view.empty_message {
        out.info(message);
        return;
    }
    for summary in &view.orders {
        order(out, summary);
    }
    if view.pagination.total_pages > 1 {
        out.kv(
            "page",
            &format!("{}/{}", view.pagination.page, view.pagination.total_pages),
        );
    }
}

pub fn account(out: &Output, view: &AccountView) {
    out.header(&view.title);
    out.kv("name", &view.display_name);
    out.kv("email", &view.email);
    out.kv("verified", &view.email_verified.to_string());
    out.kv("orders", &view.order_count.to_string());
}

pub fn auth(out: &Output, view: &AuthView) {
    out.header(&view.heading);
    out.info("Use `sava account sign-in` or `sava account sign-up`.");
    if let Some(page) = view.continue_to {
        out.kv("continue to", page.as_str());
    }
}

pub fn about(out: &Output, view: &AboutView) {
    out.header(&view.title);
    out.info(&view.body);
    out.kv("version", &format!("{} {}", view.app_name, view.version));
}
