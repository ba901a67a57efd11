//! View models produced by the page handlers.
//!
//! Amounts are pre-formatted for display; the underlying numbers stay in
//! the domain types.

use crate::error::Notice;
use crate::i18n::Labels;
use crate::page::Page;
use crate::session::{AuthTab, CheckoutStep};
use sava_commerce::catalog::Product;
use sava_commerce::prelude::*;
use serde::Serialize;

/// Either a view to render or a page to go to instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<V> {
    Render(V),
    Redirect(Page),
}

/// A handler result with the notices raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<V> {
    pub outcome: Outcome<V>,
    pub notices: Vec<Notice>,
}

impl<V> Response<V> {
    pub fn render(view: V) -> Self {
        Self {
            outcome: Outcome::Render(view),
            notices: Vec::new(),
        }
    }

    pub fn redirect(page: Page) -> Self {
        Self {
            outcome: Outcome::Redirect(page),
            notices: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        self.notices.extend(notice);
        self
    }

    pub fn view(&self) -> Option<&V> {
        match &self.outcome {
            Outcome::Render(view) => Some(view),
            Outcome::Redirect(_) => None,
        }
    }

    pub fn redirected_to(&self) -> Option<Page> {
        match self.outcome {
            Outcome::Redirect(page) => Some(page),
            Outcome::Render(_) => None,
        }
    }

    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Response<W> {
        Response {
            outcome: match self.outcome {
                Outcome::Render(view) => Outcome::Render(f(view)),
                Outcome::Redirect(page) => Outcome::Redirect(page),
            },
            notices: self.notices,
        }
    }
}

/// A product tile in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub rating: f64,
    pub rating_stars: u8,
    pub reviews_count: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.rounded().display(),
            image_url: product.primary_image_url().to_string(),
            rating: product.rating,
            rating_stars: product.rating_stars(),
            reviews_count: product.reviews_count,
            in_stock: product.is_in_stock(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub title: String,
    pub featured: Vec<ProductCard>,
    pub categories: Vec<String>,
    /// Featured products come from the built-in sample catalog.
    pub is_sample: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListView {
    pub title: String,
    pub products: Vec<ProductCard>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub search_query: String,
    pub pagination: Pagination,
    /// Set when nothing matched.
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailView {
    pub product: ProductCard,
    pub description: Option<String>,
    pub stock: i64,
    pub stock_label: String,
    /// Largest quantity the shopper may pick, `min(stock, 10)`.
    pub max_quantity: i64,
    pub images: Vec<String>,
}

impl ProductDetailView {
    /// Quantities offered in the picker.
    pub fn quantity_options(&self) -> Vec<i64> {
        (1..=self.max_quantity).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: String,
    pub unit_price: String,
    pub quantity: i64,
    pub line_total: String,
}

impl CartLineView {
    pub fn from_line(line: &LineItem) -> Result<Self, CommerceError> {
        Ok(Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            image_url: line.image_ref.clone(),
            unit_price: line.unit_price.rounded().display(),
            quantity: line.quantity,
            line_total: line.line_total()?.rounded().display(),
        })
    }

    pub fn from_lines(lines: &[LineItem]) -> Result<Vec<Self>, CommerceError> {
        lines.iter().map(Self::from_line).collect()
    }
}

/// Cart totals with localised labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub heading: String,
    pub subtotal_label: String,
    pub subtotal: String,
    pub tax_label: String,
    pub tax: String,
    pub shipping_label: String,
    pub shipping: String,
    pub total_label: String,
    pub total: String,
    pub free_shipping: bool,
    /// Amount the subtotal must exceed by to ship free.
    pub remaining_for_free_shipping: Option<String>,
}

impl CartSummary {
    pub fn new(totals: &Totals, policy: &PricingPolicy, labels: &Labels) -> Self {
        let shown = totals.rounded();
        let shipping = if shown.is_free_shipping() {
            labels.cart_free_shipping.to_string()
        } else {
            shown.shipping.display()
        };
        Self {
            heading: labels.cart_summary.to_string(),
            subtotal_label: labels.cart_subtotal.to_string(),
            subtotal: shown.subtotal.display(),
            tax_label: format!("{} ({}%)", labels.cart_tax, policy.tax_percent()),
            tax: shown.tax.display(),
            shipping_label: labels.cart_shipping.to_string(),
            shipping,
            total_label: labels.cart_total.to_string(),
            total: shown.total.display(),
            free_shipping: shown.is_free_shipping(),
            remaining_for_free_shipping: policy
                .remaining_for_free_shipping(&totals.subtotal)
                .map(|m| m.rounded().display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub title: String,
    pub lines: Vec<CartLineView>,
    pub item_count: i64,
    /// `None` when the cart is empty.
    pub summary: Option<CartSummary>,
    pub empty_message: Option<String>,
    pub is_guest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutView {
    pub title: String,
    pub step: CheckoutStep,
    pub lines: Vec<CartLineView>,
    pub summary: CartSummary,
    pub payment_options: Vec<PaymentOption>,
    /// Pre-filled from the signed-in account.
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummaryView {
    pub id: OrderId,
    pub short_id: String,
    pub placed_at: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub item_count: i64,
    pub total: String,
    pub lines: Vec<CartLineView>,
    pub ship_to: String,
    pub payment: String,
}

impl OrderSummaryView {
    pub fn new(order: &Order, labels: &Labels) -> Result<Self, CommerceError> {
        Ok(Self {
            id: order.id.clone(),
            short_id: order.short_id(),
            placed_at: order.created_at.format("%d/%m/%Y %H:%M").to_string(),
            status: order.status,
            status_label: labels.order_status(order.status).to_string(),
            item_count: order.item_count(),
            total: order.totals.total.rounded().display(),
            lines: CartLineView::from_lines(&order.items)?,
            ship_to: order.shipping_address.one_line(),
            payment: labels.payment_method(order.payment_method).to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderListView {
    pub title: String,
    pub orders: Vec<OrderSummaryView>,
    pub pagination: Pagination,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub title: String,
    pub display_name: String,
    pub first_name: String,
    pub email: String,
    pub email_verified: bool,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthView {
    pub tab: AuthTab,
    pub heading: String,
    /// Page shown once signed in.
    pub continue_to: Option<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutView {
    pub title: String,
    pub body: String,
    pub app_name: String,
    pub version: String,
}

/// Any page's view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", content = "view", rename_all = "snake_case")]
pub enum PageView {
    Home(HomeView),
    Products(ProductListView),
    ProductDetail(ProductDetailView),
    Cart(CartView),
    Checkout(CheckoutView),
    Auth(AuthView),
    Account(AccountView),
    Orders(OrderListView),
    About(AboutView),
}

impl PageView {
    pub fn page(&self) -> Page {
        match self {
            PageView::Home(_) => Page::Home,
            PageView::Products(_) => Page::Products,
            PageView::ProductDetail(_) => Page::ProductDetail,
            PageView::Cart(_) => Page::Cart,
            PageView::Checkout(_) => Page::Checkout,
            PageView::Auth(_) => Page::Auth,
            PageView::Account(_) => Page::Account,
            PageView::Orders(_) => Page::Orders,
            PageView::About(_) => Page::About,
        }
    }
}
