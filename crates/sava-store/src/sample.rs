//! Built-in demo catalog.
//!
//! Seeds an empty store and backs the home page when the store is down.

use rust_decimal::Decimal;
use sava_commerce::prelude::*;

fn price(cents: i64, currency: Currency) -> Money {
    Money::new(Decimal::new(cents, 2), currency)
}

fn rated(mut product: Product, rating: f64, reviews_count: u32) -> Product {
    product.rating = rating;
    product.reviews_count = reviews_count;
    product
}

/// The demo catalog in USD, in display order.
pub fn sample_products() -> Vec<Product> {
    sample_products_in(Currency::USD)
}

/// The demo catalog with the same figures in `currency`.
pub fn sample_products_in(currency: Currency) -> Vec<Product> {
    let at = |cents| price(cents, currency);
    vec![
        rated(
            Product::new("prod_001", "Wireless Mouse", at(2999))
                .with_category("Electronics")
                .with_description("Ergonomic 2.4 GHz mouse with silent clicks and an 18-month battery.")
                .with_image("https://placehold.co/600x600/0D9488/FFFFFF?text=Mouse", "Wireless Mouse")
                .with_stock(120),
            4.6,
            312,
        ),
        rated(
            Product::new("prod_002", "Mechanical Keyboard", at(8999))
                .with_category("Electronics")
                .with_description("Hot-swappable switches, PBT keycaps and per-key RGB.")
                .with_image("https://placehold.co/600x600/0D9488/FFFFFF?text=Keyboard", "Mechanical Keyboard")
                .with_stock(45),
            4.8,
            198,
        ),
        rated(
            Product::new("prod_003", "Noise Cancelling Headphones", at(19999))
                .with_category("Electronics")
                .with_description("Over-ear headphones with 30 hours of playback.")
                .with_image("https://placehold.co/600x600/0D9488/FFFFFF?text=Headphones", "Headphones")
                .with_stock(8),
            4.4,
            87,
        ),
        rated(
            Product::new("prod_004", "Cotton T-Shirt", at(1500))
                .with_category("Fashion")
                .with_description("Organic cotton crew neck, regular fit.")
                .with_image("https://placehold.co/600x600/14B8A6/FFFFFF?text=T-Shirt", "Cotton T-Shirt")
                .with_stock(300),
            4.1,
            54,
        ),
        rated(
            Product::new("prod_005", "Running Shoes", at(7450))
                .with_category("Sports")
                .with_description("Lightweight trainers for daily runs.")
                .with_image("https://placehold.co/600x600/14B8A6/FFFFFF?text=Shoes", "Running Shoes")
                .with_stock(60),
            4.5,
            143,
        ),
        rated(
            Product::new("prod_006", "Yoga Mat", at(2500))
                .with_category("Sports")
                .with_description("6 mm non-slip mat with carrying strap.")
                .with_stock(0),
            3.9,
            21,
        ),
        rated(
            Product::new("prod_007", "Ceramic Coffee Mug", at(1250))
                .with_category("Home")
                .with_description("Hand-glazed 350 ml mug, dishwasher safe.")
                .with_image("https://placehold.co/600x600/F59E0B/FFFFFF?text=Mug", "Coffee Mug")
                .with_stock(75),
            4.7,
            64,
        ),
        rated(
            Product::new("prod_008", "The Rust Programming Language", at(3995))
                .with_category("Books")
                .with_description("The official book on the Rust programming language.")
                .with_image("https://placehold.co/600x600/F59E0B/FFFFFF?text=Book", "Book cover")
                .with_stock(30),
            4.9,
            402,
        ),
    ]
}
