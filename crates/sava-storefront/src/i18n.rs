//! Interface labels in Spanish and English.

use sava_commerce::checkout::{OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lang {
    #[default]
    ES,
    EN,
}

impl Lang {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ES" | "ESPANOL" | "SPANISH" => Some(Lang::ES),
            "EN" | "ENGLISH" => Some(Lang::EN),
            _ => None,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Lang::ES => &ES,
            Lang::EN => &EN,
        }
    }
}

/// Label set for one language.
#[derive(Debug, Serialize)]
pub struct Labels {
    pub page_home_title: &'static str,
    pub page_featured_products: &'static str,
    pub page_products: &'static str,
    pub page_cart: &'static str,
    pub page_checkout: &'static str,
    pub page_account: &'static str,
    pub page_orders: &'static str,
    pub page_about: &'static str,
    pub nav_signin: &'static str,
    pub nav_signup: &'static str,
    pub filter_all_categories: &'static str,
    pub cart_empty: &'static str,
    pub cart_summary: &'static str,
    pub cart_subtotal: &'static str,
    pub cart_shipping: &'static str,
    pub cart_tax: &'static str,
    pub cart_total: &'static str,
    pub cart_free_shipping: &'static str,
    pub cart_checkout_button: &'static str,
    pub add_to_cart: &'static str,
    pub added_to_cart: &'static str,
    pub in_stock: &'static str,
    pub out_of_stock: &'static str,
    pub quantity: &'static str,
    pub reviews: &'static str,
    pub no_products: &'static str,
    pub no_orders: &'static str,
    pub order_placed: &'static str,
    pub signin_required: &'static str,
    pub about_body: &'static str,
}

pub static ES: Labels = Labels {
    page_home_title: "Descubre productos increíbles",
    page_featured_products: "Productos Destacados",
    page_products: "Catálogo de Productos",
    page_cart: "Mi Carrito",
    page_checkout: "Finalizar Compra",
    page_account: "Mi Cuenta",
    page_orders: "Mis Pedidos",
    page_about: "Acerca de SAVA",
    nav_signin: "Ingresar",
    nav_signup: "Crear cuenta",
    filter_all_categories: "Todas",
    cart_empty: "Tu carrito está vacío",
    cart_summary: "Resumen",
    cart_subtotal: "Subtotal",
    cart_shipping: "Envío",
    cart_tax: "IVA",
    cart_total: "Total",
    cart_free_shipping: "Gratis",
    cart_checkout_button: "Proceder al pago",
    add_to_cart: "Agregar al carrito",
    added_to_cart: "Agregado al carrito",
    in_stock: "Disponible",
    out_of_stock: "Agotado",
    quantity: "Cantidad",
    reviews: "opiniones",
    no_products: "No se encontraron productos",
    no_orders: "Aún no tienes pedidos",
    order_placed: "¡Pedido confirmado!",
    signin_required: "Inicia sesión para continuar",
    about_body: "SAVA Software for Engineering. La mejor selección de productos a precios inmejorables.",
};

pub static EN: Labels = Labels {
    page_home_title: "Discover amazing products",
    page_featured_products: "Featured Products",
    page_products: "Product Catalog",
    page_cart: "My Cart",
    page_checkout: "Checkout",
    page_account: "My Account",
    page_orders: "My Orders",
    page_about: "About SAVA",
    nav_signin: "Sign In",
    nav_signup: "Sign Up",
    filter_all_categories: "All",
    cart_empty: "Your cart is empty",
    cart_summary: "Summary",
    cart_subtotal: "Subtotal",
    cart_shipping: "Shipping",
    cart_tax: "Tax",
    cart_total: "Total",
    cart_free_shipping: "Free",
    cart_checkout_button: "Proceed to checkout",
    add_to_cart: "Add to cart",
    added_to_cart: "Added to cart",
    in_stock: "In stock",
    out_of_stock: "Out of stock",
    quantity: "Quantity",
    reviews: "reviews",
    no_products: "No products found",
    no_orders: "You have no orders yet",
    order_placed: "Order confirmed!",
    signin_required: "Sign in to continue",
    about_body: "SAVA Software for Engineering. The best selection of products at unbeatable prices.",
};

impl Labels {
    pub fn order_status(&self, status: OrderStatus) -> &'static str {
        let spanish = std::ptr::eq(self, &ES);
        match (status, spanish) {
            (OrderStatus::Pending, true) => "Pendiente",
            (OrderStatus::Pending, false) => "Pending",
            (OrderStatus::Processing, true) => "En preparación",
            (OrderStatus::Processing, false) => "Processing",
            (OrderStatus::Shipped, true) => "Enviado",
            (OrderStatus::Shipped, false) => "Shipped",
            (OrderStatus::Delivered, true) => "Entregado",
            (OrderStatus::Delivered, false) => "Delivered",
            (OrderStatus::Cancelled, true) => "Cancelado",
            (OrderStatus::Cancelled, false) => "Cancelled",
        }
    }

    pub fn payment_method(&self, method: PaymentMethod) -> &'static str {
        let spanish = std::ptr::eq(self, &ES);
        match (method, spanish) {
            (PaymentMethod::Card, true) => "Tarjeta de crédito/débito",
            (PaymentMethod::Card, false) => "Credit/debit card",
            (PaymentMethod::PayPal, _) => "PayPal",
            (PaymentMethod::CashOnDelivery, true) => "Pago contra entrega",
            (PaymentMethod::CashOnDelivery, false) => "Cash on delivery",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Lang::default(), Lang::ES);
        assert_eq!(Lang::default().labels().cart_tax, "IVA");
        assert_eq!(Lang::EN.labels().cart_tax, "Tax");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Lang::parse("en"), Some(Lang::EN));
        assert_eq!(Lang::parse(" es "), Some(Lang::ES));
        assert_eq!(Lang::parse("fr"), None);
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(Lang::ES.labels().order_status(OrderStatus::Shipped), "Enviado");
        assert_eq!(Lang::EN.labels().order_status(OrderStatus::Shipped), "Shipped");
        assert_eq!(
            Lang::EN.labels().payment_method(PaymentMethod::CashOnDelivery),
            "Cash on delivery"
        );
    }
}
