//! Shipping address and payment method captured at checkout.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A shipping address as entered on the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    /// Recipient's full name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl Address {
    /// Create a new address without a phone number.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            phone: None,
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validate every required field, reporting the first one that fails.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let required = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CommerceError::field(field, format!("{field} is required")));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(CommerceError::field("email", "email address is not valid"));
        }

        if let Some(phone) = self.phone.as_deref().map(str::trim) {
            let valid = phone.is_empty()
                || phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
            if !valid {
                return Err(CommerceError::field("phone", "phone number is not valid"));
            }
        }

        Ok(())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.street, self.city, self.postal_code)
    }

    /// Format as multi-line.
    pub fn multi_line(&self) -> String {
        let mut lines = vec![
            self.full_name.clone(),
            self.street.clone(),
            format!("{} {}", self.city, self.postal_code),
        ];
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            lines.push(phone.to_string());
        }
        lines.join("\n")
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// PayPal.
    PayPal,
    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Card,
        PaymentMethod::PayPal,
        PaymentMethod::CashOnDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    /// Parse a method name, accepting a few common spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "card" | "credit_card" | "tarjeta" => Some(PaymentMethod::Card),
            "paypal" | "pay_pal" => Some(PaymentMethod::PayPal),
            "cash_on_delivery" | "cod" | "cash" | "contra_entrega" => {
                Some(PaymentMethod::CashOnDelivery)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> Address {
        Address::new(
            "Ana Torres",
            "ana@example.com",
            "Calle 10 # 5-20",
            "Bogota",
            "110111",
        )
    }

    #[test]
    fn test_valid_address() {
        assert!(valid_address().validate().is_ok());
        assert!(valid_address().with_phone("+57 300 123 4567").validate().is_ok());
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut addr = valid_address();
        addr.city = "   ".into();
        match addr.validate() {
            Err(CommerceError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("city"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_email() {
        let mut addr = valid_address();
        for bad in ["ana", "ana@", "@example.com", "ana@example", "a@b@c.com"] {
            addr.email = bad.into();
            assert!(addr.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_bad_phone() {
        let addr = valid_address().with_phone("call me");
        assert!(addr.validate().is_err());
    }

    #[test]
    fn test_address_formatting() {
        let addr = valid_address();
        assert_eq!(addr.one_line(), "Calle 10 # 5-20, Bogota, 110111");
        assert!(addr.multi_line().starts_with("Ana Torres\n"));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("PayPal"), Some(PaymentMethod::PayPal));
        assert_eq!(PaymentMethod::parse("cash on delivery"), Some(PaymentMethod::CashOnDelivery));
        assert_eq!(PaymentMethod::parse("credit-card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
    }
}
