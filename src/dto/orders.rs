use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Order, OrderItem},
};

/// Shipping details submitted at checkout, either as a form or as JSON. Missing fields
/// deserialize as empty strings so they reach validation instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Trimmed, validated shipping details ready to be written on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub shipping_address: String,
    pub phone_number: String,
}

impl CheckoutRequest {
    pub fn into_shipping(self) -> AppResult<ShippingDetails> {
        let address = self.address.trim();
        let city = self.city.trim();
        let zip_code = self.zip_code.trim();
        let phone_number = self.phone_number.trim();

        if address.is_empty() {
            return Err(AppError::BadRequest("Shipping address is required.".into()));
        }
        if phone_number.is_empty() {
            return Err(AppError::BadRequest("Phone number is required.".into()));
        }

        Ok(ShippingDetails {
            shipping_address: format!("{address}, {city}, {zip_code}"),
            phone_number: phone_number.to_string(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_address_joins_trimmed_parts() {
        let request = CheckoutRequest {
            address: "  12 Harbour Road ".into(),
            city: "Leith".into(),
            zip_code: " EH6 6LX".into(),
            phone_number: " 07700 900123 ".into(),
        };

        let shipping = request.into_shipping().unwrap();
        assert_eq!(shipping.shipping_address, "12 Harbour Road, Leith, EH6 6LX");
        assert_eq!(shipping.phone_number, "07700 900123");
    }

    #[test]
    fn blank_address_or_phone_is_rejected() {
        let err = CheckoutRequest {
            address: "   ".into(),
            phone_number: "123".into(),
            ..Default::default()
        }
        .into_shipping()
        .unwrap_err();
        assert_eq!(err.to_string(), "Shipping address is required.");

        let err = CheckoutRequest {
            address: "1 Main St".into(),
            ..Default::default()
        }
        .into_shipping()
        .unwrap_err();
        assert_eq!(err.to_string(), "Phone number is required.");
    }
}
