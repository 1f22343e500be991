//! # Payment Types
//!
//! Line items and the shapes the provider hands back when a payment
//! intent or checkout session is created or looked up.

use serde::{Deserialize, Serialize};

/// A purchasable unit, passed to the provider verbatim.
///
/// Typically `{"price": "price_...", "quantity": 1}` or an inline
/// `price_data` object. No validation happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItem(pub serde_json::Map<String, serde_json::Value>);

impl LineItem {
    /// Build a line item referencing an existing provider price.
    pub fn price(price_id: impl Into<String>, quantity: u32) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("price".to_string(), price_id.into().into());
        map.insert("quantity".to_string(), quantity.into());
        Self(map)
    }

    /// The underlying JSON object
    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for LineItem {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

/// Result of creating a payment intent or a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPayment {
    /// Provider object id (`pi_...` or `cs_...`)
    pub id: String,
    /// Secret handed to the browser to finish the payment
    pub client_secret: String,
    /// Raw provider status (`requires_payment_method`, `open`, `succeeded`, ...)
    pub status: String,
}

/// Result of looking up a checkout session after the customer returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionSummary {
    /// `open`, `complete` or `expired`
    pub status: String,
    /// `paid`, `unpaid` or `no_payment_required`
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Result of looking up a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentSummary {
    pub id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_passthrough() {
        let raw = serde_json::json!({
            "price_data": {
                "currency": "usd",
                "product_data": {"name": "Demo Product"},
                "unit_amount": 2000
            },
            "quantity": 1
        });
        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_price_line_item() {
        let item = LineItem::price("price_123", 2);
        assert_eq!(item.as_map()["price"], "price_123");
        assert_eq!(item.as_map()["quantity"], 2);
    }
}
