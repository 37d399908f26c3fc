//! Plain structured requests the transport layer hands to the warehouse.
//!
//! Field names (in their serialized camelCase form) match the payloads the
//! legacy purchase and consumption forms post, so an HTTP layer can
//! deserialize request bodies straight into these types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spoolstock_core::ProductId;

/// Request payload for recording a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPurchase {
    /// The product being purchased.
    pub product_id: ProductId,
    /// Vendor (shop) name, optional.
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Unit price in the purchase currency.
    pub price: Decimal,
    /// Currency code (PLN, EUR, USD, CZK); parsed, unknown codes rejected.
    pub currency: String,
    /// Exchange rate to the base currency; ignored for the base currency.
    pub exchange_rate: Decimal,
    /// Quantity purchased, in the product's unit.
    pub initial_quantity: Decimal,
    /// Purchase timestamp; the ledger uses "now" when omitted.
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
}

/// Request payload for consuming material from stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeRequest {
    /// The product to consume.
    pub product_id: ProductId,
    /// Quantity needed, in the product's unit.
    pub quantity: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_purchase_deserializes_form_payload() {
        // The shape the purchase form posts
        let json = r#"{
            "productId": 2,
            "vendorName": "Botland",
            "price": "89.99",
            "currency": "PLN",
            "exchangeRate": "1",
            "initialQuantity": "1000"
        }"#;
        let request: RecordPurchase = serde_json::from_str(json).unwrap();
        assert_eq!(request.product_id, ProductId::new(2));
        assert_eq!(request.vendor_name.as_deref(), Some("Botland"));
        assert_eq!(request.price, dec!(89.99));
        assert_eq!(request.purchased_at, None);
    }

    #[test]
    fn test_consume_request_roundtrip() {
        let request = ConsumeRequest {
            product_id: ProductId::new(5),
            quantity: dec!(12.5),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: ConsumeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
