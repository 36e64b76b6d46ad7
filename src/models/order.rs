//! Typed request payloads for order operations.
//!
//! One struct per trading operation, serializing to the vendor's camelCase
//! payload shape. Optional legs are skipped entirely rather than sent as
//! empty strings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{Exchange, OrderComplexity, OrderType, ProductType, TransactionType, Validity};

/// Instrument selector: either a token/exchange pair or an inline contract
/// object previously fetched from the vendor. Exactly one form per order.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InstrumentRef {
    ById {
        #[serde(rename = "instrumentId")]
        instrument_id: String,
        exchange: Exchange,
    },
    Inline {
        instrument: Value,
    },
}

impl InstrumentRef {
    /// Resolve the flat tool-boundary fields into a selector, enforcing the
    /// either-or rule.
    pub fn resolve(
        instrument_id: Option<String>,
        exchange: Option<Exchange>,
        instrument: Option<Value>,
    ) -> Result<Self, String> {
        match (instrument_id, exchange, instrument) {
            (Some(id), Some(exchange), None) => Ok(InstrumentRef::ById {
                instrument_id: id,
                exchange,
            }),
            (None, None, Some(instrument)) => Ok(InstrumentRef::Inline { instrument }),
            _ => Err("Either provide instrumentId+exchange or instrument".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(flatten)]
    pub instrument: InstrumentRef,
    pub transaction_type: TransactionType,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_leg_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_leg_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_sl_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_protection_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_order_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    pub broker_order_id: String,
    pub order_type: OrderType,
    pub validity: Validity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_leg_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_leg_price: Option<String>,
    #[serde(rename = "trailingSLAmount", skip_serializing_if = "Option::is_none")]
    pub trailing_sl_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_protection_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Margin pre-check for a single order; same instrument rules as placement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRequest {
    #[serde(flatten)]
    pub instrument: InstrumentRef,
    pub transaction_type: TransactionType,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_leg_price: Option<String>,
}

/// GTT orders always carry the full inline contract object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GttPlaceRequest {
    pub instrument: Value,
    pub transaction_type: TransactionType,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtt_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GttModifyRequest {
    pub broker_order_id: String,
    pub instrument: Value,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtt_value: Option<String>,
}
