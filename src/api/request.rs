//! Request descriptors and the fixed endpoint catalog.
//!
//! A descriptor is ephemeral per call: method, path, optional JSON body.
//! Per-operation client methods only build descriptors; all transport and
//! retry behavior lives in the executor.

use serde_json::Value;

/// Fixed endpoint paths of the AliceBlue open API, relative to the base URL.
pub mod endpoints {
    /// Session issuance: exchanges `{checkSum}` for a bearer token.
    pub const GET_USER_DETAILS: &str = "/open-api/od/v1/vendor/getUserDetails";

    pub const PROFILE: &str = "/open-api/od/v1/profile";
    pub const HOLDINGS: &str = "/open-api/od/v1/holdings";
    pub const POSITIONS: &str = "/open-api/od/v1/positions";
    pub const ORDER_BOOK: &str = "/open-api/od/v1/orders";
    pub const TRADE_BOOK: &str = "/open-api/od/v1/trades";
    pub const ORDER_HISTORY: &str = "/open-api/od/v1/orders/history";
    pub const PLACE_ORDER: &str = "/open-api/od/v1/orders/placeOrder";
    pub const MODIFY_ORDER: &str = "/open-api/od/v1/orders/modifyOrder";
    pub const CANCEL_ORDER: &str = "/open-api/od/v1/orders/cancelOrder";
    pub const EXIT_BRACKET_ORDER: &str = "/open-api/od/v1/orders/exitBracketOrder";
    pub const SQUARE_OFF: &str = "/open-api/od/v1/positions/squareOff";
    pub const ORDER_MARGIN: &str = "/open-api/od/v1/orders/checkMargin";
    pub const LIMITS: &str = "/open-api/od/v1/margins";
    pub const GTT_PLACE_ORDER: &str = "/open-api/od/v1/orders/gtt/placeOrder";
    pub const GTT_MODIFY_ORDER: &str = "/open-api/od/v1/orders/gtt/modifyOrder";
    pub const GTT_CANCEL_ORDER: &str = "/open-api/od/v1/orders/gtt/cancelOrder";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Ephemeral per-call request descriptor. Not persisted.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}
