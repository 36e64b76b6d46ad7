//! MCP server surface: one tool per trading operation.
//!
//! Tools are thin descriptor builders over `ApiClient`; every tool returns
//! the uniform `{status, data?, message?}` envelope. API failures are
//! reported inside the envelope instead of as MCP protocol errors, so a
//! failed trading call never tears down the hosting process.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::models::{
    Exchange, GttModifyRequest, GttPlaceRequest, InstrumentRef, MarginRequest, ModifyOrderRequest,
    OrderComplexity, OrderType, PlaceOrderRequest, ProductType, ToolEnvelope, TransactionType,
    Validity,
};

// ============================================================================
// Tool parameter types
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct HoldingsArgs {
    /// Product type to filter holdings by; defaults to CNC.
    pub product: Option<ProductType>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdArgs {
    /// Broker-assigned order identifier.
    pub broker_order_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExitBracketArgs {
    /// Broker-assigned order identifier.
    pub broker_order_id: String,
    /// Complexity of the order being exited, usually BO or CO.
    pub order_complexity: OrderComplexity,
}

/// Flat order parameters shared by placement, square-off and margin checks.
///
/// The instrument is given either as `instrumentId` + `exchange` or as a
/// full inline `instrument` object, never both.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderArgs {
    pub instrument_id: Option<String>,
    pub exchange: Option<Exchange>,
    pub instrument: Option<Value>,
    pub transaction_type: TransactionType,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    pub price: Option<String>,
    pub sl_trigger_price: Option<String>,
    pub sl_leg_price: Option<String>,
    pub target_leg_price: Option<String>,
    pub trailing_sl_amount: Option<String>,
    pub disclosed_quantity: Option<String>,
    pub market_protection_percent: Option<String>,
    pub api_order_source: Option<String>,
    pub algo_id: Option<String>,
    pub order_tag: Option<String>,
}

impl PlaceOrderArgs {
    fn into_request(self) -> Result<PlaceOrderRequest, String> {
        let instrument =
            InstrumentRef::resolve(self.instrument_id, self.exchange, self.instrument)?;
        Ok(PlaceOrderRequest {
            instrument,
            transaction_type: self.transaction_type,
            quantity: self.quantity,
            order_complexity: self.order_complexity,
            product: self.product,
            order_type: self.order_type,
            validity: self.validity,
            price: self.price,
            sl_trigger_price: self.sl_trigger_price,
            sl_leg_price: self.sl_leg_price,
            target_leg_price: self.target_leg_price,
            trailing_sl_amount: self.trailing_sl_amount,
            disclosed_quantity: self.disclosed_quantity,
            market_protection_percent: self.market_protection_percent,
            api_order_source: self.api_order_source,
            algo_id: self.algo_id,
            order_tag: self.order_tag,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarginArgs {
    pub instrument_id: Option<String>,
    pub exchange: Option<Exchange>,
    pub instrument: Option<Value>,
    pub transaction_type: TransactionType,
    pub quantity: String,
    pub order_complexity: OrderComplexity,
    pub product: ProductType,
    pub order_type: OrderType,
    pub price: Option<String>,
    pub sl_trigger_price: Option<String>,
    pub sl_leg_price: Option<String>,
}

impl MarginArgs {
    fn into_request(self) -> Result<MarginRequest, String> {
        let instrument =
            InstrumentRef::resolve(self.instrument_id, self.exchange, self.instrument)?;
        Ok(MarginRequest {
            instrument,
            transaction_type: self.transaction_type,
            quantity: self.quantity,
            order_complexity: self.order_complexity,
            product: self.product,
            order_type: self.order_type,
            price: self.price,
            sl_trigger_price: self.sl_trigger_price,
            sl_leg_price: self.sl_leg_price,
        })
    }
}

// ============================================================================
// Server
// ============================================================================

/// AliceBlue MCP server: holds the API client and the tool router.
#[derive(Clone)]
pub struct AliceBlueServer {
    client: ApiClient,
    tool_router: ToolRouter<Self>,
}

impl AliceBlueServer {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = ApiClient::new(config.credentials(), config.base_url.clone())?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

fn envelope_reply(envelope: ToolEnvelope) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(&envelope)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Map an API outcome into the envelope. Errors become `status: "error"`,
/// never an MCP-level failure.
fn api_reply(result: Result<Value, ApiError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(data) => envelope_reply(ToolEnvelope::success(data)),
        Err(err) => {
            warn!(error = %err, "API call failed");
            envelope_reply(ToolEnvelope::error(err.to_string()))
        }
    }
}

fn invalid_args(reason: String) -> Result<CallToolResult, McpError> {
    envelope_reply(ToolEnvelope::error(reason))
}

#[tool_router]
impl AliceBlueServer {
    #[tool(description = "Authenticate against the AliceBlue API and verify the session")]
    async fn test_connection(&self) -> Result<CallToolResult, McpError> {
        match self.client.authenticate().await {
            Ok(details) => envelope_reply(ToolEnvelope::success_with_message(
                json!({
                    "userId": self.client.user_id(),
                    "clientId": details.client_id,
                    "connected": true,
                }),
                "Successfully connected to AliceBlue API",
            )),
            Err(err) => {
                warn!(error = %err, "connection test failed");
                envelope_reply(ToolEnvelope::error(format!("Connection failed: {err}")))
            }
        }
    }

    #[tool(description = "Get the user profile")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_profile().await)
    }

    #[tool(description = "Get stock holdings for a product type (default CNC)")]
    async fn get_holdings(
        &self,
        Parameters(args): Parameters<HoldingsArgs>,
    ) -> Result<CallToolResult, McpError> {
        let product = args.product.unwrap_or(ProductType::Cnc);
        api_reply(self.client.get_holdings(product).await)
    }

    #[tool(description = "Get current trading positions")]
    async fn get_positions(&self) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_positions().await)
    }

    #[tool(description = "Get the order book")]
    async fn get_order_book(&self) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_order_book().await)
    }

    #[tool(description = "Get the trade book")]
    async fn get_trade_book(&self) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_trade_book().await)
    }

    #[tool(description = "Get the history of one order by broker order id")]
    async fn get_order_history(
        &self,
        Parameters(args): Parameters<OrderIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_order_history(&args.broker_order_id).await)
    }

    #[tool(description = "Get account margins and fund limits")]
    async fn get_limits(&self) -> Result<CallToolResult, McpError> {
        api_reply(self.client.get_limits().await)
    }

    #[tool(description = "Place a new order")]
    async fn place_order(
        &self,
        Parameters(args): Parameters<PlaceOrderArgs>,
    ) -> Result<CallToolResult, McpError> {
        match args.into_request() {
            Ok(order) => api_reply(self.client.place_order(&order).await),
            Err(reason) => invalid_args(reason),
        }
    }

    #[tool(description = "Modify an existing order")]
    async fn modify_order(
        &self,
        Parameters(order): Parameters<ModifyOrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.modify_order(&order).await)
    }

    #[tool(description = "Cancel an order by broker order id")]
    async fn cancel_order(
        &self,
        Parameters(args): Parameters<OrderIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.cancel_order(&args.broker_order_id).await)
    }

    #[tool(description = "Exit an open bracket or cover order by broker order id")]
    async fn exit_bracket_order(
        &self,
        Parameters(args): Parameters<ExitBracketArgs>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(
            self.client
                .exit_bracket_order(&args.broker_order_id, args.order_complexity)
                .await,
        )
    }

    #[tool(description = "Square off an open position")]
    async fn square_off_position(
        &self,
        Parameters(args): Parameters<PlaceOrderArgs>,
    ) -> Result<CallToolResult, McpError> {
        match args.into_request() {
            Ok(order) => api_reply(self.client.square_off_position(&order).await),
            Err(reason) => invalid_args(reason),
        }
    }

    #[tool(description = "Check the margin required for a single order")]
    async fn check_order_margin(
        &self,
        Parameters(args): Parameters<MarginArgs>,
    ) -> Result<CallToolResult, McpError> {
        match args.into_request() {
            Ok(request) => api_reply(self.client.check_order_margin(&request).await),
            Err(reason) => invalid_args(reason),
        }
    }

    #[tool(description = "Place a Good-Till-Triggered (GTT) order")]
    async fn gtt_place_order(
        &self,
        Parameters(order): Parameters<GttPlaceRequest>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.gtt_place_order(&order).await)
    }

    #[tool(description = "Modify a GTT order")]
    async fn gtt_modify_order(
        &self,
        Parameters(order): Parameters<GttModifyRequest>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.gtt_modify_order(&order).await)
    }

    #[tool(description = "Cancel a GTT order by broker order id")]
    async fn gtt_cancel_order(
        &self,
        Parameters(args): Parameters<OrderIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        api_reply(self.client.gtt_cancel_order(&args.broker_order_id).await)
    }

    #[tool(description = "List supported exchanges")]
    async fn list_exchanges(&self) -> Result<CallToolResult, McpError> {
        let exchanges: serde_json::Map<String, Value> = Exchange::ALL
            .iter()
            .map(|e| (e.as_str().to_string(), json!(e.description())))
            .collect();
        envelope_reply(ToolEnvelope::success(Value::Object(exchanges)))
    }

    #[tool(description = "List supported order types")]
    async fn list_order_types(&self) -> Result<CallToolResult, McpError> {
        let order_types: serde_json::Map<String, Value> = OrderType::ALL
            .iter()
            .map(|o| (o.as_str().to_string(), json!(o.description())))
            .collect();
        envelope_reply(ToolEnvelope::success(Value::Object(order_types)))
    }

    #[tool(description = "List supported product types")]
    async fn list_product_types(&self) -> Result<CallToolResult, McpError> {
        let products: serde_json::Map<String, Value> = ProductType::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), json!(p.description())))
            .collect();
        envelope_reply(ToolEnvelope::success(Value::Object(products)))
    }
}

#[tool_handler]
impl ServerHandler for AliceBlueServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "AliceBlue trading tools. Authentication happens automatically from the \
                 configured credentials; call test_connection to verify the session. Every \
                 tool returns a JSON envelope with status, data and message fields."
                    .into(),
            ),
            ..Default::default()
        }
    }
}
