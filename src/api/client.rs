//! API client for the AliceBlue open API.
//!
//! Owns the session lifecycle (checksum handshake, token cache) and the
//! resilient request executor that every trading operation goes through.
//! Per-operation methods only build request descriptors; retry and
//! re-authentication behavior is centralized in `execute`.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::{Credentials, Session};
use crate::models::{
    GttModifyRequest, GttPlaceRequest, MarginRequest, ModifyOrderRequest, OrderComplexity,
    PlaceOrderRequest, ProductType, SessionReply,
};

use super::error::{truncate_body, ApiError};
use super::request::{endpoints, ApiRequest, HttpMethod};
use super::transport::{HttpTransport, Transport, TransportCall, TransportError};

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for the AliceBlue open API.
pub const DEFAULT_BASE_URL: &str = "https://ant.aliceblueonline.com";

/// Total attempts per operation, including the first one.
///
/// Deliberately small: only idempotent re-authentication is retried, never
/// the trading operation itself. A blind retry of "place order" could
/// double-execute a trade.
const MAX_ATTEMPTS: u32 = 2;

/// Fixed backoff before retrying a failed connection.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

impl From<TransportError> for ApiError {
    fn from(fault: TransportError) -> Self {
        match fault {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Connect(reason) => ApiError::Network(reason),
        }
    }
}

/// Session details reported by the issuance endpoint alongside the token.
#[derive(Debug, Clone)]
pub struct AuthDetails {
    pub token: String,
    pub client_id: Option<String>,
}

/// Client for the AliceBlue API: one per credential set.
///
/// Clone is cheap; the session and transport are shared behind `Arc`, so
/// clones observe the same token cache.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    session: Arc<Mutex<Session>>,
    base_url: String,
}

impl ApiClient {
    pub fn new(credentials: Credentials, base_url: String) -> Result<Self, ApiError> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(credentials, base_url, Arc::new(transport)))
    }

    /// Build a client over an arbitrary transport. Used by tests to
    /// substitute an in-memory mock.
    pub fn with_transport(
        credentials: Credentials,
        base_url: String,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            credentials,
            session: Arc::new(Mutex::new(Session::new())),
            base_url,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.credentials.user_id
    }

    /// Current cached token, if any. Pure read; no network I/O.
    pub async fn current_token(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_string)
    }

    /// Drop the cached token; the next call re-authenticates.
    pub async fn invalidate_session(&self) {
        self.session.lock().await.invalidate();
    }

    /// Exchange the credential checksum for a fresh session token.
    pub async fn authenticate(&self) -> Result<AuthDetails, ApiError> {
        let mut session = self.session.lock().await;
        self.authenticate_locked(&mut session).await
    }

    /// Authentication round-trip under an already-held session lock.
    ///
    /// Holding the lock for the full round-trip is what makes refresh
    /// single-flight: racing callers queue here and find the fresh token.
    async fn authenticate_locked(&self, session: &mut Session) -> Result<AuthDetails, ApiError> {
        let body = json!({ "checkSum": self.credentials.checksum() });
        let call = TransportCall {
            method: HttpMethod::Post,
            url: format!("{}{}", self.base_url, endpoints::GET_USER_DETAILS),
            bearer: None,
            body: Some(&body),
        };

        debug!(user_id = %self.credentials.user_id, "requesting session token");
        let response = self.transport.send(call).await?;

        if response.status != 200 {
            return Err(ApiError::AuthFailed {
                status: response.status,
                body: truncate_body(&response.body),
            });
        }

        let reply: SessionReply = serde_json::from_str(&response.body).map_err(|_| {
            ApiError::Protocol {
                body: response.body.clone(),
            }
        })?;

        if !reply.is_ok() {
            let reason = reply
                .message
                .unwrap_or_else(|| format!("stat was {:?}", reply.stat));
            return Err(ApiError::AuthRejected { reason });
        }

        let token = reply.user_session.ok_or_else(|| ApiError::Protocol {
            body: response.body.clone(),
        })?;

        // Wholesale replacement; never a partial update.
        session.establish(token.clone());
        info!(user_id = %self.credentials.user_id, "session established");
        Ok(AuthDetails {
            token,
            client_id: reply.client_id,
        })
    }

    /// Execute one request with bounded recovery.
    ///
    /// Exactly two failure modes are resolved locally, both within a budget
    /// of two total attempts: a 401 triggers one re-authentication, and a
    /// connection fault triggers one backed-off retry. Everything else is
    /// surfaced to the caller unchanged.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let token = {
                let mut session = self.session.lock().await;
                match session.token() {
                    Some(token) => token.to_string(),
                    None => self.authenticate_locked(&mut session).await?.token,
                }
            };

            let call = TransportCall {
                method: request.method,
                url: url.clone(),
                bearer: Some(&token),
                body: request.body.as_ref(),
            };

            let response = match self.transport.send(call).await {
                Ok(response) => response,
                Err(fault) if fault.is_retryable() && attempts < MAX_ATTEMPTS => {
                    warn!(url = %url, attempt = attempts, "connection failed, backing off");
                    tokio::time::sleep(RETRY_BACKOFF).await;
                    continue;
                }
                Err(fault) => return Err(fault.into()),
            };

            if response.status == 401 {
                if attempts >= MAX_ATTEMPTS {
                    return Err(ApiError::AuthFailed {
                        status: response.status,
                        body: truncate_body(&response.body),
                    });
                }
                warn!(url = %url, "session rejected, re-authenticating");
                let mut session = self.session.lock().await;
                match session.token() {
                    // Another caller already refreshed while we were in
                    // flight; reuse its token instead of burning another
                    // authentication round-trip.
                    Some(current) if current != token => {}
                    _ => {
                        session.invalidate();
                        self.authenticate_locked(&mut session).await?;
                    }
                }
                continue;
            }

            if !(200..300).contains(&response.status) {
                return Err(ApiError::Request {
                    status: response.status,
                    body: truncate_body(&response.body),
                });
            }

            // A 2xx with an unparsable body is a protocol violation; never
            // silently return an empty value.
            return serde_json::from_str(&response.body).map_err(|_| ApiError::Protocol {
                body: response.body,
            });
        }
    }

    fn payload<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
        serde_json::to_value(value).map_err(|e| ApiError::Protocol {
            body: e.to_string(),
        })
    }

    // ===== Account data =====

    pub async fn get_profile(&self) -> Result<Value, ApiError> {
        self.execute(&ApiRequest::get(endpoints::PROFILE)).await
    }

    pub async fn get_holdings(&self, product: ProductType) -> Result<Value, ApiError> {
        let path = format!("{}/{}", endpoints::HOLDINGS, product.as_str());
        self.execute(&ApiRequest::get(path)).await
    }

    pub async fn get_positions(&self) -> Result<Value, ApiError> {
        self.execute(&ApiRequest::get(endpoints::POSITIONS)).await
    }

    pub async fn get_order_book(&self) -> Result<Value, ApiError> {
        self.execute(&ApiRequest::get(endpoints::ORDER_BOOK)).await
    }

    pub async fn get_trade_book(&self) -> Result<Value, ApiError> {
        self.execute(&ApiRequest::get(endpoints::TRADE_BOOK)).await
    }

    pub async fn get_order_history(&self, broker_order_id: &str) -> Result<Value, ApiError> {
        let body = json!({ "brokerOrderId": broker_order_id });
        self.execute(&ApiRequest::post(endpoints::ORDER_HISTORY, body))
            .await
    }

    /// Account margins / funds limits.
    pub async fn get_limits(&self) -> Result<Value, ApiError> {
        self.execute(&ApiRequest::get(endpoints::LIMITS)).await
    }

    // ===== Order management =====

    pub async fn place_order(&self, order: &PlaceOrderRequest) -> Result<Value, ApiError> {
        let body = Self::payload(order)?;
        self.execute(&ApiRequest::post(endpoints::PLACE_ORDER, body))
            .await
    }

    pub async fn modify_order(&self, order: &ModifyOrderRequest) -> Result<Value, ApiError> {
        let body = Self::payload(order)?;
        self.execute(&ApiRequest::post(endpoints::MODIFY_ORDER, body))
            .await
    }

    pub async fn cancel_order(&self, broker_order_id: &str) -> Result<Value, ApiError> {
        let body = json!({ "brokerOrderId": broker_order_id });
        self.execute(&ApiRequest::post(endpoints::CANCEL_ORDER, body))
            .await
    }

    pub async fn exit_bracket_order(
        &self,
        broker_order_id: &str,
        order_complexity: OrderComplexity,
    ) -> Result<Value, ApiError> {
        let body = json!({
            "brokerOrderId": broker_order_id,
            "orderComplexity": order_complexity,
        });
        self.execute(&ApiRequest::post(endpoints::EXIT_BRACKET_ORDER, body))
            .await
    }

    pub async fn square_off_position(&self, order: &PlaceOrderRequest) -> Result<Value, ApiError> {
        let body = Self::payload(order)?;
        self.execute(&ApiRequest::post(endpoints::SQUARE_OFF, body))
            .await
    }

    pub async fn check_order_margin(&self, request: &MarginRequest) -> Result<Value, ApiError> {
        let body = Self::payload(request)?;
        self.execute(&ApiRequest::post(endpoints::ORDER_MARGIN, body))
            .await
    }

    // ===== GTT orders =====

    pub async fn gtt_place_order(&self, order: &GttPlaceRequest) -> Result<Value, ApiError> {
        let body = Self::payload(order)?;
        self.execute(&ApiRequest::post(endpoints::GTT_PLACE_ORDER, body))
            .await
    }

    pub async fn gtt_modify_order(&self, order: &GttModifyRequest) -> Result<Value, ApiError> {
        let body = Self::payload(order)?;
        self.execute(&ApiRequest::post(endpoints::GTT_MODIFY_ORDER, body))
            .await
    }

    pub async fn gtt_cancel_order(&self, broker_order_id: &str) -> Result<Value, ApiError> {
        let body = json!({ "brokerOrderId": broker_order_id });
        self.execute(&ApiRequest::post(endpoints::GTT_CANCEL_ORDER, body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use super::super::transport::RawResponse;
    use super::*;
    use async_trait::async_trait;

    const BASE: &str = "https://test.invalid";

    #[derive(Debug)]
    struct RecordedCall {
        method: HttpMethod,
        url: String,
        bearer: Option<String>,
        body: Option<Value>,
    }

    /// Scripted transport: pops one canned result per call and records what
    /// the executor sent.
    struct MockTransport {
        responses: StdMutex<VecDeque<Result<RawResponse, TransportError>>>,
        calls: StdMutex<Vec<RecordedCall>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Result<RawResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
                calls: StdMutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<RecordedCall> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, call: TransportCall<'_>) -> Result<RawResponse, TransportError> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: call.method,
                url: call.url.clone(),
                bearer: call.bearer.map(str::to_string),
                body: call.body.cloned(),
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more times than scripted")
        }
    }

    fn ok(body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    fn status(code: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status: code,
            body: body.to_string(),
        })
    }

    fn auth_ok(token: &str) -> Result<RawResponse, TransportError> {
        ok(&format!(r#"{{"stat":"Ok","userSession":"{token}"}}"#))
    }

    fn client_with(
        responses: Vec<Result<RawResponse, TransportError>>,
    ) -> (ApiClient, Arc<MockTransport>) {
        let transport = MockTransport::new(responses);
        let credentials = Credentials::new("U1".into(), "CODE1".into(), "SECRET1".into());
        let client = ApiClient::with_transport(credentials, BASE.into(), transport.clone());
        (client, transport)
    }

    async fn seed_token(client: &ApiClient, token: &str) {
        client.session.lock().await.establish(token.to_string());
    }

    #[tokio::test]
    async fn authenticate_posts_checksum_and_stores_token() {
        let (client, transport) = client_with(vec![auth_ok("tok-abc")]);

        let details = client.authenticate().await.unwrap();
        assert_eq!(details.token, "tok-abc");
        assert_eq!(client.current_token().await.as_deref(), Some("tok-abc"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert!(calls[0].url.ends_with("/open-api/od/v1/vendor/getUserDetails"));
        assert!(calls[0].bearer.is_none());
        // sha256("U1CODE1SECRET1")
        assert_eq!(
            calls[0].body.as_ref().unwrap()["checkSum"],
            "48ba778e816c0614042335b8a758c16b5132936a03cab8848a3af62ea191387d"
        );
    }

    #[tokio::test]
    async fn authenticate_reports_client_id() {
        let (client, _transport) = client_with(vec![ok(
            r#"{"stat":"Ok","userSession":"tok-abc","clientId":"AB1234"}"#,
        )]);

        let details = client.authenticate().await.unwrap();
        assert_eq!(details.token, "tok-abc");
        assert_eq!(details.client_id.as_deref(), Some("AB1234"));
    }

    #[tokio::test]
    async fn execute_authenticates_then_attaches_bearer() {
        let (client, transport) = client_with(vec![
            auth_ok("tok-abc"),
            ok(r#"{"stat":"Ok","name":"Jane Trader"}"#),
        ]);

        let profile = client.get_profile().await.unwrap();
        assert_eq!(profile["name"], "Jane Trader");

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].bearer.as_deref(), Some("tok-abc"));
        assert!(calls[1].url.ends_with("/open-api/od/v1/profile"));
        assert_eq!(calls[1].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn expired_session_is_refreshed_exactly_once() {
        let (client, transport) = client_with(vec![
            status(401, r#"{"stat":"Not_Ok","message":"Session expired"}"#),
            auth_ok("tok-new"),
            ok(r#"{"stat":"Ok","positions":[]}"#),
        ]);
        seed_token(&client, "tok-old").await;

        let positions = client.get_positions().await.unwrap();
        assert_eq!(positions["stat"], "Ok");

        // Two operation calls plus one re-authentication, no more.
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].bearer.as_deref(), Some("tok-old"));
        assert!(calls[1].url.ends_with("/vendor/getUserDetails"));
        assert_eq!(calls[2].bearer.as_deref(), Some("tok-new"));
        assert_eq!(client.current_token().await.as_deref(), Some("tok-new"));
    }

    #[tokio::test]
    async fn persistent_401_exhausts_budget() {
        let (client, transport) = client_with(vec![
            status(401, "unauthorized"),
            auth_ok("tok-new"),
            status(401, "unauthorized"),
        ]);
        seed_token(&client, "tok-old").await;

        let err = client.get_order_book().await.unwrap_err();
        match err {
            ApiError::AuthFailed { status, .. } => assert_eq!(status, 401),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
        // Exactly two operation attempts; the budget is not overrun.
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn business_errors_are_returned_without_retry() {
        let (client, transport) = client_with(vec![ok(
            r#"{"stat":"Not_Ok","message":"insufficient margin"}"#,
        )]);
        seed_token(&client, "tok-abc").await;

        let order = PlaceOrderRequest {
            instrument: crate::models::InstrumentRef::ById {
                instrument_id: "2885".into(),
                exchange: crate::models::Exchange::NSE,
            },
            transaction_type: crate::models::TransactionType::Buy,
            quantity: "1".into(),
            order_complexity: crate::models::OrderComplexity::Regular,
            product: ProductType::Cnc,
            order_type: crate::models::OrderType::Market,
            validity: crate::models::Validity::Day,
            price: None,
            sl_trigger_price: None,
            sl_leg_price: None,
            target_leg_price: None,
            trailing_sl_amount: None,
            disclosed_quantity: None,
            market_protection_percent: None,
            api_order_source: None,
            algo_id: None,
            order_tag: None,
        };

        // The vendor said no; that is data for the caller, not a retry
        // trigger. A blind retry here could double-place the order.
        let body = client.place_order(&order).await.unwrap();
        assert_eq!(body["stat"], "Not_Ok");
        assert_eq!(body["message"], "insufficient margin");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_protocol_error() {
        let (client, _transport) = client_with(vec![ok("<html>gateway error</html>")]);
        seed_token(&client, "tok-abc").await;

        let err = client.get_profile().await.unwrap_err();
        match err {
            ApiError::Protocol { body } => assert!(body.contains("<html>")),
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn connection_fault_is_retried_once_with_backoff() {
        let (client, transport) = client_with(vec![
            Err(TransportError::Connect("connection refused".into())),
            ok(r#"{"stat":"Ok"}"#),
        ]);
        seed_token(&client, "tok-abc").await;

        let body = client.get_limits().await.unwrap();
        assert_eq!(body["stat"], "Ok");
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn connection_fault_exhaustion_surfaces_network_error() {
        let (client, transport) = client_with(vec![
            Err(TransportError::Connect("connection refused".into())),
            Err(TransportError::Connect("connection refused".into())),
        ]);
        seed_token(&client, "tok-abc").await;

        let err = client.get_limits().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn timeout_propagates_without_touching_the_session() {
        let (client, transport) = client_with(vec![Err(TransportError::Timeout)]);
        seed_token(&client, "tok-abc").await;

        let err = client.get_positions().await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
        assert_eq!(transport.call_count(), 1);
        // The deadline expiring says nothing about token validity.
        assert_eq!(client.current_token().await.as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn rejected_checksum_is_a_hard_error() {
        let (client, _transport) = client_with(vec![ok(
            r#"{"stat":"Not_Ok","message":"Invalid checksum"}"#,
        )]);

        // No fabricated fallback data: the failure surfaces as an error and
        // the session stays unauthenticated.
        let err = client.get_profile().await.unwrap_err();
        match err {
            ApiError::AuthRejected { reason } => assert_eq!(reason, "Invalid checksum"),
            other => panic!("expected AuthRejected, got {other:?}"),
        }
        assert!(client.current_token().await.is_none());
    }

    #[tokio::test]
    async fn auth_endpoint_failure_carries_status_and_body() {
        let (client, _transport) = client_with(vec![status(503, "maintenance window")]);

        let err = client.authenticate().await.unwrap_err();
        match err {
            ApiError::AuthFailed { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("maintenance window"));
            }
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reauthentication_replaces_token_wholesale() {
        let (client, _transport) = client_with(vec![auth_ok("tok-1"), auth_ok("tok-2")]);

        assert_eq!(client.authenticate().await.unwrap().token, "tok-1");
        assert_eq!(client.authenticate().await.unwrap().token, "tok-2");
        assert_eq!(client.current_token().await.as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn invalidated_session_reauthenticates_on_next_call() {
        let (client, transport) = client_with(vec![
            auth_ok("tok-fresh"),
            ok(r#"{"stat":"Ok"}"#),
        ]);
        seed_token(&client, "tok-old").await;

        client.invalidate_session().await;
        assert!(client.current_token().await.is_none());

        client.get_profile().await.unwrap();
        let calls = transport.calls();
        assert!(calls[0].url.ends_with("/vendor/getUserDetails"));
        assert_eq!(calls[1].bearer.as_deref(), Some("tok-fresh"));
    }

    #[tokio::test]
    async fn holdings_path_includes_product_segment() {
        let (client, transport) = client_with(vec![ok(r#"{"stat":"Ok","holdings":[]}"#)]);
        seed_token(&client, "tok-abc").await;

        client.get_holdings(ProductType::Cnc).await.unwrap();
        let calls = transport.calls();
        assert!(calls[0].url.ends_with("/open-api/od/v1/holdings/CNC"));
    }

    #[tokio::test]
    async fn cancel_order_posts_broker_order_id() {
        let (client, transport) = client_with(vec![ok(r#"{"stat":"Ok"}"#)]);
        seed_token(&client, "tok-abc").await;

        client.cancel_order("24112800000001").await.unwrap();
        let calls = transport.calls();
        assert_eq!(
            calls[0].body.as_ref().unwrap()["brokerOrderId"],
            "24112800000001"
        );
        assert!(calls[0].url.ends_with("/orders/cancelOrder"));
    }

    #[tokio::test]
    async fn exit_bracket_order_posts_id_and_complexity() {
        let (client, transport) = client_with(vec![ok(r#"{"stat":"Ok"}"#)]);
        seed_token(&client, "tok-abc").await;

        client
            .exit_bracket_order("24112800000002", OrderComplexity::Bracket)
            .await
            .unwrap();
        let calls = transport.calls();
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["brokerOrderId"], "24112800000002");
        assert_eq!(body["orderComplexity"], "BO");
        assert!(calls[0].url.ends_with("/orders/exitBracketOrder"));
    }

    /// Transport for the refresh race: answers by request shape instead of
    /// a scripted sequence, and holds both stale-token requests at a barrier
    /// so they are guaranteed to be in flight together before either 401 is
    /// handled.
    struct StaleTokenTransport {
        barrier: tokio::sync::Barrier,
        auth_calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Transport for StaleTokenTransport {
        async fn send(&self, call: TransportCall<'_>) -> Result<RawResponse, TransportError> {
            if call.url.ends_with("/vendor/getUserDetails") {
                self.auth_calls
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                return Ok(RawResponse {
                    status: 200,
                    body: r#"{"stat":"Ok","userSession":"tok-new"}"#.into(),
                });
            }
            match call.bearer {
                Some("tok-old") => {
                    self.barrier.wait().await;
                    Ok(RawResponse {
                        status: 401,
                        body: "unauthorized".into(),
                    })
                }
                Some("tok-new") => Ok(RawResponse {
                    status: 200,
                    body: r#"{"stat":"Ok"}"#.into(),
                }),
                other => panic!("unexpected bearer {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn concurrent_expiry_refreshes_the_session_once() {
        let transport = Arc::new(StaleTokenTransport {
            barrier: tokio::sync::Barrier::new(2),
            auth_calls: std::sync::atomic::AtomicUsize::new(0),
        });
        let credentials = Credentials::new("U1".into(), "CODE1".into(), "SECRET1".into());
        let client = ApiClient::with_transport(credentials, BASE.into(), transport.clone());
        seed_token(&client, "tok-old").await;

        // Both calls carry the stale token concurrently; the barrier ensures
        // neither 401 is handled before the other request is in flight. The
        // first handler refreshes the session; the second observes the
        // changed token and retries with it instead of re-authenticating.
        let (a, b) = tokio::join!(
            tokio::spawn({
                let client = client.clone();
                async move { client.get_positions().await }
            }),
            tokio::spawn({
                let client = client.clone();
                async move { client.get_order_book().await }
            }),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        assert_eq!(
            transport
                .auth_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        assert_eq!(client.current_token().await.as_deref(), Some("tok-new"));
    }
}
