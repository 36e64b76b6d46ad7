//! Data models for the AliceBlue API.
//!
//! - `enums`: wire-level enumerations with fixed vendor casing
//! - `order`: one typed request struct per trading operation
//! - `response`: vendor reply shapes and the uniform tool envelope

pub mod enums;
pub mod order;
pub mod response;

pub use enums::{Exchange, OrderComplexity, OrderType, ProductType, TransactionType, Validity};
pub use order::{
    GttModifyRequest, GttPlaceRequest, InstrumentRef, MarginRequest, ModifyOrderRequest,
    PlaceOrderRequest,
};
pub use response::{SessionReply, ToolEnvelope};
