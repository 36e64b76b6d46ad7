//! Wire-level enumerations for the AliceBlue order API.
//!
//! The vendor is strict about casing ("BUY", "SL", "CO", ...), so every
//! enum serializes to its exact wire spelling instead of relying on inline
//! string normalization at call sites.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Exchange {
    NSE,
    BSE,
    NFO,
    BFO,
    CDS,
    BCD,
    NCO,
    BCO,
    MCX,
    INDICES,
    NCDEX,
}

impl Exchange {
    /// Human-readable description, used by the static catalog tool.
    pub fn description(&self) -> &'static str {
        match self {
            Exchange::NSE => "National Stock Exchange",
            Exchange::BSE => "Bombay Stock Exchange",
            Exchange::NFO => "NSE Futures & Options",
            Exchange::BFO => "BSE Futures & Options",
            Exchange::CDS => "Currency Derivatives Segment (NSE)",
            Exchange::BCD => "BSE Currency Derivatives",
            Exchange::NCO => "NSE Commodities",
            Exchange::BCO => "BSE Commodities",
            Exchange::MCX => "Multi Commodity Exchange",
            Exchange::INDICES => "Index data (NSE/BSE indices)",
            Exchange::NCDEX => "National Commodity & Derivatives Exchange",
        }
    }

    /// Wire spelling, used as the catalog key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::NSE => "NSE",
            Exchange::BSE => "BSE",
            Exchange::NFO => "NFO",
            Exchange::BFO => "BFO",
            Exchange::CDS => "CDS",
            Exchange::BCD => "BCD",
            Exchange::NCO => "NCO",
            Exchange::BCO => "BCO",
            Exchange::MCX => "MCX",
            Exchange::INDICES => "INDICES",
            Exchange::NCDEX => "NCDEX",
        }
    }

    pub const ALL: [Exchange; 11] = [
        Exchange::NSE,
        Exchange::BSE,
        Exchange::NFO,
        Exchange::BFO,
        Exchange::CDS,
        Exchange::BCD,
        Exchange::NCO,
        Exchange::BCO,
        Exchange::MCX,
        Exchange::INDICES,
        Exchange::NCDEX,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum OrderType {
    #[serde(rename = "LIMIT")]
    Limit,
    #[serde(rename = "MARKET")]
    Market,
    #[serde(rename = "SL")]
    StopLoss,
    #[serde(rename = "SLM")]
    StopLossMarket,
}

impl OrderType {
    pub fn description(&self) -> &'static str {
        match self {
            OrderType::Limit => "Limit Order",
            OrderType::Market => "Market Order",
            OrderType::StopLoss => "Stop Loss Limit Order",
            OrderType::StopLossMarket => "Stop Loss Market Order",
        }
    }

    /// Wire spelling, used as the catalog key.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "SL",
            OrderType::StopLossMarket => "SLM",
        }
    }

    pub const ALL: [OrderType; 4] = [
        OrderType::Limit,
        OrderType::Market,
        OrderType::StopLoss,
        OrderType::StopLossMarket,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Normal,
    Intraday,
    Longterm,
    Mtf,
    Gtt,
    Cnc,
    Bnpl,
}

impl ProductType {
    pub fn description(&self) -> &'static str {
        match self {
            ProductType::Normal => "Normal order",
            ProductType::Intraday => "Margin Intraday Square-off",
            ProductType::Longterm => "Delivery-based, long-term holding",
            ProductType::Mtf => "Margin Trading Facility",
            ProductType::Gtt => "Good Till Triggered",
            ProductType::Cnc => "Cash and Carry",
            ProductType::Bnpl => "Buy Now Pay Later",
        }
    }

    /// Wire spelling, used to build the holdings path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Normal => "NORMAL",
            ProductType::Intraday => "INTRADAY",
            ProductType::Longterm => "LONGTERM",
            ProductType::Mtf => "MTF",
            ProductType::Gtt => "GTT",
            ProductType::Cnc => "CNC",
            ProductType::Bnpl => "BNPL",
        }
    }

    pub const ALL: [ProductType; 7] = [
        ProductType::Normal,
        ProductType::Intraday,
        ProductType::Longterm,
        ProductType::Mtf,
        ProductType::Gtt,
        ProductType::Cnc,
        ProductType::Bnpl,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum OrderComplexity {
    #[serde(rename = "Regular")]
    Regular,
    #[serde(rename = "AMO")]
    AfterMarket,
    #[serde(rename = "CO")]
    Cover,
    #[serde(rename = "BO")]
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Validity {
    Day,
    Ioc,
}
