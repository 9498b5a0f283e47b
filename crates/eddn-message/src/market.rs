//! Station market payloads: commodity, shipyard, outfitting and blackmarket.

use serde::{Deserialize, Serialize};

/// Market data for one commodity at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityEntry {
    pub name: String,
    pub buy_price: u64,
    pub sell_price: u64,
    pub mean_price: u64,
    pub stock: u64,
    pub stock_bracket: u8,
    pub demand: u64,
    pub demand_bracket: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_flags: Vec<String>,
}

/// Commodity market snapshot (commodity schema v3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityMessage {
    pub system_name: String,
    pub station_name: String,
    pub timestamp: String,
    pub commodities: Vec<CommodityEntry>,
}

/// Ships for sale at a station (shipyard schema v2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipyardMessage {
    pub system_name: String,
    pub station_name: String,
    pub timestamp: String,
    pub ships: Vec<String>,
}

/// Modules for sale at a station (outfitting schema v2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfittingMessage {
    pub system_name: String,
    pub station_name: String,
    pub timestamp: String,
    pub modules: Vec<String>,
}

/// A single black market sale (blackmarket schema v1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackmarketMessage {
    pub system_name: String,
    pub station_name: String,
    pub timestamp: String,
    pub name: String,
    pub sell_price: u64,
    pub prohibited: bool,
}
