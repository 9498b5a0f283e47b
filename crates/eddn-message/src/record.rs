use serde::{Deserialize, Serialize};

use crate::journal::JournalEvent;
use crate::market::{BlackmarketMessage, CommodityMessage, OutfittingMessage, ShipyardMessage};
use crate::variant::Variant;

/// Header shared by every inbound and outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Set by the upload gateway; uploaders stamp their own send time.
    #[serde(
        rename = "gatewayTimestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_timestamp: Option<String>,
    #[serde(rename = "softwareName")]
    pub software_name: String,
    #[serde(rename = "softwareVersion")]
    pub software_version: String,
    #[serde(rename = "uploaderID")]
    pub uploader_id: String,
}

/// A complete message: schema reference, header and typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P> {
    #[serde(rename = "$schemaRef")]
    pub schema_ref: String,
    pub header: Metadata,
    pub message: P,
}

pub type Journal = Record<JournalEvent>;
pub type Commodity = Record<CommodityMessage>;
pub type Shipyard = Record<ShipyardMessage>;
pub type Outfitting = Record<OutfittingMessage>;
pub type Blackmarket = Record<BlackmarketMessage>;

/// Payload types bound to exactly one variant.
pub trait Payload: Serialize {
    const VARIANT: Variant;
}

impl Payload for JournalEvent {
    const VARIANT: Variant = Variant::Journal;
}

impl Payload for CommodityMessage {
    const VARIANT: Variant = Variant::Commodity;
}

impl Payload for ShipyardMessage {
    const VARIANT: Variant = Variant::Shipyard;
}

impl Payload for OutfittingMessage {
    const VARIANT: Variant = Variant::Outfitting;
}

impl Payload for BlackmarketMessage {
    const VARIANT: Variant = Variant::Blackmarket;
}

/// A decoded message of any supported variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Journal(Journal),
    Shipyard(Shipyard),
    Commodity(Commodity),
    Blackmarket(Blackmarket),
    Outfitting(Outfitting),
}

impl Message {
    /// Variant tag of this message.
    pub fn variant(&self) -> Variant {
        match self {
            Message::Journal(_) => Variant::Journal,
            Message::Shipyard(_) => Variant::Shipyard,
            Message::Commodity(_) => Variant::Commodity,
            Message::Blackmarket(_) => Variant::Blackmarket,
            Message::Outfitting(_) => Variant::Outfitting,
        }
    }

    /// The `$schemaRef` the message was published under.
    pub fn schema_ref(&self) -> &str {
        match self {
            Message::Journal(r) => &r.schema_ref,
            Message::Shipyard(r) => &r.schema_ref,
            Message::Commodity(r) => &r.schema_ref,
            Message::Blackmarket(r) => &r.schema_ref,
            Message::Outfitting(r) => &r.schema_ref,
        }
    }

    /// Message header.
    pub fn header(&self) -> &Metadata {
        match self {
            Message::Journal(r) => &r.header,
            Message::Shipyard(r) => &r.header,
            Message::Commodity(r) => &r.header,
            Message::Blackmarket(r) => &r.header,
            Message::Outfitting(r) => &r.header,
        }
    }

    /// One-line human summary, used by the CLI.
    pub fn summary(&self) -> String {
        match self {
            Message::Journal(r) => format!(
                "{} in {} ({})",
                r.message.event_name(),
                r.message.star_system(),
                r.message.timestamp()
            ),
            Message::Shipyard(r) => format!(
                "{} / {}: {} ships",
                r.message.system_name,
                r.message.station_name,
                r.message.ships.len()
            ),
            Message::Commodity(r) => format!(
                "{} / {}: {} commodities",
                r.message.system_name,
                r.message.station_name,
                r.message.commodities.len()
            ),
            Message::Blackmarket(r) => format!(
                "{} / {}: {} for {}",
                r.message.system_name,
                r.message.station_name,
                r.message.name,
                r.message.sell_price
            ),
            Message::Outfitting(r) => format!(
                "{} / {}: {} modules",
                r.message.system_name,
                r.message.station_name,
                r.message.modules.len()
            ),
        }
    }
}

impl From<Journal> for Message {
    fn from(record: Journal) -> Self {
        Message::Journal(record)
    }
}

impl From<Shipyard> for Message {
    fn from(record: Shipyard) -> Self {
        Message::Shipyard(record)
    }
}

impl From<Commodity> for Message {
    fn from(record: Commodity) -> Self {
        Message::Commodity(record)
    }
}

impl From<Blackmarket> for Message {
    fn from(record: Blackmarket) -> Self {
        Message::Blackmarket(record)
    }
}

impl From<Outfitting> for Message {
    fn from(record: Outfitting) -> Self {
        Message::Outfitting(record)
    }
}
