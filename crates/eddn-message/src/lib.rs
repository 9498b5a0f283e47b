//! Typed EDDN message model.
//!
//! Every message on the network is a [`Record`]: a `$schemaRef`, a shared
//! [`Metadata`] header and a schema-specific payload. The five payloads the
//! client understands are closed over by [`Message`] and tagged by [`Variant`].

pub mod filter;
pub mod journal;
pub mod market;
pub mod record;
pub mod schema_ref;
pub mod variant;

pub use filter::FilterMask;
pub use journal::{
    Composition, Docked, Faction, FsdJump, JournalEvent, OrbitalElements, Ring, ScanPlanet,
    ScanStar, UnknownEvent,
};
pub use market::{BlackmarketMessage, CommodityEntry, CommodityMessage, OutfittingMessage,
    ShipyardMessage};
pub use record::{
    Blackmarket, Commodity, Journal, Message, Metadata, Outfitting, Payload, Record, Shipyard,
};
pub use schema_ref::{current_schema_ref, resolve, schema_document_uri, SchemaStatus};
pub use variant::Variant;
