//! Catalogue of `$schemaRef` identifiers.
//!
//! A pure lookup table from identifier to routing decision. Only one
//! version per family is decoded; older versions are recognized so they can
//! be reported as unsupported instead of unknown.

use crate::variant::Variant;

pub const JOURNAL_V1: &str = "http://schemas.elite-markets.net/eddn/journal/1";
pub const COMMODITY_V1: &str = "http://schemas.elite-markets.net/eddn/commodity/1";
pub const COMMODITY_V2: &str = "http://schemas.elite-markets.net/eddn/commodity/2";
pub const COMMODITY_V3: &str = "http://schemas.elite-markets.net/eddn/commodity/3";
pub const OUTFITTING_V1: &str = "http://schemas.elite-markets.net/eddn/outfitting/1";
pub const OUTFITTING_V2: &str = "http://schemas.elite-markets.net/eddn/outfitting/2";
pub const BLACKMARKET_V1: &str = "http://schemas.elite-markets.net/eddn/blackmarket/1";
pub const SHIPYARD_V1: &str = "http://schemas.elite-markets.net/eddn/shipyard/1";
pub const SHIPYARD_V2: &str = "http://schemas.elite-markets.net/eddn/shipyard/2";

const SCHEMA_DOCUMENT_BASE: &str =
    "https://raw.githubusercontent.com/jamesremuscat/EDDN/master/schemas";

/// Routing decision for a `$schemaRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Supported identifier; decode into this variant.
    Current(Variant),
    /// Recognized older version that is deliberately not decoded.
    Deprecated { variant: Variant, version: u32 },
    /// Not in the catalogue.
    Unknown,
}

struct Entry {
    id: &'static str,
    variant: Variant,
    version: u32,
    current: bool,
}

const CATALOGUE: &[Entry] = &[
    Entry { id: JOURNAL_V1, variant: Variant::Journal, version: 1, current: true },
    Entry { id: COMMODITY_V1, variant: Variant::Commodity, version: 1, current: false },
    Entry { id: COMMODITY_V2, variant: Variant::Commodity, version: 2, current: false },
    Entry { id: COMMODITY_V3, variant: Variant::Commodity, version: 3, current: true },
    Entry { id: OUTFITTING_V1, variant: Variant::Outfitting, version: 1, current: false },
    Entry { id: OUTFITTING_V2, variant: Variant::Outfitting, version: 2, current: true },
    Entry { id: BLACKMARKET_V1, variant: Variant::Blackmarket, version: 1, current: true },
    Entry { id: SHIPYARD_V1, variant: Variant::Shipyard, version: 1, current: false },
    Entry { id: SHIPYARD_V2, variant: Variant::Shipyard, version: 2, current: true },
];

/// Look up a `$schemaRef` by exact match.
pub fn resolve(schema_ref: &str) -> SchemaStatus {
    match CATALOGUE.iter().find(|entry| entry.id == schema_ref) {
        Some(entry) if entry.current => SchemaStatus::Current(entry.variant),
        Some(entry) => SchemaStatus::Deprecated {
            variant: entry.variant,
            version: entry.version,
        },
        None => SchemaStatus::Unknown,
    }
}

/// Identifier outbound messages of `variant` are published under.
pub fn current_schema_ref(variant: Variant) -> &'static str {
    match variant {
        Variant::Journal => JOURNAL_V1,
        Variant::Shipyard => SHIPYARD_V2,
        Variant::Commodity => COMMODITY_V3,
        Variant::Blackmarket => BLACKMARKET_V1,
        Variant::Outfitting => OUTFITTING_V2,
    }
}

/// Location of the JSON Schema document for the current version of `variant`.
pub fn schema_document_uri(variant: Variant) -> String {
    let version = CATALOGUE
        .iter()
        .find(|entry| entry.current && entry.variant == variant)
        .map(|entry| entry.version)
        .unwrap_or(1);
    format!("{SCHEMA_DOCUMENT_BASE}/{}-v{version}.0.json", variant.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_exactly_one_current_identifier() {
        for variant in Variant::ALL {
            let current: Vec<_> = CATALOGUE
                .iter()
                .filter(|entry| entry.current && entry.variant == variant)
                .collect();
            assert_eq!(current.len(), 1, "{variant}");
            assert_eq!(current[0].id, current_schema_ref(variant));
            assert_eq!(resolve(current[0].id), SchemaStatus::Current(variant));
        }
    }

    #[test]
    fn older_versions_are_deprecated() {
        assert_eq!(
            resolve(COMMODITY_V1),
            SchemaStatus::Deprecated { variant: Variant::Commodity, version: 1 }
        );
        assert_eq!(
            resolve(SHIPYARD_V1),
            SchemaStatus::Deprecated { variant: Variant::Shipyard, version: 1 }
        );
    }

    #[test]
    fn lookups_are_exact() {
        assert_eq!(resolve("http://schemas.elite-markets.net/eddn/journal/2"), SchemaStatus::Unknown);
        assert_eq!(resolve("http://schemas.elite-markets.net/eddn/journal/1/test"), SchemaStatus::Unknown);
        assert_eq!(resolve(""), SchemaStatus::Unknown);
    }

    #[test]
    fn schema_documents_follow_current_versions() {
        assert_eq!(
            schema_document_uri(Variant::Commodity),
            "https://raw.githubusercontent.com/jamesremuscat/EDDN/master/schemas/commodity-v3.0.json"
        );
        assert!(schema_document_uri(Variant::Journal).ends_with("/journal-v1.0.json"));
    }
}
