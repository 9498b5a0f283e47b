use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five top-level message kinds routed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Journal,
    Shipyard,
    Commodity,
    Blackmarket,
    Outfitting,
}

impl Variant {
    /// All variants in index order.
    pub const ALL: [Variant; 5] = [
        Variant::Journal,
        Variant::Shipyard,
        Variant::Commodity,
        Variant::Blackmarket,
        Variant::Outfitting,
    ];

    /// Stable index of this variant, used as its bit position in a filter mask.
    pub const fn index(self) -> u32 {
        match self {
            Variant::Journal => 0,
            Variant::Shipyard => 1,
            Variant::Commodity => 2,
            Variant::Blackmarket => 3,
            Variant::Outfitting => 4,
        }
    }

    /// Lowercase schema family name ("journal", "commodity", ...).
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Journal => "journal",
            Variant::Shipyard => "shipyard",
            Variant::Commodity => "commodity",
            Variant::Blackmarket => "blackmarket",
            Variant::Outfitting => "outfitting",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown variant '{}' (expected journal, shipyard, commodity, blackmarket or outfitting)",
            self.0
        )
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == lower)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_ordered() {
        let indices: Vec<u32> = Variant::ALL.iter().map(|v| v.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Journal".parse::<Variant>().unwrap(), Variant::Journal);
        assert_eq!(" outfitting ".parse::<Variant>().unwrap(), Variant::Outfitting);
        assert!("market".parse::<Variant>().is_err());
    }

    #[test]
    fn display_matches_schema_family() {
        assert_eq!(Variant::Blackmarket.to_string(), "blackmarket");
    }
}
