//! Journal payloads.
//!
//! The upstream journal schema does not tag which kind of scan a message
//! carries. Decoding is therefore two-step: the `event` field picks the
//! family, and for `Scan` events the presence of `StarType` selects
//! [`ScanStar`] over [`ScanPlanet`].

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Journal event names with dedicated payload types.
pub const EVENT_DOCKED: &str = "Docked";
pub const EVENT_FSD_JUMP: &str = "FSDJump";
pub const EVENT_SCAN: &str = "Scan";

/// Field whose presence marks a scan as a star scan.
pub const STAR_TYPE_FIELD: &str = "StarType";

/// A planetary or stellar ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ring {
    pub name: String,
    pub ring_class: String,
    #[serde(rename = "MassMT")]
    pub mass_mt: f64,
    pub inner_rad: f64,
    pub outer_rad: f64,
}

/// One component of a planet's atmosphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Composition {
    pub name: String,
    pub percent: f64,
}

/// Minor faction present in a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Faction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allegiance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence: Option<f64>,
}

/// Keplerian elements reported for orbiting bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrbitalElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_inclination: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periapsis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_period: Option<f64>,
}

/// Commander docked at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Docked {
    #[serde(rename = "timestamp")]
    pub timestamp: String,
    pub star_system: String,
    pub star_pos: [f64; 3],
    pub station_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_faction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_government: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_economy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_state: Option<String>,
    #[serde(
        rename = "DistFromStarLS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dist_from_star_ls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cockpit_breach: Option<bool>,
}

/// Commander arrived in a system by hyperspace jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FsdJump {
    #[serde(rename = "timestamp")]
    pub timestamp: String,
    pub star_system: String,
    pub star_pos: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_allegiance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_economy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_government: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_security: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powerplay_state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub powers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factions: Vec<Faction>,
}

/// Detailed scan of a star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanStar {
    #[serde(rename = "timestamp")]
    pub timestamp: String,
    pub star_system: String,
    pub star_pos: [f64; 3],
    pub body_name: String,
    pub star_type: String,
    #[serde(
        rename = "DistanceFromArrivalLS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_from_arrival_ls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude: Option<f64>,
    #[serde(rename = "Age_MY", default, skip_serializing_if = "Option::is_none")]
    pub age_my: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_temperature: Option<f64>,
    #[serde(flatten)]
    pub orbit: OrbitalElements,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<Ring>,
}

/// Detailed scan of a planet or moon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanPlanet {
    #[serde(rename = "timestamp")]
    pub timestamp: String,
    pub star_system: String,
    pub star_pos: [f64; 3],
    pub body_name: String,
    #[serde(
        rename = "DistanceFromArrivalLS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_from_arrival_ls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tidal_lock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub atmosphere_composition: Vec<Composition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volcanism: Option<String>,
    #[serde(rename = "MassEM", default, skip_serializing_if = "Option::is_none")]
    pub mass_em: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_gravity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_period: Option<f64>,
    #[serde(flatten)]
    pub orbit: OrbitalElements,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<Ring>,
}

/// Any other journal event; the remaining fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownEvent {
    pub event: String,
    pub timestamp: String,
    #[serde(rename = "StarSystem")]
    pub star_system: String,
    #[serde(rename = "StarPos")]
    pub star_pos: [f64; 3],
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Journal payload, discriminated by event name and field presence.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    Docked(Docked),
    FsdJump(FsdJump),
    ScanStar(ScanStar),
    ScanPlanet(ScanPlanet),
    Other(UnknownEvent),
}

impl JournalEvent {
    /// The journal `event` name this payload carries.
    pub fn event_name(&self) -> &str {
        match self {
            JournalEvent::Docked(_) => EVENT_DOCKED,
            JournalEvent::FsdJump(_) => EVENT_FSD_JUMP,
            JournalEvent::ScanStar(_) | JournalEvent::ScanPlanet(_) => EVENT_SCAN,
            JournalEvent::Other(other) => &other.event,
        }
    }

    /// System the event happened in.
    pub fn star_system(&self) -> &str {
        match self {
            JournalEvent::Docked(e) => &e.star_system,
            JournalEvent::FsdJump(e) => &e.star_system,
            JournalEvent::ScanStar(e) => &e.star_system,
            JournalEvent::ScanPlanet(e) => &e.star_system,
            JournalEvent::Other(e) => &e.star_system,
        }
    }

    /// Galactic coordinates of the system.
    pub fn star_pos(&self) -> [f64; 3] {
        match self {
            JournalEvent::Docked(e) => e.star_pos,
            JournalEvent::FsdJump(e) => e.star_pos,
            JournalEvent::ScanStar(e) => e.star_pos,
            JournalEvent::ScanPlanet(e) => e.star_pos,
            JournalEvent::Other(e) => e.star_pos,
        }
    }

    /// Event timestamp as reported by the game.
    pub fn timestamp(&self) -> &str {
        match self {
            JournalEvent::Docked(e) => &e.timestamp,
            JournalEvent::FsdJump(e) => &e.timestamp,
            JournalEvent::ScanStar(e) => &e.timestamp,
            JournalEvent::ScanPlanet(e) => &e.timestamp,
            JournalEvent::Other(e) => &e.timestamp,
        }
    }

    /// Decode a journal body from a JSON object.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let event = match object.get("event") {
            Some(Value::String(event)) => event.clone(),
            Some(_) => {
                return Err(<serde_json::Error as de::Error>::custom(
                    "journal `event` must be a string",
                ))
            }
            None => return Err(<serde_json::Error as de::Error>::missing_field("event")),
        };

        match event.as_str() {
            EVENT_DOCKED => {
                object.remove("event");
                serde_json::from_value(Value::Object(object)).map(JournalEvent::Docked)
            }
            EVENT_FSD_JUMP => {
                object.remove("event");
                serde_json::from_value(Value::Object(object)).map(JournalEvent::FsdJump)
            }
            EVENT_SCAN if object.contains_key(STAR_TYPE_FIELD) => {
                object.remove("event");
                serde_json::from_value(Value::Object(object)).map(JournalEvent::ScanStar)
            }
            EVENT_SCAN => {
                object.remove("event");
                serde_json::from_value(Value::Object(object)).map(JournalEvent::ScanPlanet)
            }
            _ => serde_json::from_value(Value::Object(object)).map(JournalEvent::Other),
        }
    }

    fn to_object(&self) -> Result<Value, serde_json::Error> {
        let mut value = match self {
            JournalEvent::Docked(e) => serde_json::to_value(e)?,
            JournalEvent::FsdJump(e) => serde_json::to_value(e)?,
            JournalEvent::ScanStar(e) => serde_json::to_value(e)?,
            JournalEvent::ScanPlanet(e) => serde_json::to_value(e)?,
            JournalEvent::Other(e) => return serde_json::to_value(e),
        };
        if let Value::Object(map) = &mut value {
            map.insert(
                "event".to_string(),
                Value::String(self.event_name().to_string()),
            );
        }
        Ok(value)
    }
}

impl Serialize for JournalEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_object()
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JournalEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        JournalEvent::from_object(object).map_err(<D::Error as de::Error>::custom)
    }
}
