use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use eddn_message::Variant;
use jsonschema::Validator;
use serde_json::{Map, Value};

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::validator::validate_value;

/// Keywords whose value is a map of subschemas.
const SCHEMA_MAP_KEYWORDS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords whose value is a single subschema (or array of them, for `items` in draft 4).
const SCHEMA_KEYWORDS: [&str; 11] = [
    "propertyNames",
    "additionalProperties",
    "unevaluatedProperties",
    "items",
    "contains",
    "additionalItems",
    "unevaluatedItems",
    "not",
    "if",
    "then",
    "else",
];

/// Keywords whose value is a list of subschemas.
const SCHEMA_LIST_KEYWORDS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Keywords that only make sense on object schemas.
const OBJECT_KEYWORDS: [&str; 8] = [
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "propertyNames",
];

/// Variant-keyed registry of compiled JSON Schema validators.
pub struct SchemaRegistry {
    validators: HashMap<Variant, Validator>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            validators: HashMap::new(),
            config,
        }
    }

    /// Register the schema for a variant from a JSON string.
    pub fn register(&mut self, variant: Variant, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(variant, &schema)
    }

    /// Register the schema for a variant from a parsed document.
    pub fn register_value(&mut self, variant: Variant, schema: &Value) -> Result<()> {
        let mut schema_to_compile = schema.clone();
        if self.config.reject_unknown_fields {
            close_object_schemas(&mut schema_to_compile);
        }

        let compiled = jsonschema::validator_for(&schema_to_compile)
            .map_err(|err| SchemaError::CompileFailed(format!("{variant}: {err}")))?;

        tracing::debug!(%variant, strict = self.config.reject_unknown_fields, "schema registered");
        self.validators.insert(variant, compiled);
        Ok(())
    }

    /// Load from embedded schema strings.
    pub fn from_embedded(schemas: &[(Variant, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (variant, schema) in schemas {
            registry.register(*variant, schema)?;
        }
        Ok(registry)
    }

    /// Load schemas from a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    ///
    /// Files are matched by name: `journal.schema.json` or the upstream
    /// `journal-v1.0.json` form. Other `.json` files are ignored; symlinks and
    /// oversized files are refused.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(variant) = resolve_variant_from_file_name(&file_name) else {
                continue;
            };

            let entry_path = entry.path();
            let metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            if metadata.file_type().is_symlink() {
                return Err(SchemaError::LoadFailed(format!(
                    "refusing to load schema symlink: {file_name}"
                )));
            }
            if !metadata.is_file() {
                continue;
            }

            loaded = loaded.saturating_add(1);
            if loaded > registry.config.max_directory_schemas {
                return Err(SchemaError::LoadFailed(format!(
                    "schema count exceeds configured max ({})",
                    registry.config.max_directory_schemas
                )));
            }

            let content = read_limited(&entry_path, registry.config.max_file_size)?;
            registry.register(variant, &content)?;
        }

        Ok(registry)
    }

    /// Validate an outbound document against the schema of its variant.
    pub fn validate(&self, variant: Variant, document: &Value) -> Result<()> {
        match self.validators.get(&variant) {
            Some(validator) => validate_value(variant, document, validator),
            None if self.config.require_schema => Err(SchemaError::NoSchema(variant)),
            None => Ok(()),
        }
    }

    /// Validate serialized JSON bytes against the schema of `variant`.
    pub fn validate_bytes(&self, variant: Variant, document: &[u8]) -> Result<()> {
        let value: Value = serde_json::from_slice(document)?;
        self.validate(variant, &value)
    }

    /// Check if a variant has a registered schema.
    pub fn has_schema(&self, variant: Variant) -> bool {
        self.validators.contains_key(&variant)
    }

    /// Variants that have registered schemas, in index order.
    pub fn variants(&self) -> Vec<Variant> {
        let mut variants: Vec<Variant> = self.validators.keys().copied().collect();
        variants.sort_unstable();
        variants
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("variants", &self.variants())
            .field("config", &self.config)
            .finish()
    }
}

fn read_limited(path: &Path, max_bytes: usize) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;

    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large (over {max_bytes} bytes): {}",
            path.display()
        )));
    }
    Ok(content)
}

fn resolve_variant_from_file_name(file_name: &str) -> Option<Variant> {
    let lower = file_name.to_ascii_lowercase();

    if let Some(name) = lower.strip_suffix(".schema.json") {
        return name.parse().ok();
    }

    // Upstream naming: "<family>-v<major>.<minor>.json".
    let stem = lower.strip_suffix(".json")?;
    let (family, version) = stem.split_once("-v")?;
    let well_formed = !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }
    family.parse().ok()
}

fn close_object_schemas(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for keyword in SCHEMA_MAP_KEYWORDS {
                if let Some(Value::Object(children)) = map.get_mut(keyword) {
                    children.values_mut().for_each(close_object_schemas);
                }
            }
            for keyword in SCHEMA_KEYWORDS.iter().chain(SCHEMA_LIST_KEYWORDS.iter()) {
                if let Some(child) = map.get_mut(*keyword) {
                    close_object_schemas(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_object_schemas),
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|kind| matches!(kind, Value::String(kind) if kind == "object")),
        _ => OBJECT_KEYWORDS.iter().any(|keyword| map.contains_key(*keyword)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    const SHIPYARD_SCHEMA: &str = r#"{
        "type": "object",
        "required": ["$schemaRef", "header", "message"],
        "properties": {
            "$schemaRef": { "type": "string" },
            "header": {
                "type": "object",
                "required": ["uploaderID", "softwareName", "softwareVersion"],
                "properties": {
                    "uploaderID": { "type": "string" },
                    "softwareName": { "type": "string" },
                    "softwareVersion": { "type": "string" },
                    "gatewayTimestamp": { "type": "string" }
                }
            },
            "message": {
                "type": "object",
                "required": ["systemName", "stationName", "timestamp", "ships"],
                "properties": {
                    "systemName": { "type": "string", "minLength": 1 },
                    "stationName": { "type": "string", "minLength": 1 },
                    "timestamp": { "type": "string" },
                    "ships": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    }"#;

    fn shipyard_document() -> Value {
        json!({
            "$schemaRef": "http://schemas.elite-markets.net/eddn/shipyard/2",
            "header": {"uploaderID": "cmdr", "softwareName": "tool", "softwareVersion": "1.0"},
            "message": {
                "systemName": "Lave",
                "stationName": "Lave Station",
                "timestamp": "2017-01-01T00:00:00Z",
                "ships": ["sidewinder"]
            }
        })
    }

    #[test]
    fn register_and_validate() {
        let mut registry = SchemaRegistry::new();
        registry.register(Variant::Shipyard, SHIPYARD_SCHEMA).unwrap();

        assert!(registry.validate(Variant::Shipyard, &shipyard_document()).is_ok());

        let mut missing_ships = shipyard_document();
        missing_ships["message"]
            .as_object_mut()
            .unwrap()
            .remove("ships");
        assert!(matches!(
            registry.validate(Variant::Shipyard, &missing_ships),
            Err(SchemaError::ValidationFailed { variant: Variant::Shipyard, .. })
        ));
    }

    #[test]
    fn variants_validate_independently() {
        let registry = SchemaRegistry::from_embedded(&[
            (Variant::Shipyard, SHIPYARD_SCHEMA),
            (
                Variant::Blackmarket,
                r#"{"type":"object","required":["message"],
                    "properties":{"message":{"required":["prohibited"]}}}"#,
            ),
        ])
        .unwrap();

        assert!(registry.validate(Variant::Shipyard, &shipyard_document()).is_ok());
        assert!(registry
            .validate(Variant::Blackmarket, &shipyard_document())
            .is_err());
        assert_eq!(
            registry.variants(),
            vec![Variant::Shipyard, Variant::Blackmarket]
        );
    }

    #[test]
    fn missing_schema_permissive_passes() {
        let registry = SchemaRegistry::new();
        assert!(registry.validate(Variant::Journal, &json!({"any": "thing"})).is_ok());
    }

    #[test]
    fn missing_schema_strict_fails() {
        let registry = SchemaRegistry::with_config(RegistryConfig {
            require_schema: true,
            ..RegistryConfig::default()
        });

        assert!(matches!(
            registry.validate(Variant::Journal, &json!({})),
            Err(SchemaError::NoSchema(Variant::Journal))
        ));
    }

    #[test]
    fn closed_schemas_reject_misspelled_fields() {
        let mut permissive = SchemaRegistry::new();
        permissive.register(Variant::Shipyard, SHIPYARD_SCHEMA).unwrap();

        let mut strict = SchemaRegistry::with_config(RegistryConfig {
            reject_unknown_fields: true,
            ..RegistryConfig::default()
        });
        strict.register(Variant::Shipyard, SHIPYARD_SCHEMA).unwrap();

        let mut document = shipyard_document();
        document["message"]["stationname"] = json!("typo");

        assert!(permissive.validate(Variant::Shipyard, &document).is_ok());
        assert!(matches!(
            strict.validate(Variant::Shipyard, &document),
            Err(SchemaError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn closing_applies_to_object_keywords_without_type() {
        let mut strict = SchemaRegistry::with_config(RegistryConfig {
            reject_unknown_fields: true,
            ..RegistryConfig::default()
        });
        strict
            .register(
                Variant::Journal,
                r#"{"properties": {"id": {"type": "integer"}}, "required": ["id"]}"#,
            )
            .unwrap();

        assert!(strict.validate(Variant::Journal, &json!({"id": 1})).is_ok());
        assert!(strict
            .validate(Variant::Journal, &json!({"id": 1, "extra": true}))
            .is_err());
    }

    #[test]
    fn invalid_json_bytes_fail() {
        let mut registry = SchemaRegistry::new();
        registry.register(Variant::Shipyard, SHIPYARD_SCHEMA).unwrap();

        assert!(matches!(
            registry.validate_bytes(Variant::Shipyard, b"not-json"),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn invalid_schema_fails_compile() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.register(Variant::Commodity, r#"{"type":"definitely-not-a-type"}"#),
            Err(SchemaError::CompileFailed(_))
        ));
    }

    #[test]
    fn file_names_map_to_variants() {
        assert_eq!(
            resolve_variant_from_file_name("journal.schema.json"),
            Some(Variant::Journal)
        );
        assert_eq!(
            resolve_variant_from_file_name("Commodity-v3.0.json"),
            Some(Variant::Commodity)
        );
        assert_eq!(resolve_variant_from_file_name("commodity-vx.json"), None);
        assert_eq!(resolve_variant_from_file_name("market.schema.json"), None);
        assert_eq!(resolve_variant_from_file_name("notes.txt"), None);
    }

    fn make_temp_schema_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "eddn-schema-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn from_directory_loads_both_naming_forms() {
        let dir = make_temp_schema_dir("from-directory");
        std::fs::write(dir.join("shipyard-v2.0.json"), SHIPYARD_SCHEMA).unwrap();
        std::fs::write(dir.join("journal.schema.json"), r#"{"type":"object"}"#).unwrap();
        std::fs::write(dir.join("README.md"), "ignored").unwrap();

        let registry = SchemaRegistry::from_directory(&dir).unwrap();
        assert_eq!(registry.variants(), vec![Variant::Journal, Variant::Shipyard]);
        assert!(registry.validate(Variant::Shipyard, &shipyard_document()).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_file_size_limit_is_enforced() {
        let dir = make_temp_schema_dir("size-limit");
        std::fs::write(dir.join("shipyard.schema.json"), SHIPYARD_SCHEMA).unwrap();

        let config = RegistryConfig {
            max_file_size: 8,
            ..RegistryConfig::default()
        };
        let result = SchemaRegistry::from_directory_with_config(&dir, config);
        assert!(matches!(result, Err(SchemaError::LoadFailed(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_count_limit_is_enforced() {
        let dir = make_temp_schema_dir("count-limit");
        std::fs::write(dir.join("shipyard.schema.json"), SHIPYARD_SCHEMA).unwrap();
        std::fs::write(dir.join("journal.schema.json"), r#"{"type":"object"}"#).unwrap();

        let config = RegistryConfig {
            max_directory_schemas: 1,
            ..RegistryConfig::default()
        };
        let result = SchemaRegistry::from_directory_with_config(&dir, config);
        assert!(matches!(result, Err(SchemaError::LoadFailed(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_schema_is_rejected() {
        let dir = make_temp_schema_dir("symlink");
        let target = dir.join("target.txt");
        std::fs::write(&target, SHIPYARD_SCHEMA).unwrap();
        std::os::unix::fs::symlink(&target, dir.join("shipyard.schema.json")).unwrap();

        let result = SchemaRegistry::from_directory(&dir);
        assert!(matches!(result, Err(SchemaError::LoadFailed(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
