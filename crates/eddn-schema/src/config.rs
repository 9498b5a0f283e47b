/// Default cap on schema files read by `from_directory`.
pub const DEFAULT_MAX_DIRECTORY_SCHEMAS: usize = 16;

/// Default cap on the size of one schema file: 256 KiB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 256 * 1024;

/// Registry behaviour and directory loading limits.
///
/// The default is permissive: schemas are compiled as published and a
/// variant nobody registered a schema for passes validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Close every object schema with `additionalProperties: false`, so
    /// misspelled or invented fields fail validation.
    pub reject_unknown_fields: bool,
    /// Validating a variant without a schema is `SchemaError::NoSchema`.
    pub require_schema: bool,
    pub max_directory_schemas: usize,
    pub max_file_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reject_unknown_fields: false,
            require_schema: false,
            max_directory_schemas: DEFAULT_MAX_DIRECTORY_SCHEMAS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl RegistryConfig {
    pub fn reject_unknown_fields(mut self, enabled: bool) -> Self {
        self.reject_unknown_fields = enabled;
        self
    }

    pub fn require_schema(mut self, enabled: bool) -> Self {
        self.require_schema = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_permissive() {
        let config = RegistryConfig::default();
        assert!(!config.reject_unknown_fields);
        assert!(!config.require_schema);
        assert_eq!(config.max_directory_schemas, 16);
        assert_eq!(config.max_file_size, 256 * 1024);
    }

    #[test]
    fn builders_only_touch_their_flag() {
        let config = RegistryConfig::default()
            .reject_unknown_fields(true)
            .require_schema(true);
        assert!(config.reject_unknown_fields);
        assert!(config.require_schema);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(
            config.require_schema(false),
            RegistryConfig {
                require_schema: false,
                ..config
            }
        );
    }
}
