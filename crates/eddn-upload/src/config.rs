use std::time::Duration;

use eddn_schema::RegistryConfig;

/// Public upload gateway.
pub const UPLOAD_ENDPOINT: &str = "http://eddn-gateway.elite-markets.net:8080/upload/";

/// Whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Uploader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    /// Gateway URL messages are POSTed to.
    pub endpoint: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Applied to schemas fetched by `Uploader::with_remote_schemas`.
    pub schemas: RegistryConfig,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            schemas: RegistryConfig::default(),
        }
    }
}

impl UploaderConfig {
    /// Config for a gateway other than the public one.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
