use chrono::{SecondsFormat, Utc};
use eddn_message::{
    current_schema_ref, schema_document_uri, BlackmarketMessage, CommodityMessage, JournalEvent,
    Metadata, OutfittingMessage, Payload, Record, ShipyardMessage, Variant,
};
use eddn_schema::SchemaRegistry;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::UploaderConfig;
use crate::error::{Result, SendError};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ACCEPTED_BODY: &str = "OK";

/// Who is uploading, copied into every message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uploader_id: String,
    pub software_name: String,
    pub software_version: String,
}

impl Identity {
    pub fn new(
        uploader_id: impl Into<String>,
        software_name: impl Into<String>,
        software_version: impl Into<String>,
    ) -> Self {
        Self {
            uploader_id: uploader_id.into(),
            software_name: software_name.into(),
            software_version: software_version.into(),
        }
    }

    /// Header stamped with `timestamp` as the gateway timestamp.
    pub fn header(&self, timestamp: String) -> Metadata {
        Metadata {
            gateway_timestamp: Some(timestamp),
            software_name: self.software_name.clone(),
            software_version: self.software_version.clone(),
            uploader_id: self.uploader_id.clone(),
        }
    }
}

/// Sends messages to an EDDN upload gateway.
///
/// Validation is opt-in: with a registry attached, every record is checked
/// against the schema of its variant before it leaves the process.
#[derive(Debug)]
pub struct Uploader {
    client: Client,
    identity: Identity,
    config: UploaderConfig,
    schemas: Option<SchemaRegistry>,
}

impl Uploader {
    /// Uploader for the public gateway.
    pub fn new(identity: Identity) -> Result<Self> {
        Self::with_config(identity, UploaderConfig::default())
    }

    pub fn with_config(identity: Identity, config: UploaderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(SendError::Client)?;

        Ok(Self {
            client,
            identity,
            config,
            schemas: None,
        })
    }

    /// Validate outbound records against `registry`.
    pub fn with_schema_registry(mut self, registry: SchemaRegistry) -> Self {
        self.schemas = Some(registry);
        self
    }

    /// Fetch the published schema of every variant and validate against them.
    pub async fn with_remote_schemas(self) -> Result<Self> {
        self.with_schemas_from(schema_document_uri).await
    }

    /// Like [`with_remote_schemas`](Self::with_remote_schemas), with schema
    /// documents located by `locate`.
    pub async fn with_schemas_from<F>(self, locate: F) -> Result<Self>
    where
        F: Fn(Variant) -> String,
    {
        let mut registry = SchemaRegistry::with_config(self.config.schemas);
        for variant in Variant::ALL {
            let uri = locate(variant);
            let document = self.fetch_schema(variant, &uri).await?;
            registry
                .register(variant, &document)
                .map_err(|err| SendError::SchemaFetch {
                    variant,
                    uri: uri.clone(),
                    reason: err.to_string(),
                })?;
            tracing::debug!(%variant, %uri, "schema loaded");
        }
        Ok(self.with_schema_registry(registry))
    }

    async fn fetch_schema(&self, variant: Variant, uri: &str) -> Result<String> {
        let fetch_error = |reason: String| SendError::SchemaFetch {
            variant,
            uri: uri.to_string(),
            reason,
        };

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|err| fetch_error(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("status {status}")));
        }
        response.text().await.map_err(|err| fetch_error(err.to_string()))
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// True if outbound records are validated before sending.
    pub fn validates(&self) -> bool {
        self.schemas.is_some()
    }

    /// Wrap `payload` in a record under the current schema of its variant,
    /// stamped with the current UTC time.
    pub fn record<P: Payload>(&self, payload: P) -> Record<P> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Record {
            schema_ref: current_schema_ref(P::VARIANT).to_string(),
            header: self.identity.header(timestamp),
            message: payload,
        }
    }

    /// Stamp, validate and POST one message.
    pub async fn send<P: Payload>(&self, payload: P) -> Result<()> {
        let record = self.record(payload);
        self.send_record(&record).await
    }

    /// Validate and POST a prepared record.
    pub async fn send_record<P: Payload>(&self, record: &Record<P>) -> Result<()> {
        let variant = P::VARIANT;
        let document = serde_json::to_value(record)?;
        if let Some(schemas) = &self.schemas {
            schemas.validate(variant, &document)?;
        }
        let body = serde_json::to_vec(&document)?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .inspect_err(|err| {
                tracing::warn!(endpoint = %self.config.endpoint, error = %err, "upload failed");
            })?;

        let status = response.status();
        let text = response.text().await?;
        if text != ACCEPTED_BODY {
            tracing::warn!(%variant, status = status.as_u16(), body = %text, "gateway rejected message");
            return Err(SendError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(%variant, schema_ref = %record.schema_ref, "message accepted");
        Ok(())
    }

    pub async fn send_journal(&self, event: JournalEvent) -> Result<()> {
        self.send(event).await
    }

    pub async fn send_shipyard(&self, message: ShipyardMessage) -> Result<()> {
        self.send(message).await
    }

    pub async fn send_commodity(&self, message: CommodityMessage) -> Result<()> {
        self.send(message).await
    }

    pub async fn send_blackmarket(&self, message: BlackmarketMessage) -> Result<()> {
        self.send(message).await
    }

    pub async fn send_outfitting(&self, message: OutfittingMessage) -> Result<()> {
        self.send(message).await
    }
}
