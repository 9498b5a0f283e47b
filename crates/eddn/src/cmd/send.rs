use std::fs;

use eddn_message::{
    BlackmarketMessage, CommodityMessage, JournalEvent, OutfittingMessage, ShipyardMessage,
    Variant,
};
use eddn_schema::{RegistryConfig, SchemaRegistry};
use eddn_upload::{Identity, Uploader, UploaderConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cmd::SendArgs;
use crate::exit::{
    io_error, schema_error, send_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{print_sent, OutputFormat};

pub async fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let body = resolve_body(&args)?;

    let identity = Identity::new(
        args.uploader_id.as_str(),
        args.software_name.as_str(),
        args.software_version.as_str(),
    );
    // The variant being sent must have a schema, local or fetched.
    let schemas = RegistryConfig::default()
        .reject_unknown_fields(args.strict)
        .require_schema(true);
    let config = UploaderConfig {
        schemas,
        ..UploaderConfig::with_endpoint(&args.endpoint)
    };
    let mut uploader = Uploader::with_config(identity, config)
        .map_err(|err| send_error("uploader setup failed", err))?;

    if let Some(dir) = &args.schema_dir {
        let registry = SchemaRegistry::from_directory_with_config(dir, schemas)
            .map_err(|err| schema_error(&format!("loading schemas from {}", dir.display()), err))?;
        uploader = uploader.with_schema_registry(registry);
    } else if !args.no_validate {
        uploader = uploader
            .with_remote_schemas()
            .await
            .map_err(|err| send_error("fetching schemas failed", err))?;
    }

    let sent = match args.variant {
        Variant::Journal => uploader.send_journal(payload::<JournalEvent>(body)?).await,
        Variant::Shipyard => uploader.send_shipyard(payload::<ShipyardMessage>(body)?).await,
        Variant::Commodity => uploader.send_commodity(payload::<CommodityMessage>(body)?).await,
        Variant::Blackmarket => {
            uploader
                .send_blackmarket(payload::<BlackmarketMessage>(body)?)
                .await
        }
        Variant::Outfitting => {
            uploader
                .send_outfitting(payload::<OutfittingMessage>(body)?)
                .await
        }
    };
    sent.map_err(|err| send_error("send failed", err))?;

    print_sent(args.variant, uploader.endpoint(), format);
    Ok(SUCCESS)
}

fn resolve_body(args: &SendArgs) -> CliResult<Value> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?,
        (None, None) => return Err(CliError::new(USAGE, "one of --json or --file is required")),
    };
    serde_json::from_str(&text)
        .map_err(|err| CliError::new(USAGE, format!("message body is not valid JSON: {err}")))
}

fn payload<P: DeserializeOwned>(body: Value) -> CliResult<P> {
    serde_json::from_value(body)
        .map_err(|err| CliError::new(DATA_INVALID, format!("message body does not fit: {err}")))
}
