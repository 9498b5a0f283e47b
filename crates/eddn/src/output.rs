use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use eddn_message::{Message, Variant};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReceivedOutput<'a> {
    kind: &'static str,
    variant: Variant,
    schema_ref: &'a str,
    uploader_id: &'a str,
    gateway_timestamp: Option<&'a str>,
    summary: String,
    message: &'a Message,
}

#[derive(Serialize)]
struct SentOutput<'a> {
    kind: &'static str,
    variant: Variant,
    endpoint: &'a str,
    accepted: bool,
}

pub fn print_message(message: &Message, format: OutputFormat) {
    let header = message.header();
    match format {
        OutputFormat::Json => {
            let out = ReceivedOutput {
                kind: "message-received",
                variant: message.variant(),
                schema_ref: message.schema_ref(),
                uploader_id: &header.uploader_id,
                gateway_timestamp: header.gateway_timestamp.as_deref(),
                summary: message.summary(),
                message,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["VARIANT", "UPLOADER", "GATEWAY TIME", "SUMMARY"])
                .add_row(vec![
                    message.variant().to_string(),
                    header.uploader_id.clone(),
                    header.gateway_timestamp.clone().unwrap_or_default(),
                    message.summary(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "[{}] {} via {} {}: {}",
                header.gateway_timestamp.as_deref().unwrap_or("-"),
                message.variant(),
                header.software_name,
                header.software_version,
                message.summary()
            );
        }
    }
}

pub fn print_sent(variant: Variant, endpoint: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&SentOutput {
            kind: "message-sent",
            variant,
            endpoint,
            accepted: true,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["VARIANT", "ENDPOINT", "RESULT"])
                .add_row(vec![variant.to_string(), endpoint.to_string(), "OK".to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{variant} message accepted by {endpoint}"),
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
