use std::path::PathBuf;

use clap::{Args, Subcommand};
use eddn_message::Variant;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Subscribe to a relay and print received messages.
    Listen(ListenArgs),
    /// Validate and upload one message to the gateway.
    Send(SendArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub async fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Listen(args) => listen::run(args, format).await,
        Command::Send(args) => send::run(args, format).await,
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Variants to suppress (comma-separated).
    #[arg(long, value_delimiter = ',', conflicts_with = "only")]
    pub filter: Vec<Variant>,
    /// Deliver only these variants (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<Variant>,
    /// Relay endpoint.
    #[arg(
        long,
        env = "EDDN_RELAY",
        default_value = eddn_transport::RELAY_ENDPOINT
    )]
    pub relay: String,
    /// Seconds to wait for the relay to accept the connection.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub connect_timeout: u64,
    /// Exit after printing N messages.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message variant.
    pub variant: Variant,
    /// Message body as JSON.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the message body from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Uploader identifier (usually the commander name).
    #[arg(long)]
    pub uploader_id: String,
    #[arg(long, default_value = "eddn-cli")]
    pub software_name: String,
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    pub software_version: String,
    /// Upload gateway.
    #[arg(
        long,
        env = "EDDN_UPLOAD_ENDPOINT",
        default_value = eddn_upload::UPLOAD_ENDPOINT
    )]
    pub endpoint: String,
    /// Validate against schemas from this directory instead of fetching them.
    #[arg(long, value_name = "DIR", conflicts_with = "no_validate")]
    pub schema_dir: Option<PathBuf>,
    /// Skip schema validation.
    #[arg(long)]
    pub no_validate: bool,
    /// Fail validation on fields the schema does not declare.
    #[arg(long, conflicts_with = "no_validate")]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
