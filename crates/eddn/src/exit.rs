use std::fmt;
use std::io;

use eddn_schema::SchemaError;
use eddn_subscriber::SubscriberError;
use eddn_transport::TransportError;
use eddn_upload::SendError;

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::TimedOut => TIMEOUT,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn subscriber_error(context: &str, err: SubscriberError) -> CliError {
    let code = match err {
        SubscriberError::Connection(TransportError::ConnectTimeout { .. }) => TIMEOUT,
        SubscriberError::Connection(_) => TRANSPORT_ERROR,
        SubscriberError::Terminated => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match err {
        SchemaError::LoadFailed(_) => USAGE,
        SchemaError::NoSchema(_) => USAGE,
        SchemaError::CompileFailed(_) => INTERNAL,
        SchemaError::ValidationFailed { .. } | SchemaError::InvalidJson(_) => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn send_error(context: &str, err: SendError) -> CliError {
    match err {
        SendError::Validation(err) => schema_error(context, err),
        SendError::Json(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        SendError::Http(ref source) if source.is_timeout() => {
            CliError::new(TIMEOUT, format!("{context}: {err}"))
        }
        SendError::Http(_) | SendError::SchemaFetch { .. } => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
        SendError::Rejected { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        SendError::Client(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}
