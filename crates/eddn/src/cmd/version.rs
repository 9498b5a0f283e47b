use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("eddn {}", env!("CARGO_PKG_VERSION"));
    if !args.extended {
        return Ok(SUCCESS);
    }

    println!("target: {}", option_env!("EDDN_BUILD_TARGET").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("relay: {}", eddn_transport::RELAY_ENDPOINT);
    println!("gateway: {}", eddn_upload::UPLOAD_ENDPOINT);
    println!(
        "schemas: {}",
        eddn_message::Variant::ALL
            .iter()
            .map(|variant| eddn_message::current_schema_ref(*variant))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(SUCCESS)
}
