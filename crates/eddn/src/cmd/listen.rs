use std::time::Duration;

use eddn_message::FilterMask;
use eddn_subscriber::{open_with_config, Shutdown, SubscriberConfig};

use crate::cmd::ListenArgs;
use crate::exit::{subscriber_error, CliError, CliResult, SUCCESS, TRANSPORT_ERROR};
use crate::output::{print_message, OutputFormat};

pub async fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let filter = filter_mask(&args);
    let config = SubscriberConfig {
        connect_timeout: Duration::from_secs(args.connect_timeout),
        ..SubscriberConfig::with_relay(&args.relay)
    };
    let mut subscription = open_with_config(&config, filter)
        .await
        .map_err(|err| subscriber_error("subscribe failed", err))?;

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut printed = 0usize;

    loop {
        tokio::select! {
            signal = &mut interrupt => {
                if let Err(err) = signal {
                    tracing::warn!(error = %err, "signal handler failed");
                }
                tracing::info!("interrupted, closing subscription");
                break;
            }
            next = subscription.recv() => {
                let Some(message) = next else {
                    break;
                };
                print_message(&message, format);
                printed = printed.saturating_add(1);
                if args.count.is_some_and(|count| printed >= count) {
                    break;
                }
            }
        }
    }

    let reason = subscription
        .shutdown()
        .await
        .map_err(|err| subscriber_error("shutdown failed", err))?;
    tracing::debug!(?reason, printed, "listen finished");

    match reason {
        Shutdown::Requested => Ok(SUCCESS),
        Shutdown::TransportClosed => Err(CliError::new(
            TRANSPORT_ERROR,
            format!("relay {} closed the connection", args.relay),
        )),
    }
}

fn filter_mask(args: &ListenArgs) -> FilterMask {
    if args.only.is_empty() {
        args.filter.iter().copied().collect()
    } else {
        args.only
            .iter()
            .map(|variant| FilterMask::only(*variant))
            .fold(FilterMask::from_bits(u32::MAX), |mask, only| {
                FilterMask::from_bits(mask.bits() & only.bits())
            })
    }
}
