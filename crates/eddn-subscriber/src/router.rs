use std::time::Duration;

use eddn_frame::{decode_with_config, FrameConfig};
use eddn_message::{Blackmarket, Commodity, FilterMask, Journal, Message, Outfitting, Shipyard};
use eddn_transport::Subscriber;
use tokio::sync::{mpsc, oneshot};

use crate::config::SubscriberConfig;
use crate::control::{ControlMessage, Shutdown};

/// Sending halves of the per-variant channels, owned by the router.
pub(crate) struct Outlets {
    journal: mpsc::Sender<Journal>,
    shipyard: mpsc::Sender<Shipyard>,
    commodity: mpsc::Sender<Commodity>,
    blackmarket: mpsc::Sender<Blackmarket>,
    outfitting: mpsc::Sender<Outfitting>,
}

/// Receiving halves handed to the subscription.
pub(crate) struct Inlets {
    pub(crate) journal: mpsc::Receiver<Journal>,
    pub(crate) shipyard: mpsc::Receiver<Shipyard>,
    pub(crate) commodity: mpsc::Receiver<Commodity>,
    pub(crate) blackmarket: mpsc::Receiver<Blackmarket>,
    pub(crate) outfitting: mpsc::Receiver<Outfitting>,
}

pub(crate) fn channels(capacity: usize) -> (Outlets, Inlets) {
    let capacity = capacity.max(1);
    let (journal_tx, journal_rx) = mpsc::channel(capacity);
    let (shipyard_tx, shipyard_rx) = mpsc::channel(capacity);
    let (commodity_tx, commodity_rx) = mpsc::channel(capacity);
    let (blackmarket_tx, blackmarket_rx) = mpsc::channel(capacity);
    let (outfitting_tx, outfitting_rx) = mpsc::channel(capacity);

    (
        Outlets {
            journal: journal_tx,
            shipyard: shipyard_tx,
            commodity: commodity_tx,
            blackmarket: blackmarket_tx,
            outfitting: outfitting_tx,
        },
        Inlets {
            journal: journal_rx,
            shipyard: shipyard_rx,
            commodity: commodity_rx,
            blackmarket: blackmarket_rx,
            outfitting: outfitting_rx,
        },
    )
}

#[derive(Debug, Default)]
struct RouterStats {
    frames: u64,
    delivered: u64,
    filtered: u64,
    decode_errors: u64,
    discarded: u64,
}

enum Delivery {
    Sent,
    /// The consumer dropped the receiver for this variant.
    Discarded,
    /// A shutdown request arrived while waiting for channel capacity.
    Interrupted,
}

/// Single worker moving frames from the subscriber to the variant channels.
pub(crate) struct Router<S> {
    subscriber: S,
    filter: FilterMask,
    frame: FrameConfig,
    retry_delay: Duration,
    outlets: Outlets,
    control: mpsc::Receiver<ControlMessage>,
    stats: RouterStats,
}

impl<S: Subscriber> Router<S> {
    pub(crate) fn new(
        subscriber: S,
        filter: FilterMask,
        config: &SubscriberConfig,
        outlets: Outlets,
        control: mpsc::Receiver<ControlMessage>,
    ) -> Self {
        Self {
            subscriber,
            filter,
            frame: config.frame,
            retry_delay: config.recv_retry_delay,
            outlets,
            control,
            stats: RouterStats::default(),
        }
    }

    /// Route until shutdown, report completion, then close every channel.
    pub(crate) async fn run(mut self, done: oneshot::Sender<Shutdown>) {
        let reason = self.route().await;

        tracing::info!(
            endpoint = self.subscriber.endpoint(),
            ?reason,
            frames = self.stats.frames,
            delivered = self.stats.delivered,
            filtered = self.stats.filtered,
            decode_errors = self.stats.decode_errors,
            discarded = self.stats.discarded,
            "router stopped"
        );

        if done.send(reason).is_err() {
            tracing::debug!("completion receiver already dropped");
        }
        // Dropping self closes the outlets and the control receiver.
    }

    async fn route(&mut self) -> Shutdown {
        loop {
            let received = tokio::select! {
                biased;
                request = self.control.recv() => {
                    log_request(request);
                    return Shutdown::Requested;
                }
                received = self.subscriber.recv() => received,
            };

            let raw = match received {
                Ok(raw) => raw,
                Err(error) if error.is_fatal() => {
                    tracing::warn!(%error, "transport closed");
                    return Shutdown::TransportClosed;
                }
                Err(error) => {
                    tracing::warn!(%error, "transport receive failed");
                    if self.pause().await {
                        return Shutdown::Requested;
                    }
                    continue;
                }
            };
            self.stats.frames += 1;

            let message = match decode_with_config(&raw, &self.frame) {
                Ok(message) => message,
                Err(error) => {
                    self.stats.decode_errors += 1;
                    tracing::warn!(%error, kind = error.kind(), "dropping undecodable frame");
                    continue;
                }
            };

            let variant = message.variant();
            if self.filter.suppresses(variant) {
                self.stats.filtered += 1;
                tracing::trace!(%variant, "filtered");
                continue;
            }

            match self.deliver(message).await {
                Delivery::Sent => self.stats.delivered += 1,
                Delivery::Discarded => {
                    self.stats.discarded += 1;
                    tracing::debug!(%variant, "receiver dropped, message discarded");
                }
                Delivery::Interrupted => return Shutdown::Requested,
            }
        }
    }

    async fn deliver(&mut self, message: Message) -> Delivery {
        let control = &mut self.control;
        match message {
            Message::Journal(r) => forward(&self.outlets.journal, r, control).await,
            Message::Shipyard(r) => forward(&self.outlets.shipyard, r, control).await,
            Message::Commodity(r) => forward(&self.outlets.commodity, r, control).await,
            Message::Blackmarket(r) => forward(&self.outlets.blackmarket, r, control).await,
            Message::Outfitting(r) => forward(&self.outlets.outfitting, r, control).await,
        }
    }

    /// Sleep before the next receive; true if shutdown was requested meanwhile.
    async fn pause(&mut self) -> bool {
        tokio::select! {
            biased;
            request = self.control.recv() => {
                log_request(request);
                true
            }
            _ = tokio::time::sleep(self.retry_delay) => false,
        }
    }
}

async fn forward<T>(
    outlet: &mpsc::Sender<T>,
    item: T,
    control: &mut mpsc::Receiver<ControlMessage>,
) -> Delivery {
    tokio::select! {
        biased;
        request = control.recv() => {
            log_request(request);
            Delivery::Interrupted
        }
        sent = outlet.send(item) => match sent {
            Ok(()) => Delivery::Sent,
            Err(_) => Delivery::Discarded,
        },
    }
}

fn log_request(request: Option<ControlMessage>) {
    match request {
        Some(ControlMessage::Shutdown) => tracing::debug!("shutdown requested"),
        None => tracing::debug!("control handles dropped, shutting down"),
    }
}

