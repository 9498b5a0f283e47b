use eddn_message::{Blackmarket, Commodity, FilterMask, Journal, Message, Outfitting, Shipyard};
use eddn_transport::{Subscriber, ZmqSubscriber};
use tokio::sync::{mpsc, oneshot};

use crate::config::SubscriberConfig;
use crate::control::{ControlHandle, Shutdown};
use crate::error::{Result, SubscriberError};
use crate::router::{channels, Router};

/// Connect to the public relay and start routing.
///
/// Variants set in `filter` are decoded but never delivered.
pub async fn open(filter: FilterMask) -> Result<Subscription> {
    open_with_config(&SubscriberConfig::default(), filter).await
}

/// Connect to `config.relay_endpoint` and start routing.
///
/// Fails with [`SubscriberError::Connection`] when the endpoint is invalid
/// or the relay has not accepted within `config.connect_timeout`.
pub async fn open_with_config(
    config: &SubscriberConfig,
    filter: FilterMask,
) -> Result<Subscription> {
    let subscriber =
        ZmqSubscriber::connect_with_timeout(&config.relay_endpoint, config.connect_timeout)
            .await?;
    tracing::info!(endpoint = %config.relay_endpoint, filter = filter.bits(), "subscribed to relay");
    Ok(open_with_subscriber(subscriber, filter, config))
}

/// Start routing frames from an already connected subscriber.
///
/// Spawns the router on the current tokio runtime.
pub fn open_with_subscriber<S>(
    subscriber: S,
    filter: FilterMask,
    config: &SubscriberConfig,
) -> Subscription
where
    S: Subscriber + 'static,
{
    let endpoint = subscriber.endpoint().to_string();
    let (outlets, inlets) = channels(config.channel_capacity);
    let (control_tx, control_rx) = mpsc::channel(1);
    let (done_tx, done_rx) = oneshot::channel();

    let router = Router::new(subscriber, filter, config, outlets, control_rx);
    tokio::spawn(router.run(done_tx));

    Subscription {
        journal: inlets.journal,
        shipyard: inlets.shipyard,
        commodity: inlets.commodity,
        blackmarket: inlets.blackmarket,
        outfitting: inlets.outfitting,
        done: done_rx,
        control: ControlHandle::new(control_tx),
        filter,
        endpoint,
    }
}

/// Consumer side of a running subscription.
///
/// Each variant has its own bounded channel; a variant that is never read
/// eventually stalls the router, so read every channel the filter lets
/// through or drop its receiver. All channels close once the router exits.
///
/// Dropping the subscription (and every [`ControlHandle`] taken from it)
/// stops the router.
#[derive(Debug)]
pub struct Subscription {
    pub journal: mpsc::Receiver<Journal>,
    pub shipyard: mpsc::Receiver<Shipyard>,
    pub commodity: mpsc::Receiver<Commodity>,
    pub blackmarket: mpsc::Receiver<Blackmarket>,
    pub outfitting: mpsc::Receiver<Outfitting>,
    /// Resolves exactly once, when the router has stopped.
    pub done: oneshot::Receiver<Shutdown>,
    control: ControlHandle,
    filter: FilterMask,
    endpoint: String,
}

impl Subscription {
    /// A send-only handle to the router's control channel.
    pub fn control(&self) -> ControlHandle {
        self.control.clone()
    }

    /// Request shutdown without waiting for it. Await `done` to observe it.
    pub fn close(&self) {
        if !self.control.request_shutdown() {
            tracing::debug!("close on a router that already stopped");
        }
    }

    /// Request shutdown and wait for the router to report completion.
    ///
    /// Data channels are dropped first so a router blocked on a full
    /// channel can make progress. Do not call this after awaiting `done`
    /// yourself; use [`close`](Self::close) instead.
    pub async fn shutdown(self) -> Result<Shutdown> {
        let Subscription {
            journal,
            shipyard,
            commodity,
            blackmarket,
            outfitting,
            done,
            control,
            ..
        } = self;
        drop((journal, shipyard, commodity, blackmarket, outfitting));

        control.request_shutdown();
        done.await.map_err(|_| SubscriberError::Terminated)
    }

    /// Wait for the next message on any variant channel.
    ///
    /// Returns `None` once every channel is closed. No ordering is
    /// guaranteed across variants.
    pub async fn recv(&mut self) -> Option<Message> {
        tokio::select! {
            Some(record) = self.journal.recv() => Some(Message::Journal(record)),
            Some(record) = self.shipyard.recv() => Some(Message::Shipyard(record)),
            Some(record) = self.commodity.recv() => Some(Message::Commodity(record)),
            Some(record) = self.blackmarket.recv() => Some(Message::Blackmarket(record)),
            Some(record) = self.outfitting.recv() => Some(Message::Outfitting(record)),
            else => None,
        }
    }

    /// The suppression mask this subscription was opened with.
    pub fn filter(&self) -> FilterMask {
        self.filter
    }

    /// Where frames are coming from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
