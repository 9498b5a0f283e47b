use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use eddn_frame::deflate;
use eddn_message::schema_ref::{
    BLACKMARKET_V1, COMMODITY_V1, COMMODITY_V3, JOURNAL_V1, OUTFITTING_V2, SHIPYARD_V2,
};
use eddn_message::{FilterMask, JournalEvent, Message, Variant};
use eddn_subscriber::{open_with_subscriber, Shutdown, SubscriberConfig, Subscription};
use eddn_transport::{memory_pair, FramePublisher, Subscriber, TransportError};
use serde_json::{json, Value};

const WAIT: Duration = Duration::from_secs(5);

fn frame(schema_ref: &str, message: Value) -> Bytes {
    let document = json!({
        "$schemaRef": schema_ref,
        "header": {
            "gatewayTimestamp": "2017-03-02T10:00:00Z",
            "softwareName": "router-test",
            "softwareVersion": "0.1",
            "uploaderID": "cmdr"
        },
        "message": message
    });
    Bytes::from(deflate(&serde_json::to_vec(&document).unwrap()).unwrap())
}

fn sol_jump() -> Bytes {
    frame(
        JOURNAL_V1,
        json!({
            "event": "FSDJump",
            "timestamp": "2017-03-02T10:00:00Z",
            "StarSystem": "Sol",
            "StarPos": [0.0, 0.0, 0.0],
            "SystemAllegiance": "Federation"
        }),
    )
}

fn shipyard(station: &str) -> Bytes {
    frame(
        SHIPYARD_V2,
        json!({
            "systemName": "Lave",
            "stationName": station,
            "timestamp": "2017-03-02T10:00:00Z",
            "ships": ["sidewinder", "eagle"]
        }),
    )
}

fn commodity() -> Bytes {
    frame(
        COMMODITY_V3,
        json!({
            "systemName": "Lave",
            "stationName": "Lave Station",
            "timestamp": "2017-03-02T10:00:00Z",
            "commodities": [{
                "name": "Gold",
                "buyPrice": 9000,
                "sellPrice": 8800,
                "meanPrice": 9100,
                "stock": 20,
                "stockBracket": 1,
                "demand": 0,
                "demandBracket": 0
            }]
        }),
    )
}

fn blackmarket() -> Bytes {
    frame(
        BLACKMARKET_V1,
        json!({
            "systemName": "Lave",
            "stationName": "Lave Station",
            "timestamp": "2017-03-02T10:00:00Z",
            "name": "Slaves",
            "sellPrice": 14000,
            "prohibited": true
        }),
    )
}

fn outfitting() -> Bytes {
    frame(
        OUTFITTING_V2,
        json!({
            "systemName": "Lave",
            "stationName": "Lave Station",
            "timestamp": "2017-03-02T10:00:00Z",
            "modules": ["Hpt_PulseLaser_Fixed_Small", "Int_Engine_Size2_Class1"]
        }),
    )
}

fn open(filter: FilterMask) -> (FramePublisher, Subscription) {
    let (publisher, subscriber) = memory_pair(16);
    let subscription = open_with_subscriber(subscriber, filter, &SubscriberConfig::default());
    (publisher, subscription)
}

async fn within<F: std::future::Future>(future: F) -> F::Output {
    tokio::time::timeout(WAIT, future)
        .await
        .expect("timed out waiting for the router")
}

#[tokio::test]
async fn fsd_jump_to_sol_arrives_on_journal_channel() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    publisher.publish(sol_jump()).await.unwrap();

    let record = within(sub.journal.recv()).await.unwrap();
    assert_eq!(record.schema_ref, JOURNAL_V1);
    assert_eq!(record.header.uploader_id, "cmdr");
    match record.message {
        JournalEvent::FsdJump(jump) => {
            assert_eq!(jump.star_system, "Sol");
            assert_eq!(jump.star_pos, [0.0, 0.0, 0.0]);
            assert_eq!(jump.system_allegiance.as_deref(), Some("Federation"));
        }
        other => panic!("expected FSDJump, got {other:?}"),
    }

    sub.close();
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::Requested);
    assert!(sub.shipyard.recv().await.is_none());
    assert!(sub.commodity.recv().await.is_none());
    assert!(sub.blackmarket.recv().await.is_none());
    assert!(sub.outfitting.recv().await.is_none());
}

#[tokio::test]
async fn journal_filter_lets_every_other_variant_through() {
    let (publisher, mut sub) = open(FilterMask::JOURNAL);
    for frame in [
        sol_jump(),
        shipyard("Lave Station"),
        commodity(),
        blackmarket(),
        outfitting(),
    ] {
        publisher.publish(frame).await.unwrap();
    }

    let shipyard = within(sub.shipyard.recv()).await.unwrap();
    assert_eq!(shipyard.message.ships, vec!["sidewinder", "eagle"]);
    let commodity = within(sub.commodity.recv()).await.unwrap();
    assert_eq!(commodity.message.commodities[0].name, "Gold");
    let blackmarket = within(sub.blackmarket.recv()).await.unwrap();
    assert_eq!(blackmarket.schema_ref, BLACKMARKET_V1);
    assert_eq!(blackmarket.message.name, "Slaves");
    assert!(blackmarket.message.prohibited);
    let outfitting = within(sub.outfitting.recv()).await.unwrap();
    assert_eq!(outfitting.schema_ref, OUTFITTING_V2);
    assert_eq!(outfitting.message.modules.len(), 2);

    sub.close();
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::Requested);
    assert!(sub.journal.recv().await.is_none());
}

#[tokio::test]
async fn suppressed_variants_are_never_delivered() {
    let (publisher, mut sub) = open(FilterMask::JOURNAL | FilterMask::COMMODITY);
    assert_eq!(sub.filter(), FilterMask::JOURNAL | FilterMask::COMMODITY);

    publisher.publish(sol_jump()).await.unwrap();
    publisher.publish(commodity()).await.unwrap();
    publisher.publish(shipyard("Lave Station")).await.unwrap();

    let record = within(sub.shipyard.recv()).await.unwrap();
    assert_eq!(record.message.station_name, "Lave Station");

    let reason = within(sub.shutdown()).await.unwrap();
    assert_eq!(reason, Shutdown::Requested);
}

#[tokio::test]
async fn suppressed_channels_stay_empty_until_close() {
    let (publisher, mut sub) = open(FilterMask::only(Variant::Shipyard));
    publisher.publish(sol_jump()).await.unwrap();
    publisher.publish(shipyard("Lave Station")).await.unwrap();

    within(sub.shipyard.recv()).await.unwrap();
    sub.close();
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::Requested);

    // Only the shipyard variant was let through.
    assert!(sub.journal.recv().await.is_none());
    assert!(sub.commodity.recv().await.is_none());
}

#[tokio::test]
async fn undecodable_frames_are_skipped() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    publisher.publish(Bytes::from_static(b"not zlib at all")).await.unwrap();
    publisher
        .publish(frame("http://example.com/schemas/unknown/1", json!({})))
        .await
        .unwrap();
    publisher.publish(frame(COMMODITY_V1, json!({}))).await.unwrap();
    publisher
        .publish(frame(SHIPYARD_V2, json!({"systemName": "Lave"})))
        .await
        .unwrap();
    publisher.publish(commodity()).await.unwrap();

    let record = within(sub.commodity.recv()).await.unwrap();
    assert_eq!(record.schema_ref, COMMODITY_V3);
    assert_eq!(record.message.commodities[0].name, "Gold");

    sub.close();
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::Requested);
    assert!(sub.shipyard.recv().await.is_none());
}

#[tokio::test]
async fn close_signals_completion_once_and_closes_every_channel() {
    let (_publisher, mut sub) = open(FilterMask::NONE);

    sub.close();
    sub.close();
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::Requested);

    assert!(sub.journal.recv().await.is_none());
    assert!(sub.shipyard.recv().await.is_none());
    assert!(sub.commodity.recv().await.is_none());
    assert!(sub.blackmarket.recv().await.is_none());
    assert!(sub.outfitting.recv().await.is_none());
    assert!(sub.recv().await.is_none());
}

#[tokio::test]
async fn closed_transport_ends_the_subscription() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    publisher.publish(sol_jump()).await.unwrap();
    drop(publisher);

    // Buffered frames are still routed before the close is observed.
    assert!(within(sub.journal.recv()).await.is_some());
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::TransportClosed);
    assert!(sub.recv().await.is_none());
}

#[tokio::test]
async fn same_variant_order_is_preserved() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    let stations: Vec<String> = (0..8).map(|i| format!("Station {i}")).collect();

    let frames: Vec<Bytes> = stations.iter().map(|name| shipyard(name)).collect();
    let feeder = tokio::spawn(async move {
        for frame in frames {
            publisher.publish(frame).await.unwrap();
        }
        publisher
    });

    for expected in &stations {
        let record = within(sub.shipyard.recv()).await.unwrap();
        assert_eq!(&record.message.station_name, expected);
    }

    let _publisher = feeder.await.unwrap();
    assert_eq!(within(sub.shutdown()).await.unwrap(), Shutdown::Requested);
}

#[tokio::test]
async fn shutdown_succeeds_while_router_waits_on_full_channel() {
    let (publisher, sub) = open(FilterMask::NONE);
    for _ in 0..4 {
        publisher.publish(sol_jump()).await.unwrap();
    }
    // Let the router fill the journal channel and block on the next send.
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(within(sub.shutdown()).await.unwrap(), Shutdown::Requested);
}

#[tokio::test]
async fn closed_receiver_discards_only_its_variant() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    sub.journal.close();

    publisher.publish(sol_jump()).await.unwrap();
    publisher.publish(shipyard("After Journal")).await.unwrap();

    let record = within(sub.shipyard.recv()).await.unwrap();
    assert_eq!(record.message.station_name, "After Journal");
}

#[tokio::test]
async fn dropping_the_subscription_stops_the_router() {
    let (_publisher, sub) = open(FilterMask::NONE);
    let done = {
        let sub = sub;
        let Subscription { done, .. } = sub;
        done
    };

    assert_eq!(within(done).await.unwrap(), Shutdown::Requested);
}

#[tokio::test]
async fn recv_merges_every_variant() {
    let (publisher, mut sub) = open(FilterMask::NONE);
    publisher.publish(sol_jump()).await.unwrap();
    publisher.publish(commodity()).await.unwrap();

    let mut seen = vec![
        within(sub.recv()).await.unwrap().variant(),
        within(sub.recv()).await.unwrap().variant(),
    ];
    seen.sort();
    assert_eq!(seen, vec![Variant::Journal, Variant::Commodity]);
}

/// Fails once with a transient error, then replays the given frames.
struct FlakySubscriber {
    failed: bool,
    frames: Vec<Bytes>,
}

#[async_trait]
impl Subscriber for FlakySubscriber {
    async fn recv(&mut self) -> eddn_transport::Result<Bytes> {
        if !self.failed {
            self.failed = true;
            return Err(TransportError::EmptyMessage);
        }
        if self.frames.is_empty() {
            return Err(TransportError::Closed);
        }
        Ok(self.frames.remove(0))
    }

    fn endpoint(&self) -> &str {
        "flaky://"
    }
}

#[tokio::test]
async fn transient_transport_errors_are_skipped() {
    let subscriber = FlakySubscriber {
        failed: false,
        frames: vec![shipyard("Recovered")],
    };
    let config = SubscriberConfig {
        recv_retry_delay: Duration::from_millis(1),
        ..SubscriberConfig::default()
    };
    let mut sub = open_with_subscriber(subscriber, FilterMask::NONE, &config);
    assert_eq!(sub.endpoint(), "flaky://");

    match within(sub.recv()).await {
        Some(Message::Shipyard(record)) => assert_eq!(record.message.station_name, "Recovered"),
        other => panic!("expected shipyard message, got {other:?}"),
    }
    assert_eq!(within(&mut sub.done).await.unwrap(), Shutdown::TransportClosed);
}
