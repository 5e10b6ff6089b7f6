mod support;

use std::sync::Arc;

use serde_json::{json, Value};
use support::{recorded_page, Failure, Page};
use tokio::sync::mpsc;
use track_event::config::{LogConfig, RecorderConfig};
use track_event::tracking::recorder::RecorderSnapshot;
use track_event::{track_event, Completion, Tracking, TrackingData, TrackingError, TrackingRecorder};

#[test]
fn test_recorder_evicts_oldest() {
    let recorder = TrackingRecorder::new(&RecorderConfig { capacity: 3 });
    let sink = recorder.sink();

    for n in 0..5 {
        sink.track_event(json!(n)).unwrap();
    }

    assert_eq!(recorder.events(), vec![json!(2), json!(3), json!(4)]);
    assert_eq!(
        recorder.snapshot(),
        RecorderSnapshot {
            recorded: 5,
            retained: 3,
            evicted: 2,
        }
    );
}

#[test]
fn test_recorder_zero_capacity_keeps_latest() {
    let recorder = TrackingRecorder::new(&RecorderConfig { capacity: 0 });
    recorder.record("first");
    recorder.record("second");

    assert_eq!(recorder.capacity(), 1);
    assert_eq!(recorder.events(), vec!["second"]);
    assert_eq!(recorder.evicted(), 1);
}

#[test]
fn test_recorder_clear() {
    let (page, recorder) = recorded_page(None);
    let data: TrackingData<Page, (), (), Failure> = TrackingData::fixed(json!("tick"));
    let method = track_event(data).wrap(|_page: &Arc<Page>, _args: ()| Ok(Completion::immediate(())));

    method.call(&page, ()).unwrap();
    method.call(&page, ()).unwrap();
    assert_eq!(recorder.len(), 2);

    recorder.clear();
    assert!(recorder.is_empty());
    assert_eq!(recorder.snapshot(), RecorderSnapshot::default());
}

#[tokio::test]
async fn test_channel_sink_forwards_payloads() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = Tracking::channel(tx);

    sink.track_event(json!({ "event": "a" })).unwrap();
    sink.track_event(json!({ "event": "b" })).unwrap();

    assert_eq!(rx.recv().await, Some(json!({ "event": "a" })));
    assert_eq!(rx.recv().await, Some(json!({ "event": "b" })));

    drop(rx);
    let error = sink.track_event(json!({ "event": "c" })).unwrap_err();
    assert!(matches!(error, TrackingError::ChannelClosed));
}

#[test]
fn test_default_tracking_data_is_empty_payload() {
    let data: TrackingData<Page, (), (), Failure> = TrackingData::default();
    assert!(matches!(data, TrackingData::Fixed(Value::Null)));
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let recorder: RecorderConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(recorder.capacity, 10_000);

    let recorder: RecorderConfig = serde_json::from_str(r#"{ "capacity": 8 }"#).unwrap();
    assert_eq!(recorder.capacity, 8);

    let log: LogConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(log.default_directive, "info");
}
