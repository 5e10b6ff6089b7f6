#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::Value;
use track_event::config::RecorderConfig;
use track_event::{Instance, ProvidesTracking, Tracking, TrackingRecorder};

pub struct PageProps {
    pub name: &'static str,
    pub tracking: Option<Tracking<Value>>,
}

impl ProvidesTracking for PageProps {
    type Payload = Value;

    fn tracking(&self) -> Option<&Tracking<Value>> {
        self.tracking.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub x: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure(pub &'static str);

pub type Page = Instance<PageProps, PageState>;

/// A page whose sink records into the returned recorder.
pub fn recorded_page(state: Option<PageState>) -> (Arc<Page>, TrackingRecorder<Value>) {
    let recorder = TrackingRecorder::new(&RecorderConfig::default());
    let props = PageProps {
        name: "home",
        tracking: Some(recorder.sink()),
    };
    let page = match state {
        Some(state) => Instance::with_state(props, state),
        None => Instance::new(props),
    };
    (Arc::new(page), recorder)
}

/// A page whose sink appends `track:<payload>` to a shared call log.
pub fn logged_page(log: &Arc<Mutex<Vec<String>>>) -> Arc<Page> {
    let log = Arc::clone(log);
    let sink = Tracking::from_fn(move |payload: Value| {
        log.lock().unwrap().push(format!("track:{}", payload));
    });
    Arc::new(Instance::with_state(
        PageProps {
            name: "home",
            tracking: Some(sink),
        },
        PageState { x: 0 },
    ))
}

pub fn position(log: &[String], entry: &str) -> usize {
    log.iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("{entry} missing from {log:?}"))
}
