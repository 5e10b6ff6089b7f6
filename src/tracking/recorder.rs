use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::sink::Tracking;
use crate::config::RecorderConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderSnapshot {
    /// Payloads received since creation (or the last `clear`).
    pub recorded: u64,
    /// Payloads currently held.
    pub retained: usize,
    /// Payloads dropped to stay within capacity.
    pub evicted: u64,
}

#[derive(Debug)]
struct Buffer<P> {
    events: VecDeque<P>,
    recorded: u64,
    evicted: u64,
}

/// Bounded in-memory sink. Once full, the oldest payload is evicted.
#[derive(Debug)]
pub struct TrackingRecorder<P> {
    buffer: Arc<Mutex<Buffer<P>>>,
    capacity: usize,
}

impl<P> Clone for TrackingRecorder<P> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            capacity: self.capacity,
        }
    }
}

impl<P: Send + 'static> TrackingRecorder<P> {
    pub fn new(config: &RecorderConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            buffer: Arc::new(Mutex::new(Buffer {
                events: VecDeque::with_capacity(capacity),
                recorded: 0,
                evicted: 0,
            })),
            capacity,
        }
    }

    pub fn record(&self, payload: P) {
        let mut buffer = self.lock();
        if buffer.events.len() >= self.capacity {
            buffer.events.pop_front();
            buffer.evicted += 1;
        }
        buffer.events.push_back(payload);
        buffer.recorded += 1;
    }

    /// A `tracking` sink that records into this buffer.
    pub fn sink(&self) -> Tracking<P> {
        let recorder = self.clone();
        Tracking::from_fn(move |payload| recorder.record(payload))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn evicted(&self) -> u64 {
        self.lock().evicted
    }

    pub fn snapshot(&self) -> RecorderSnapshot {
        let buffer = self.lock();
        RecorderSnapshot {
            recorded: buffer.recorded,
            retained: buffer.events.len(),
            evicted: buffer.evicted,
        }
    }

    pub fn clear(&self) {
        let mut buffer = self.lock();
        buffer.events.clear();
        buffer.recorded = 0;
        buffer.evicted = 0;
    }

    fn lock(&self) -> MutexGuard<'_, Buffer<P>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Clone + Send + 'static> TrackingRecorder<P> {
    /// Retained payloads, oldest first.
    pub fn events(&self) -> Vec<P> {
        self.lock().events.iter().cloned().collect()
    }
}
