use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

/// Errors raised by a tracking sink. They never reach the caller of a
/// tracked method; the wrapper logs them instead.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("tracking channel closed")]
    ChannelClosed,

    #[error("payload rejected by sink: {0}")]
    Rejected(String),
}

type TrackFn<P> = dyn Fn(P) -> Result<(), TrackingError> + Send + Sync;

/// The `tracking` handle a context carries in its props.
///
/// Cloning is cheap; every clone feeds the same underlying sink.
pub struct Tracking<P> {
    track_event: Arc<TrackFn<P>>,
}

impl<P> Clone for Tracking<P> {
    fn clone(&self) -> Self {
        Self {
            track_event: Arc::clone(&self.track_event),
        }
    }
}

impl<P> fmt::Debug for Tracking<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracking").finish_non_exhaustive()
    }
}

impl<P: Send + 'static> Tracking<P> {
    pub fn new<F>(track_event: F) -> Self
    where
        F: Fn(P) -> Result<(), TrackingError> + Send + Sync + 'static,
    {
        Self {
            track_event: Arc::new(track_event),
        }
    }

    /// A sink that cannot fail.
    pub fn from_fn<F>(track_event: F) -> Self
    where
        F: Fn(P) + Send + Sync + 'static,
    {
        Self::new(move |payload| {
            track_event(payload);
            Ok(())
        })
    }

    /// Forwards every payload to an external consumer (transport, batcher, ...).
    pub fn channel(tx: mpsc::UnboundedSender<P>) -> Self {
        Self::new(move |payload| tx.send(payload).map_err(|_| TrackingError::ChannelClosed))
    }

    pub fn track_event(&self, payload: P) -> Result<(), TrackingError> {
        (self.track_event)(payload)
    }
}
