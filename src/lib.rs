pub mod config;
pub mod tracking;

// Re-export specific items for convenient access
pub use tracking::completion::Completion;
pub use tracking::context::{Instance, ProvidesTracking, TrackingContext};
pub use tracking::data::{Settlement, TrackingData};
pub use tracking::recorder::TrackingRecorder;
pub use tracking::sink::{Tracking, TrackingError};
pub use tracking::wrapper::{track_event, TrackEvent, TrackedMethod};
