use serde::Deserialize;

const DEFAULT_RECORDER_CAPACITY: usize = 10_000;

/// Sizing for `TrackingRecorder`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Payloads retained before the oldest is evicted. Zero is treated as one.
    pub capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_RECORDER_CAPACITY,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub default_directive: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
        }
    }
}
