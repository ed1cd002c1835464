//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name, e.g. `"image_model"`.
    pub port: String,
    /// Method name, e.g. `"generate_content"`.
    pub method: String,
    /// Serialized request.
    #[serde(default)]
    pub input: serde_json::Value,
    /// `{"Ok": ...}` or `{"Err": "message"}`.
    pub output: serde_json::Value,
}
