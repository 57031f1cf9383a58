use serde::Deserialize;
use thiserror::Error;

/// Which scan variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Quick,
    Deep,
}

/// One media item as reported by the scan provider. The shape mirrors the
/// JSON the chat model is asked to produce; every field except the URL is
/// best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DiscoveredMedia {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub size: Option<String>,
    pub source: Option<String>,
    pub thumbnail: Option<String>,
}

/// Progress report for one running transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferUpdate {
    pub download_id: String,
    pub progress: f32,
    pub speed: Option<String>,
    pub downloaded: Option<String>,
}

/// Events the engine emits back to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ScanCompleted {
        generation: u64,
        result: Result<Vec<DiscoveredMedia>, ScanError>,
    },
    TransferAdvanced(TransferUpdate),
    TransferCompleted {
        download_id: String,
    },
}

/// Scan failures surfaced to the user. Malformed model output is not among
/// them: that path recovers locally with fallback data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("invalid scan url: {0}")]
    InvalidUrl(String),
    #[error("scan request timed out")]
    Timeout,
    #[error("upstream call failed: {0}")]
    Upstream(String),
    #[error("upstream response malformed: {0}")]
    MalformedResponse(String),
}
