use crate::msg::ScanMode;

/// IO requested by `update`, executed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the scan provider to analyze `url`. Responses carry the
    /// generation back so stale scans can be discarded.
    StartScan {
        generation: u64,
        url: String,
        mode: ScanMode,
    },
    /// Start (or restart after a pause) the transfer for a download.
    StartTransfer {
        download_id: String,
        resume_from: f32,
    },
    /// Stop ticking the transfer for a download, if one is running.
    StopTransfer { download_id: String },
}
