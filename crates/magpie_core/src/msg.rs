use crate::media::ScanItem;

/// Which scan variant to run against the scan provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Single-pass scan for obvious media files.
    Quick,
    /// Multi-step crawl through linked pages.
    Deep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User requested a scan of the current URL input.
    ScanRequested { mode: ScanMode },
    /// Scan provider delivered results for a scan generation.
    ScanFinished { generation: u64, items: Vec<ScanItem> },
    /// Scan provider failed for a scan generation.
    ScanFailed { generation: u64, reason: String },
    /// User toggled one catalog item's selection checkbox.
    SelectionToggled { media_id: String },
    /// User clicked Select All / Deselect All.
    SelectAllToggled,
    /// User requested a download of one catalog item.
    DownloadRequested { media_id: String },
    /// User requested downloads for every selected item.
    BatchDownloadRequested,
    /// User paused a download.
    PauseRequested { download_id: String },
    /// User resumed a paused download.
    ResumeRequested { download_id: String },
    /// User removed a download from the queue.
    RemoveRequested { download_id: String },
    /// Transfer engine progress for a download.
    TransferAdvanced {
        download_id: String,
        progress: f32,
        speed: Option<String>,
        downloaded: Option<String>,
    },
    /// Transfer engine completion for a download.
    TransferCompleted { download_id: String },
    /// Transfer engine failure for a download.
    TransferFailed { download_id: String, reason: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
