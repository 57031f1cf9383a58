//! Magpie engine: scan provider and transfer engine behind a command/event
//! channel pair. The scan provider asks a chat-completions service what media
//! a page contains and fails open to demo data; the transfer engine is a
//! simulated progress source behind the substitutable `ProgressSource` seam.
mod demo;
mod engine;
mod scan;
mod transfer;
mod types;

pub use demo::{deep_demo_media, quick_demo_media};
pub use engine::{EngineHandle, EngineSettings};
pub use scan::{ChatScanner, ScanProvider, ScanSettings};
pub use transfer::{
    ChannelProgressSink, ProgressSink, ProgressSource, SimulatedTransfer, TransferSettings,
};
pub use types::{DiscoveredMedia, EngineEvent, ScanError, ScanMode, TransferUpdate};
