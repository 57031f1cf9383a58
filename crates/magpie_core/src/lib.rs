//! Magpie core: pure state machine for the media catalog, download queue and
//! selection set. No IO happens here; `update` consumes messages and returns
//! effects for the engine to execute.
mod effect;
mod media;
mod msg;
mod queue;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use media::{ingest, MediaDescriptor, MediaKind, ScanItem};
pub use msg::{Msg, ScanMode};
pub use queue::{DownloadQueue, DownloadRecord, DownloadStatus};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, DownloadRowView, MediaRowView, Notice, NoticeLevel};
