use crate::media::MediaKind;
use crate::queue::DownloadStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line user-facing status message, toast-style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Render snapshot of the whole app state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub input_url: String,
    pub scanning: bool,
    pub notice: Option<Notice>,
    pub media: Vec<MediaRowView>,
    pub downloads: Vec<DownloadRowView>,
    pub selected_count: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRowView {
    pub media_id: String,
    pub title: String,
    pub url: String,
    pub kind: MediaKind,
    pub size: Option<String>,
    pub source: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRowView {
    pub download_id: String,
    pub title: String,
    pub kind: MediaKind,
    pub status: DownloadStatus,
    pub progress: f32,
    pub speed: Option<String>,
    pub downloaded: Option<String>,
}
