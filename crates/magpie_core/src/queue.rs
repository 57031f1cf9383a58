use crate::media::MediaDescriptor;

/// Lifecycle of one download record. `Completed` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Pending,
    Downloading,
    Paused,
    Completed,
    Error,
}

impl DownloadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            DownloadStatus::Pending => "pending",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Paused => "paused",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Error => "error",
        }
    }
}

/// Per-item transfer state. The identifier is inherited from the descriptor;
/// progress is a percentage in [0, 100] and never decreases while downloading.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRecord {
    pub media: MediaDescriptor,
    pub status: DownloadStatus,
    pub progress: f32,
    pub speed: Option<String>,
    pub downloaded: Option<String>,
}

impl DownloadRecord {
    fn new(media: MediaDescriptor) -> Self {
        Self {
            media,
            status: DownloadStatus::Pending,
            progress: 0.0,
            speed: None,
            downloaded: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.media.id
    }
}

/// Insertion-ordered collection of download records; one record per
/// descriptor id. All mutations go through the methods below so the status
/// transitions stay legal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadQueue {
    records: Vec<DownloadRecord>,
}

impl DownloadQueue {
    /// Adds a record for the descriptor and marks it downloading: the
    /// transfer is started in the same update step. Returns false when a
    /// record with this id already exists.
    pub fn enqueue(&mut self, media: MediaDescriptor) -> bool {
        if self.get(&media.id).is_some() {
            return false;
        }
        let mut record = DownloadRecord::new(media);
        record.status = DownloadStatus::Downloading;
        self.records.push(record);
        true
    }

    /// Pause is valid only while downloading; anything else is rejected
    /// without a state change.
    pub fn pause(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(record) if record.status == DownloadStatus::Downloading => {
                record.status = DownloadStatus::Paused;
                record.speed = None;
                true
            }
            _ => false,
        }
    }

    /// Resume is valid only while paused. Returns the progress value the
    /// transfer should continue from (not zero).
    pub fn resume(&mut self, id: &str) -> Option<f32> {
        match self.find_mut(id) {
            Some(record) if record.status == DownloadStatus::Paused => {
                record.status = DownloadStatus::Downloading;
                Some(record.progress)
            }
            _ => None,
        }
    }

    /// Valid in any status. Removing an unknown id is a no-op so the UI's
    /// remove-twice race stays silent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        self.records.len() != before
    }

    /// Applies a progress report. Ignored unless the record exists and is
    /// downloading, which makes a pause or remove issued by the user win over
    /// any tick still in flight. Progress is clamped to [0, 100], never
    /// decreases, and reaching 100 completes the record exactly once.
    pub fn advance(
        &mut self,
        id: &str,
        progress: f32,
        speed: Option<String>,
        downloaded: Option<String>,
    ) -> bool {
        let Some(record) = self.find_mut(id) else {
            return false;
        };
        if record.status != DownloadStatus::Downloading {
            return false;
        }

        record.progress = progress.clamp(0.0, 100.0).max(record.progress);
        record.speed = speed;
        record.downloaded = downloaded;
        if record.progress >= 100.0 {
            record.progress = 100.0;
            record.status = DownloadStatus::Completed;
            record.speed = None;
        }
        true
    }

    /// Marks a downloading record completed with full progress.
    pub fn complete(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(record) if record.status == DownloadStatus::Downloading => {
                record.progress = 100.0;
                record.status = DownloadStatus::Completed;
                record.speed = None;
                true
            }
            _ => false,
        }
    }

    /// Marks a downloading record failed. The simulated transfer never
    /// reports failure; this is the hook for a real transfer engine.
    pub fn fail(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(record) if record.status == DownloadStatus::Downloading => {
                record.status = DownloadStatus::Error;
                record.speed = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&DownloadRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DownloadRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when every record has reached a terminal status.
    pub fn all_terminal(&self) -> bool {
        self.records.iter().all(|record| record.status.is_terminal())
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut DownloadRecord> {
        self.records.iter_mut().find(|record| record.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaDescriptor, MediaKind};

    fn descriptor(id: &str) -> MediaDescriptor {
        MediaDescriptor {
            id: id.to_string(),
            url: format!("https://example.com/{id}.mp4"),
            kind: MediaKind::Video,
            title: id.to_string(),
            size: None,
            source: None,
            thumbnail: None,
        }
    }

    #[test]
    fn enqueue_is_idempotent_per_id() {
        let mut queue = DownloadQueue::default();
        assert!(queue.enqueue(descriptor("a")));
        assert!(!queue.enqueue(descriptor("a")));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get("a").unwrap().status, DownloadStatus::Downloading);
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut queue = DownloadQueue::default();
        queue.enqueue(descriptor("a"));

        assert!(queue.advance("a", 40.0, None, None));
        assert!(queue.advance("a", 25.0, None, None));
        assert_eq!(queue.get("a").unwrap().progress, 40.0);

        assert!(queue.advance("a", 160.0, None, None));
        let record = queue.get("a").unwrap();
        assert_eq!(record.progress, 100.0);
        assert_eq!(record.status, DownloadStatus::Completed);

        // Terminal records ignore further reports.
        assert!(!queue.advance("a", 50.0, None, None));
    }

    #[test]
    fn pause_rejected_when_not_downloading() {
        let mut queue = DownloadQueue::default();
        queue.enqueue(descriptor("a"));
        queue.complete("a");

        assert!(!queue.pause("a"));
        let record = queue.get("a").unwrap();
        assert_eq!(record.status, DownloadStatus::Completed);
        assert_eq!(record.progress, 100.0);
    }

    #[test]
    fn resume_reports_stored_progress() {
        let mut queue = DownloadQueue::default();
        queue.enqueue(descriptor("a"));
        queue.advance("a", 33.0, None, None);
        assert!(queue.pause("a"));
        assert!(queue.resume("b").is_none());
        assert_eq!(queue.resume("a"), Some(33.0));
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut queue = DownloadQueue::default();
        queue.enqueue(descriptor("a"));
        assert!(queue.remove("a"));
        assert!(!queue.remove("a"));
        assert!(queue.is_empty());
    }
}
