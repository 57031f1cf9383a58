use std::collections::BTreeSet;

use crate::media::MediaDescriptor;
use crate::queue::DownloadQueue;
use crate::view_model::{AppViewModel, DownloadRowView, MediaRowView, Notice};

/// The single owned state store: media catalog, download queue and selection
/// set, plus the scan bookkeeping that guards against stale responses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input_url: String,
    scanning: bool,
    scan_generation: u64,
    catalog: Vec<MediaDescriptor>,
    selection: BTreeSet<String>,
    queue: DownloadQueue,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let media = self
            .catalog
            .iter()
            .map(|descriptor| MediaRowView {
                media_id: descriptor.id.clone(),
                title: descriptor.title.clone(),
                url: descriptor.url.clone(),
                kind: descriptor.kind,
                size: descriptor.size.clone(),
                source: descriptor.source.clone(),
                selected: self.selection.contains(&descriptor.id),
            })
            .collect();

        let downloads = self
            .queue
            .iter()
            .map(|record| DownloadRowView {
                download_id: record.id().to_string(),
                title: record.media.title.clone(),
                kind: record.media.kind,
                status: record.status,
                progress: record.progress,
                speed: record.speed.clone(),
                downloaded: record.downloaded.clone(),
            })
            .collect();

        AppViewModel {
            input_url: self.input_url.clone(),
            scanning: self.scanning,
            notice: self.notice.clone(),
            media,
            downloads,
            selected_count: self.selection.len(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag; the render loop only redraws when
    /// this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True when the queue is non-empty and every record is terminal.
    pub fn downloads_settled(&self) -> bool {
        !self.queue.is_empty() && self.queue.all_terminal()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_url(&self) -> &str {
        &self.input_url
    }

    pub(crate) fn set_input_url(&mut self, url: String) {
        self.input_url = url;
    }

    pub(crate) fn set_scanning(&mut self, scanning: bool) {
        self.scanning = scanning;
    }

    /// Bumps the generation counter for a newly issued scan and returns it.
    pub(crate) fn next_scan_generation(&mut self) -> u64 {
        self.scan_generation += 1;
        self.scan_generation
    }

    /// A scan response is current only if it carries the latest generation.
    pub(crate) fn is_current_scan(&self, generation: u64) -> bool {
        generation == self.scan_generation
    }

    /// Replaces the catalog with a new scan's results. The selection is
    /// cleared so no stale ids survive the swap.
    pub(crate) fn replace_catalog(&mut self, catalog: Vec<MediaDescriptor>) {
        self.catalog = catalog;
        self.selection.clear();
    }

    pub(crate) fn catalog(&self) -> &[MediaDescriptor] {
        &self.catalog
    }

    pub(crate) fn descriptor(&self, media_id: &str) -> Option<&MediaDescriptor> {
        self.catalog.iter().find(|media| media.id == media_id)
    }

    pub(crate) fn toggle_selection(&mut self, media_id: &str) -> bool {
        if self.descriptor(media_id).is_none() {
            return false;
        }
        if !self.selection.remove(media_id) {
            self.selection.insert(media_id.to_string());
        }
        true
    }

    /// Select-all toggles to a full selection unless everything is already
    /// selected, in which case it clears.
    pub(crate) fn toggle_select_all(&mut self) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        if self.selection.len() == self.catalog.len() {
            self.selection.clear();
        } else {
            self.selection = self.catalog.iter().map(|media| media.id.clone()).collect();
        }
        true
    }

    pub(crate) fn is_selected(&self, media_id: &str) -> bool {
        self.selection.contains(media_id)
    }

    pub(crate) fn selection_is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(crate) fn queue_mut(&mut self) -> &mut DownloadQueue {
        &mut self.queue
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
