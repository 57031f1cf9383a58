use url::Url;

use crate::media::ingest;
use crate::view_model::Notice;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input_url(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScanRequested { mode } => {
            let url = match validate_scan_url(state.input_url()) {
                Ok(url) => url,
                Err(reason) => {
                    state.set_notice(Notice::error(reason));
                    state.mark_dirty();
                    return (state, Vec::new());
                }
            };

            // A scan may be issued while another is in flight; the new
            // generation supersedes it and the old response will be dropped.
            let generation = state.next_scan_generation();
            state.set_scanning(true);
            state.set_notice(Notice::info(format!("Scanning {url}")));
            state.mark_dirty();
            vec![Effect::StartScan {
                generation,
                url,
                mode,
            }]
        }
        Msg::ScanFinished { generation, items } => {
            if !state.is_current_scan(generation) {
                return (state, Vec::new());
            }
            state.set_scanning(false);
            let catalog = ingest(generation, items);
            state.set_notice(Notice::info(format!(
                "Found {} media files on the page",
                catalog.len()
            )));
            state.replace_catalog(catalog);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScanFailed { generation, reason } => {
            if !state.is_current_scan(generation) {
                return (state, Vec::new());
            }
            // Catalog stays as-is; a failed scan never clobbers results.
            state.set_scanning(false);
            state.set_notice(Notice::error(format!("Scan failed: {reason}")));
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectionToggled { media_id } => {
            if state.toggle_selection(&media_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectAllToggled => {
            if state.toggle_select_all() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DownloadRequested { media_id } => {
            let Some(descriptor) = state.descriptor(&media_id).cloned() else {
                return (state, Vec::new());
            };
            let title = descriptor.title.clone();
            if !state.queue_mut().enqueue(descriptor) {
                return (state, Vec::new());
            }
            state.set_notice(Notice::info(format!("Download started: {title}")));
            state.mark_dirty();
            vec![Effect::StartTransfer {
                download_id: media_id,
                resume_from: 0.0,
            }]
        }
        Msg::BatchDownloadRequested => {
            if state.selection_is_empty() {
                state.set_notice(Notice::error("Select media files to download first"));
                state.mark_dirty();
                return (state, Vec::new());
            }

            let selected: Vec<_> = state
                .catalog()
                .iter()
                .filter(|media| state.is_selected(&media.id))
                .cloned()
                .collect();

            let mut effects = Vec::with_capacity(selected.len());
            for descriptor in selected {
                let download_id = descriptor.id.clone();
                if state.queue_mut().enqueue(descriptor) {
                    effects.push(Effect::StartTransfer {
                        download_id,
                        resume_from: 0.0,
                    });
                }
            }

            state.clear_selection();
            state.set_notice(Notice::info(format!(
                "Started downloading {} files",
                effects.len()
            )));
            state.mark_dirty();
            effects
        }
        Msg::PauseRequested { download_id } => {
            if state.queue_mut().pause(&download_id) {
                state.mark_dirty();
                vec![Effect::StopTransfer { download_id }]
            } else {
                Vec::new()
            }
        }
        Msg::ResumeRequested { download_id } => {
            if let Some(resume_from) = state.queue_mut().resume(&download_id) {
                state.mark_dirty();
                vec![Effect::StartTransfer {
                    download_id,
                    resume_from,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RemoveRequested { download_id } => {
            if state.queue_mut().remove(&download_id) {
                state.mark_dirty();
                vec![Effect::StopTransfer { download_id }]
            } else {
                Vec::new()
            }
        }
        Msg::TransferAdvanced {
            download_id,
            progress,
            speed,
            downloaded,
        } => {
            if state
                .queue_mut()
                .advance(&download_id, progress, speed, downloaded)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TransferCompleted { download_id } => {
            if state.queue_mut().complete(&download_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TransferFailed {
            download_id,
            reason,
        } => {
            if state.queue_mut().fail(&download_id) {
                state.set_notice(Notice::error(format!("Download failed: {reason}")));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Rejects missing or malformed URLs before any external call is made.
fn validate_scan_url(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Enter a URL to scan for media");
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url.to_string()),
        Ok(_) => Err("Only http and https URLs can be scanned"),
        Err(_) => Err("Invalid URL format"),
    }
}
