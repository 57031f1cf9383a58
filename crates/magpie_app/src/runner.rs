//! Session driver: feeds user intent into the core update loop, executes the
//! returned effects on the engine, and translates engine events back into
//! messages. Runs a scripted scan / select-all / download-everything session
//! until every download settles.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use magpie_core::{update, AppState, Effect, Msg, ScanItem, ScanMode};
use magpie_engine::{DiscoveredMedia, EngineEvent, EngineHandle, EngineSettings, ScanSettings};
use magpie_logging::{magpie_info, magpie_warn};

use crate::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const SESSION_DEADLINE: Duration = Duration::from_secs(120);

/// Engine settings, with the scan endpoint/model/key overridable from the
/// environment so the app can point at any chat-completions service.
pub fn engine_settings_from_env() -> EngineSettings {
    let mut scan = ScanSettings::default();
    if let Ok(endpoint) = std::env::var("MAGPIE_SCAN_ENDPOINT") {
        scan.endpoint = endpoint;
    }
    if let Ok(model) = std::env::var("MAGPIE_SCAN_MODEL") {
        scan.model = model;
    }
    scan.api_key = std::env::var("MAGPIE_API_KEY").ok();
    EngineSettings {
        scan,
        ..EngineSettings::default()
    }
}

pub fn run_session(url: &str, mode: ScanMode, settings: EngineSettings) -> Result<()> {
    let engine = EngineHandle::new(settings);
    let mut state = AppState::new();

    dispatch(&mut state, &engine, Msg::InputChanged(url.to_string()));
    dispatch(&mut state, &engine, Msg::ScanRequested { mode });
    if !state.view().scanning {
        let reason = state
            .view()
            .notice
            .map(|notice| notice.text)
            .unwrap_or_else(|| "invalid URL".to_string());
        bail!("{reason}");
    }

    let deadline = Instant::now() + SESSION_DEADLINE;
    let mut batch_started = false;

    loop {
        while let Some(event) = engine.try_recv() {
            let msg = map_engine_event(event);
            dispatch(&mut state, &engine, msg);
        }

        // Once the scan lands, grab everything it found.
        if !batch_started && !state.view().scanning {
            let view = state.view();
            if view.media.is_empty() {
                magpie_warn!("scan produced no media for {url}");
                render::render(&view);
                return Ok(());
            }
            magpie_info!("scan found {} media files", view.media.len());
            dispatch(&mut state, &engine, Msg::SelectAllToggled);
            dispatch(&mut state, &engine, Msg::BatchDownloadRequested);
            batch_started = true;
        }

        if state.consume_dirty() {
            render::render(&state.view());
        }

        if batch_started && state.downloads_settled() {
            break;
        }
        if Instant::now() > deadline {
            bail!("session timed out before downloads settled");
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    render::render_summary(&state.view());
    Ok(())
}

fn dispatch(state: &mut AppState, engine: &EngineHandle, msg: Msg) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    run_effects(engine, effects);
}

fn run_effects(engine: &EngineHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::StartScan {
                generation,
                url,
                mode,
            } => {
                magpie_info!("StartScan generation={generation} mode={mode:?} url={url}");
                engine.start_scan(generation, url, map_mode(mode));
            }
            Effect::StartTransfer {
                download_id,
                resume_from,
            } => {
                engine.start_transfer(download_id, resume_from);
            }
            Effect::StopTransfer { download_id } => {
                engine.stop_transfer(download_id);
            }
        }
    }
}

fn map_mode(mode: ScanMode) -> magpie_engine::ScanMode {
    match mode {
        ScanMode::Quick => magpie_engine::ScanMode::Quick,
        ScanMode::Deep => magpie_engine::ScanMode::Deep,
    }
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ScanCompleted { generation, result } => match result {
            Ok(items) => Msg::ScanFinished {
                generation,
                items: items.into_iter().map(map_item).collect(),
            },
            Err(err) => {
                magpie_warn!("scan generation {generation} failed: {err}");
                Msg::ScanFailed {
                    generation,
                    reason: err.to_string(),
                }
            }
        },
        EngineEvent::TransferAdvanced(update) => Msg::TransferAdvanced {
            download_id: update.download_id,
            progress: update.progress,
            speed: update.speed,
            downloaded: update.downloaded,
        },
        EngineEvent::TransferCompleted { download_id } => Msg::TransferCompleted { download_id },
    }
}

fn map_item(media: DiscoveredMedia) -> ScanItem {
    ScanItem {
        url: media.url,
        kind: media.kind,
        title: media.title,
        size: media.size,
        source: media.source,
        thumbnail: media.thumbnail,
    }
}
