mod common;

use common::{catalog_and_batch, init_logging, scan_item, scan_with_items};
use magpie_core::{update, AppState, DownloadStatus, Effect, Msg};

fn advance(state: AppState, id: &str, progress: f32) -> AppState {
    let (state, effects) = update(
        state,
        Msg::TransferAdvanced {
            download_id: id.to_string(),
            progress,
            speed: Some("3 MB/s".to_string()),
            downloaded: None,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn enqueued_records_start_downloading_at_zero() {
    init_logging();
    let (state, ids) = catalog_and_batch(2);
    assert_eq!(ids.len(), 2);

    let view = state.view();
    assert_eq!(view.downloads.len(), 2);
    for row in &view.downloads {
        assert_eq!(row.status, DownloadStatus::Downloading);
        assert_eq!(row.progress, 0.0);
    }
    // Insertion order follows catalog order.
    let listed: Vec<_> = view
        .downloads
        .iter()
        .map(|row| row.download_id.clone())
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn both_records_reach_completion() {
    init_logging();
    let (mut state, ids) = catalog_and_batch(2);

    for id in &ids {
        state = advance(state, id, 55.0);
        state = advance(state, id, 99.5);
        state = advance(state, id, 112.0);
    }

    let view = state.view();
    for row in &view.downloads {
        assert_eq!(row.status, DownloadStatus::Completed);
        assert_eq!(row.progress, 100.0);
    }
}

#[test]
fn single_download_request_enqueues_once() {
    init_logging();
    let state = scan_with_items(
        AppState::new(),
        vec![scan_item("https://example.com/a.mp4", "A")],
    );
    let media_id = state.view().media[0].media_id.clone();

    let (state, effects) = update(
        state,
        Msg::DownloadRequested {
            media_id: media_id.clone(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StartTransfer {
            download_id: media_id.clone(),
            resume_from: 0.0,
        }]
    );

    // Asking again for the same descriptor changes nothing.
    let (state, effects) = update(state, Msg::DownloadRequested { media_id });
    assert!(effects.is_empty());
    assert_eq!(state.view().downloads.len(), 1);
}

#[test]
fn pause_resume_remove_follow_last_action() {
    init_logging();
    let (state, ids) = catalog_and_batch(1);
    let id = ids[0].clone();
    let state = advance(state, &id, 42.0);

    let (state, effects) = update(
        state,
        Msg::PauseRequested {
            download_id: id.clone(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StopTransfer {
            download_id: id.clone()
        }]
    );
    assert_eq!(state.view().downloads[0].status, DownloadStatus::Paused);

    // A tick that was already in flight when the user paused must not land.
    let state = advance(state, &id, 77.0);
    assert_eq!(state.view().downloads[0].progress, 42.0);

    let (state, effects) = update(
        state,
        Msg::ResumeRequested {
            download_id: id.clone(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StartTransfer {
            download_id: id.clone(),
            resume_from: 42.0,
        }]
    );
    assert_eq!(
        state.view().downloads[0].status,
        DownloadStatus::Downloading
    );

    let (state, effects) = update(
        state,
        Msg::RemoveRequested {
            download_id: id.clone(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StopTransfer {
            download_id: id.clone()
        }]
    );
    assert!(state.view().downloads.is_empty());

    // Remove-twice race stays silent.
    let (state, effects) = update(state, Msg::RemoveRequested { download_id: id });
    assert!(effects.is_empty());
    assert!(state.view().downloads.is_empty());
}

#[test]
fn pause_on_completed_record_is_rejected() {
    init_logging();
    let (state, ids) = catalog_and_batch(1);
    let id = ids[0].clone();
    let (mut state, _) = update(
        state,
        Msg::TransferCompleted {
            download_id: id.clone(),
        },
    );
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::PauseRequested { download_id: id });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    let view = state.view();
    assert_eq!(view.downloads[0].status, DownloadStatus::Completed);
    assert_eq!(view.downloads[0].progress, 100.0);
}

#[test]
fn resume_on_non_paused_record_is_rejected() {
    init_logging();
    let (state, ids) = catalog_and_batch(1);
    let id = ids[0].clone();

    let (state, effects) = update(
        state,
        Msg::ResumeRequested {
            download_id: id.clone(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().downloads[0].status,
        DownloadStatus::Downloading
    );
}

#[test]
fn transfer_failure_is_terminal() {
    init_logging();
    let (state, ids) = catalog_and_batch(1);
    let id = ids[0].clone();

    let (state, _) = update(
        state,
        Msg::TransferFailed {
            download_id: id.clone(),
            reason: "connection reset".to_string(),
        },
    );
    assert_eq!(state.view().downloads[0].status, DownloadStatus::Error);

    // Terminal: neither pause nor resume may move it.
    let (state, effects) = update(
        state,
        Msg::PauseRequested {
            download_id: id.clone(),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ResumeRequested { download_id: id });
    assert!(effects.is_empty());
    assert_eq!(state.view().downloads[0].status, DownloadStatus::Error);
}

#[test]
fn completion_happens_exactly_once() {
    init_logging();
    let (state, ids) = catalog_and_batch(1);
    let id = ids[0].clone();

    let mut state = advance(state, &id, 100.0);
    assert_eq!(state.view().downloads[0].status, DownloadStatus::Completed);
    assert!(state.consume_dirty());

    // A duplicate completion signal is a no-op.
    let (mut state, _) = update(state, Msg::TransferCompleted { download_id: id });
    assert!(!state.consume_dirty());
}
