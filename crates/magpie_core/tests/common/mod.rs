// Not every test binary uses every helper.
#![allow(dead_code)]

use magpie_core::{update, AppState, Effect, Msg, ScanItem, ScanMode};

pub fn init_logging() {
    magpie_logging::initialize_for_tests();
}

pub fn scan_item(url: &str, title: &str) -> ScanItem {
    ScanItem {
        url: url.to_string(),
        kind: "video".to_string(),
        title: title.to_string(),
        ..ScanItem::default()
    }
}

/// Runs a full scan round-trip: submit the URL, issue the scan, deliver the
/// provider's items for the generation the effect carried.
pub fn scan_with_items(state: AppState, items: Vec<ScanItem>) -> AppState {
    let (state, _) = update(
        state,
        Msg::InputChanged("https://example.com/page".to_string()),
    );
    let (state, effects) = update(
        state,
        Msg::ScanRequested {
            mode: ScanMode::Quick,
        },
    );
    let generation = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartScan { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("scan effect");
    let (state, _) = update(state, Msg::ScanFinished { generation, items });
    state
}

/// Catalog of `count` distinct items, then enqueue them all via select-all +
/// batch download. Returns the state and the enqueued download ids.
pub fn catalog_and_batch(count: usize) -> (AppState, Vec<String>) {
    let items = (0..count)
        .map(|n| scan_item(&format!("https://example.com/media-{n}.mp4"), &format!("Clip {n}")))
        .collect();
    let state = scan_with_items(AppState::new(), items);
    let (state, _) = update(state, Msg::SelectAllToggled);
    let (state, effects) = update(state, Msg::BatchDownloadRequested);
    let ids = effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::StartTransfer { download_id, .. } => Some(download_id),
            _ => None,
        })
        .collect();
    (state, ids)
}
