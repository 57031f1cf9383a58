use std::sync::{Arc, Mutex};
use std::time::Duration;

use magpie_engine::{
    EngineEvent, ProgressSink, ProgressSource, SimulatedTransfer, TransferSettings,
};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn snapshot(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn fast_settings() -> TransferSettings {
    TransferSettings {
        tick_interval: Duration::from_millis(1),
        max_step: 40.0,
        ..TransferSettings::default()
    }
}

fn progress_values(events: &[EngineEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::TransferAdvanced(update) => Some(update.progress),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn transfer_runs_to_completion() {
    let sink = TestSink::default();
    let source = SimulatedTransfer::new(fast_settings());
    let cancel = CancellationToken::new();

    source.run("dl-1".to_string(), 0.0, &sink, cancel).await;

    let events = sink.snapshot();
    let progress = progress_values(&events);
    assert!(!progress.is_empty());

    // Monotonically non-decreasing, never above 100, ends exactly at 100.
    for window in progress.windows(2) {
        assert!(window[1] >= window[0]);
    }
    assert!(progress.iter().all(|p| *p <= 100.0));
    assert_eq!(*progress.last().unwrap(), 100.0);

    // Completion is announced exactly once, after the last progress report.
    let completions = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                EngineEvent::TransferCompleted { download_id } if download_id == "dl-1"
            )
        })
        .count();
    assert_eq!(completions, 1);
    assert!(matches!(
        events.last().unwrap(),
        EngineEvent::TransferCompleted { .. }
    ));
}

#[tokio::test]
async fn transfer_ticks_carry_speed_estimates() {
    let sink = TestSink::default();
    let source = SimulatedTransfer::new(fast_settings());

    source
        .run("dl-2".to_string(), 0.0, &sink, CancellationToken::new())
        .await;

    for event in sink.snapshot() {
        if let EngineEvent::TransferAdvanced(update) = event {
            let speed = update.speed.expect("speed set on every tick");
            assert!(speed.ends_with(" MB/s"));
            assert!(update.downloaded.is_some());
        }
    }
}

#[tokio::test]
async fn transfer_resumes_from_stored_progress() {
    let sink = TestSink::default();
    let source = SimulatedTransfer::new(TransferSettings {
        tick_interval: Duration::from_millis(1),
        max_step: 5.0,
        ..TransferSettings::default()
    });

    source
        .run("dl-3".to_string(), 95.0, &sink, CancellationToken::new())
        .await;

    let progress = progress_values(&sink.snapshot());
    // Never restarts from zero.
    assert!(progress.iter().all(|p| *p >= 95.0));
    assert_eq!(*progress.last().unwrap(), 100.0);
}

#[tokio::test]
async fn cancellation_stops_ticks_without_completing() {
    let sink = TestSink::default();
    let source = SimulatedTransfer::new(TransferSettings {
        tick_interval: Duration::from_millis(5),
        max_step: 0.6,
        ..TransferSettings::default()
    });
    let cancel = CancellationToken::new();

    let task = {
        let sink = sink.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            source.run("dl-4".to_string(), 0.0, &sink, cancel).await;
        })
    };

    tokio::time::sleep(Duration::from_millis(30)).await;
    cancel.cancel();
    task.await.expect("transfer task");

    let events = sink.snapshot();
    assert!(events
        .iter()
        .all(|event| !matches!(event, EngineEvent::TransferCompleted { .. })));

    // No further ticks arrive after cancellation.
    let frozen = events.len();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(sink.snapshot().len(), frozen);
}
