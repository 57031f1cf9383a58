use std::sync::mpsc;
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::types::{EngineEvent, TransferUpdate};

/// Receives engine events from a running transfer or scan task.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that forwards events over the engine's std mpsc channel.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Tuning for the simulated transfer.
#[derive(Debug, Clone)]
pub struct TransferSettings {
    pub tick_interval: Duration,
    /// Upper bound of the random progress increment per tick, in percent.
    pub max_step: f32,
    /// Range for the synthetic speed estimate, in whole MB/s.
    pub min_speed: u32,
    pub max_speed: u32,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(500),
            max_step: 15.0,
            min_speed: 1,
            max_speed: 5,
        }
    }
}

/// A source of progress reports for one download.
///
/// This is the substitutable seam: a real transfer engine reporting byte
/// progress implements the same contract (id, progress, speed, downloaded
/// size) and can replace the simulation without touching the queue.
#[async_trait::async_trait]
pub trait ProgressSource: Send + Sync {
    /// Advances the transfer from `resume_from` until completion or until
    /// `cancel` fires. Emits `TransferAdvanced` per tick and a final
    /// `TransferCompleted` when progress reaches 100.
    async fn run(
        &self,
        download_id: String,
        resume_from: f32,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    );
}

/// Stand-in for a real transfer: adds a bounded random increment on every
/// tick and fabricates a speed estimate, since no bytes actually move.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransfer {
    settings: TransferSettings,
}

impl SimulatedTransfer {
    pub fn new(settings: TransferSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ProgressSource for SimulatedTransfer {
    async fn run(
        &self,
        download_id: String,
        resume_from: f32,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    ) {
        let mut progress = resume_from.clamp(0.0, 100.0);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.settings.tick_interval) => {}
            }

            // The rng must not live across an await point.
            let (step, speed) = {
                let mut rng = rand::thread_rng();
                (
                    rng.gen_range(0.5..=self.settings.max_step),
                    rng.gen_range(self.settings.min_speed..=self.settings.max_speed),
                )
            };
            progress = (progress + step).min(100.0);

            sink.emit(EngineEvent::TransferAdvanced(TransferUpdate {
                download_id: download_id.clone(),
                progress,
                speed: Some(format!("{speed} MB/s")),
                downloaded: Some(format!("{progress:.0} MB")),
            }));

            if progress >= 100.0 {
                sink.emit(EngineEvent::TransferCompleted { download_id });
                return;
            }
        }
    }
}
