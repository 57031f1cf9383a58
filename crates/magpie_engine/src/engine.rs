use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use magpie_logging::magpie_debug;
use tokio_util::sync::CancellationToken;

use crate::scan::{ChatScanner, ScanProvider, ScanSettings};
use crate::transfer::{ChannelProgressSink, ProgressSource, SimulatedTransfer, TransferSettings};
use crate::types::{EngineEvent, ScanMode};

enum EngineCommand {
    StartScan {
        generation: u64,
        url: String,
        mode: ScanMode,
    },
    StartTransfer {
        download_id: String,
        resume_from: f32,
    },
    StopTransfer {
        download_id: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub scan: ScanSettings,
    pub transfer: TransferSettings,
}

/// Handle to the engine worker thread. Commands go in over a channel and are
/// dispatched onto a tokio runtime; events come back out through `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let scanner = Arc::new(ChatScanner::new(settings.scan));
        let source = Arc::new(SimulatedTransfer::new(settings.transfer));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // One cancellation token per live transfer id. Commands are
            // handled in arrival order on this thread, so a pause or remove
            // cancels the token before any later command for the same id.
            let mut transfers: HashMap<String, CancellationToken> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartScan {
                        generation,
                        url,
                        mode,
                    } => {
                        let scanner = scanner.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = scanner.scan(&url, mode).await;
                            let _ = event_tx.send(EngineEvent::ScanCompleted { generation, result });
                        });
                    }
                    EngineCommand::StartTransfer {
                        download_id,
                        resume_from,
                    } => {
                        // Restarting an id replaces any source still running
                        // for it.
                        if let Some(stale) = transfers.remove(&download_id) {
                            stale.cancel();
                        }
                        let token = CancellationToken::new();
                        transfers.insert(download_id.clone(), token.clone());

                        let source = source.clone();
                        let sink = ChannelProgressSink::new(event_tx.clone());
                        runtime.spawn(async move {
                            source.run(download_id, resume_from, &sink, token).await;
                        });
                    }
                    EngineCommand::StopTransfer { download_id } => {
                        // Unknown ids are fine; the record may already have
                        // finished or never started.
                        match transfers.remove(&download_id) {
                            Some(token) => token.cancel(),
                            None => {
                                magpie_debug!("stop for unknown transfer {download_id}");
                            }
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_scan(&self, generation: u64, url: impl Into<String>, mode: ScanMode) {
        let _ = self.cmd_tx.send(EngineCommand::StartScan {
            generation,
            url: url.into(),
            mode,
        });
    }

    pub fn start_transfer(&self, download_id: impl Into<String>, resume_from: f32) {
        let _ = self.cmd_tx.send(EngineCommand::StartTransfer {
            download_id: download_id.into(),
            resume_from,
        });
    }

    pub fn stop_transfer(&self, download_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StopTransfer {
            download_id: download_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
