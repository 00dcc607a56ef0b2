use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use roster_core::FetchTicket;
use roster_logging::{roster_debug, roster_info};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, UserSource};

enum EngineCommand {
    Fetch {
        ticket: FetchTicket,
        page: u32,
        per_page: u32,
    },
    Cancel {
        ticket: FetchTicket,
    },
    Shutdown,
}

type InFlight = Arc<Mutex<HashMap<FetchTicket, CancellationToken>>>;

/// Runs fetches on a background tokio runtime for hosts with a synchronous
/// event loop. Dropping the handle cancels everything still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn UserSource>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let root = CancellationToken::new();
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Fetch {
                        ticket,
                        page,
                        per_page,
                    } => {
                        let token = root.child_token();
                        if let Ok(mut map) = in_flight.lock() {
                            map.insert(ticket, token.clone());
                        }
                        let source = source.clone();
                        let event_tx = event_tx.clone();
                        let in_flight = in_flight.clone();
                        runtime.spawn(async move {
                            let outcome = token
                                .run_until_cancelled(source.fetch_page(page, per_page))
                                .await;
                            if let Ok(mut map) = in_flight.lock() {
                                map.remove(&ticket);
                            }
                            match outcome {
                                Some(result) => {
                                    let _ = event_tx
                                        .send(EngineEvent::PageFetched { ticket, result });
                                }
                                None => roster_debug!("fetch {} cancelled", ticket),
                            }
                        });
                    }
                    EngineCommand::Cancel { ticket } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut map| map.remove(&ticket));
                        if let Some(token) = token {
                            token.cancel();
                        }
                    }
                    EngineCommand::Shutdown => break,
                }
            }
            root.cancel();
            roster_info!("engine worker stopped");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, ticket: FetchTicket, page: u32, per_page: u32) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            ticket,
            page,
            per_page,
        });
    }

    pub fn cancel(&self, ticket: FetchTicket) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { ticket });
    }

    /// Abandons every outstanding fetch; no further events are produced for them.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
