use std::sync::Arc;

use roster_core::{Effect, FetchTicket, Msg};
use roster_engine::{fetch_result_msg, EngineEvent, EngineHandle, UserSource};
use roster_logging::{roster_debug, roster_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(source: Arc<dyn UserSource>) -> std::io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(source)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    ticket,
                    page,
                    per_page,
                } => {
                    roster_info!(
                        "FetchPage ticket={} page={} per_page={} turn={}",
                        ticket,
                        page,
                        per_page,
                        roster_logging::loop_turn()
                    );
                    self.engine.fetch(ticket, page, per_page);
                }
                Effect::CancelFetch { ticket } => self.cancel(ticket),
            }
        }
    }

    pub fn cancel(&self, ticket: FetchTicket) {
        roster_debug!("CancelFetch ticket={}", ticket);
        self.engine.cancel(ticket);
    }

    /// Completed fetches as messages for the feed that issued them.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::PageFetched { ticket, result } => {
                    inbox.push(fetch_result_msg(ticket, result));
                }
            }
        }
        inbox
    }
}
