use std::collections::VecDeque;

use roster_core::{update, Effect, FeedId, FeedSnapshot, FeedState, FetchTicket, Msg, Page};
use roster_logging::{roster_debug, roster_info, roster_warn};

use crate::{FetchError, UserSource};

/// Turns a finished fetch into the message the state machine expects, logging
/// the failure detail the state machine itself does not keep.
pub fn fetch_result_msg(ticket: FetchTicket, result: Result<Page, FetchError>) -> Msg {
    match result {
        Ok(page) => Msg::PageLoaded { ticket, page },
        Err(err) => {
            roster_warn!(
                "fetch {} failed ({}): {}",
                ticket,
                err.failure(),
                err
            );
            Msg::PageFailed {
                ticket,
                failure: err.failure(),
            }
        }
    }
}

/// Single-owner driver: each operation runs the state machine and awaits the
/// fetch it asks for before returning the resulting snapshot.
pub struct PagedUserFeed<S> {
    source: S,
    state: FeedState,
}

impl<S: UserSource> PagedUserFeed<S> {
    pub fn new(source: S) -> Self {
        Self::with_feed_id(source, 0)
    }

    pub fn with_feed_id(source: S, feed: FeedId) -> Self {
        Self {
            source,
            state: FeedState::with_feed_id(feed),
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.view()
    }

    pub async fn start(&mut self) -> FeedSnapshot {
        self.dispatch(Msg::Mounted).await
    }

    pub async fn refresh(&mut self) -> FeedSnapshot {
        self.dispatch(Msg::RefreshRequested).await
    }

    pub async fn load_more(&mut self) -> FeedSnapshot {
        self.dispatch(Msg::LoadMoreRequested).await
    }

    pub async fn notify_scroll_position(
        &mut self,
        last_visible_index: usize,
        total_rendered_count: usize,
    ) -> FeedSnapshot {
        self.dispatch(Msg::ScrollPositionChanged {
            last_visible_index,
            total_rendered_count,
        })
        .await
    }

    async fn dispatch(&mut self, msg: Msg) -> FeedSnapshot {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                match effect {
                    Effect::FetchPage {
                        ticket,
                        page,
                        per_page,
                    } => {
                        roster_info!("fetch {} page={} per_page={}", ticket, page, per_page);
                        let result = self.source.fetch_page(page, per_page).await;
                        inbox.push_back(fetch_result_msg(ticket, result));
                    }
                    Effect::CancelFetch { ticket } => {
                        // Fetches are awaited inline, so nothing is ever left outstanding.
                        roster_debug!("cancel {} has nothing to abort", ticket);
                    }
                }
            }
        }
        self.state.view()
    }
}
