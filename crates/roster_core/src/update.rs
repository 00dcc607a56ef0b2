use roster_logging::roster_debug;

use crate::{Effect, FeedState, FetchTicket, Msg, Phase, PAGE_SIZE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if !state.is_pristine() {
                roster_debug!("feed {}: already started, ignoring mount", state.feed_id());
                return (state, Vec::new());
            }
            let (ticket, _) = state.begin_fetch(Phase::InitialLoading, 1);
            vec![fetch_page(ticket, 1)]
        }
        Msg::RefreshRequested => match state.phase() {
            Phase::InitialLoading | Phase::Refreshing => Vec::new(),
            Phase::Idle | Phase::LoadingMore | Phase::Error => {
                let (ticket, superseded) = state.begin_fetch(Phase::Refreshing, 1);
                let mut effects = Vec::with_capacity(2);
                if let Some(stale) = superseded {
                    effects.push(Effect::CancelFetch { ticket: stale });
                }
                effects.push(fetch_page(ticket, 1));
                effects
            }
        },
        Msg::LoadMoreRequested => load_more(&mut state),
        Msg::ScrollPositionChanged {
            last_visible_index,
            total_rendered_count,
        } => {
            if last_row_visible(last_visible_index, total_rendered_count) {
                load_more(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded { ticket, page } => {
            state.apply_page(ticket, page);
            Vec::new()
        }
        Msg::PageFailed { ticket, failure } => {
            state.apply_failure(ticket, failure);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_more(state: &mut FeedState) -> Vec<Effect> {
    if !state.accepts_load_more() {
        return Vec::new();
    }
    let page = state.current_page() + 1;
    let (ticket, _) = state.begin_fetch(Phase::LoadingMore, page);
    vec![fetch_page(ticket, page)]
}

// Prefetch starts once the final rendered row is on screen.
fn last_row_visible(last_visible_index: usize, total_rendered_count: usize) -> bool {
    total_rendered_count > 0 && last_visible_index >= total_rendered_count - 1
}

fn fetch_page(ticket: FetchTicket, page: u32) -> Effect {
    Effect::FetchPage {
        ticket,
        page,
        per_page: PAGE_SIZE,
    }
}
