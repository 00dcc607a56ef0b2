#![allow(dead_code)]

use std::sync::Once;

use roster_core::{update, Effect, FeedState, FetchFailure, FetchTicket, Msg, Page, User};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

pub fn user(id: u64) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        avatar_url: format!("https://example.com/avatars/{id}.png"),
    }
}

/// `count` users with ids starting at `first_id`.
pub fn page(page_number: u32, total_pages: u32, first_id: u64, count: u64) -> Page {
    Page {
        page_number,
        total_pages,
        items: (first_id..first_id + count).map(user).collect(),
    }
}

/// The single fetch request among `effects`.
pub fn fetch_of(effects: &[Effect]) -> (FetchTicket, u32) {
    let fetches: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage { ticket, page, .. } => Some((*ticket, *page)),
            _ => None,
        })
        .collect();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {effects:?}");
    fetches[0]
}

pub fn succeed(state: FeedState, effects: &[Effect], page: Page) -> FeedState {
    let (ticket, _) = fetch_of(effects);
    update(state, Msg::PageLoaded { ticket, page }).0
}

pub fn fail(state: FeedState, effects: &[Effect]) -> FeedState {
    let (ticket, _) = fetch_of(effects);
    update(
        state,
        Msg::PageFailed {
            ticket,
            failure: FetchFailure::Transport,
        },
    )
    .0
}

/// Mounted and first page merged.
pub fn started(first: Page) -> FeedState {
    let (state, effects) = update(FeedState::new(), Msg::Mounted);
    succeed(state, &effects, first)
}
