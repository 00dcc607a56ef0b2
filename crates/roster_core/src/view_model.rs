use crate::{FeedId, FetchFailure, Phase, User};

/// What the list screen should show, derived from the phase and row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPresentation {
    /// First load in progress with nothing to show yet.
    Loading,
    /// Nothing to show and the last fetch failed; offer Retry.
    Failed,
    /// Loaded successfully but the server returned no users.
    Empty,
    List {
        refreshing: bool,
        loading_more: bool,
        reached_end: bool,
    },
}

/// Read-only copy of the feed handed to the host after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub feed: FeedId,
    pub items: Vec<User>,
    pub current_page: u32,
    pub total_pages: u32,
    pub phase: Phase,
    pub can_load_more: bool,
    pub last_failure: Option<FetchFailure>,
    pub presentation: FeedPresentation,
}

impl FeedSnapshot {
    /// Display name of the row at `index`, handed back to the welcome screen.
    pub fn select(&self, index: usize) -> Option<String> {
        self.items.get(index).map(User::display_name)
    }
}
