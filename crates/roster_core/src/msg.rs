#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The list screen was mounted for the first time.
    Mounted,
    /// User pulled to refresh or tapped Retry.
    RefreshRequested,
    /// Explicit request for the next page.
    LoadMoreRequested,
    /// The host's scroll position changed.
    ScrollPositionChanged {
        last_visible_index: usize,
        total_rendered_count: usize,
    },
    /// A fetch completed with a page.
    PageLoaded {
        ticket: crate::FetchTicket,
        page: crate::Page,
    },
    /// A fetch failed.
    PageFailed {
        ticket: crate::FetchTicket,
        failure: crate::FetchFailure,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
