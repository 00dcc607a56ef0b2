use std::fmt;

use roster_logging::roster_debug;

use crate::view_model::{FeedPresentation, FeedSnapshot};
use crate::{Page, User};

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Identifies one mounted instance of the list screen.
pub type FeedId = u64;

/// Tags a single fetch so its result can be matched against the fetch the
/// feed is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub feed: FeedId,
    pub seq: u64,
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.feed, self.seq)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InitialLoading,
    Refreshing,
    LoadingMore,
    Error,
}

impl Phase {
    /// True while a fetch is outstanding.
    pub fn is_fetching(self) -> bool {
        matches!(
            self,
            Phase::InitialLoading | Phase::Refreshing | Phase::LoadingMore
        )
    }
}

/// Why a fetch produced no page. The feed treats both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Connectivity, timeout or non-success status.
    Transport,
    /// The response body did not have the expected shape.
    Decode,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport => write!(f, "transport error"),
            FetchFailure::Decode => write!(f, "decode error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    ticket: FetchTicket,
    page: u32,
}

/// Paging state of one list screen. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    feed: FeedId,
    items: Vec<User>,
    current_page: u32,
    total_pages: u32,
    phase: Phase,
    in_flight: Option<InFlight>,
    next_seq: u64,
    last_failure: Option<FetchFailure>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::with_feed_id(0)
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state for the screen instance `feed`. Results tagged with another
    /// feed id are never applied.
    pub fn with_feed_id(feed: FeedId) -> Self {
        Self {
            feed,
            items: Vec::new(),
            current_page: 0,
            total_pages: 1,
            phase: Phase::Idle,
            in_flight: None,
            next_seq: 0,
            last_failure: None,
            dirty: false,
        }
    }

    pub fn feed_id(&self) -> FeedId {
        self.feed
    }

    pub fn items(&self) -> &[User] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_load_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn last_failure(&self) -> Option<FetchFailure> {
        self.last_failure
    }

    /// Ticket of the outstanding fetch, if any.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight.map(|pending| pending.ticket)
    }

    pub fn view(&self) -> FeedSnapshot {
        FeedSnapshot {
            feed: self.feed,
            items: self.items.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            phase: self.phase,
            can_load_more: self.can_load_more(),
            last_failure: self.last_failure,
            presentation: self.presentation(),
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn presentation(&self) -> FeedPresentation {
        let empty = self.items.is_empty();
        match self.phase {
            Phase::InitialLoading if empty => FeedPresentation::Loading,
            Phase::Error if empty => FeedPresentation::Failed,
            Phase::Idle if empty => FeedPresentation::Empty,
            _ => {
                let loading_more = self.phase == Phase::LoadingMore;
                FeedPresentation::List {
                    refreshing: self.phase == Phase::Refreshing,
                    loading_more,
                    reached_end: !self.can_load_more() && !empty && !loading_more,
                }
            }
        }
    }

    pub(crate) fn is_pristine(&self) -> bool {
        self.phase == Phase::Idle && self.current_page == 0
    }

    pub(crate) fn accepts_load_more(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Error)
            && self.can_load_more()
            && !self.items.is_empty()
    }

    /// Enters `phase` and records a new in-flight fetch for `page`. Returns the
    /// new ticket and the ticket it superseded, if one was still outstanding.
    pub(crate) fn begin_fetch(
        &mut self,
        phase: Phase,
        page: u32,
    ) -> (FetchTicket, Option<FetchTicket>) {
        self.next_seq += 1;
        let ticket = FetchTicket {
            feed: self.feed,
            seq: self.next_seq,
        };
        let superseded = self
            .in_flight
            .replace(InFlight { ticket, page })
            .map(|pending| pending.ticket);
        self.phase = phase;
        self.dirty = true;
        (ticket, superseded)
    }

    fn settle(&mut self, ticket: FetchTicket) -> Option<InFlight> {
        match self.in_flight {
            Some(pending) if pending.ticket == ticket => self.in_flight.take(),
            _ => {
                roster_debug!(
                    "feed {}: ignoring result for stale ticket {} (waiting on {:?})",
                    self.feed,
                    ticket,
                    self.in_flight.map(|pending| pending.ticket)
                );
                None
            }
        }
    }

    pub(crate) fn apply_page(&mut self, ticket: FetchTicket, page: Page) {
        let Some(pending) = self.settle(ticket) else {
            return;
        };
        if page.page_number != pending.page {
            roster_debug!(
                "feed {}: requested page {} but server labelled it {}",
                self.feed,
                pending.page,
                page.page_number
            );
        }
        match self.phase {
            Phase::LoadingMore => {
                self.items.extend(page.items);
                self.current_page = pending.page;
            }
            _ => {
                self.items = page.items;
                self.current_page = 1;
            }
        }
        self.total_pages = page.total_pages;
        self.phase = Phase::Idle;
        self.last_failure = None;
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, ticket: FetchTicket, failure: FetchFailure) {
        if self.settle(ticket).is_none() {
            return;
        }
        self.phase = Phase::Error;
        self.last_failure = Some(failure);
        self.dirty = true;
    }
}
