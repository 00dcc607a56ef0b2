use crate::FetchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch `page` (1-based) with `per_page` rows; report back with the same ticket.
    FetchPage {
        ticket: FetchTicket,
        page: u32,
        per_page: u32,
    },
    /// A fetch was superseded; its result will be ignored and the host may abort it.
    CancelFetch { ticket: FetchTicket },
}
