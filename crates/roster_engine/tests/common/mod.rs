#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Mutex, Once};

use roster_core::{Page, User};
use roster_engine::{FailureKind, FetchError, UserSource};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

pub fn page(page_number: u32, total_pages: u32, first_id: u64, count: u64) -> Page {
    Page {
        page_number,
        total_pages,
        items: (first_id..first_id + count)
            .map(|id| User {
                id,
                email: format!("user{id}@example.com"),
                first_name: format!("First{id}"),
                last_name: format!("Last{id}"),
                avatar_url: format!("https://example.com/avatars/{id}.png"),
            })
            .collect(),
    }
}

pub fn network_error() -> FetchError {
    FetchError {
        kind: FailureKind::Network,
        message: "connection refused".to_string(),
    }
}

/// Replays canned results in order and records every requested page number.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Result<Page, FetchError>>>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedSource {
    pub fn new(replies: Vec<Result<Page, FetchError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(page, _)| *page)
            .collect()
    }
}

#[async_trait::async_trait]
impl UserSource for ScriptedSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page, FetchError> {
        self.requests.lock().unwrap().push((page, per_page));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(network_error()))
    }
}
