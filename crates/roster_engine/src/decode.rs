//! Wire format of the `users` endpoint and its mapping onto the core model.
use roster_core::{Page, User};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsersResponse {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<WireUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireUser {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected users response: {0}")]
    Shape(#[from] serde_json::Error),
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(FailureKind::Decode, err.to_string())
    }
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        User {
            id: wire.id,
            email: wire.email,
            first_name: wire.first_name,
            last_name: wire.last_name,
            avatar_url: wire.avatar,
        }
    }
}

impl From<UsersResponse> for Page {
    fn from(response: UsersResponse) -> Self {
        Page {
            page_number: response.page,
            total_pages: response.total_pages,
            items: response.data.into_iter().map(User::from).collect(),
        }
    }
}

/// Parse a `users` response body. Unknown fields are ignored.
pub fn decode_users_page(bytes: &[u8]) -> Result<Page, DecodeError> {
    let response: UsersResponse = serde_json::from_slice(bytes)?;
    Ok(response.into())
}
