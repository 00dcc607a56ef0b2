//! Roster engine: user-page fetching and effect execution.
mod decode;
mod engine;
mod feed;
mod fetch;
mod types;

pub use decode::{decode_users_page, DecodeError, UsersResponse, WireUser};
pub use engine::EngineHandle;
pub use feed::{fetch_result_msg, PagedUserFeed};
pub use fetch::{
    FetchSettings, ReqwestUserSource, UserSource, API_KEY_HEADER, DEFAULT_BASE_URL,
};
pub use types::{EngineEvent, FailureKind, FetchError};
