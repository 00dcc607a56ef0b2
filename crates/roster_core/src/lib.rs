//! Roster core: pure paged-feed state machine, form validation and view-model helpers.
mod effect;
mod handoff;
mod model;
mod msg;
mod palindrome;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use handoff::{validate_name, FormError, WelcomeView, SELECTED_USER_PLACEHOLDER};
pub use model::{Page, User};
pub use msg::Msg;
pub use palindrome::{check_palindrome, PalindromeVerdict};
pub use state::{FeedId, FeedState, FetchFailure, FetchTicket, Phase, PAGE_SIZE};
pub use update::update;
pub use view_model::{FeedPresentation, FeedSnapshot};
