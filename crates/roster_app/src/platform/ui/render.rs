use roster_core::{FeedPresentation, FeedSnapshot, FetchFailure, PalindromeVerdict, WelcomeView};

pub const HELP_FORM: &str = "commands: name <text> | check <text> | next | quit";
pub const HELP_WELCOME: &str = "commands: choose | back | quit";
pub const HELP_LIST: &str =
    "commands: scroll <row> | more | refresh | select <row> | back | quit";

pub fn render_form(name: &str) -> Vec<String> {
    let shown = if name.is_empty() { "(empty)" } else { name };
    vec![
        "== First Screen ==".to_string(),
        format!("Name: {shown}"),
        HELP_FORM.to_string(),
    ]
}

pub fn render_verdict(verdict: PalindromeVerdict) -> Vec<String> {
    let mark = match verdict {
        PalindromeVerdict::Palindrome => "[✓]",
        PalindromeVerdict::NotPalindrome => "[✗]",
        PalindromeVerdict::EmptyInput => "[!]",
    };
    vec![format!("Palindrome Check {mark} {}", verdict.message())]
}

pub fn render_welcome(view: &WelcomeView) -> Vec<String> {
    vec![
        "== Second Screen ==".to_string(),
        "Welcome".to_string(),
        view.name.clone(),
        format!("  {}", view.selected_label()),
        HELP_WELCOME.to_string(),
    ]
}

pub fn render_feed(snapshot: &FeedSnapshot) -> Vec<String> {
    let mut lines = vec!["== Third Screen ==".to_string()];

    match snapshot.presentation {
        FeedPresentation::Loading => lines.push("Loading users...".to_string()),
        FeedPresentation::Failed => {
            lines.push("Failed to load users".to_string());
            lines.push(failure_hint(snapshot.last_failure).to_string());
            lines.push("Type `retry` to try again.".to_string());
        }
        FeedPresentation::Empty => {
            lines.push("No users found".to_string());
            lines.push("Type `refresh` to reload.".to_string());
        }
        FeedPresentation::List {
            refreshing,
            loading_more,
            reached_end,
        } => {
            if refreshing {
                lines.push("Refreshing...".to_string());
            }
            for (index, user) in snapshot.items.iter().enumerate() {
                lines.push(format!(
                    "{index:>3}. {}  <{}>",
                    user.display_name(),
                    user.email
                ));
            }
            if loading_more {
                lines.push("Loading more...".to_string());
            }
            if reached_end {
                lines.push("You've reached the end".to_string());
            }
            if let Some(failure) = snapshot.last_failure {
                lines.push(format!("Last fetch failed ({failure}); scroll or refresh to retry."));
            }
        }
    }

    lines.push(HELP_LIST.to_string());
    lines
}

fn failure_hint(failure: Option<FetchFailure>) -> &'static str {
    match failure {
        Some(FetchFailure::Decode) => "The server sent an unexpected response",
        Some(FetchFailure::Transport) | None => "Check your internet connection",
    }
}
