use thiserror::Error;

/// Label shown on the welcome screen until a user is picked from the list.
pub const SELECTED_USER_PLACEHOLDER: &str = "Selected User Name";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter your name before proceeding")]
    NameRequired,
}

/// The "Next" action needs a name; it is forwarded verbatim.
pub fn validate_name(raw: &str) -> Result<String, FormError> {
    if raw.is_empty() {
        return Err(FormError::NameRequired);
    }
    Ok(raw.to_string())
}

/// State of the welcome screen sitting between the form and the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeView {
    pub name: String,
    pub selected_user_name: Option<String>,
}

impl WelcomeView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected_user_name: None,
        }
    }

    /// Records the name returned by the list screen. `None` (user backed out)
    /// keeps the previous choice.
    pub fn accept_selection(&mut self, selected: Option<String>) {
        if let Some(name) = selected {
            self.selected_user_name = Some(name);
        }
    }

    pub fn selected_label(&self) -> &str {
        self.selected_user_name
            .as_deref()
            .unwrap_or(SELECTED_USER_PLACEHOLDER)
    }
}
