/// A user row as shown in the list. Identity is `id` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl User {
    /// Name handed back to the welcome screen when this user is picked.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One server batch of users plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page_number: u32,
    pub total_pages: u32,
    pub items: Vec<User>,
}
