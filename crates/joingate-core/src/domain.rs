use std::fmt;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl From<UserId> for ChatId {
    /// A user's private chat shares the user's id.
    fn from(user: UserId) -> Self {
        ChatId(user.0)
    }
}

/// Channel identifier as configured: `@username` or a numeric id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Public handle used in `t.me` links (leading `@` stripped).
    pub fn public_handle(&self) -> &str {
        self.0.strip_prefix('@').unwrap_or(&self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sender of an event. Lives only as long as the event being handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
}

impl User {
    pub fn new(id: UserId, username: Option<String>) -> Self {
        Self { id, username }
    }

    /// Display handle; users without a username render as `unknown`.
    pub fn handle(&self) -> &str {
        self.username.as_deref().unwrap_or("unknown")
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id.0, self.handle())
    }
}
