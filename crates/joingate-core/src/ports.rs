use async_trait::async_trait;

use crate::{
    domain::{ChannelId, UserId},
    Result,
};

/// Membership directory lookup (Telegram `getChatMember`).
///
/// Returns the raw status string as the directory reports it (`member`,
/// `administrator`, `creator`, `left`, ...). Any lookup failure is an
/// `Error::Directory`.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    async fn member_status(&self, channel: &ChannelId, user: UserId) -> Result<String>;
}

/// Outcome of a successful resolution call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Direct media link returned by the resolution API.
    Found(String),
    /// The API answered but had no link for this input.
    NotFound,
}

/// Resolution API client: candidate URL in, media link (or nothing) out.
///
/// Transport failures and undecodable bodies are `Error::Resolution`; an
/// empty answer is `Ok(Resolution::NotFound)`.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<Resolution>;
}
