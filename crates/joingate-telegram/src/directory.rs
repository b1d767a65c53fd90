use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{ChatMemberStatus, Recipient},
};

use joingate_core::{
    domain::{ChannelId, UserId},
    errors::Error,
    ports::MembershipDirectory,
    Result,
};

/// Membership directory backed by `getChatMember`.
///
/// The bot must be able to see the channel's members (usually: be an admin there).
#[derive(Clone)]
pub struct TelegramDirectory {
    bot: Bot,
}

impl TelegramDirectory {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Numeric ids address the chat directly, anything else is a public username.
pub fn channel_recipient(channel: &ChannelId) -> Recipient {
    match channel.0.parse::<i64>() {
        Ok(id) => Recipient::Id(teloxide::types::ChatId(id)),
        Err(_) => Recipient::ChannelUsername(channel.0.clone()),
    }
}

/// Telegram user ids are unsigned; a negative id cannot name a member.
pub fn tg_user_id(user: UserId) -> Result<teloxide::types::UserId> {
    u64::try_from(user.0)
        .map(teloxide::types::UserId)
        .map_err(|_| Error::Directory(format!("invalid user id {}", user.0)))
}

/// Bot API status string for teloxide's typed status.
pub fn status_name(status: ChatMemberStatus) -> &'static str {
    match status {
        ChatMemberStatus::Owner => "creator",
        ChatMemberStatus::Administrator => "administrator",
        ChatMemberStatus::Member => "member",
        ChatMemberStatus::Restricted => "restricted",
        ChatMemberStatus::Left => "left",
        ChatMemberStatus::Banned => "kicked",
    }
}

#[async_trait]
impl MembershipDirectory for TelegramDirectory {
    async fn member_status(&self, channel: &ChannelId, user: UserId) -> Result<String> {
        let member = self
            .bot
            .get_chat_member(channel_recipient(channel), tg_user_id(user)?)
            .await
            .map_err(|e| Error::Directory(e.to_string()))?;

        Ok(status_name(member.status()).to_string())
    }
}
