use std::sync::Arc;

use crate::{
    config::Config,
    domain::ChatId,
    messaging::{
        port::MessagingPort,
        types::{InlineButton, InlineKeyboard, RECHECK_CALLBACK_DATA},
    },
    texts,
};

/// Photo + buttons inviting a user to join the gating channel.
///
/// Stateless: every call sends one new message.
pub struct JoinPrompt {
    messenger: Arc<dyn MessagingPort>,
    image_url: String,
    join_url: String,
}

impl JoinPrompt {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        image_url: impl Into<String>,
        join_url: impl Into<String>,
    ) -> Self {
        Self {
            messenger,
            image_url: image_url.into(),
            join_url: join_url.into(),
        }
    }

    pub fn from_config(cfg: &Config, messenger: Arc<dyn MessagingPort>) -> Self {
        Self::new(messenger, cfg.image_url.clone(), cfg.channel_join_url())
    }

    pub fn keyboard(&self) -> InlineKeyboard {
        InlineKeyboard::single_row(vec![
            InlineButton::url(texts::JOIN_BUTTON, self.join_url.clone()),
            InlineButton::callback(texts::JOINED_BUTTON, RECHECK_CALLBACK_DATA),
        ])
    }

    pub async fn send(&self, chat_id: ChatId) {
        if let Err(e) = self
            .messenger
            .send_photo_with_buttons(chat_id, &self.image_url, texts::JOIN_CAPTION, self.keyboard())
            .await
        {
            tracing::warn!(chat_id = chat_id.0, error = %e, "join prompt not delivered");
        }
    }
}
