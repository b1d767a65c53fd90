use async_trait::async_trait;

use crate::{domain::ChatId, messaging::types::InlineKeyboard, Result};

/// Outbound side of the messaging gateway.
///
/// Each call is a single async send; implementations must not retry.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;

    async fn send_photo_with_buttons(
        &self,
        chat_id: ChatId,
        image_url: &str,
        caption: &str,
        keyboard: InlineKeyboard,
    ) -> Result<()>;
}
