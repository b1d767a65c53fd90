//! Telegram adapter (teloxide).
//!
//! Implements the `joingate-core` messaging and membership-directory ports
//! over the Telegram Bot API and runs the long-polling dispatcher.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};
use url::Url;

pub mod directory;
pub mod extract;
pub mod handlers;
pub mod router;

pub use directory::TelegramDirectory;

use joingate_core::{
    domain::ChatId,
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{InlineButton, InlineKeyboard},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Messaging(format!("telegram error: {e}"))
    }
}

fn parse_url(raw: &str, what: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Messaging(format!("invalid {what} {raw:?}: {e}")))
}

/// Absolute URLs are fetched by Telegram; anything else is taken as a `file_id`.
fn photo_input(raw: &str) -> InputFile {
    match Url::parse(raw) {
        Ok(url) => InputFile::url(url),
        Err(_) => InputFile::file_id(raw.to_string()),
    }
}

fn to_markup(keyboard: InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for button in row {
            buttons.push(match button {
                InlineButton::Url { label, url } => {
                    InlineKeyboardButton::url(label, parse_url(&url, "button url")?)
                }
                InlineButton::Callback { label, data } => {
                    InlineKeyboardButton::callback(label, data)
                }
            });
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn send_photo_with_buttons(
        &self,
        chat_id: ChatId,
        image_url: &str,
        caption: &str,
        keyboard: InlineKeyboard,
    ) -> Result<()> {
        let photo = photo_input(image_url);
        let markup = to_markup(keyboard)?;

        self.bot
            .send_photo(Self::tg_chat(chat_id), photo)
            .caption(caption.to_string())
            .reply_markup(markup)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
