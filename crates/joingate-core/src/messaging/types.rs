use crate::domain::{ChatId, User};

/// Callback data carried by the "I've joined" button.
pub const RECHECK_CALLBACK_DATA: &str = "check_joined";

/// Incoming update, already stripped of transport details.
///
/// Owned by the router for the duration of one handling pass.
#[derive(Clone, Debug)]
pub enum IncomingEvent {
    Start(StartCommand),
    Text(TextMessage),
    Recheck(RecheckCallback),
}

impl IncomingEvent {
    pub fn sender(&self) -> &User {
        match self {
            IncomingEvent::Start(e) => &e.sender,
            IncomingEvent::Text(e) => &e.sender,
            IncomingEvent::Recheck(e) => &e.sender,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            IncomingEvent::Start(_) => "start",
            IncomingEvent::Text(_) => "text",
            IncomingEvent::Recheck(_) => "recheck",
        }
    }
}

#[derive(Clone, Debug)]
pub struct StartCommand {
    pub chat_id: ChatId,
    pub sender: User,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub sender: User,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct RecheckCallback {
    pub chat_id: ChatId,
    pub sender: User,
}

/// Inline keyboard attached to an outbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineButton {
    /// Opens a link client-side.
    Url { label: String, url: String },
    /// Sends `data` back to the bot as a callback query.
    Callback { label: String, data: String },
}

impl InlineButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        InlineButton::Url {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        InlineButton::Callback {
            label: label.into(),
            data: data.into(),
        }
    }
}

impl InlineKeyboard {
    /// All buttons side by side.
    pub fn single_row(buttons: Vec<InlineButton>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}
