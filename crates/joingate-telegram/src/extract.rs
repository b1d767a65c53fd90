//! Telegram updates to `IncomingEvent`.

use teloxide::types::{CallbackQuery, Message};

use joingate_core::{
    domain::{ChatId, User, UserId},
    messaging::types::{
        IncomingEvent, RecheckCallback, StartCommand, TextMessage, RECHECK_CALLBACK_DATA,
    },
};

fn parse_command(text: &str) -> Option<(String, String)> {
    // Telegram may send `/cmd@botname arg1 ...`
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_string();

    Some((cmd, rest))
}

/// `/start`, `/start@bot` and `/start <payload>`.
pub fn is_start_command(text: &str) -> bool {
    matches!(parse_command(text), Some((cmd, _)) if cmd == "start")
}

fn sender_of(user: &teloxide::types::User) -> User {
    User::new(UserId(user.id.0 as i64), user.username.clone())
}

/// Text messages with a sender; everything else is ignored.
pub fn event_from_message(msg: &Message) -> Option<IncomingEvent> {
    let sender = sender_of(msg.from()?);
    let text = msg.text()?;
    let chat_id = ChatId(msg.chat.id.0);

    if is_start_command(text) {
        return Some(IncomingEvent::Start(StartCommand { chat_id, sender }));
    }

    Some(IncomingEvent::Text(TextMessage {
        chat_id,
        sender,
        text: text.to_string(),
    }))
}

/// Only the "I've joined" button maps to an event.
pub fn event_from_callback(q: &CallbackQuery) -> Option<IncomingEvent> {
    if q.data.as_deref() != Some(RECHECK_CALLBACK_DATA) {
        return None;
    }

    let sender = sender_of(&q.from);
    let chat_id = q
        .message
        .as_ref()
        .map(|m| ChatId(m.chat.id.0))
        .unwrap_or_else(|| ChatId::from(sender.id));

    Some(IncomingEvent::Recheck(RecheckCallback { chat_id, sender }))
}
