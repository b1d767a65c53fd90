//! Telegram update handlers.
//!
//! Each handler turns the update into an `IncomingEvent` and hands it to the
//! core router. Failures never escape: the router logs and reports them.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use crate::extract::event_from_message;
use crate::router::AppState;

mod callback;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(event) = event_from_message(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    state.router.route(event).await;
    Ok(())
}
