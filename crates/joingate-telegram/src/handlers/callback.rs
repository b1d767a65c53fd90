use std::sync::Arc;

use teloxide::prelude::*;

use crate::extract::event_from_callback;
use crate::router::AppState;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Always answer so the client stops showing the spinner.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        tracing::warn!(error = %e, "failed to answer callback query");
    }

    let Some(event) = event_from_callback(&q) else {
        tracing::debug!(data = ?q.data, "ignoring unknown callback");
        return Ok(());
    };

    state.router.route(event).await;
    Ok(())
}
