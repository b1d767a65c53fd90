use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use joingate_core::{
    config::Config,
    messaging::port::MessagingPort,
    pipeline::EventRouter,
    ports::{LinkResolver, MembershipDirectory},
};

use crate::handlers;
use crate::{TelegramDirectory, TelegramMessenger};

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EventRouter>,
}

/// Long-poll Telegram until the process is stopped.
///
/// teloxide handles updates of one chat in order and different chats concurrently.
pub async fn run_polling(
    cfg: Arc<Config>,
    resolver: Arc<dyn LinkResolver>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "telegram bot authenticated"),
        Err(e) => tracing::warn!(error = %e, "getMe failed; continuing"),
    }
    tracing::info!(
        channel = %cfg.channel_id,
        admin_chat = cfg.admin_chat_id,
        resolver = %cfg.resolver_endpoint,
        "membership gate configured"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let directory: Arc<dyn MembershipDirectory> = Arc::new(TelegramDirectory::new(bot.clone()));

    let state = Arc::new(AppState {
        router: Arc::new(EventRouter::new(&cfg, messenger, directory, resolver)),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
