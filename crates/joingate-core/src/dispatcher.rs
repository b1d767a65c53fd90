use std::sync::Arc;

use crate::{
    domain::ChatId,
    membership::MembershipGate,
    messaging::{
        port::MessagingPort,
        types::{RecheckCallback, StartCommand, TextMessage},
    },
    notices::{AdminChannel, AdminNotice},
    ports::{LinkResolver, Resolution},
    texts,
};

/// Texts starting with this prefix are sent to the resolver. Case-sensitive and
/// deliberately loose: `httpfoo` qualifies, `HTTPS://` does not.
pub const URL_PREFIX: &str = "http";

pub fn looks_like_url(text: &str) -> bool {
    text.starts_with(URL_PREFIX)
}

/// Handlers for events from users that already passed the gate (start/text),
/// plus the ungated recheck callback.
///
/// Every handler swallows its failures: errors go to the log and the admin
/// chat, the user gets a generic reply.
pub struct RequestDispatcher {
    messenger: Arc<dyn MessagingPort>,
    gate: Arc<MembershipGate>,
    resolver: Arc<dyn LinkResolver>,
    admin: AdminChannel,
}

impl RequestDispatcher {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        gate: Arc<MembershipGate>,
        resolver: Arc<dyn LinkResolver>,
        admin: AdminChannel,
    ) -> Self {
        Self {
            messenger,
            gate,
            resolver,
            admin,
        }
    }

    pub async fn handle_start(&self, cmd: &StartCommand) {
        self.reply(cmd.chat_id, texts::WELCOME).await;
    }

    /// At most one resolver call; after the "processing" ack exactly one outcome reply.
    pub async fn handle_text(&self, msg: &TextMessage) {
        if !looks_like_url(&msg.text) {
            return;
        }

        self.reply(msg.chat_id, texts::PROCESSING).await;

        match self.resolver.resolve(&msg.text).await {
            Ok(Resolution::Found(link)) => {
                tracing::info!(user = %msg.sender, "media link resolved");
                self.reply(msg.chat_id, &texts::download_link(&link)).await;
            }
            Ok(Resolution::NotFound) => {
                tracing::info!(user = %msg.sender, "resolver returned no link");
                self.reply(msg.chat_id, texts::NO_RESULT).await;
            }
            Err(e) => {
                tracing::error!(user = %msg.sender, error = %e, "link resolution failed");
                self.admin.notify(AdminNotice::error(&e, &msg.sender)).await;
                self.reply(msg.chat_id, texts::RESOLUTION_FAILED).await;
            }
        }
    }

    /// Re-run the membership check for a user who says they joined.
    ///
    /// The callback sender is trusted as-is; it is not correlated with the
    /// user the prompt was shown to.
    pub async fn handle_recheck(&self, cb: &RecheckCallback) {
        match self.gate.check(cb.sender.id).await {
            Ok(status) if status.is_authorized() => {
                tracing::info!(user = %cb.sender, "membership confirmed on recheck");
                self.admin.notify(AdminNotice::new_member(&cb.sender)).await;
                self.reply(cb.chat_id, texts::RECHECK_CONFIRMED).await;
            }
            Ok(_) => {
                self.reply(cb.chat_id, texts::RECHECK_REJECTED).await;
            }
            Err(e) => {
                tracing::error!(user = %cb.sender, error = %e, "membership recheck failed");
                self.admin.notify(AdminNotice::error(&e, &cb.sender)).await;
                self.reply(cb.chat_id, texts::RECHECK_FAILED).await;
            }
        }
    }

    async fn reply(&self, chat_id: ChatId, text: &str) {
        if let Err(e) = self.messenger.send_text(chat_id, text).await {
            tracing::warn!(chat_id = chat_id.0, error = %e, "reply not delivered");
        }
    }
}
