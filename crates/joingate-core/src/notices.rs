use std::sync::Arc;

use crate::{
    domain::{ChatId, User},
    errors::Error,
    messaging::port::MessagingPort,
};

/// Message for the administrator chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminNotice {
    /// A failure worth an operator's attention, with the implicated user.
    Error { detail: String, user: User },
    /// A user passed the recheck after being prompted to join.
    NewMember { user: User },
}

impl AdminNotice {
    pub fn error(err: &Error, user: &User) -> Self {
        AdminNotice::Error {
            detail: err.to_string(),
            user: user.clone(),
        }
    }

    pub fn new_member(user: &User) -> Self {
        AdminNotice::NewMember { user: user.clone() }
    }

    pub fn render(&self) -> String {
        match self {
            AdminNotice::Error { detail, user } => {
                format!("Error occurred: {detail}\nUser: {user}")
            }
            AdminNotice::NewMember { user } => format!("New member joined the channel: {user}"),
        }
    }
}

/// Fire-and-forget sink for admin notices.
#[derive(Clone)]
pub struct AdminChannel {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl AdminChannel {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    /// Delivery failures are logged and dropped.
    pub async fn notify(&self, notice: AdminNotice) {
        if let Err(e) = self
            .messenger
            .send_text(self.chat_id, &notice.render())
            .await
        {
            tracing::warn!(admin_chat = self.chat_id.0, error = %e, "admin notice not delivered");
        }
    }
}
