//! In-memory port implementations for unit tests.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::{ChannelId, ChatId, UserId},
    errors::Error,
    messaging::{port::MessagingPort, types::InlineKeyboard},
    ports::{LinkResolver, MembershipDirectory, Resolution},
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Photo {
        chat_id: ChatId,
        image_url: String,
        caption: String,
        keyboard: InlineKeyboard,
    },
}

#[derive(Default)]
pub struct FakeMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_sends: bool,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send is recorded and then reported as failed.
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: ChatId) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| match s {
                Sent::Text { chat_id: c, .. } | Sent::Photo { chat_id: c, .. } => *c == chat_id,
            })
            .collect()
    }

    pub fn texts_to(&self, chat_id: ChatId) -> Vec<String> {
        self.sent_to(chat_id)
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Photo { .. } => None,
            })
            .collect()
    }

    pub fn photos_to(&self, chat_id: ChatId) -> usize {
        self.sent_to(chat_id)
            .iter()
            .filter(|s| matches!(s, Sent::Photo { .. }))
            .count()
    }

    fn record(&self, sent: Sent) -> Result<()> {
        self.sent.lock().unwrap().push(sent);
        if self.fail_sends {
            return Err(Error::Messaging("Forbidden: bot was blocked by the user".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn send_photo_with_buttons(
        &self,
        chat_id: ChatId,
        image_url: &str,
        caption: &str,
        keyboard: InlineKeyboard,
    ) -> Result<()> {
        self.record(Sent::Photo {
            chat_id,
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            keyboard,
        })
    }
}

/// Directory that answers from a script, one entry per lookup.
///
/// `Ok(status)` entries are returned as the raw status; `Err(msg)` entries
/// become `Error::Directory(msg)`. Once the script runs out the last entry
/// repeats.
#[derive(Default)]
pub struct ScriptedDirectory {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    last: Mutex<Option<std::result::Result<String, String>>>,
    lookups: Mutex<Vec<(ChannelId, UserId)>>,
}

impl ScriptedDirectory {
    pub fn new(script: Vec<std::result::Result<&str, &str>>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn always(status: &str) -> Self {
        Self::new(vec![Ok(status)])
    }

    pub fn failing(msg: &str) -> Self {
        Self::new(vec![Err(msg)])
    }

    pub fn lookups(&self) -> Vec<(ChannelId, UserId)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MembershipDirectory for ScriptedDirectory {
    async fn member_status(&self, channel: &ChannelId, user: UserId) -> Result<String> {
        self.lookups.lock().unwrap().push((channel.clone(), user));

        let next = self.script.lock().unwrap().pop_front();
        let entry = match next {
            Some(e) => {
                *self.last.lock().unwrap() = Some(e.clone());
                e
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err("directory script is empty".to_string())),
        };
        entry.map_err(Error::Directory)
    }
}

/// Resolver with a fixed answer that records every input it sees.
pub struct CountingResolver {
    answer: std::result::Result<Resolution, String>,
    calls: Mutex<Vec<String>>,
}

impl CountingResolver {
    pub fn found(link: &str) -> Self {
        Self::with_answer(Ok(Resolution::Found(link.to_string())))
    }

    pub fn not_found() -> Self {
        Self::with_answer(Ok(Resolution::NotFound))
    }

    pub fn failing(msg: &str) -> Self {
        Self::with_answer(Err(msg.to_string()))
    }

    fn with_answer(answer: std::result::Result<Resolution, String>) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkResolver for CountingResolver {
    async fn resolve(&self, url: &str) -> Result<Resolution> {
        self.calls.lock().unwrap().push(url.to_string());
        self.answer.clone().map_err(Error::Resolution)
    }
}
