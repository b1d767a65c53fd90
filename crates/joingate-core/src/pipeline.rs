//! Top-level event routing: gate first, then dispatch.

use std::sync::Arc;

use crate::{
    config::Config,
    dispatcher::RequestDispatcher,
    domain::{ChatId, User},
    join_prompt::JoinPrompt,
    membership::MembershipGate,
    messaging::{port::MessagingPort, types::IncomingEvent},
    notices::AdminChannel,
    ports::{LinkResolver, MembershipDirectory},
};

/// Composes gate, join prompt and dispatcher for one bot instance.
///
/// Holds no mutable state; concurrent `route` calls are independent.
pub struct EventRouter {
    gate: Arc<MembershipGate>,
    join_prompt: JoinPrompt,
    dispatcher: RequestDispatcher,
    admin: AdminChannel,
}

impl EventRouter {
    pub fn new(
        cfg: &Config,
        messenger: Arc<dyn MessagingPort>,
        directory: Arc<dyn MembershipDirectory>,
        resolver: Arc<dyn LinkResolver>,
    ) -> Self {
        let admin = AdminChannel::new(messenger.clone(), ChatId(cfg.admin_chat_id));
        let gate = Arc::new(MembershipGate::new(directory, cfg.channel_id.clone()));
        let join_prompt = JoinPrompt::from_config(cfg, messenger.clone());
        let dispatcher =
            RequestDispatcher::new(messenger, gate.clone(), resolver, admin.clone());

        Self {
            gate,
            join_prompt,
            dispatcher,
            admin,
        }
    }

    pub async fn route(&self, event: IncomingEvent) {
        tracing::debug!(kind = event.kind(), user = %event.sender(), "incoming event");

        match event {
            // The prompt was already shown; recheck runs its own lookup.
            IncomingEvent::Recheck(cb) => self.dispatcher.handle_recheck(&cb).await,
            IncomingEvent::Start(cmd) => {
                if self.admit(&cmd.sender, cmd.chat_id).await {
                    self.dispatcher.handle_start(&cmd).await;
                }
            }
            IncomingEvent::Text(msg) => {
                if self.admit(&msg.sender, msg.chat_id).await {
                    self.dispatcher.handle_text(&msg).await;
                }
            }
        }
    }

    /// Run the gate; non-members get the join prompt.
    async fn admit(&self, user: &User, chat_id: ChatId) -> bool {
        let status = self.gate.evaluate(user, &self.admin).await;
        if status.is_authorized() {
            return true;
        }
        self.join_prompt.send(chat_id).await;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DEFAULT_RESOLVER_ENDPOINT,
        domain::{ChannelId, UserId},
        fakes::{CountingResolver, FakeMessenger, ScriptedDirectory, Sent},
        messaging::types::{InlineButton, RecheckCallback, StartCommand, TextMessage},
        texts,
    };

    const ADMIN: ChatId = ChatId(1000);
    const CHAT: ChatId = ChatId(42);

    fn cfg() -> Config {
        Config {
            telegram_bot_token: "x".to_string(),
            channel_id: ChannelId("@chan".into()),
            admin_chat_id: ADMIN.0,
            image_url: "https://img.example/join.png".to_string(),
            resolver_endpoint: DEFAULT_RESOLVER_ENDPOINT.to_string(),
        }
    }

    struct Harness {
        messenger: Arc<FakeMessenger>,
        directory: Arc<ScriptedDirectory>,
        resolver: Arc<CountingResolver>,
        router: EventRouter,
    }

    fn harness(directory: ScriptedDirectory, resolver: CountingResolver) -> Harness {
        let messenger = Arc::new(FakeMessenger::new());
        let directory = Arc::new(directory);
        let resolver = Arc::new(resolver);
        let router = EventRouter::new(
            &cfg(),
            messenger.clone(),
            directory.clone(),
            resolver.clone(),
        );
        Harness {
            messenger,
            directory,
            resolver,
            router,
        }
    }

    fn user() -> User {
        User::new(UserId(42), Some("alice".into()))
    }

    fn start() -> IncomingEvent {
        IncomingEvent::Start(StartCommand {
            chat_id: CHAT,
            sender: user(),
        })
    }

    fn text(t: &str) -> IncomingEvent {
        IncomingEvent::Text(TextMessage {
            chat_id: CHAT,
            sender: user(),
            text: t.to_string(),
        })
    }

    fn recheck() -> IncomingEvent {
        IncomingEvent::Recheck(RecheckCallback {
            chat_id: CHAT,
            sender: user(),
        })
    }

    #[tokio::test]
    async fn start_from_non_member_gets_only_join_prompt() {
        let h = harness(ScriptedDirectory::always("left"), CountingResolver::not_found());
        h.router.route(start()).await;

        match h.messenger.sent().as_slice() {
            [Sent::Photo {
                chat_id, keyboard, ..
            }] => {
                assert_eq!(*chat_id, CHAT);
                assert!(keyboard.buttons().any(
                    |b| matches!(b, InlineButton::Url { url, .. } if url == "https://t.me/chan")
                ));
            }
            other => panic!("unexpected sends: {other:?}"),
        }
    }

    #[tokio::test]
    async fn start_from_member_gets_welcome() {
        let h = harness(ScriptedDirectory::always("member"), CountingResolver::not_found());
        h.router.route(start()).await;
        assert_eq!(h.messenger.texts_to(CHAT), vec![texts::WELCOME.to_string()]);
        assert_eq!(h.messenger.photos_to(CHAT), 0);
    }

    #[tokio::test]
    async fn member_url_is_resolved_and_link_relayed() {
        let h = harness(
            ScriptedDirectory::always("member"),
            CountingResolver::found("https://cdn/x.mp4"),
        );
        h.router.route(text("https://example.com/video")).await;

        let replies = h.messenger.texts_to(CHAT);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], texts::PROCESSING);
        assert!(replies[1].contains("https://cdn/x.mp4"));
        assert_eq!(h.resolver.calls().len(), 1);
    }

    #[tokio::test]
    async fn member_url_without_result_gets_check_url_reply() {
        let h = harness(ScriptedDirectory::always("member"), CountingResolver::not_found());
        h.router.route(text("https://example.com/video")).await;

        assert_eq!(
            h.messenger.texts_to(CHAT),
            vec![texts::PROCESSING.to_string(), texts::NO_RESULT.to_string()]
        );
    }

    #[tokio::test]
    async fn member_non_url_gets_no_reply() {
        let h = harness(ScriptedDirectory::always("member"), CountingResolver::not_found());
        h.router.route(text("not-a-url")).await;

        assert!(h.messenger.sent().is_empty());
        assert!(h.resolver.calls().is_empty());
        assert_eq!(h.directory.lookups().len(), 1);
    }

    #[tokio::test]
    async fn recheck_after_joining_notifies_admin_and_confirms() {
        let h = harness(ScriptedDirectory::always("member"), CountingResolver::not_found());
        h.router.route(recheck()).await;

        assert_eq!(h.messenger.texts_to(ADMIN).len(), 1);
        assert_eq!(
            h.messenger.texts_to(CHAT),
            vec![texts::RECHECK_CONFIRMED.to_string()]
        );
        assert_eq!(h.messenger.photos_to(CHAT), 0);
    }

    #[tokio::test]
    async fn lookup_failure_on_start_reports_error_and_prompts() {
        let h = harness(
            ScriptedDirectory::failing("Bad Request: chat not found"),
            CountingResolver::not_found(),
        );
        h.router.route(start()).await;

        let admin = h.messenger.texts_to(ADMIN);
        assert_eq!(admin.len(), 1);
        assert!(admin[0].contains("chat not found"));
        assert!(admin[0].contains("42 (alice)"));

        assert_eq!(h.messenger.photos_to(CHAT), 1);
        assert!(h.messenger.texts_to(CHAT).is_empty());
    }

    #[tokio::test]
    async fn non_member_url_is_never_resolved() {
        let h = harness(ScriptedDirectory::always("kicked"), CountingResolver::not_found());
        h.router.route(text("https://example.com/video")).await;

        assert!(h.resolver.calls().is_empty());
        assert_eq!(h.messenger.photos_to(CHAT), 1);
        assert!(h.messenger.texts_to(CHAT).is_empty());
    }

    #[tokio::test]
    async fn authorization_is_not_cached_between_events() {
        let h = harness(
            ScriptedDirectory::new(vec![Ok("member"), Ok("left")]),
            CountingResolver::found("https://cdn/x.mp4"),
        );

        h.router.route(text("https://example.com/a")).await;
        h.router.route(text("https://example.com/b")).await;

        assert_eq!(h.directory.lookups().len(), 2);
        assert_eq!(h.resolver.calls(), vec!["https://example.com/a".to_string()]);
        assert_eq!(h.messenger.photos_to(CHAT), 1);
    }

    #[tokio::test]
    async fn every_gated_event_looks_up_the_configured_channel() {
        let h = harness(ScriptedDirectory::always("member"), CountingResolver::not_found());
        h.router.route(start()).await;
        h.router.route(recheck()).await;

        assert_eq!(
            h.directory.lookups(),
            vec![
                (ChannelId("@chan".into()), UserId(42)),
                (ChannelId("@chan".into()), UserId(42)),
            ]
        );
    }
}
