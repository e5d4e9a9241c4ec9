// =============================================================================
// MESSAGE ROUTER
// =============================================================================
//
// Decides what the bot does with an ordinary chat message:
//
//   Idle -> Classifying -> { Correct | Explain | NoAction } -> Idle
//
// 1. Bot authors, non-admitted channels, command messages and guilds with
//    auto-respond off are dropped before any analysis.
// 2. The classifier must call the message a programming question.
// 3. If the message carries code, the first block is corrected. Otherwise the
//    extracted concept is explained.
//
// Generation failures on this automatic path are logged and swallowed: a
// broken reply nobody asked for is worse than no reply.

use super::assistant_service::{GenerationError, ResponseGenerator};
use crate::core::analysis::{detect_language, extract_code_blocks, CodeBlock, QuestionClassifier};
use crate::core::bot_stats::{BotStatsService, StatKind, StatsStore};
use crate::core::settings::{ServerSettings, SettingsService, SettingsStore};
use std::sync::Arc;

/// Platform-neutral view of a chat message.
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub content: String,
    pub author_is_bot: bool,
    pub channel_id: u64,
    /// Name of the channel when it is a named guild text channel.
    pub channel_name: Option<String>,
    /// Guild the message came from, `None` for DMs.
    pub server_id: Option<u64>,
    /// The bot's own user id. A message opening with a mention of it is a
    /// command invocation.
    pub bot_user_id: Option<u64>,
}

impl IncomingMessage {
    /// True when the content starts with `<@id>` or `<@!id>` for the bot.
    fn mentions_bot_first(&self) -> bool {
        let Some(id) = self.bot_user_id else {
            return false;
        };
        let content = self.content.trim_start();
        content.starts_with(&format!("<@{id}>")) || content.starts_with(&format!("<@!{id}>"))
    }
}

/// Platform-specific check on where the bot may speak.
pub trait AdmissionGate: Send + Sync {
    fn admits(&self, message: &IncomingMessage) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoActionReason {
    AutomatedAuthor,
    NotAdmitted,
    /// Starts with the guild's command prefix or a mention of the bot; the
    /// command framework owns it.
    Command,
    AutoRespondDisabled,
    NotAQuestion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Correct { code: String, language: String },
    Explain { concept: String },
    NoAction(NoActionReason),
}

impl RouteDecision {
    pub fn is_action(&self) -> bool {
        !matches!(self, RouteDecision::NoAction(_))
    }

    /// Counter bumped when this action succeeds on the automatic path.
    fn stat(&self) -> Option<StatKind> {
        match self {
            RouteDecision::Correct { .. } => Some(StatKind::CodeFixed),
            RouteDecision::Explain { .. } => Some(StatKind::QuestionsAnswered),
            RouteDecision::NoAction(_) => None,
        }
    }
}

/// Reply to an explicit `fix`, with the language the input was corrected as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub reply: String,
    pub language: String,
}

pub struct MessageRouter<G, S, T>
where
    G: ResponseGenerator,
    S: SettingsStore,
    T: StatsStore,
{
    classifier: QuestionClassifier,
    admission: Box<dyn AdmissionGate>,
    generator: Arc<G>,
    settings: Arc<SettingsService<S>>,
    stats: Arc<BotStatsService<T>>,
}

impl<G, S, T> MessageRouter<G, S, T>
where
    G: ResponseGenerator,
    S: SettingsStore,
    T: StatsStore,
{
    pub fn new(
        classifier: QuestionClassifier,
        admission: Box<dyn AdmissionGate>,
        generator: Arc<G>,
        settings: Arc<SettingsService<S>>,
        stats: Arc<BotStatsService<T>>,
    ) -> Self {
        Self {
            classifier,
            admission,
            generator,
            settings,
            stats,
        }
    }

    /// Full admission + analysis pass for one message.
    pub async fn route(&self, message: &IncomingMessage) -> RouteDecision {
        if message.author_is_bot {
            return RouteDecision::NoAction(NoActionReason::AutomatedAuthor);
        }
        if !self.admission.admits(message) {
            return RouteDecision::NoAction(NoActionReason::NotAdmitted);
        }

        let settings = match self.settings.effective(message.server_id).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(server_id = ?message.server_id, "Using default settings: {}", e);
                ServerSettings::with_defaults(message.server_id.unwrap_or_default())
            }
        };

        if message.content.starts_with(&settings.prefix) || message.mentions_bot_first() {
            return RouteDecision::NoAction(NoActionReason::Command);
        }
        if !settings.auto_respond {
            return RouteDecision::NoAction(NoActionReason::AutoRespondDisabled);
        }

        self.decide(&message.content)
    }

    /// Classification and extraction only; no settings or admission checks.
    pub fn decide(&self, content: &str) -> RouteDecision {
        let analysis = self.classifier.classify(content);
        tracing::debug!(
            confidence = analysis.confidence,
            keyword_hits = analysis.signals.keyword_hits,
            question_locale = analysis.signals.question_locale,
            problem = analysis.signals.problem_indicator,
            "Message classified"
        );

        if !analysis.is_programming_question {
            return RouteDecision::NoAction(NoActionReason::NotAQuestion);
        }

        // Any code block wins over an explanation.
        if let Some(block) = extract_code_blocks(content).into_iter().next() {
            let (code, language) = code_and_language(block);
            return RouteDecision::Correct { code, language };
        }

        let concept = analysis
            .concept
            .unwrap_or_else(|| content.trim().to_string());
        RouteDecision::Explain { concept }
    }

    /// Generate the reply for an action decision.
    ///
    /// Returns `None` for `NoAction` and when generation fails; failures are
    /// logged, never surfaced to the channel.
    pub async fn respond(&self, decision: &RouteDecision) -> Option<String> {
        let result = match decision {
            RouteDecision::Correct { code, language } => {
                self.generator.correct(code, language).await
            }
            RouteDecision::Explain { concept } => self.generator.explain(concept).await,
            RouteDecision::NoAction(_) => return None,
        };

        match result {
            Ok(reply) => {
                if let Some(kind) = decision.stat() {
                    self.record(kind).await;
                }
                Some(reply)
            }
            Err(e) => {
                tracing::error!(?decision, "Error processing message: {}", e);
                None
            }
        }
    }

    /// Explicit `explain` command. Errors go back to the caller so it can apologise.
    pub async fn explain_on_request(&self, concept: &str) -> Result<String, GenerationError> {
        let reply = self.generator.explain(concept).await?;
        self.record(StatKind::ConceptsExplained).await;
        Ok(reply)
    }

    /// Explicit `fix` command. `Ok(None)` when the text holds no code.
    pub async fn correct_on_request(
        &self,
        content: &str,
    ) -> Result<Option<Correction>, GenerationError> {
        let Some(block) = extract_code_blocks(content).into_iter().next() else {
            return Ok(None);
        };

        let (code, language) = code_and_language(block);
        let reply = self.generator.correct(&code, &language).await?;
        self.record(StatKind::CodeFixed).await;
        Ok(Some(Correction { reply, language }))
    }

    async fn record(&self, kind: StatKind) {
        if let Err(e) = self.stats.record(kind).await {
            tracing::warn!(%kind, "Failed to record stat: {}", e);
        }
    }
}

/// The author's tag wins; the detector only sees untagged blocks.
fn code_and_language(block: CodeBlock) -> (String, String) {
    let language = match block.language {
        Some(tag) => tag,
        None => detect_language(&block.code).to_string(),
    };
    (block.code, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::bot_stats::InMemoryStatsStore;
    use crate::infra::settings::InMemorySettingsStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeGenerator {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ResponseGenerator for FakeGenerator {
        async fn explain(&self, concept: &str) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(format!("explain:{concept}"));
            if self.fail {
                return Err(GenerationError::Explanation("upstream down".into()));
            }
            Ok(format!("About {concept}"))
        }

        async fn correct(&self, code: &str, language: &str) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(format!("correct:{language}:{code}"));
            if self.fail {
                return Err(GenerationError::Correction("upstream down".into()));
            }
            Ok(format!("```{language}\n{code}\n```"))
        }
    }

    struct AdmitAll;

    impl AdmissionGate for AdmitAll {
        fn admits(&self, _: &IncomingMessage) -> bool {
            true
        }
    }

    struct OnlyChannel(u64);

    impl AdmissionGate for OnlyChannel {
        fn admits(&self, message: &IncomingMessage) -> bool {
            message.channel_id == self.0
        }
    }

    type TestRouter = MessageRouter<FakeGenerator, InMemorySettingsStore, InMemoryStatsStore>;

    struct Harness {
        router: TestRouter,
        generator: Arc<FakeGenerator>,
        settings: Arc<SettingsService<InMemorySettingsStore>>,
        stats: Arc<BotStatsService<InMemoryStatsStore>>,
    }

    fn harness_with(generator: FakeGenerator, admission: Box<dyn AdmissionGate>) -> Harness {
        let generator = Arc::new(generator);
        let settings = Arc::new(SettingsService::new(InMemorySettingsStore::new()));
        let stats = Arc::new(BotStatsService::new(InMemoryStatsStore::new()));
        let router = MessageRouter::new(
            QuestionClassifier::default(),
            admission,
            Arc::clone(&generator),
            Arc::clone(&settings),
            Arc::clone(&stats),
        );
        Harness {
            router,
            generator,
            settings,
            stats,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeGenerator::default(), Box::new(AdmitAll))
    }

    async fn handle(router: &TestRouter, message: &IncomingMessage) -> Option<String> {
        let decision = router.route(message).await;
        router.respond(&decision).await
    }

    fn message(content: &str) -> IncomingMessage {
        IncomingMessage {
            content: content.to_string(),
            channel_id: 1,
            server_id: Some(10),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn bot_authors_are_ignored() {
        let h = harness();
        let mut msg = message("How do I fix this bug in my function?");
        msg.author_is_bot = true;

        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::AutomatedAuthor)
        );
        assert!(handle(&h.router, &msg).await.is_none());
        assert!(h.generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admission_gate_is_checked() {
        let h = harness_with(FakeGenerator::default(), Box::new(OnlyChannel(99)));
        let msg = message("How do I fix this bug in my function?");

        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::NotAdmitted)
        );
    }

    #[tokio::test]
    async fn auto_respond_off_skips_classification() {
        let h = harness();
        h.settings.toggle_auto_respond(10).await.unwrap();

        let msg = message("How do I fix this bug in my function?");
        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::AutoRespondDisabled)
        );
    }

    #[tokio::test]
    async fn command_messages_are_left_to_commands() {
        let h = harness();
        h.settings.set_prefix(10, "$").await.unwrap();

        let msg = message("$explain how does async work?");
        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::Command)
        );

        // The default prefix no longer counts as a command in this guild.
        let msg = message("!why does my python code error?");
        assert!(h.router.route(&msg).await.is_action());
    }

    #[tokio::test]
    async fn mention_commands_are_left_to_commands() {
        let h = harness();
        let mut msg = message("<@123456789> explain how do closures work in javascript?");
        msg.bot_user_id = Some(123456789);
        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::Command)
        );

        msg.content = "  <@!123456789> fix `let x = ;` why is this an error?".to_string();
        assert_eq!(
            h.router.route(&msg).await,
            RouteDecision::NoAction(NoActionReason::Command)
        );
        assert!(handle(&h.router, &msg).await.is_none());
        assert!(h.generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mentioning_someone_else_is_still_routed() {
        let h = harness();
        let mut msg = message("<@42> how do closures work in javascript?");
        msg.bot_user_id = Some(123456789);
        assert!(matches!(
            h.router.route(&msg).await,
            RouteDecision::Explain { .. }
        ));
    }

    #[tokio::test]
    async fn small_talk_gets_no_reply() {
        let h = harness();
        assert_eq!(
            h.router.route(&message("I like turtles")).await,
            RouteDecision::NoAction(NoActionReason::NotAQuestion)
        );
    }

    #[tokio::test]
    async fn spanish_question_is_explained() {
        let h = harness();
        let msg = message("¿Cómo puedo ordenar un array en JavaScript?");

        let decision = h.router.route(&msg).await;
        let RouteDecision::Explain { concept } = &decision else {
            panic!("expected explain, got {decision:?}");
        };
        let lowered = concept.to_lowercase();
        assert!(lowered.contains("array") || lowered.contains("javascript"));

        let reply = h.router.respond(&decision).await.unwrap();
        assert!(reply.starts_with("About "));

        let stats = h.stats.snapshot().await.unwrap();
        assert_eq!(stats.questions_answered, 1);
        assert_eq!(stats.code_fixed, 0);
    }

    #[tokio::test]
    async fn tagged_code_block_is_corrected() {
        let h = harness();
        let msg = message("This code throws an error:\n```python\ndef add(a, b)\n    return a + b\n```");

        let decision = h.router.route(&msg).await;
        assert_eq!(
            decision,
            RouteDecision::Correct {
                code: "def add(a, b)\n    return a + b".to_string(),
                language: "python".to_string(),
            }
        );

        assert!(handle(&h.router, &msg).await.is_some());
        assert_eq!(h.stats.snapshot().await.unwrap().code_fixed, 1);
    }

    #[tokio::test]
    async fn code_beats_explanation_for_questions() {
        let h = harness();
        let msg = message("Why does this function fail?\n```\ndef add(a, b):\n    return a+b\n```");

        match h.router.route(&msg).await {
            RouteDecision::Correct { language, .. } => assert_eq!(language, "python"),
            other => panic!("expected correction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tag_is_trusted_over_detection() {
        let h = harness();
        // Looks like python, but the author says ruby.
        let decision = h
            .router
            .decide("my code has a bug\n```ruby\ndef add(a, b):\n    return a+b\n```");
        assert_eq!(
            decision,
            RouteDecision::Correct {
                code: "def add(a, b):\n    return a+b".to_string(),
                language: "ruby".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn generation_failure_is_swallowed() {
        let h = harness_with(
            FakeGenerator {
                fail: true,
                ..Default::default()
            },
            Box::new(AdmitAll),
        );

        let reply = handle(&h.router, &message("How do I fix this bug in my function?")).await;
        assert!(reply.is_none());
        assert_eq!(h.generator.calls.lock().unwrap().len(), 1);

        let stats = h.stats.snapshot().await.unwrap();
        assert_eq!(stats.questions_answered, 0);
    }

    #[tokio::test]
    async fn explicit_explain_counts_concepts() {
        let h = harness();
        let reply = h.router.explain_on_request("javascript closures").await.unwrap();
        assert_eq!(reply, "About javascript closures");
        assert_eq!(h.stats.snapshot().await.unwrap().concepts_explained, 1);
    }

    #[tokio::test]
    async fn explicit_fix_without_code_is_none() {
        let h = harness();
        assert!(h.router.correct_on_request("no code here").await.unwrap().is_none());
        assert!(h.generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn explicit_fix_detects_untagged_language() {
        let h = harness();
        let correction = h
            .router
            .correct_on_request("```\nSELECT name FROM users WHERE id = 1\n```")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(correction.language, "sql");
        assert!(correction.reply.starts_with("```sql"));
        assert_eq!(h.stats.snapshot().await.unwrap().code_fixed, 1);
    }

    #[tokio::test]
    async fn explicit_fix_reports_the_input_tag() {
        let h = harness();
        let correction = h
            .router
            .correct_on_request("```ruby\nputs 'hi\n```")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(correction.language, "ruby");
    }

    #[tokio::test]
    async fn explicit_path_surfaces_errors() {
        let h = harness_with(
            FakeGenerator {
                fail: true,
                ..Default::default()
            },
            Box::new(AdmitAll),
        );

        assert!(h.router.explain_on_request("closures").await.is_err());
        assert!(h.router.correct_on_request("`x = 1`").await.is_err());
        assert_eq!(h.stats.snapshot().await.unwrap().concepts_explained, 0);
    }
}
