//! Chat companion with a canned-reply fallback.
//!
//! The companion forwards each user message to an optional
//! [`CompletionService`]. When there is no service, the service fails, or
//! it does not answer within the timeout, a reply is drawn uniformly from a
//! fixed pool instead. There is no retry.

use crate::config::CompanionConfig;
use crate::{Error, Message, Result, Role};
use async_trait::async_trait;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use std::time::Duration;

/// First message of every transcript
pub const GREETING: &str = "Hello! I'm here to listen and support you. What's on your mind today? Remember, this is a safe space where you can share anything you're feeling.";

/// Used when the service answers with nothing
pub const ACKNOWLEDGEMENT: &str =
    "I hear you. Can you tell me more about what you're experiencing?";

/// Replies used when the completion service is unavailable
pub const FALLBACK_REPLIES: [&str; 5] = [
    "I hear you, and what you're feeling is completely valid. It takes courage to share these thoughts. What do you think might be contributing to these feelings?",
    "Thank you for trusting me with this. Sometimes just naming our emotions can be the first step toward understanding them better. How long have you been feeling this way?",
    "It sounds like you're going through something difficult. Remember that it's okay to feel this way - emotions are information, not facts. What would you say to a friend experiencing this?",
    "I can sense the weight of what you're carrying. You're not alone in this. What's one small thing that has brought you even a moment of peace recently?",
    "Your awareness of these patterns shows real insight. That's actually a strength, even when it doesn't feel like it. What do you think your mind is trying to protect you from?",
];

/// Remote text completion backend
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete `user_message` under `system_prompt`
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

/// Uniform random choice over [`FALLBACK_REPLIES`]
pub struct FallbackResponder {
    rng: Box<dyn RngCore + Send>,
}

impl FallbackResponder {
    /// Use the given random source
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Deterministic selection for a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(Mcg128Xsl64::from_entropy())
    }

    pub fn pick(&mut self) -> &'static str {
        let index = self.rng.gen_range(0..FALLBACK_REPLIES.len());
        FALLBACK_REPLIES[index]
    }
}

/// Conversation state plus the reply policy
pub struct Companion {
    service: Option<Box<dyn CompletionService>>,
    fallback: FallbackResponder,
    system_prompt: String,
    timeout: Duration,
    transcript: Vec<Message>,
}

impl Companion {
    pub fn new(fallback: FallbackResponder, system_prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            service: None,
            fallback,
            system_prompt: system_prompt.into(),
            timeout,
            transcript: vec![Message::new(Role::Companion, GREETING)],
        }
    }

    /// Build from configuration; a configured seed pins fallback selection
    pub fn from_config(config: &CompanionConfig) -> Self {
        let fallback = match config.seed {
            Some(seed) => FallbackResponder::from_seed(seed),
            None => FallbackResponder::from_entropy(),
        };
        Self::new(
            fallback,
            config.system_prompt.clone(),
            Duration::from_secs(config.response_timeout_secs),
        )
    }

    pub fn with_service(mut self, service: impl CompletionService + 'static) -> Self {
        self.service = Some(Box::new(service));
        self
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Record `message` and produce the companion's reply
    pub async fn respond(&mut self, message: &str) -> Result<&Message> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        self.transcript.push(Message::new(Role::User, message));

        let reply = match self.ask_service(message).await {
            Ok(text) if text.trim().is_empty() => ACKNOWLEDGEMENT.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Completion unavailable, using fallback reply: {}", e);
                self.fallback.pick().to_string()
            }
        };

        self.transcript.push(Message::new(Role::Companion, reply));
        self.transcript
            .last()
            .ok_or_else(|| Error::Other("transcript is empty".into()))
    }

    async fn ask_service(&self, message: &str) -> Result<String> {
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| Error::Completion("no completion service configured".into()))?;

        match tokio::time::timeout(self.timeout, service.complete(&self.system_prompt, message))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Completion(format!(
                "no response within {:?}",
                self.timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    struct Echo;

    #[async_trait]
    impl CompletionService for Echo {
        async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
            Ok(format!("[{}] {}", system_prompt, user_message))
        }
    }

    struct Failing;

    #[async_trait]
    impl CompletionService for Failing {
        async fn complete(&self, _: &str, _: &str) -> Result<String> {
            Err(Error::Completion("HTTP 500".into()))
        }
    }

    struct Silent;

    #[async_trait]
    impl CompletionService for Silent {
        async fn complete(&self, _: &str, _: &str) -> Result<String> {
            Ok("   ".into())
        }
    }

    struct Slow;

    #[async_trait]
    impl CompletionService for Slow {
        async fn complete(&self, _: &str, _: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".into())
        }
    }

    fn companion() -> Companion {
        Companion::new(
            FallbackResponder::with_rng(StepRng::new(0, 0)),
            "be kind",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_seeded_fallback_is_repeatable() {
        let mut a = FallbackResponder::from_seed(7);
        let mut b = FallbackResponder::from_seed(7);
        let first: Vec<_> = (0..10).map(|_| a.pick()).collect();
        let second: Vec<_> = (0..10).map(|_| b.pick()).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|r| FALLBACK_REPLIES.contains(r)));
    }

    #[test]
    fn test_pinned_rng_picks_first_reply() {
        let mut responder = FallbackResponder::with_rng(StepRng::new(0, 0));
        assert_eq!(responder.pick(), FALLBACK_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_transcript_starts_with_greeting() {
        let companion = companion();
        assert_eq!(companion.transcript().len(), 1);
        assert_eq!(companion.transcript()[0].content, GREETING);
        assert_eq!(companion.transcript()[0].role, Role::Companion);
    }

    #[tokio::test]
    async fn test_service_reply_is_used() {
        let mut companion = companion().with_service(Echo);
        let reply = companion.respond("I'm feeling anxious").await.unwrap();
        assert_eq!(reply.content, "[be kind] I'm feeling anxious");
        assert_eq!(companion.transcript().len(), 3);
        assert_eq!(companion.transcript()[1].role, Role::User);
    }

    #[tokio::test]
    async fn test_no_service_uses_fallback() {
        let mut companion = companion();
        let reply = companion.respond("hello").await.unwrap();
        assert_eq!(reply.content, FALLBACK_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_failing_service_uses_fallback() {
        let mut companion = companion().with_service(Failing);
        let reply = companion.respond("hello").await.unwrap();
        assert_eq!(reply.content, FALLBACK_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_blank_completion_acknowledges() {
        let mut companion = companion().with_service(Silent);
        let reply = companion.respond("hello").await.unwrap();
        assert_eq!(reply.content, ACKNOWLEDGEMENT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let mut companion = companion().with_service(Slow);
        let reply = companion.respond("hello").await.unwrap();
        assert_eq!(reply.content, FALLBACK_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let mut companion = companion();
        let err = companion.respond("   ").await.unwrap_err();
        assert!(matches!(err, Error::EmptyMessage));
        assert_eq!(companion.transcript().len(), 1);
    }
}
