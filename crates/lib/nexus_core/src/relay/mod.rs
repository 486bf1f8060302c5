// @awa-component: CHAT-Relay
//
//! Chat relay: turns a client message into a provider request and back.
//!
//! 1. Validate the mode and message
//! 2. Resolve the persona
//! 3. Keep only the most recent [`HISTORY_WINDOW`] turns
//! 4. Prepend the persona prompt, append the new message
//! 5. Call the provider and unwrap the reply text

mod provider;

pub use provider::{ChatProvider, ProviderError, ProviderRequest};

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::persona::{Persona, PersonaRegistry, UnknownMode};
use crate::turn::Turn;

/// Maximum number of prior turns forwarded to the provider.
pub const HISTORY_WINDOW: usize = 10;

/// Reply used when the provider answers without any text.
pub const FALLBACK_REPLY: &str = "No reply generated";

/// Errors from [`ChatRelay::submit_turn`].
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Stateless relay between chat clients and a [`ChatProvider`].
#[derive(Clone)]
pub struct ChatRelay {
    registry: PersonaRegistry,
    provider: Arc<dyn ChatProvider>,
    history_window: usize,
}

impl ChatRelay {
    pub fn new(registry: PersonaRegistry, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            registry,
            provider,
            history_window: HISTORY_WINDOW,
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// Submit one user turn and return the provider's reply.
    ///
    /// Validation happens before any outbound call.
    pub async fn submit_turn(
        &self,
        message: &str,
        mode: &str,
        history: &[Turn],
    ) -> Result<String, RelayError> {
        let persona = self.registry.resolve(mode)?;
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let request = build_request(persona, history, message, self.history_window);
        debug!(
            mode = %persona.mode,
            history_in = history.len(),
            turns_out = request.turns.len(),
            "forwarding chat turn to provider"
        );

        let reply = self.provider.generate(&request).await?;
        Ok(reply
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

/// The trailing `limit` turns of `history`, order preserved.
pub fn recent_window(history: &[Turn], limit: usize) -> &[Turn] {
    &history[history.len().saturating_sub(limit)..]
}

/// Assemble `[prompt] + window(history) + [message]` with the persona's
/// generation parameters.
pub fn build_request(
    persona: &Persona,
    history: &[Turn],
    message: &str,
    window: usize,
) -> ProviderRequest {
    let recent = recent_window(history, window);
    let mut turns = Vec::with_capacity(recent.len() + 2);
    turns.push(Turn::user(persona.prompt));
    turns.extend_from_slice(recent);
    turns.push(Turn::user(message));

    ProviderRequest {
        turns,
        generation: persona.generation,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::persona::Mode;
    use crate::turn::Role;

    /// Records every request and answers from a fixed script.
    struct ScriptedProvider {
        seen: Mutex<Vec<ProviderRequest>>,
        answer: fn() -> Result<Option<String>, ProviderError>,
    }

    impl ScriptedProvider {
        fn new(answer: fn() -> Result<Option<String>, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                answer,
            })
        }

        fn requests(&self) -> Vec<ProviderRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn generate(
            &self,
            request: &ProviderRequest,
        ) -> Result<Option<String>, ProviderError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.answer)()
        }
    }

    fn relay(provider: Arc<ScriptedProvider>) -> ChatRelay {
        ChatRelay::new(PersonaRegistry::standard(), provider)
    }

    fn numbered_history(n: usize) -> Vec<Turn> {
        (0..n)
            .map(|i| {
                let role = if i % 2 == 0 { Role::User } else { Role::Model };
                Turn::new(role, format!("turn {i}"))
            })
            .collect()
    }

    #[tokio::test]
    async fn hi_in_blue_sends_prompt_then_message() {
        let provider = ScriptedProvider::new(|| Ok(Some("Hello!".into())));
        let reply = relay(provider.clone())
            .submit_turn("hi", "blue", &[])
            .await
            .expect("reply");

        assert_eq!(reply, "Hello!");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let blue = PersonaRegistry::standard().get(Mode::Blue).clone();
        assert_eq!(
            requests[0].turns,
            vec![Turn::user(blue.prompt), Turn::user("hi")]
        );
        assert_eq!(requests[0].generation, blue.generation);
    }

    #[tokio::test]
    async fn red_requests_use_red_generation() {
        let provider = ScriptedProvider::new(|| Ok(Some("Pathetic.".into())));
        relay(provider.clone())
            .submit_turn("help", "red", &[])
            .await
            .expect("reply");

        let request = &provider.requests()[0];
        assert_eq!(request.generation.temperature, 0.9);
        assert_eq!(request.generation.max_output_tokens, 1000);
        assert!(request.turns[0].text.contains("Phantom"));
    }

    #[tokio::test]
    async fn history_is_trimmed_to_the_last_ten_turns() {
        let provider = ScriptedProvider::new(|| Ok(Some("ok".into())));
        let history = numbered_history(25);
        relay(provider.clone())
            .submit_turn("next", "blue", &history)
            .await
            .expect("reply");

        let turns = &provider.requests()[0].turns;
        assert_eq!(turns.len(), 12);
        assert_eq!(&turns[1..11], &history[15..]);
        assert_eq!(turns[11], Turn::user("next"));
    }

    #[tokio::test]
    async fn unknown_mode_never_reaches_the_provider() {
        let provider = ScriptedProvider::new(|| Ok(Some("unreachable".into())));
        let err = relay(provider.clone())
            .submit_turn("hi", "green", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::UnknownMode(UnknownMode(ref m)) if m == "green"));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let provider = ScriptedProvider::new(|| Ok(Some("unreachable".into())));
        let err = relay(provider.clone())
            .submit_turn("  \n", "blue", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::EmptyMessage));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_text_falls_back() {
        let provider = ScriptedProvider::new(|| Ok(None));
        let reply = relay(provider).submit_turn("hi", "blue", &[]).await.expect("reply");
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider =
            ScriptedProvider::new(|| Err(ProviderError::Timeout(Duration::from_secs(10))));
        let err = relay(provider).submit_turn("hi", "blue", &[]).await.unwrap_err();
        assert!(matches!(err, RelayError::Provider(ProviderError::Timeout(_))));
    }

    #[test]
    fn window_keeps_short_histories_whole() {
        let history = numbered_history(3);
        assert_eq!(recent_window(&history, HISTORY_WINDOW), &history[..]);
        assert!(recent_window(&[], HISTORY_WINDOW).is_empty());
    }
}
