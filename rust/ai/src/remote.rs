//! Decision provider backed by an external language-model service.
//!
//! The engine expects an infallible `decide`, so everything that can go
//! wrong out here (transport errors, timeouts, malformed or rule-breaking
//! responses) is resolved locally: up to three attempts, each fed the
//! previous failure reason, then a logged fold.

use std::time::Duration;

use async_trait::async_trait;
use pokermind_engine::cards::format_cards;
use pokermind_engine::provider::{Decision, DecisionContext, DecisionProvider};
use serde::Deserialize;
use thiserror::Error;

const MAX_ATTEMPTS: u32 = 3;
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("model transport failure: {0}")]
    Transport(String),
    #[error("model response timed out after {0:?}")]
    Timeout(Duration),
    #[error("model response was not valid JSON: {0}")]
    Malformed(String),
    #[error("model response broke the action contract: {0}")]
    Contract(String),
}

/// Transport boundary to the model service. One prompt in, raw completion
/// text out; implementations own authentication and endpoint details.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// `ModelClient` for OpenAI-style chat completion endpoints.
pub struct HttpModelClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpModelClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        #[derive(Deserialize)]
        struct Completion {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Transport("empty choices".to_string()))
    }
}

/// The wire contract the model must answer with: `raise` carries a positive
/// `raise_amount`, every other action carries none.
#[derive(Debug, Deserialize)]
struct ActionResponse {
    action: String,
    #[serde(default)]
    raise_amount: Option<u32>,
}

/// Seat decisions delegated to a remote model.
pub struct RemoteProvider<C> {
    name: String,
    client: C,
    attempt_timeout: Duration,
}

impl<C: ModelClient> RemoteProvider<C> {
    pub fn new(name: impl Into<String>, client: C) -> Self {
        Self {
            name: name.into(),
            client,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    fn build_prompt(&self, ctx: &DecisionContext, failure: Option<&ProviderError>) -> String {
        let history = ctx.action_log.join("\n");
        let mut prompt = format!(
            "You are an expert-level poker AI tasked with making optimal decisions \
             in a poker game. Your job is to WIN! You will be given the current game \
             state and your goal is to determine the best action to take.\n\n\
             Here's the current game state:\n\n\
             Game history:\n{history}\n\n\
             Your Hole Cards: {hole}\n\
             Community Cards: {board}\n\
             Pot: {pot}\n\
             Chips: {stack}\n\
             Amount to call: {to_call}\n\
             Minimum raise over current bet: {min_raise}\n\n\
             Important rules:\n\
             - Determine optimal action: fold, call, or raise.\n\
             - If raising, provide an appropriate raise amount.\n\
             - Output your decision in valid JSON format.\n\n\
             Output example:\n\
             {{\n  \"action\": \"call\",\n  \"raise_amount\": null\n}}",
            history = history,
            hole = format_cards(&ctx.hand),
            board = format_cards(&ctx.community),
            pot = ctx.pot,
            stack = ctx.stack,
            to_call = ctx.to_call,
            min_raise = ctx.min_raise,
        );
        if let Some(failure) = failure {
            prompt.push_str(&format!(
                "\n\nYour previous answer was rejected: {failure}. \
                 Answer again with exactly the JSON contract above."
            ));
        }
        prompt
    }

    fn parse(text: &str) -> Result<Decision, ProviderError> {
        let response: ActionResponse = serde_json::from_str(text.trim())
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        match (response.action.as_str(), response.raise_amount) {
            ("fold", None) => Ok(Decision::Fold),
            ("call", None) => Ok(Decision::Call),
            ("raise", Some(amount)) if amount > 0 => Ok(Decision::Raise { amount }),
            ("raise", _) => Err(ProviderError::Contract(
                "raise requires a positive raise_amount".to_string(),
            )),
            ("fold" | "call", Some(_)) => Err(ProviderError::Contract(format!(
                "raise_amount must be null when action is '{}'",
                response.action
            ))),
            (other, _) => Err(ProviderError::Contract(format!(
                "unknown action '{other}'"
            ))),
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<Decision, ProviderError> {
        let text = tokio::time::timeout(self.attempt_timeout, self.client.complete(prompt))
            .await
            .map_err(|_| ProviderError::Timeout(self.attempt_timeout))??;
        Self::parse(&text)
    }
}

#[async_trait]
impl<C: ModelClient> DecisionProvider for RemoteProvider<C> {
    async fn decide(&self, ctx: &DecisionContext) -> Decision {
        let mut failure = None;
        for attempt in 1..=MAX_ATTEMPTS {
            let prompt = self.build_prompt(ctx, failure.as_ref());
            match self.attempt(&prompt).await {
                Ok(decision) => return decision,
                Err(err) => {
                    tracing::warn!(
                        provider = %self.name,
                        seat = ctx.seat,
                        attempt,
                        %err,
                        "model decision attempt failed"
                    );
                    failure = Some(err);
                }
            }
        }
        tracing::warn!(
            provider = %self.name,
            seat = ctx.seat,
            "all model attempts failed; folding"
        );
        Decision::Fold
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokermind_engine::player::PlayerStatus;
    use pokermind_engine::provider::SeatView;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CannedClient {
        responses: Mutex<Vec<Result<String, ProviderError>>>,
        calls: AtomicUsize,
    }

    impl CannedClient {
        fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelClient for &CannedClient {
        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.responses.lock().expect("responses");
            if guard.is_empty() {
                Err(ProviderError::Transport("exhausted".to_string()))
            } else {
                guard.remove(0)
            }
        }
    }

    fn ctx() -> DecisionContext {
        DecisionContext {
            seat: 1,
            hand: Vec::new(),
            community: Vec::new(),
            pot: 30,
            table_bet: 10,
            to_call: 10,
            min_raise: 10,
            stack: 990,
            round_bet: 0,
            seats: vec![SeatView {
                seat: 1,
                name: "model".to_string(),
                stack: 990,
                round_bet: 0,
                status: PlayerStatus::Active,
                is_dealer: false,
            }],
            action_log: vec!["alice posts small blind 5".to_string()],
        }
    }

    #[test]
    fn parse_accepts_the_three_legal_shapes() {
        assert_eq!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"fold","raise_amount":null}"#)
                .expect("fold"),
            Decision::Fold
        );
        assert_eq!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"call"}"#).expect("call"),
            Decision::Call
        );
        assert_eq!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"raise","raise_amount":40}"#)
                .expect("raise"),
            Decision::Raise { amount: 40 }
        );
    }

    #[test]
    fn parse_rejects_contract_violations() {
        assert!(matches!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"raise"}"#),
            Err(ProviderError::Contract(_))
        ));
        assert!(matches!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"raise","raise_amount":0}"#),
            Err(ProviderError::Contract(_))
        ));
        assert!(matches!(
            RemoteProvider::<&CannedClient>::parse(r#"{"action":"call","raise_amount":20}"#),
            Err(ProviderError::Contract(_))
        ));
        assert!(matches!(
            RemoteProvider::<&CannedClient>::parse("the best play here is to raise"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let client = CannedClient::new(vec![
            Ok("not json at all".to_string()),
            Ok(r#"{"action":"raise","raise_amount":null}"#.to_string()),
            Ok(r#"{"action":"call"}"#.to_string()),
        ]);
        let provider = RemoteProvider::new("model", &client);
        let decision = provider.decide(&ctx()).await;
        assert_eq!(decision, Decision::Call);
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_attempts_fall_back_to_fold() {
        let client = CannedClient::new(vec![
            Err(ProviderError::Transport("boom".to_string())),
            Ok("{}".to_string()),
            Ok(r#"{"action":"shove"}"#.to_string()),
        ]);
        let provider = RemoteProvider::new("model", &client);
        let decision = provider.decide(&ctx()).await;
        assert_eq!(decision, Decision::Fold);
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn rejection_reason_is_fed_back_into_the_prompt() {
        let client = CannedClient::new(vec![
            Ok(r#"{"action":"raise"}"#.to_string()),
            Ok(r#"{"action":"call"}"#.to_string()),
        ]);
        let provider = RemoteProvider::new("model", &client);
        let failure = ProviderError::Contract("raise requires a positive raise_amount".to_string());
        let prompt = provider.build_prompt(&ctx(), Some(&failure));
        assert!(prompt.contains("previous answer was rejected"));
        assert!(prompt.contains("raise requires a positive raise_amount"));
    }
}
