use std::time::Duration;

use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::{
        entities::{ModelCallError, ModelRequest, Modality, RawModelOutput},
        ports::{LLMClient, RateLimiter},
        rate_limit::EndpointClass,
        retry::{InvocationState, RetryDecision, RetryPolicy, classify_failure},
    },
};

/// Issues model calls under a per-attempt deadline, a bounded retry budget
/// and the per-user rate limit.
#[derive(Debug, Clone)]
pub struct ModelInvoker<L, RL> {
    client: L,
    rate_limiter: RL,
    policy: RetryPolicy,
    timeout: Duration,
}

impl<L, RL> ModelInvoker<L, RL>
where
    L: LLMClient,
    RL: RateLimiter,
{
    pub fn new(client: L, rate_limiter: RL, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            rate_limiter,
            policy,
            timeout,
        }
    }

    pub fn from_config(client: L, rate_limiter: RL, config: &LLMConfig) -> Self {
        Self::new(
            client,
            rate_limiter,
            RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.backoff_base_ms),
            ),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn rate_limiter(&self) -> &RL {
        &self.rate_limiter
    }

    #[instrument(skip(self, request), fields(user_id = %user_id, endpoint = %endpoint))]
    pub async fn invoke(
        &self,
        user_id: Uuid,
        endpoint: EndpointClass,
        request: &ModelRequest,
    ) -> Result<RawModelOutput, CoreError> {
        self.rate_limiter.try_acquire(user_id, endpoint).await?;

        let mut state = InvocationState::Attempting(0);
        loop {
            state = match state {
                InvocationState::Attempting(attempt) => self.attempt(attempt, request).await,
                InvocationState::Succeeded(output) => return Ok(output),
                InvocationState::Failed(error) => return Err(error),
            };
        }
    }

    async fn attempt(&self, attempt: u32, request: &ModelRequest) -> InvocationState {
        match tokio::time::timeout(self.timeout, self.call_once(request)).await {
            Err(_) => {
                warn!(attempt, "model call exceeded {:?}", self.timeout);
                InvocationState::Failed(CoreError::Timeout)
            }
            Ok(Ok(text)) => InvocationState::Succeeded(RawModelOutput::new(text)),
            Ok(Err(call_error)) => match self.policy.decide(attempt, &call_error) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        "transient model failure, retrying in {:?}: {}",
                        delay,
                        call_error
                    );
                    tokio::time::sleep(delay).await;
                    InvocationState::Attempting(attempt + 1)
                }
                RetryDecision::Stop => {
                    error!(attempt, "model call failed: {}", call_error);
                    InvocationState::Failed(classify_failure(call_error, attempt + 1))
                }
            },
        }
    }

    async fn call_once(&self, request: &ModelRequest) -> Result<String, ModelCallError> {
        let prompt = &request.prompt;
        match &request.modality {
            Modality::Text => {
                self.client
                    .generate_with_text(
                        prompt.text.clone(),
                        prompt.response_schema.clone(),
                        prompt.temperature,
                    )
                    .await
            }
            Modality::TextAndImage(image) => {
                self.client
                    .generate_with_image(
                        prompt.text.clone(),
                        image.clone(),
                        prompt.response_schema.clone(),
                        prompt.temperature,
                    )
                    .await
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::domain::common::RateLimitConfig;
    use crate::domain::llm::{entities::ImageInput, rate_limit::RateLimits};
    use crate::domain::prompt::entities::PromptDocument;
    use crate::infrastructure::rate_limit::InMemoryRateLimiter;

    /// Replays canned provider outcomes in order and counts outbound calls.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedClient {
        responses: Arc<Mutex<VecDeque<Result<String, ModelCallError>>>>,
        calls: Arc<AtomicUsize>,
        delay: Option<Duration>,
    }

    impl ScriptedClient {
        pub(crate) fn new(responses: Vec<Result<String, ModelCallError>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                ..Self::default()
            }
        }

        pub(crate) fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn next(&self) -> Result<String, ModelCallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ModelCallError::EmptyResponse));
            next
        }
    }

    impl LLMClient for ScriptedClient {
        async fn generate_with_text(
            &self,
            _prompt: String,
            _response_schema: serde_json::Value,
            _temperature: f32,
        ) -> Result<String, ModelCallError> {
            self.next().await
        }

        async fn generate_with_image(
            &self,
            _prompt: String,
            _image: ImageInput,
            _response_schema: serde_json::Value,
            _temperature: f32,
        ) -> Result<String, ModelCallError> {
            self.next().await
        }
    }

    pub(crate) fn invoker_with(
        client: ScriptedClient,
        limits: RateLimits,
    ) -> ModelInvoker<ScriptedClient, InMemoryRateLimiter> {
        ModelInvoker::new(
            client,
            InMemoryRateLimiter::new(limits),
            RetryPolicy::default(),
            Duration::from_secs(30),
        )
    }

    fn request() -> ModelRequest {
        ModelRequest::text(PromptDocument {
            text: "analyze".to_string(),
            response_schema: serde_json::json!({"type": "object"}),
            temperature: 0.3,
        })
    }

    fn unavailable() -> ModelCallError {
        ModelCallError::Status {
            status: 503,
            message: "overloaded".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let client = ScriptedClient::replying("{}");
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let output = invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeRecipe, &request())
            .await
            .unwrap();

        assert_eq!(output.as_str(), "{}");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_retry_with_backoff() {
        let client = ScriptedClient::new(vec![
            Err(unavailable()),
            Err(ModelCallError::Network("reset".to_string())),
            Ok("{\"ok\":true}".to_string()),
        ]);
        let invoker = invoker_with(client.clone(), RateLimits::default());
        let started = tokio::time::Instant::now();

        let output = invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeRecipe, &request())
            .await
            .unwrap();

        assert_eq!(output.as_str(), "{\"ok\":true}");
        assert_eq!(client.calls(), 3);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_upstream_failure() {
        let client = ScriptedClient::new(vec![
            Err(unavailable()),
            Err(unavailable()),
            Err(unavailable()),
            Ok("{}".to_string()),
        ]);
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let result = invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeRecipe, &request())
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_rejected_without_retry() {
        let client = ScriptedClient::new(vec![
            Err(ModelCallError::Status {
                status: 400,
                message: "bad request".to_string(),
            }),
            Ok("{}".to_string()),
        ]);
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let result = invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeRecipe, &request())
            .await;

        assert!(matches!(result, Err(CoreError::Rejected(_))));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let client =
            ScriptedClient::replying("{}").with_delay(Duration::from_secs(120));
        let invoker = invoker_with(client.clone(), RateLimits::default());

        let result = invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeImage, &request())
            .await;

        assert_eq!(result, Err(CoreError::Timeout));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_call_never_reaches_provider() {
        let client = ScriptedClient::new(vec![Ok("{}".to_string()); 5]);
        let limits = RateLimits::new(RateLimitConfig {
            analyze_recipe: 4,
            ..RateLimitConfig::default()
        });
        let invoker = invoker_with(client.clone(), limits);
        let user_id = Uuid::new_v4();

        for _ in 0..4 {
            invoker
                .invoke(user_id, EndpointClass::AnalyzeRecipe, &request())
                .await
                .unwrap();
        }
        let fifth = invoker
            .invoke(user_id, EndpointClass::AnalyzeRecipe, &request())
            .await;

        assert!(matches!(
            fifth,
            Err(CoreError::RateLimited { limit: 4, .. })
        ));
        assert_eq!(client.calls(), 4);
    }

    #[tokio::test]
    async fn test_rate_limits_are_scoped_per_user_and_endpoint() {
        let client = ScriptedClient::new(vec![Ok("{}".to_string()); 3]);
        let limits = RateLimits::new(RateLimitConfig {
            analyze_recipe: 1,
            ..RateLimitConfig::default()
        });
        let invoker = invoker_with(client.clone(), limits);
        let user_id = Uuid::new_v4();

        invoker
            .invoke(user_id, EndpointClass::AnalyzeRecipe, &request())
            .await
            .unwrap();
        invoker
            .invoke(user_id, EndpointClass::SuggestRecipes, &request())
            .await
            .unwrap();
        invoker
            .invoke(Uuid::new_v4(), EndpointClass::AnalyzeRecipe, &request())
            .await
            .unwrap();

        assert_eq!(client.calls(), 3);
    }
}
