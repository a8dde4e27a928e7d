//! Completion provider abstraction
//!
//! Provides a common interface for the external text-completion service.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{OpenAIService, DEFAULT_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = request.last_user_text().map_or(0, str::len),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    transient = e.kind.is_transient(),
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::MockLlmService;

    #[tokio::test]
    async fn test_logging_service_passes_through() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_response(LlmResponse::text("ok"));
        mock.queue_error(LlmError::rate_limited("busy"));

        let service = LoggingService::new(mock.clone());
        assert_eq!(service.model_id(), "mock-model");

        let request = LlmRequest {
            system: String::new(),
            messages: vec![LlmMessage::user("ping")],
            max_tokens: 5,
            temperature: 0.0,
        };
        assert_eq!(service.complete(&request).await.unwrap().text, "ok");
        assert_eq!(
            service.complete(&request).await.unwrap_err().kind,
            LlmErrorKind::RateLimited
        );
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
