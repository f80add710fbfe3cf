use async_openai::{
    config::OpenAIConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Single-prompt text generation. One prompt string in, one completion
/// string out; the model runtime itself is external.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Talks to any OpenAI-compatible chat endpoint; pointed at an Ollama `/v1`
/// base URL in the default configuration.
pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.llm_api_base.clone())
            .with_api_key(config.llm_api_key.expose_secret().to_string());

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to build chat message: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([message.into()])
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to build chat request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::Upstream(format!("model completion failed: {}", e)))?;

        let completion = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("model returned no completion".to_string()))?;

        log::debug!("model returned {} chars", completion.len());
        Ok(completion)
    }
}
