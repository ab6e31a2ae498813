use reqwest::Client;
use tracing::{debug, error};

use crate::domain::{
    common::LLMConfig,
    food_analysis::{
        entities::{ChatCompletionRequest, ChatCompletionResponse, TransportError},
        ports::LLMClient,
    },
};

/// Chat-completions client speaking the OpenAI wire format.
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl OpenAIChatClient {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call_chat_api(&self, request: &ChatCompletionRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                TransportError::Connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Chat completion API error: {} - {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| {
            error!("Failed to read chat completion body: {}", e);
            TransportError::Connection(e.to_string())
        })
    }
}

impl From<&LLMConfig> for OpenAIChatClient {
    fn from(config: &LLMConfig) -> Self {
        Self::new(config.api_key.clone(), config.endpoint.clone())
    }
}

impl LLMClient for OpenAIChatClient {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, TransportError> {
        let body = self.call_chat_api(&request).await?;

        let envelope = ChatCompletionResponse::from_body(&body).inspect_err(|e| {
            error!("Failed to parse chat completion envelope: {}", e);
        })?;
        debug!(
            id = envelope.id.as_deref().unwrap_or_default(),
            choices = envelope.choices.len(),
            "chat completion received"
        );

        envelope.into_content()
    }
}
