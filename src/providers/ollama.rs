use crate::config::ProviderConfig;
use crate::error::CaptionError;
use crate::providers::{ChatModel, ChatRequest};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct OllamaModel {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaModel {
    /// Create a new Ollama model from configuration. No API key needed
    /// for a local instance.
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, CaptionError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaModel {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            model: config.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaModel {
            client: Client::new(),
            base_url,
            model,
        }
    }
}

#[async_trait]
impl ChatModel for OllamaModel {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, CaptionError> {
        // Ollama uses an OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": request.system},
                    {"role": "user", "content": request.user}
                ],
                "temperature": request.temperature,
                "max_tokens": request.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            return Err(CaptionError::Generation(format!("Ollama error: {}", error)));
        }

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                CaptionError::Generation("Failed to extract content from response".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}
