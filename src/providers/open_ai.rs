use crate::config::ProviderConfig;
use crate::error::CaptionError;
use crate::providers::{ChatModel, ChatRequest};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct OpenAIModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIModel {
    /// Create a new OpenAI model from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, CaptionError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                CaptionError::Builder("OPENAI_API_KEY not found in config or environment".to_string())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIModel {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIModel {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAIModel {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, CaptionError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CaptionError::Generation(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("OpenAI response: {:?}", response_body);

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                CaptionError::Generation("Failed to extract content from response".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn request() -> ChatRequest {
        ChatRequest {
            system: "Eres un sistema de prueba.".to_string(),
            user: "Título: Danza".to_string(),
            max_tokens: 300,
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "  Una danza tradicional en la plaza del pueblo.  "
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4-turbo".to_string(),
        );

        let result = model.complete(&request()).await.unwrap();
        assert_eq!(result, "Una danza tradicional en la plaza del pueblo.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4-turbo".to_string(),
        );

        let result = model.complete(&request()).await;
        assert!(matches!(result, Err(CaptionError::Generation(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_missing_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4-turbo".to_string(),
        );

        let result = model.complete(&request()).await;
        assert!(matches!(result, Err(CaptionError::Generation(_))));
    }

    #[test]
    fn test_provider_name() {
        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            "http://localhost".to_string(),
            "gpt-4-turbo".to_string(),
        );
        assert_eq!(model.provider_name(), "openai");
    }
}
