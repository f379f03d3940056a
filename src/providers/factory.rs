use crate::config::{AppConfig, ProviderConfig};
use crate::error::CaptionError;
use crate::providers::{ChatModel, OllamaModel, OpenAIModel};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a chat model instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn ChatModel>, CaptionError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(CaptionError::Builder(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIModel::new(config, timeout)?)),
            "ollama" => Ok(Box::new(OllamaModel::new(config, timeout)?)),
            _ => Err(CaptionError::Builder(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_model(config: &AppConfig) -> Result<Box<dyn ChatModel>, CaptionError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            CaptionError::Builder(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(
            provider_name,
            provider_config,
            Duration::from_secs(config.timeout),
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "ollama"]
    }
}
