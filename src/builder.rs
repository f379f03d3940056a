use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::error::CaptionError;
use crate::model::ImageReference;
use crate::CaptionOutcome;

/// Chat-completion provider selection for the builder API
#[derive(Debug, Clone)]
pub enum ProviderKind {
    OpenAI,
    Ollama,
}

impl ProviderKind {
    /// Convert to the provider name string used by the factory
    fn as_str(&self) -> &str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Model used when the caller names a provider but no model
    fn default_model(&self) -> &str {
        match self {
            ProviderKind::OpenAI => "gpt-4-turbo",
            ProviderKind::Ollama => "llama3",
        }
    }
}

/// Builder for configuring and executing a caption action
#[derive(Debug, Default)]
pub struct CaptionerBuilder {
    image: Option<ImageReference>,
    title: Option<String>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    store_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CaptionerBuilder {
    /// Set the image to a remote URL
    ///
    /// # Example
    /// ```
    /// use captionary::Captioner;
    ///
    /// let builder = Captioner::builder()
    ///     .image_url("https://example.com/procesion.jpg")
    ///     .title("Procesión del Señor de los Temblores");
    /// ```
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image = Some(ImageReference::Url(url.into()));
        self
    }

    /// Set the image to a local file (e.g. a temporary upload)
    pub fn image_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(ImageReference::File(path.into()));
        self
    }

    /// Set the user-supplied title for the image
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Select a chat-completion provider explicitly
    ///
    /// # Example
    /// ```
    /// use captionary::{Captioner, ProviderKind};
    ///
    /// let builder = Captioner::builder()
    ///     .image_url("https://example.com/danza.jpg")
    ///     .title("Danza de tijeras")
    ///     .provider(ProviderKind::Ollama);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key directly instead of relying on environment
    /// variables or config files
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the selected provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the CSV store location
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Override the directory the report is written to
    pub fn export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Set a timeout for the chat-completion requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Execute the caption action
    ///
    /// # Errors
    /// Returns `CaptionError` if:
    /// - No image or title was specified
    /// - The description call fails (nothing is persisted in that case)
    /// - The store rewrite fails
    ///
    /// # Example
    /// ```no_run
    /// # use captionary::Captioner;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = Captioner::builder()
    ///     .image_url("https://example.com/procesion.jpg")
    ///     .title("Procesión del Señor de los Temblores")
    ///     .generate()
    ///     .await?;
    /// println!("{}", outcome.record.description);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(self) -> Result<CaptionOutcome, CaptionError> {
        let image = self.image.ok_or_else(|| {
            CaptionError::Builder(
                "No image specified. Use .image_url() or .image_file()".to_string(),
            )
        })?;
        let title = self
            .title
            .ok_or_else(|| CaptionError::Builder("No title specified. Use .title()".to_string()))?;

        let mut config = AppConfig::load()?;

        if let Some(provider) = &self.provider {
            config.default_provider = provider.as_str().to_string();
            config
                .providers
                .entry(provider.as_str().to_string())
                .or_insert_with(|| ProviderConfig {
                    enabled: true,
                    model: provider.default_model().to_string(),
                    api_key: None,
                    base_url: None,
                });
        }
        if self.api_key.is_some() || self.model.is_some() {
            let name = config.default_provider.clone();
            if let Some(provider_config) = config.providers.get_mut(&name) {
                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = model;
                }
            }
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs();
        }
        if let Some(path) = self.store_path {
            config.store.path = path;
        }
        if let Some(dir) = self.export_dir {
            config.export.dir = dir;
        }

        crate::generate_caption(&config, image, &title).await
    }
}

/// Main entry point for the builder API
pub struct Captioner;

impl Captioner {
    /// Creates a new builder for a caption action
    ///
    /// # Example
    /// ```
    /// use captionary::Captioner;
    ///
    /// let builder = Captioner::builder();
    /// ```
    pub fn builder() -> CaptionerBuilder {
        CaptionerBuilder::default()
    }
}
