use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Sampling and token bounds for the two generation calls
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Local CSV store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Optional remote document-store mirror
    #[serde(default)]
    pub firestore: FirestoreConfig,
    /// Report export configuration
    #[serde(default)]
    pub export: ExportConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific chat-completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4-turbo", "llama3")
    pub model: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Bounds for the description and keyword calls.
///
/// The description call favors deterministic, factual phrasing (low
/// temperature, ~300 output tokens); the keyword call is shorter.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_describe_max_tokens")]
    pub describe_max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub describe_temperature: f32,
    #[serde(default = "default_keywords_max_tokens")]
    pub keywords_max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub keywords_temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            describe_max_tokens: default_describe_max_tokens(),
            describe_temperature: default_temperature(),
            keywords_max_tokens: default_keywords_max_tokens(),
            keywords_temperature: default_temperature(),
        }
    }
}

/// Local CSV store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Path of the semicolon-delimited CSV file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Optional Firestore REST mirror. Disabled by default; when enabled,
/// mirror failures never block the local CSV write.
#[derive(Debug, Deserialize, Clone)]
pub struct FirestoreConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Google Cloud project id
    pub project_id: Option<String>,
    /// Target collection name
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Fixed placeholder user id for the single-tenant demo
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// API key appended as a query parameter
    pub api_key: Option<String>,
    /// Override for tests or emulators
    pub base_url: Option<String>,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_id: None,
            collection: default_collection(),
            user_id: default_user_id(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Report export configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory where the report is written
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    /// Display width of the embedded image in pixels
    #[serde(default = "default_image_width")]
    pub image_width: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            image_width: default_image_width(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    // Out of the box the app talks to OpenAI; the key comes from the
    // OPENAI_API_KEY environment variable.
    let mut providers = HashMap::new();
    providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            model: "gpt-4-turbo".to_string(),
            api_key: None,
            base_url: None,
        },
    );
    providers
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.2
}

fn default_describe_max_tokens() -> u32 {
    300
}

fn default_keywords_max_tokens() -> u32 {
    100
}

fn default_store_path() -> PathBuf {
    PathBuf::from("imagenes/imagenes.csv")
}

fn default_collection() -> String {
    "keywords".to_string()
}

fn default_user_id() -> String {
    "usuario_demo".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_image_width() -> u32 {
    400
}

fn default_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            generation: GenerationConfig::default(),
            store: StoreConfig::default(),
            firestore: FirestoreConfig::default(),
            export: ExportConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CAPTIONARY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CAPTIONARY__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: CAPTIONARY__PROVIDERS__OPENAI__API_KEY
            .add_source(
                Environment::with_prefix("CAPTIONARY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.2);
        assert_eq!(default_describe_max_tokens(), 300);
        assert_eq!(default_keywords_max_tokens(), 100);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_app_config_default_has_openai_provider() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, "openai");

        let openai = config.providers.get("openai").unwrap();
        assert!(openai.enabled);
        assert_eq!(openai.model, "gpt-4-turbo");
        assert!(openai.api_key.is_none());
    }

    #[test]
    fn test_firestore_disabled_by_default() {
        let config = AppConfig::default();
        assert!(!config.firestore.enabled);
        assert_eq!(config.firestore.collection, "keywords");
        assert_eq!(config.firestore.user_id, "usuario_demo");
    }

    #[test]
    fn test_export_defaults() {
        let export = ExportConfig::default();
        assert_eq!(export.image_width, 400);
        assert_eq!(export.dir, PathBuf::from("."));
    }
}
