use config::{Config, File};
use serde::Deserialize;

use super::Environment;
use crate::infrastructure::llm::DEFAULT_LOCAL_MODEL;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub qdrant: QdrantSettings,
    pub embeddings: EmbeddingsSettings,
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QdrantSettings {
    pub url: String,
    pub collection_name: String,
}

impl Default for QdrantSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            collection_name: "invoice_analysis_report".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: u64,
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Local,
            model: DEFAULT_LOCAL_MODEL.to_string(),
            dimension: 384,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

/// Both model roles talk to the same OpenAI-compatible endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub adjudication_model: String,
    pub adjudication_temperature: f32,
    pub chat_model: String,
    pub chat_temperature: f32,
    pub max_tokens: Option<usize>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            api_key: String::new(),
            adjudication_model: "llama3-70b-8192".to_string(),
            adjudication_temperature: 0.3,
            chat_model: "llama3-8b-8192".to_string(),
            chat_temperature: 0.0,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub top_k: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { top_k: 2 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info,claimdesk=debug,tower_http=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    #[default]
    Qdrant,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProvider,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    Environment(String),
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("llm.api_key is not set (APP_LLM__API_KEY or GROQ_API_KEY)")]
    MissingLlmApiKey,
}

impl Settings {
    /// Layers `appsettings.{env}.toml` under `APP_`-prefixed variables
    /// (`APP_LLM__CHAT_MODEL` sets `llm.chat_model`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.llm.api_key.is_empty() {
            settings.llm.api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        }
        if settings.llm.api_key.is_empty() {
            return Err(SettingsError::MissingLlmApiKey);
        }

        Ok(settings)
    }
}
