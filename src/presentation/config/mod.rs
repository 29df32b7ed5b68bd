mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EmbeddingProvider, EmbeddingsSettings, LlmSettings, LogFormat, LoggingSettings,
    QdrantSettings, SearchSettings, ServerSettings, Settings, SettingsError, StorageProvider,
    StorageSettings,
};
