pub mod embeder;
mod mock_llm_client;
mod openai_client;

pub use embeder::{
    DEFAULT_LOCAL_MODEL, EmbedderFactory, EmbedderFactoryError, LocalCandleEmbedder,
    MOCK_EMBEDDING_DIMENSION, MockEmbedder, OpenAiEmbedder,
};
pub use mock_llm_client::{MOCK_DECISION_JSON, MockLlmClient};
pub use openai_client::OpenAiClient;
