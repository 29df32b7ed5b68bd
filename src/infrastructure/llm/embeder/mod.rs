mod embedder_factory;
mod local_candle_embedder;
mod mock_embedder;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use local_candle_embedder::{DEFAULT_LOCAL_MODEL, LocalCandleEmbedder};
pub use mock_embedder::{MOCK_EMBEDDING_DIMENSION, MockEmbedder};
pub use openai_embedder::OpenAiEmbedder;
