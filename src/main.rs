use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use claimdesk::application::ports::{Embedder, VectorStore};
use claimdesk::application::services::{
    ChatGraph, ClaimBatchProcessor, ClaimIngestionService, VectorStoreAdapter,
};
use claimdesk::infrastructure::archive::ZipArchiveExtractor;
use claimdesk::infrastructure::llm::{EmbedderFactory, OpenAiClient};
use claimdesk::infrastructure::observability::{TracingConfig, init_tracing};
use claimdesk::infrastructure::persistence::{InMemoryVectorStore, QdrantAdapter};
use claimdesk::infrastructure::text_processing::PdfAdapter;
use claimdesk::presentation::config::{LlmSettings, StorageProvider};
use claimdesk::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let embedder = EmbedderFactory::create(&settings.embeddings)?;

    match settings.storage.provider {
        StorageProvider::Qdrant => {
            let store = QdrantAdapter::new(&settings.qdrant.url, settings.qdrant.collection_name.clone())
                .context("Failed to connect to Qdrant")?;
            serve(settings, embedder, Arc::new(store)).await
        }
        StorageProvider::Memory => {
            tracing::warn!("Using in-memory vector store; claims are lost on restart");
            serve(settings, embedder, Arc::new(InMemoryVectorStore::new())).await
        }
    }
}

fn llm_client(llm: &LlmSettings, model: &str, temperature: f32) -> Arc<OpenAiClient> {
    let client = OpenAiClient::new(
        llm.base_url.clone(),
        llm.api_key.clone(),
        model.to_string(),
        temperature,
    );
    Arc::new(match llm.max_tokens {
        Some(max_tokens) => client.with_max_tokens(max_tokens),
        None => client,
    })
}

async fn serve<V>(settings: Settings, embedder: Arc<dyn Embedder>, store: Arc<V>) -> anyhow::Result<()>
where
    V: VectorStore + 'static,
{
    let index = Arc::new(VectorStoreAdapter::new(embedder, store));
    let created = index
        .ensure_collection(settings.embeddings.dimension)
        .await
        .context("Failed to prepare claims collection")?;
    tracing::info!(
        collection = %settings.qdrant.collection_name,
        created,
        "Claims collection ready"
    );

    let adjudicator_llm = llm_client(
        &settings.llm,
        &settings.llm.adjudication_model,
        settings.llm.adjudication_temperature,
    );
    let chat_llm = llm_client(
        &settings.llm,
        &settings.llm.chat_model,
        settings.llm.chat_temperature,
    );

    let batch_processor = ClaimBatchProcessor::new(
        Arc::new(PdfAdapter::new()),
        Arc::new(ZipArchiveExtractor::new()),
        adjudicator_llm,
    );

    let state = AppState {
        ingestion_service: Arc::new(ClaimIngestionService::new(
            batch_processor,
            Arc::clone(&index),
        )),
        chat_graph: Arc::new(ChatGraph::new(chat_llm, index, settings.search.top_k)),
        settings: settings.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        adjudication_model = %settings.llm.adjudication_model,
        chat_model = %settings.llm.chat_model,
        "Listening"
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
