use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use tokenizers::{Encoding, Tokenizer, TruncationParams};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const DEFAULT_LOCAL_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Sentence-transformer embeddings computed in-process with candle.
///
/// Weights come from the Hugging Face hub cache. Vectors are mean-pooled
/// over the attention mask and scaled to unit length.
pub struct LocalCandleEmbedder {
    encoder: Arc<SentenceEncoder>,
}

struct SentenceEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

fn load_err(what: &str) -> impl Fn(String) -> EmbedderError + '_ {
    move |e| EmbedderError::ModelLoadFailed(format!("{what}: {e}"))
}

fn infer_err<E: std::fmt::Display>(e: E) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

fn fetch(repo: &ApiRepo, file: &str) -> Result<PathBuf, EmbedderError> {
    repo.get(file).map_err(|e| load_err(file)(e.to_string()))
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = Device::new_metal(0).unwrap_or(Device::Cpu);
        tracing::info!(device = ?device, model = model_id, "Loading sentence encoder");

        let api = Api::new().map_err(|e| load_err("hub")(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = fetch(&repo, "config.json")?;
        let tokenizer_path = fetch(&repo, "tokenizer.json")?;
        let weights_path = fetch(&repo, "model.safetensors")?;

        let config: BertConfig = std::fs::read_to_string(&config_path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
            .map_err(load_err("config"))?;

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_err("tokenizer")(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(|e| load_err("truncation")(e.to_string()))?;

        let dtype = if device.is_cpu() { DType::F32 } else { DType::F16 };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| load_err("weights")(e.to_string()))?
        };
        let model = BertModel::load(vb, &config).map_err(|e| load_err("model")(e.to_string()))?;

        tracing::info!(model = model_id, "Sentence encoder ready");

        Ok(Self {
            encoder: Arc::new(SentenceEncoder {
                model,
                tokenizer,
                device,
            }),
        })
    }
}

impl SentenceEncoder {
    fn padded(&self, encodings: &[Encoding], pick: fn(&Encoding) -> &[u32]) -> Result<Tensor, EmbedderError> {
        let width = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);
        let mut flat = Vec::with_capacity(encodings.len() * width);
        for encoding in encodings {
            let row = pick(encoding);
            flat.extend_from_slice(row);
            flat.extend(std::iter::repeat_n(0u32, width - row.len()));
        }
        Tensor::from_vec(flat, (encodings.len(), width), &self.device).map_err(infer_err)
    }

    fn encode(&self, texts: Vec<String>) -> Result<Vec<Embedding>, EmbedderError> {
        let encodings = self.tokenizer.encode_batch(texts, true).map_err(infer_err)?;

        let input_ids = self.padded(&encodings, Encoding::get_ids)?;
        let type_ids = self.padded(&encodings, Encoding::get_type_ids)?;
        let mask = self.padded(&encodings, Encoding::get_attention_mask)?;

        let hidden = self
            .model
            .forward(&input_ids, &type_ids, Some(&mask))
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(infer_err)?;

        let mask = mask.to_dtype(DType::F32).map_err(infer_err)?;
        let pooled = hidden
            .broadcast_mul(&mask.unsqueeze(2).map_err(infer_err)?)
            .and_then(|t| t.sum(1))
            .and_then(|summed| {
                let counts = mask.sum(1)?.unsqueeze(1)?;
                summed.broadcast_div(&counts)
            })
            .map_err(infer_err)?;

        let rows: Vec<Vec<f32>> = pooled.to_vec2().map_err(infer_err)?;
        Ok(rows
            .into_iter()
            .map(|row| Embedding::new(row).normalized())
            .collect())
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    #[tracing::instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encoder = Arc::clone(&self.encoder);
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        tokio::task::spawn_blocking(move || encoder.encode(owned))
            .await
            .map_err(infer_err)?
    }
}
