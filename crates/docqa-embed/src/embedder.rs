use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XLMRobertaConfig, XLMRobertaModel};
use docqa_core::traits::Embedder;
use tokenizers::Tokenizer;
use tracing::{info, warn};
use twox_hash::XxHash64;

use crate::device::select_device;
use crate::pool::masked_mean_l2;
use crate::tokenize::pad_batch;

pub const EMBEDDING_DIM: usize = 1024;
const MAX_LEN: usize = 256;
const BATCH_SIZE: usize = 16;
const XLMR_PAD_ID: u32 = 1;

/// Loads named tensors from `model.safetensors`, falling back to `pytorch_model.bin`.
pub(crate) fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        return Ok(candle_core::safetensors::load(&safetensors, device)?);
    }
    let weights_path = model_dir.join("pytorch_model.bin");
    let weights = candle_core::pickle::read_all(&weights_path)
        .map_err(|e| anyhow!("Failed to read weights from {}: {}", weights_path.display(), e))?;
    weights
        .into_iter()
        .map(|(name, t)| -> Result<(String, Tensor)> { Ok((name, t.to_device(device)?)) })
        .collect()
}

pub(crate) fn load_tokenizer(model_dir: &Path) -> Result<Tokenizer> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    Tokenizer::from_file(&tokenizer_path)
        .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))
}

/// BGE-M3 (XLM-RoBERTa) sentence embedder with masked mean pooling.
pub struct EmbeddingModel {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl EmbeddingModel {
    pub fn new(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "loading BGE-M3 embedding model");
        let tokenizer = load_tokenizer(model_dir)?;
        let config_path = model_dir.join("config.json");
        let config: XLMRobertaConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        let vb = VarBuilder::from_tensors(load_weights(model_dir, &device)?, DType::F32, &device);
        let model = XLMRobertaModel::new(&config, vb)?;
        info!("embedding model loaded");
        Ok(Self { model, tokenizer, device })
    }

    fn embed_chunk(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let encodings = texts
            .iter()
            .map(|t| self.tokenizer.encode(t.as_str(), true).map_err(|e| anyhow!("Tokenization failed: {}", e)))
            .collect::<Result<Vec<_>>>()?;
        let batch = pad_batch(&encodings, XLMR_PAD_ID, MAX_LEN, &self.device)?;
        let hidden = self.model.forward(&batch.input_ids, &batch.attention_mask, &batch.token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden, &batch.attention_mask)?;
        Ok(pooled.to_device(&Device::Cpu)?.to_vec2::<f32>()?)
    }
}

impl Embedder for EmbeddingModel {
    fn dim(&self) -> usize { EMBEDDING_DIM }

    fn max_len(&self) -> usize { MAX_LEN }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let start = Instant::now();
        let mut out = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            out.extend(self.embed_chunk(chunk)?);
        }
        if start.elapsed().as_millis() > 100 * texts.len().max(1) as u128 {
            warn!(texts = texts.len(), elapsed_ms = start.elapsed().as_millis() as u64, "slow embedding");
        }
        Ok(out)
    }
}

/// Deterministic bag-of-tokens hash embedding for tests and offline runs.
/// Texts sharing words land near each other; nothing else is meaningful.
pub struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self { Self { dim } }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            v[idx] += 0.5 + (((h >> 32) as u32) as f32) / (u32::MAX as f32);
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn max_len(&self) -> usize { MAX_LEN }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

pub(crate) fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// The embedder selected by the environment: `APP_USE_FAKE_EMBEDDINGS=1`
/// gives the hash embedder, otherwise BGE-M3 is loaded from `model_dir` or
/// the first directory found by [`resolve_model_dir`].
pub fn get_default_embedder(model_dir: Option<&Path>) -> Result<Box<dyn Embedder>> {
    if env_flag("APP_USE_FAKE_EMBEDDINGS") {
        info!("using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(EMBEDDING_DIM)));
    }
    let dir = match model_dir {
        Some(dir) => dir.to_path_buf(),
        None => resolve_model_dir()?,
    };
    Ok(Box::new(EmbeddingModel::new(&dir)?))
}

pub fn resolve_model_dir() -> Result<PathBuf> {
    first_existing(&["APP_MODEL_DIR", "MODEL_DIR"], &["../models/bge-m3", "models/bge-m3"])
        .ok_or_else(|| anyhow!("Could not locate BGE-M3 model directory"))
}

/// First existing directory named by one of `vars`, then one of `fallbacks`.
pub(crate) fn first_existing(vars: &[&str], fallbacks: &[&str]) -> Option<PathBuf> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(PathBuf::from)
        .chain(fallbacks.iter().map(PathBuf::from))
        .find(|p| p.exists())
}
