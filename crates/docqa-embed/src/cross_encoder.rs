//! Pairwise relevance scoring for reranking.
//!
//! [`CrossEncoder`] runs an MS MARCO MiniLM cross-encoder (BERT body, pooler,
//! single-logit head) over `(query, text)` pairs. Its logits are unbounded and
//! roughly centered on zero: positive means probably relevant.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use candle_core::{DType, Device, Module};
use candle_nn::{linear, Linear, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use docqa_core::traits::RelevanceScorer;
use tokenizers::{Encoding, Tokenizer, TruncationParams, TruncationStrategy};
use tracing::{debug, info};

use crate::device::select_device;
use crate::embedder::{env_flag, first_existing, load_tokenizer, load_weights};
use crate::tokenize::pad_batch;

pub const RERANK_MAX_LEN: usize = 512;
const BATCH_SIZE: usize = 8;
const BERT_PAD_ID: u32 = 0;

pub struct CrossEncoder {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    device: Device,
}

impl CrossEncoder {
    pub fn new(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "loading cross-encoder");

        let mut tokenizer = load_tokenizer(model_dir)?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: RERANK_MAX_LEN,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(model_dir.join("config.json"))?)?;
        let hidden = raw
            .get("hidden_size")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| anyhow!("config.json has no hidden_size"))? as usize;
        let config: BertConfig = serde_json::from_value(raw)?;

        let vb = VarBuilder::from_tensors(load_weights(model_dir, &device)?, DType::F32, &device);
        // BertModel::load resolves the `bert.` prefix from config.model_type
        let bert = BertModel::load(vb.clone(), &config)?;
        let pooler = linear(hidden, hidden, vb.pp("bert.pooler.dense"))?;
        let classifier = linear(hidden, 1, vb.pp("classifier"))?;
        info!("cross-encoder loaded");
        Ok(Self { bert, pooler, classifier, tokenizer, device })
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>> {
        let encodings: Vec<Encoding> = pairs
            .iter()
            .map(|(q, t)| self.tokenizer.encode((*q, *t), true).map_err(|e| anyhow!("Tokenization failed: {}", e)))
            .collect::<Result<_>>()?;
        let batch = pad_batch(&encodings, BERT_PAD_ID, RERANK_MAX_LEN, &self.device)?;
        let sequence = self.bert.forward(&batch.input_ids, &batch.token_type_ids, Some(&batch.attention_mask))?;
        let cls = sequence.narrow(1, 0, 1)?.squeeze(1)?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?.squeeze(1)?;
        Ok(logits.to_device(&Device::Cpu)?.to_vec1::<f32>()?)
    }
}

impl RelevanceScorer for CrossEncoder {
    fn score(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>> {
        let mut scores = Vec::with_capacity(pairs.len());
        for batch in pairs.chunks(BATCH_SIZE) {
            scores.extend(self.score_batch(batch)?);
        }
        debug!(pairs = pairs.len(), "cross-encoder scored");
        Ok(scores)
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "did", "do", "does", "for", "from", "happened", "how",
    "if", "in", "into", "is", "it", "me", "my", "no", "not", "of", "on", "or", "such", "that", "the", "their",
    "then", "there", "these", "they", "this", "to", "was", "what", "when", "where", "which", "who", "why", "will",
    "with",
];

fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Query-term coverage scorer on the cross-encoder's scale: full coverage
/// maps to +5, none to -5. Used when no model is available.
#[derive(Debug, Default, Clone)]
pub struct LexicalScorer;

impl LexicalScorer {
    fn score_one(query: &str, text: &str) -> f32 {
        let wanted: HashSet<String> = terms(query).filter(|t| !STOP_WORDS.contains(&t.as_str())).collect();
        if wanted.is_empty() {
            return -5.0;
        }
        let present: HashSet<String> = terms(text).collect();
        let matched = wanted.iter().filter(|t| present.contains(*t)).count();
        10.0 * matched as f32 / wanted.len() as f32 - 5.0
    }
}

impl RelevanceScorer for LexicalScorer {
    fn score(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>> {
        Ok(pairs.iter().map(|(q, t)| Self::score_one(q, t)).collect())
    }
}

pub fn resolve_rerank_dir() -> Result<PathBuf> {
    first_existing(
        &["APP_RERANK_MODEL_DIR"],
        &["../models/ms-marco-MiniLM-L-6-v2", "models/ms-marco-MiniLM-L-6-v2"],
    )
    .ok_or_else(|| anyhow!("Could not locate cross-encoder model directory"))
}

/// The scorer selected by the environment: `APP_USE_FAKE_RERANKER=1` gives
/// [`LexicalScorer`], otherwise the cross-encoder is loaded.
pub fn get_default_scorer(model_dir: Option<&Path>) -> Result<Box<dyn RelevanceScorer>> {
    if env_flag("APP_USE_FAKE_RERANKER") {
        info!("using LexicalScorer");
        return Ok(Box::new(LexicalScorer));
    }
    let dir = match model_dir {
        Some(dir) => dir.to_path_buf(),
        None => resolve_rerank_dir()?,
    };
    Ok(Box::new(CrossEncoder::new(&dir)?))
}
