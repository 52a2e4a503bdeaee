//! Seams to the external collaborators: embedding model, vector store,
//! pairwise relevance scorer and text generation runtime.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chunk, ChunkRecord, GenerationOptions};

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Similarity-ranked chunk storage.
///
/// `query` returns at most `k` chunks ordered by descending similarity.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn query(&self, text: &str, k: usize) -> anyhow::Result<Vec<Chunk>>;
    async fn add(&self, chunks: &[ChunkRecord]) -> anyhow::Result<usize>;
    async fn delete_by_filepath(&self, path: &str) -> anyhow::Result<usize>;
    /// Swap the stored chunks of `path` for `chunks` and return how many were
    /// stored before. On error the previous chunks are left in place.
    async fn replace_by_filepath(&self, path: &str, chunks: &[ChunkRecord]) -> anyhow::Result<usize>;
    async fn count(&self) -> anyhow::Result<usize>;
}

/// Scores `(query, text)` pairs. The output has the same length and order as
/// the input; higher means more relevant.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, pairs: &[(&str, &str)]) -> anyhow::Result<Vec<f32>>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Fails with `Error::GenerationUnavailable` when the runtime cannot be
    /// reached and `Error::GenerationFailed` for anything else.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;

    /// Used for status reporting only.
    async fn is_available(&self) -> bool;
}
