use std::sync::Arc;
use std::time::Duration;

use docqa_core::traits::RelevanceScorer;
use docqa_core::types::Chunk;
use docqa_core::{Error, Result};
use tracing::{info, warn};

/// Reorders candidates by a pairwise relevance scorer.
///
/// Scoring runs on the blocking pool under `timeout`. Without a scorer, or
/// when scoring fails or runs out of time, the first `top_k` candidates pass
/// through in their incoming order with no `relevance_score` attached.
pub struct Reranker {
    scorer: Option<Arc<dyn RelevanceScorer>>,
    timeout: Duration,
}

fn sort_key(chunk: &Chunk) -> f32 {
    match chunk.relevance_score {
        Some(s) if !s.is_nan() => s,
        _ => f32::NEG_INFINITY,
    }
}

impl Reranker {
    pub fn new(scorer: Option<Arc<dyn RelevanceScorer>>, timeout: Duration) -> Self { Self { scorer, timeout } }

    pub fn is_degraded(&self) -> bool { self.scorer.is_none() }

    async fn scores(&self, query: &str, chunks: &[Chunk]) -> Result<Vec<f32>> {
        let scorer = self
            .scorer
            .clone()
            .ok_or_else(|| Error::RerankDegraded("no relevance scorer loaded".into()))?;
        let query = query.to_string();
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let expected = texts.len();

        let task = tokio::task::spawn_blocking(move || {
            let pairs: Vec<(&str, &str)> = texts.iter().map(|t| (query.as_str(), t.as_str())).collect();
            scorer.score(&pairs)
        });
        let scores = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(scores))) => scores,
            Ok(Ok(Err(e))) => return Err(Error::RerankDegraded(format!("{e:#}"))),
            Ok(Err(join)) => return Err(Error::RerankDegraded(format!("scorer task failed: {join}"))),
            Err(_) => return Err(Error::RerankDegraded(format!("scorer did not finish within {:?}", self.timeout))),
        };
        if scores.len() != expected {
            return Err(Error::RerankDegraded(format!(
                "scorer returned {} scores for {} pairs",
                scores.len(),
                expected
            )));
        }
        Ok(scores)
    }

    /// At most `top_k` chunks, every one of them taken from `chunks`.
    pub async fn rerank(&self, query: &str, mut chunks: Vec<Chunk>, top_k: usize) -> Vec<Chunk> {
        if chunks.is_empty() {
            return chunks;
        }
        match self.scores(query, &chunks).await {
            Ok(scores) => {
                for (chunk, score) in chunks.iter_mut().zip(scores) {
                    chunk.relevance_score = Some(score);
                }
                // stable: equal scores keep similarity order
                chunks.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
                if let Some(top) = chunks.first() {
                    info!(filename = %top.filename, score = sort_key(top), "reranked");
                }
            }
            Err(e) => warn!(error = %e, "reranking skipped, keeping similarity order"),
        }
        chunks.truncate(top_k);
        chunks
    }
}
