//! Query-time answer pipeline.
//!
//! `Retrieve -> Rerank -> Filter -> Estimate -> BuildPrompt -> Generate ->
//! Guard -> Finalize`. Every failure along the way is folded into the
//! returned [`QueryResult`] so callers always get something to show.

use std::sync::Arc;
use std::time::Duration;

use docqa_core::config::{EmptyPolicy, Settings};
use docqa_core::traits::{RelevanceScorer, TextGenerator, VectorStore};
use docqa_core::types::{AnswerOutcome, GenerationOptions, QueryResult};
use docqa_core::Error;
use tracing::{debug, info, warn};

pub mod confidence;
pub mod filter;
pub mod guard;
pub mod postprocess;
pub mod prompt;
pub mod rerank;
pub mod retrieve;

pub use filter::NoiseFilter;
pub use guard::{GroundingGuard, GuardVerdict, PhraseGuard};
pub use rerank::Reranker;

pub const NO_DOCUMENTS_MESSAGE: &str = "No relevant documents found.";
pub const NOT_IN_DOCUMENTS_MESSAGE: &str = "I don't have this information in your documents. Please upload relevant \
     documents or ask questions about the documents you've provided.";
pub const GENERATION_UNAVAILABLE_MESSAGE: &str = "I cannot answer right now because Ollama is not running. Please \
     start Ollama to get AI-powered answers from your documents.";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Candidates requested from the store before reranking.
    pub candidate_pool: usize,
    pub top_k: usize,
    pub noise_threshold: f32,
    pub empty_policy: EmptyPolicy,
    pub retrieval_timeout: Duration,
    pub rerank_timeout: Duration,
    pub generation_timeout: Duration,
    pub generation: GenerationOptions,
    pub guard_override_min_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self { Self::from_settings(&Settings::default()) }
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            candidate_pool: settings.retrieval.candidate_pool,
            top_k: settings.retrieval.top_k,
            noise_threshold: settings.retrieval.noise_threshold,
            empty_policy: settings.retrieval.empty_policy,
            retrieval_timeout: settings.retrieval.timeout(),
            rerank_timeout: settings.retrieval.rerank_timeout(),
            generation_timeout: settings.llm.timeout(),
            generation: settings.llm.generation_options(),
            guard_override_min_len: settings.guard.override_min_len,
        }
    }
}

pub struct AnswerPipeline<V, G> where V: VectorStore, G: TextGenerator {
    store: V,
    generator: G,
    reranker: Reranker,
    filter: NoiseFilter,
    guard: Box<dyn GroundingGuard>,
    config: PipelineConfig,
}

impl<V, G> AnswerPipeline<V, G> where V: VectorStore, G: TextGenerator {
    pub fn new(store: V, generator: G, scorer: Option<Arc<dyn RelevanceScorer>>, config: PipelineConfig) -> Self {
        Self {
            store,
            generator,
            reranker: Reranker::new(scorer, config.rerank_timeout),
            filter: NoiseFilter::new(config.noise_threshold, config.empty_policy),
            guard: Box::new(PhraseGuard::new(config.guard_override_min_len)),
            config,
        }
    }

    pub fn with_guard(mut self, guard: Box<dyn GroundingGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn store(&self) -> &V { &self.store }

    pub fn generator(&self) -> &G { &self.generator }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    pub async fn answer(&self, query: &str) -> QueryResult {
        self.answer_with_pool(query, self.config.candidate_pool).await
    }

    /// Answer `query` from exactly `pool` requested candidates. A pool smaller
    /// than `top_k` just leaves the reranker less to choose from.
    pub async fn answer_with_pool(&self, query: &str, pool: usize) -> QueryResult {
        let query = query.trim();
        if query.is_empty() {
            return QueryResult::unanswered(NO_DOCUMENTS_MESSAGE, AnswerOutcome::NoDocuments);
        }

        let candidates = match retrieve::retrieve(&self.store, query, pool, self.config.retrieval_timeout).await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "retrieval failed");
                return QueryResult::unanswered(NO_DOCUMENTS_MESSAGE, AnswerOutcome::RetrievalUnavailable);
            }
        };
        if candidates.is_empty() {
            info!("no documents matched");
            return QueryResult::unanswered(NO_DOCUMENTS_MESSAGE, AnswerOutcome::NoDocuments);
        }

        let ranked = self.reranker.rerank(query, candidates, self.config.top_k).await;
        let chunks = self.filter.filter(ranked);
        if chunks.is_empty() {
            return QueryResult::unanswered(NOT_IN_DOCUMENTS_MESSAGE, AnswerOutcome::NotInDocuments);
        }

        let confidence = confidence::estimate(query, &chunks);
        let prompt = prompt::build_prompt(query, &chunks);
        debug!(chunks = chunks.len(), confidence, prompt_chars = prompt.len(), "prompt built");

        let generated =
            tokio::time::timeout(self.config.generation_timeout, self.generator.generate(&prompt, &self.config.generation))
                .await;
        let answer = match generated {
            Ok(Ok(text)) => text.trim().to_string(),
            Ok(Err(Error::GenerationUnavailable(e))) => {
                warn!(error = %e, "generation runtime unavailable");
                return QueryResult::unanswered(GENERATION_UNAVAILABLE_MESSAGE, AnswerOutcome::GenerationUnavailable);
            }
            Err(_) => {
                warn!(timeout = ?self.config.generation_timeout, "generation timed out");
                return QueryResult::unanswered(GENERATION_UNAVAILABLE_MESSAGE, AnswerOutcome::GenerationUnavailable);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "generation failed");
                return QueryResult::unanswered(
                    format!("Error: Unable to generate response. {e}"),
                    AnswerOutcome::GenerationFailed,
                );
            }
        };

        if self.guard.check(&answer).is_triggered() {
            return QueryResult::unanswered(answer, AnswerOutcome::NotInDocuments);
        }
        postprocess::finalize(&answer, &chunks, confidence)
    }
}
