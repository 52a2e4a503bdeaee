//! Domain types shared by the classifier, the vector store and the answer pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type ChunkId = String;

/// A chunk produced at ingestion time, before it is embedded and stored.
///
/// - `id`: content-derived, stable across re-ingestion of identical text
/// - `filename`/`filepath`: the source document
/// - `domain`/`category`/`file_extension`: classifier output routed with the chunk
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: ChunkId,
    pub text: String,
    pub filename: String,
    pub filepath: String,
    pub domain: String,
    pub category: String,
    pub file_extension: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// A retrieved chunk with the metadata attached by the vector store.
///
/// `similarity` is in `[0, 1]`, `distance` is store-native and `>= 0`.
/// `relevance_score` stays `None` until the reranker has scored the chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub filename: String,
    pub filepath: String,
    pub domain: String,
    pub category: String,
    pub similarity: f32,
    pub distance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
}

/// Output of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub domain: String,
    pub category: String,
    pub file_extension: String,
    /// Always within `0..=100`.
    pub confidence: u8,
    pub domain_score: f64,
    pub category_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Self::High,
            40.. => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "🟢 HIGH",
            Self::Medium => "🟡 MEDIUM",
            Self::Low => "🔴 LOW",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Excerpt of a chunk that grounded an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSnippet {
    /// 1-based position in the final chunk set.
    pub id: usize,
    pub filename: String,
    pub category: String,
    pub text: String,
    pub similarity: f32,
    pub relevance_pct: u8,
}

/// How a query was resolved. Lets callers tell a genuine "not in documents"
/// answer apart from an outage without matching on answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Answered,
    NoDocuments,
    NotInDocuments,
    RetrievalUnavailable,
    GenerationUnavailable,
    GenerationFailed,
}

/// Output of the answer pipeline. Never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub cited_files: Vec<String>,
    pub confidence_score: u8,
    pub source_snippets: Vec<SourceSnippet>,
    pub outcome: AnswerOutcome,
}

impl QueryResult {
    /// A result with no citations and zero confidence.
    pub fn unanswered(answer: impl Into<String>, outcome: AnswerOutcome) -> Self {
        Self {
            answer: answer.into(),
            cited_files: Vec::new(),
            confidence_score: 0,
            source_snippets: Vec::new(),
            outcome,
        }
    }
}

/// Sampling options forwarded to the text generation runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub context_window: u32,
    pub repeat_penalty: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 1024,
            context_window: 4096,
            repeat_penalty: 1.1,
            threads: Some(8),
        }
    }
}
