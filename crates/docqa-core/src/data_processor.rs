//! Ingestion boundary: turns extracted document text into typed chunk records.
//!
//! Malformed input (blank text, missing filename) is rejected here so that the
//! answer pipeline only ever sees well-formed chunks.

use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::error::{Error, Result};
use crate::types::{ChunkRecord, ClassificationResult};

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub max_tokens: usize,
    pub overlap_percent: f32,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_tokens: 500, overlap_percent: 0.2 }
    }
}

/// A document whose text has already been extracted and classified.
#[derive(Debug, Clone)]
pub struct SourceDocument<'a> {
    pub filename: &'a str,
    pub filepath: &'a str,
    pub text: &'a str,
    pub classification: &'a ClassificationResult,
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(chunking_config: ChunkingConfig) -> Self { Self { chunking_config } }

    /// Split a document into chunk records.
    ///
    /// Paragraphs are packed together until `max_tokens` would be exceeded;
    /// a single paragraph longer than that is split into overlapping word windows.
    pub fn chunk_document(&self, doc: &SourceDocument<'_>) -> Result<Vec<ChunkRecord>> {
        if doc.filename.trim().is_empty() {
            return Err(Error::InvalidInput("chunk source has no filename".into()));
        }
        if doc.text.trim().is_empty() {
            return Err(Error::InvalidInput(format!("{} has no text to chunk", doc.filename)));
        }

        let mut pieces: Vec<String> = Vec::new();
        let mut current = String::new();
        for paragraph in doc.text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() { continue; }
            if self.count_tokens(paragraph) > self.chunking_config.max_tokens {
                if !current.is_empty() { pieces.push(std::mem::take(&mut current)); }
                pieces.extend(self.split_paragraph_with_overlap(paragraph));
                continue;
            }
            let joined_tokens = self.count_tokens(&current) + self.count_tokens(paragraph);
            if !current.is_empty() && joined_tokens > self.chunking_config.max_tokens {
                pieces.push(std::mem::take(&mut current));
            }
            if !current.is_empty() { current.push_str("\n\n"); }
            current.push_str(paragraph);
        }
        if !current.is_empty() { pieces.push(current); }

        let total_chunks = pieces.len();
        let c = doc.classification;
        Ok(pieces
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| ChunkRecord {
                id: chunk_id(doc.filepath, chunk_index, &text),
                text,
                filename: doc.filename.to_string(),
                filepath: doc.filepath.to_string(),
                domain: c.domain.clone(),
                category: c.category.clone(),
                file_extension: c.file_extension.clone(),
                chunk_index,
                total_chunks,
            })
            .collect())
    }

    fn count_tokens(&self, text: &str) -> usize { let word_count = text.split_whitespace().count(); (word_count as f32 / 0.75) as usize }

    fn split_paragraph_with_overlap(&self, paragraph: &str) -> Vec<String> {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let words_per_chunk = ((self.chunking_config.max_tokens as f32 * 0.75) as usize).max(1);
        let overlap_words = ((words_per_chunk as f32 * self.chunking_config.overlap_percent) as usize).min(words_per_chunk - 1);
        let mut chunks = Vec::new(); let mut start = 0;
        while start < words.len() {
            let end = (start + words_per_chunk).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end >= words.len() { break; }
            start = end - overlap_words;
        }
        chunks
    }
}

/// Content-derived chunk id: identical text at the same position of the same
/// file always hashes to the same id.
pub fn chunk_id(filepath: &str, chunk_index: usize, text: &str) -> String {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(filepath.as_bytes());
    hasher.write_usize(chunk_index);
    hasher.write(text.as_bytes());
    format!("{:016x}", hasher.finish())
}
