use std::collections::HashSet;

use docqa_core::types::{AnswerOutcome, Chunk, ConfidenceLevel, QueryResult, SourceSnippet};

pub const SNIPPET_MAX_CHARS: usize = 300;

/// Unique filenames in first-seen order.
pub fn cited_files(chunks: &[Chunk]) -> Vec<String> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter(|c| seen.insert(c.filename.as_str()))
        .map(|c| c.filename.clone())
        .collect()
}

pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn relevance_pct(similarity: f32) -> u8 {
    let pct = (similarity * 100.0).round();
    if pct.is_nan() { 0 } else { pct.clamp(0.0, 100.0) as u8 }
}

pub fn snippets(chunks: &[Chunk]) -> Vec<SourceSnippet> {
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| SourceSnippet {
            id: i + 1,
            filename: c.filename.clone(),
            category: c.category.clone(),
            text: truncate_snippet(&c.text),
            similarity: c.similarity,
            relevance_pct: relevance_pct(c.similarity),
        })
        .collect()
}

pub fn footer(confidence: u8, cited: &[String]) -> String {
    format!(
        "\n\n📊 Confidence: {} ({}%)\n📄 Sources: {}",
        ConfidenceLevel::from_score(confidence),
        confidence,
        cited.join(", ")
    )
}

/// Final result for an answer that passed the grounding guard.
pub fn finalize(answer: &str, chunks: &[Chunk], confidence: u8) -> QueryResult {
    let cited = cited_files(chunks);
    let mut text = answer.to_string();
    if !cited.is_empty() {
        text.push_str(&footer(confidence, &cited));
    }
    QueryResult {
        answer: text,
        cited_files: cited,
        confidence_score: confidence,
        source_snippets: snippets(chunks),
        outcome: AnswerOutcome::Answered,
    }
}
