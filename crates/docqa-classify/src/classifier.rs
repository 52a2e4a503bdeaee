//! Hierarchical keyword classifier.
//!
//! Scoring is a single pass over the normalized body and filename tokens:
//! every keyword occurrence adds its weight, filename occurrences count
//! `FILENAME_WEIGHT` times. The domain is chosen first, then the category
//! inside it by the same procedure.

use std::cmp::Ordering;
use std::sync::Arc;

use docqa_core::types::ClassificationResult;
use docqa_core::{Error, Result};
use tracing::debug;

use crate::extension::file_extension;
use crate::taxonomy::{Keywords, Phrase, Taxonomy, OTHER};
use crate::tokenize::TokenStream;

pub const W_STRONG: f64 = 3.0;
pub const W_WEAK: f64 = 1.0;
/// Multiplier for keyword hits found in the filename.
pub const FILENAME_WEIGHT: f64 = 2.0;
/// Below this a domain (or category) is not selected at all.
pub const MIN_EVIDENCE: f64 = 2.0;
/// Winning score at which the margin alone decides confidence.
const CONFIDENT_SCORE: f64 = 3.0 * W_STRONG;

/// Accumulated keyword evidence for one domain or category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evidence {
    pub score: f64,
    pub strong_hits: usize,
    pub weak_hits: usize,
}

/// The token streams a document is scored against.
#[derive(Debug, Clone)]
pub struct Signals {
    body: TokenStream,
    name: TokenStream,
}

impl Signals {
    pub fn new(text: &str, filename: &str) -> Self {
        Self { body: TokenStream::new(text), name: TokenStream::new(filename) }
    }

    pub fn is_empty(&self) -> bool { self.body.is_empty() && self.name.is_empty() }

    fn hits(&self, phrase: &Phrase) -> (usize, f64) {
        let body = self.body.occurrences(&phrase.tokens);
        let name = self.name.occurrences(&phrase.tokens);
        (body + name, body as f64 + FILENAME_WEIGHT * name as f64)
    }
}

pub fn score_keywords(keywords: &Keywords, signals: &Signals) -> Evidence {
    let mut evidence = Evidence::default();
    for phrase in &keywords.strong {
        let (count, weighted) = signals.hits(phrase);
        evidence.strong_hits += count;
        evidence.score += weighted * W_STRONG;
    }
    for phrase in &keywords.weak {
        let (count, weighted) = signals.hits(phrase);
        evidence.weak_hits += count;
        evidence.score += weighted * W_WEAK;
    }
    evidence
}

/// Higher score first, then more strong hits, then declaration order.
fn by_strength(a: &(usize, Evidence), b: &(usize, Evidence)) -> Ordering {
    b.1.score
        .total_cmp(&a.1.score)
        .then(b.1.strong_hits.cmp(&a.1.strong_hits))
        .then(a.0.cmp(&b.0))
}

fn rank(evidence: impl Iterator<Item = Evidence>) -> Vec<(usize, Evidence)> {
    let mut ranked: Vec<(usize, Evidence)> = evidence.enumerate().collect();
    ranked.sort_by(by_strength);
    ranked
}

/// Margin of the winner over the runner-up, relative to the winner, damped
/// while the winning evidence is still thin.
fn margin_confidence(winner: f64, runner_up: f64) -> u8 {
    if winner <= 0.0 {
        return 0;
    }
    let margin = ((winner - runner_up) / winner).max(0.0);
    let strength = (winner / CONFIDENT_SCORE).min(1.0);
    (margin * strength * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: Arc<Taxonomy>,
}

impl Classifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self { Self { taxonomy } }

    pub fn taxonomy(&self) -> &Taxonomy { &self.taxonomy }

    /// Classify a document. Never fails: with no usable evidence the result is
    /// the fallback domain and category with confidence 0.
    pub fn classify(&self, text: &str, filename: &str) -> ClassificationResult {
        let signals = Signals::new(text, filename);
        let file_extension = file_extension(filename, text);

        let ranked = rank(self.domain_evidence(&signals).into_iter().map(|(_, e)| e));
        let winner = ranked.first().copied();
        let runner_up = ranked.get(1).map(|(_, e)| e.score).unwrap_or(0.0);

        let Some((index, evidence)) = winner.filter(|(_, e)| e.score >= MIN_EVIDENCE) else {
            debug!(filename, "no domain reached minimum evidence");
            return ClassificationResult {
                domain: OTHER.to_string(),
                category: OTHER.to_string(),
                file_extension,
                confidence: 0,
                domain_score: winner.map(|(_, e)| e.score).unwrap_or(0.0),
                category_score: 0.0,
            };
        };

        let domain = &self.taxonomy.domains()[index];
        let categories = rank(domain.categories.iter().map(|c| score_keywords(&c.keywords, &signals)));
        let (category, category_score) = match categories.first() {
            Some((i, e)) if e.score >= MIN_EVIDENCE => (domain.categories[*i].name.clone(), e.score),
            _ => (domain.fallback_category().name.clone(), 0.0),
        };

        let confidence = margin_confidence(evidence.score, runner_up);
        debug!(
            filename,
            domain = %domain.name,
            category = %category,
            score = evidence.score,
            runner_up,
            confidence,
            "classified"
        );

        ClassificationResult {
            domain: domain.name.clone(),
            category,
            file_extension,
            confidence,
            domain_score: evidence.score,
            category_score,
        }
    }

    /// Like [`Classifier::classify`], but rejects a request that carries
    /// neither text nor a filename.
    pub fn classify_checked(&self, text: Option<&str>, filename: Option<&str>) -> Result<ClassificationResult> {
        let text = text.unwrap_or("");
        let filename = filename.unwrap_or("");
        if text.trim().is_empty() && filename.trim().is_empty() {
            return Err(Error::InvalidInput("either text or filename is required".into()));
        }
        Ok(self.classify(text, filename))
    }

    /// Per-domain evidence in declaration order, for explaining a decision.
    pub fn explain(&self, text: &str, filename: &str) -> Vec<(String, Evidence)> {
        self.domain_evidence(&Signals::new(text, filename))
    }

    fn domain_evidence(&self, signals: &Signals) -> Vec<(String, Evidence)> {
        if signals.is_empty() {
            return self.taxonomy.domains().iter().map(|d| (d.name.clone(), Evidence::default())).collect();
        }
        self.taxonomy
            .domains()
            .iter()
            .map(|d| (d.name.clone(), score_keywords(&d.keywords, signals)))
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self { Self::new(Arc::new(Taxonomy::builtin())) }
}
