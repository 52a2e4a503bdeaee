use docqa_core::config::EmptyPolicy;
use docqa_core::types::Chunk;
use tracing::{debug, warn};

pub struct NoiseFilter {
    threshold: f32,
    policy: EmptyPolicy,
}

impl NoiseFilter {
    pub fn new(threshold: f32, policy: EmptyPolicy) -> Self { Self { threshold, policy } }

    /// Drop chunks scored at or below the threshold. Unscored chunks are kept.
    ///
    /// If nothing survives, [`EmptyPolicy::KeepBest`] keeps the best-scoring
    /// input chunk (the earliest on ties, or the first one if none is scored) and [`EmptyPolicy::Empty`] returns nothing.
    pub fn filter(&self, chunks: Vec<Chunk>) -> Vec<Chunk> {
        let before = chunks.len();
        let best = chunks
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.relevance_score.filter(|s| !s.is_nan()).map(|s| (i, s)))
            .fold(None::<(usize, f32)>, |acc, (i, s)| match acc {
                Some((_, best)) if best >= s => acc,
                _ => Some((i, s)),
            })
            .map(|(i, _)| i);

        let (kept, dropped): (Vec<Chunk>, Vec<Chunk>) =
            chunks.into_iter().partition(|c| c.relevance_score.map_or(true, |s| s > self.threshold));
        debug!(before, after = kept.len(), threshold = self.threshold, "noise filter");
        if !kept.is_empty() || before == 0 {
            return kept;
        }

        warn!(before, threshold = self.threshold, policy = ?self.policy, "noise filter removed every candidate");
        match self.policy {
            EmptyPolicy::KeepBest => dropped.into_iter().nth(best.unwrap_or(0)).into_iter().collect(),
            EmptyPolicy::Empty => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, score: Option<f32>) -> Chunk {
        Chunk {
            id: id.into(),
            text: String::new(),
            filename: format!("{id}.txt"),
            filepath: format!("/{id}.txt"),
            domain: "Other".into(),
            category: "Other".into(),
            similarity: 0.5,
            distance: 0.5,
            relevance_score: score,
        }
    }

    fn ids(chunks: &[Chunk]) -> Vec<&str> { chunks.iter().map(|c| c.id.as_str()).collect() }

    #[test]
    fn threshold_is_exclusive() {
        let f = NoiseFilter::new(-3.0, EmptyPolicy::KeepBest);
        let out = f.filter(vec![chunk("a", Some(2.0)), chunk("b", Some(-3.0)), chunk("c", Some(-2.9))]);
        assert_eq!(ids(&out), vec!["a", "c"]);
    }

    #[test]
    fn unscored_chunks_pass() {
        let f = NoiseFilter::new(-3.0, EmptyPolicy::Empty);
        let out = f.filter(vec![chunk("a", None), chunk("b", Some(-9.0))]);
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn keep_best_restores_one_chunk() {
        let f = NoiseFilter::new(-3.0, EmptyPolicy::KeepBest);
        let out = f.filter(vec![chunk("a", Some(-7.0)), chunk("b", Some(-4.0)), chunk("c", Some(-4.0))]);
        assert_eq!(ids(&out), vec!["b"]);
    }

    #[test]
    fn empty_policy_returns_nothing() {
        let f = NoiseFilter::new(-3.0, EmptyPolicy::Empty);
        assert!(f.filter(vec![chunk("a", Some(-7.0))]).is_empty());
        assert!(f.filter(Vec::new()).is_empty());
    }
}
