//! Heuristic 0-100 support score for an answer built from `chunks`.
//!
//! Blend of mean similarity (40%), chunk count saturating at five (30%) and
//! mean store distance mapped onto `[0, 1]` (30%). Reproducible, not calibrated.
//! The query does not move the score.

use docqa_core::types::{Chunk, ConfidenceLevel};

const SATURATING_CHUNKS: f32 = 5.0;

pub fn estimate(_query: &str, chunks: &[Chunk]) -> u8 {
    if chunks.is_empty() {
        return 0;
    }
    let n = chunks.len() as f32;
    let avg_similarity = chunks.iter().map(|c| c.similarity).sum::<f32>() / n;
    let chunk_bonus = (n / SATURATING_CHUNKS).min(1.0);
    let avg_distance = chunks.iter().map(|c| c.distance).sum::<f32>() / n;
    let distance_confidence = (1.0 - avg_distance / 2.0).max(0.0);

    let confidence = 0.4 * avg_similarity + 0.3 * chunk_bonus + 0.3 * distance_confidence;
    let score = (confidence * 100.0).round();
    if score.is_nan() { 0 } else { score.clamp(0.0, 100.0) as u8 }
}

pub fn level(score: u8) -> ConfidenceLevel { ConfidenceLevel::from_score(score) }

#[cfg(test)]
mod tests {
    use super::*;

    const Q: &str = "What happened on port 80?";

    fn chunk(similarity: f32, distance: f32) -> Chunk {
        Chunk {
            id: "c".into(),
            text: String::new(),
            filename: "f.txt".into(),
            filepath: "/f.txt".into(),
            domain: "Other".into(),
            category: "Other".into(),
            similarity,
            distance,
            relevance_score: None,
        }
    }

    #[test]
    fn empty_set_scores_zero() {
        assert_eq!(estimate(Q, &[]), 0);
    }

    #[test]
    fn formula_matches_hand_computation() {
        // 0.4*0.8 + 0.3*(1/5) + 0.3*(1 - 0.2/2) = 0.32 + 0.06 + 0.27
        assert_eq!(estimate(Q, &[chunk(0.8, 0.2)]), 65);
        let five = vec![chunk(1.0, 0.0); 5];
        assert_eq!(estimate(Q, &five), 100);
        assert_eq!(level(estimate(Q, &five)), ConfidenceLevel::High);
    }

    #[test]
    fn query_text_does_not_change_the_score() {
        let chunks = [chunk(0.7, 0.4), chunk(0.5, 0.9)];
        assert_eq!(estimate("", &chunks), estimate(Q, &chunks));
        assert_eq!(estimate("anything at all", &[]), 0);
    }

    #[test]
    fn monotonic_in_similarity() {
        let mut last = 0;
        for step in 0..=20 {
            let s = step as f32 / 20.0;
            let score = estimate(Q, &[chunk(s, 0.6), chunk(s, 0.6)]);
            assert!(score >= last, "similarity {s}: {score} < {last}");
            last = score;
        }
    }

    #[test]
    fn stays_in_range_for_odd_store_values() {
        assert_eq!(estimate(Q, &[chunk(0.0, 9.0)]), 6);
        assert!(estimate(Q, &vec![chunk(1.0, 0.0); 12]) <= 100);
        assert_eq!(estimate(Q, &[chunk(f32::NAN, 0.0)]), 0);
    }
}
