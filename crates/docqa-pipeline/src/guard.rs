//! Post-generation grounding check.
//!
//! [`PhraseGuard`] scans the answer for fixed "no information" phrases. A hit
//! in a long answer is treated as an incidental disclaimer next to real
//! content and overridden; a hit in a short answer stands.

use tracing::{info, warn};

pub const NO_INFO_PHRASES: &[&str] = &[
    "don't have this information",
    "not in the provided documents",
    "not in the documents",
    "cannot find this information",
    "no information about",
    "not mentioned in the documents",
    "not available in the documents",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// No refusal signal.
    Pass,
    /// Refusal phrase found, but the answer is long enough to be substantive.
    Overridden,
    /// The answer says the documents do not contain the information.
    Triggered,
}

impl GuardVerdict {
    pub fn is_triggered(self) -> bool { self == Self::Triggered }
}

pub trait GroundingGuard: Send + Sync {
    fn check(&self, answer: &str) -> GuardVerdict;
}

pub struct PhraseGuard {
    phrases: Vec<String>,
    override_min_len: usize,
}

impl PhraseGuard {
    pub fn new(override_min_len: usize) -> Self {
        Self::with_phrases(NO_INFO_PHRASES.iter().copied(), override_min_len)
    }

    pub fn with_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>, override_min_len: usize) -> Self {
        Self { phrases: phrases.into_iter().map(str::to_lowercase).collect(), override_min_len }
    }
}

impl GroundingGuard for PhraseGuard {
    fn check(&self, answer: &str) -> GuardVerdict {
        let lower = answer.to_lowercase();
        let Some(phrase) = self.phrases.iter().find(|p| lower.contains(p.as_str())) else {
            return GuardVerdict::Pass;
        };
        let len = answer.chars().count();
        if len > self.override_min_len {
            warn!(phrase = %phrase, len, "no-info phrase in a long answer, keeping it");
            GuardVerdict::Overridden
        } else {
            info!(phrase = %phrase, len, "answer reports information not in documents");
            GuardVerdict::Triggered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(phrase: &str, len: usize) -> String {
        let mut s = format!("{phrase}.");
        while s.chars().count() < len { s.push('x'); }
        s
    }

    #[test]
    fn short_refusal_triggers_long_one_is_overridden() {
        let guard = PhraseGuard::new(100);
        let short = padded("not mentioned in the documents", 40);
        let long = padded("not mentioned in the documents", 150);
        assert_eq!((short.chars().count(), long.chars().count()), (40, 150));
        assert_eq!(guard.check(&short), GuardVerdict::Triggered);
        assert_eq!(guard.check(&long), GuardVerdict::Overridden);
    }

    #[test]
    fn boundary_is_strictly_greater() {
        let guard = PhraseGuard::new(100);
        assert!(guard.check(&padded("no information about", 100)).is_triggered());
        assert_eq!(guard.check(&padded("no information about", 101)), GuardVerdict::Overridden);
    }

    #[test]
    fn matching_ignores_case() {
        let guard = PhraseGuard::new(100);
        assert!(guard.check("I DON'T HAVE THIS INFORMATION.").is_triggered());
        assert_eq!(guard.check("Port 80 was already bound by nginx."), GuardVerdict::Pass);
    }

    #[test]
    fn custom_phrases_replace_defaults() {
        let guard = PhraseGuard::with_phrases(["Unknown"], 10);
        assert!(guard.check("unknown").is_triggered());
        assert_eq!(guard.check("not in the documents"), GuardVerdict::Pass);
    }
}
