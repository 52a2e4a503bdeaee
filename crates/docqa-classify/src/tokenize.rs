use std::collections::HashMap;

/// Lowercase and split on every non-alphanumeric character.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A normalized token sequence with per-token counts, so single-word
/// keywords are a map lookup and phrases a window scan.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TokenStream {
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let mut counts = HashMap::new();
        for t in &tokens { *counts.entry(t.clone()).or_insert(0) += 1; }
        Self { tokens, counts }
    }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    fn count(&self, token: &str) -> usize { self.counts.get(token).copied().unwrap_or(0) }

    /// Number of times `phrase` occurs as a contiguous token run. The last
    /// word also matches its plain `s` plural.
    pub fn occurrences(&self, phrase: &[String]) -> usize {
        match phrase {
            [] => 0,
            [single] => self.count(single) + self.count(&format!("{single}s")),
            [head @ .., last] => self
                .tokens
                .windows(phrase.len())
                .filter(|w| w[..head.len()] == *head && plural_or_same(&w[head.len()], last))
                .count(),
        }
    }
}

fn plural_or_same(token: &str, word: &str) -> bool {
    token == word || token.strip_suffix('s') == Some(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        assert_eq!(tokenize("Invoice_Laptop-2024.PDF"), vec!["invoice", "laptop", "2024", "pdf"]);
        assert_eq!(tokenize("CI/CD"), vec!["ci", "cd"]);
        assert!(tokenize("  --  ").is_empty());
    }

    #[test]
    fn counts_words_and_phrases() {
        let stream = TokenStream::new("Balance sheet: the balance sheet and a balance.");
        assert_eq!(stream.occurrences(&tokenize("balance")), 3);
        assert_eq!(stream.occurrences(&tokenize("balance sheet")), 2);
        assert_eq!(stream.occurrences(&tokenize("sheet balance")), 0);
        assert_eq!(stream.occurrences(&[]), 0);
    }

    #[test]
    fn plurals_match_their_singular_keyword() {
        let stream = TokenStream::new("Invoices_2024: two invoices and one invoice. Utility bills attached.");
        assert_eq!(stream.occurrences(&tokenize("invoice")), 3);
        assert_eq!(stream.occurrences(&tokenize("utility bill")), 1);
        assert_eq!(stream.occurrences(&tokenize("invoices")), 2);
        assert_eq!(stream.occurrences(&tokenize("bills attached")), 1);
    }

    #[test]
    fn token_match_is_not_substring_match() {
        let stream = TokenStream::new("costume design");
        assert_eq!(stream.occurrences(&tokenize("cost")), 0);
    }
}
