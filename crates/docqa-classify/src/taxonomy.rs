//! Two-level Domain > Category schema with strong/weak keyword evidence.
//!
//! A `Taxonomy` is built once at startup and shared read-only (usually behind
//! an `Arc`) by every classifier call. Keyword sets may overlap in literal
//! tokens across domains; scoring, not membership, resolves ambiguity.

use crate::builtin::{DomainSpec, BUILTIN_DOMAINS};
use crate::tokenize::tokenize;

/// Reserved name for the fallback domain and for each domain's fallback category.
pub const OTHER: &str = "Other";

/// A keyword normalized to the same token stream as classified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    pub tokens: Vec<String>,
}

impl Phrase {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string(), tokens: tokenize(text) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    pub strong: Vec<Phrase>,
    pub weak: Vec<Phrase>,
}

impl Keywords {
    pub fn new(strong: &[&str], weak: &[&str]) -> Self {
        let build = |words: &[&str]| {
            words
                .iter()
                .map(|w| Phrase::new(w))
                .filter(|p| !p.tokens.is_empty())
                .collect::<Vec<_>>()
        };
        Self { strong: build(strong), weak: build(weak) }
    }

    pub fn is_empty(&self) -> bool { self.strong.is_empty() && self.weak.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Keywords,
}

impl Category {
    pub fn new(name: &str, strong: &[&str], weak: &[&str]) -> Self {
        Self { name: name.to_string(), keywords: Keywords::new(strong, weak) }
    }

    fn other() -> Self {
        Self { name: OTHER.to_string(), keywords: Keywords::default() }
    }

    pub fn is_fallback(&self) -> bool { self.name == OTHER }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub keywords: Keywords,
    /// Declaration order; always ends with the reserved `Other` category.
    pub categories: Vec<Category>,
}

impl Domain {
    pub fn new(name: &str, strong: &[&str], weak: &[&str], categories: Vec<Category>) -> Self {
        let mut categories: Vec<Category> = categories.into_iter().filter(|c| !c.is_fallback()).collect();
        categories.push(Category::other());
        Self { name: name.to_string(), keywords: Keywords::new(strong, weak), categories }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The reserved `Other` category, present in every domain.
    pub fn fallback_category(&self) -> &Category {
        // Domain::new always appends the fallback last.
        &self.categories[self.categories.len() - 1]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    domains: Vec<Domain>,
    fallback: Domain,
}

impl Taxonomy {
    /// Build from an ordered list of domains. Declaration order is the final
    /// tie-breaker during classification.
    pub fn new(domains: Vec<Domain>) -> Self {
        let domains = domains.into_iter().filter(|d| d.name != OTHER).collect();
        Self { domains, fallback: Domain::new(OTHER, &[], &[], Vec::new()) }
    }

    /// The built-in document taxonomy.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_DOMAINS.iter().map(DomainSpec::build).collect())
    }

    pub fn domains(&self) -> &[Domain] { &self.domains }

    pub fn fallback(&self) -> &Domain { &self.fallback }

    pub fn domain(&self, name: &str) -> Option<&Domain> {
        if name == OTHER { return Some(&self.fallback); }
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn keyword_count(&self) -> usize {
        let count = |k: &Keywords| k.strong.len() + k.weak.len();
        self.domains
            .iter()
            .map(|d| count(&d.keywords) + d.categories.iter().map(|c| count(&c.keywords)).sum::<usize>())
            .sum()
    }
}
