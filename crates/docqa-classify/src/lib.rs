//! Deterministic Domain > Category document classifier driven by weighted
//! keyword evidence. No model inference; safe to call on the ingestion hot path.

#![deny(unused_imports)]

mod builtin;
pub mod classifier;
pub mod extension;
pub mod taxonomy;
pub mod tokenize;

pub use classifier::{Classifier, Evidence};
pub use taxonomy::{Category, Domain, Keywords, Taxonomy, OTHER};
