use thiserror::Error;

/// Failure classes surfaced by the classifier and the answer pipeline.
///
/// External-call failures are converted into one of these at the call site;
/// none of them is allowed to escape `answer` as a fault.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Reranking degraded: {0}")]
    RerankDegraded(String),

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
