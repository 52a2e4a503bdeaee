use std::time::Duration;

use docqa_core::traits::VectorStore;
use docqa_core::types::Chunk;
use docqa_core::{Error, Result};
use tracing::debug;

/// Ask the store for `oversample_k` candidates. The result is returned exactly
/// as the store produced it; a failure or a timeout becomes
/// [`Error::RetrievalUnavailable`].
pub async fn retrieve<V>(store: &V, query: &str, oversample_k: usize, timeout: Duration) -> Result<Vec<Chunk>>
where
    V: VectorStore + ?Sized,
{
    let chunks = match tokio::time::timeout(timeout, store.query(query, oversample_k)).await {
        Ok(Ok(chunks)) => chunks,
        Ok(Err(e)) => return Err(Error::RetrievalUnavailable(format!("{e:#}"))),
        Err(_) => {
            return Err(Error::RetrievalUnavailable(format!("vector store did not answer within {timeout:?}")))
        }
    };
    debug!(requested = oversample_k, returned = chunks.len(), "retrieved candidates");
    Ok(chunks)
}
