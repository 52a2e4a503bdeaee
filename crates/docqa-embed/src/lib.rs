//! Local model inference: BGE-M3 chunk embeddings for the vector store and a
//! cross-encoder relevance scorer for reranking, each with a model-free fake.

pub mod cross_encoder;
pub mod device;
pub mod embedder;
pub mod pool;
pub mod tokenize;

pub use cross_encoder::{get_default_scorer, CrossEncoder, LexicalScorer};
pub use embedder::{get_default_embedder, EmbeddingModel, FakeEmbedder, EMBEDDING_DIM};
pub use pool::masked_mean_l2;
