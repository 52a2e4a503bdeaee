//! LanceDB-backed chunk store.
//!
//! Chunks are embedded on `add` and on `query` with the same embedder, and
//! searched by cosine distance. The table is created lazily by the first `add`;
//! until then every read reports an empty store.

use anyhow::{anyhow, Result};
use arrow_array::{RecordBatchIterator, RecordBatchReader};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection, DistanceType, Table};
use std::path::Path;
use tracing::{debug, info};

use docqa_core::traits::{Embedder, VectorStore};
use docqa_core::types::{Chunk, ChunkRecord};

pub mod schema;
pub mod search;
pub mod writer;

use crate::schema::build_chunk_schema;
use crate::search::batch_to_chunks;
use crate::writer::records_to_batch;

const WRITE_BATCH: usize = 256;

pub struct LanceVectorStore {
    db: Connection,
    table_name: String,
    embedder: Box<dyn Embedder>,
}

impl LanceVectorStore {
    pub async fn new(db_path: &Path, table_name: &str, embedder: Box<dyn Embedder>) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, table_name: table_name.to_string(), embedder })
    }

    pub fn table_name(&self) -> &str { &self.table_name }

    async fn table(&self) -> Result<Option<Table>> {
        if !self.db.table_names().execute().await?.contains(&self.table_name) {
            return Ok(None);
        }
        Ok(Some(self.db.open_table(&self.table_name).execute().await?))
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embedder
            .embed_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("embedder returned no vector for the query"))
    }

    /// Embed `records` into Arrow batches. Nothing is written yet, so a
    /// failing embedder leaves the table untouched.
    fn reader(&self, records: &[ChunkRecord]) -> Result<Box<dyn RecordBatchReader + Send>> {
        let mut batches = Vec::new();
        for part in records.chunks(WRITE_BATCH) {
            let texts: Vec<String> = part.iter().map(|r| r.text.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts)?;
            batches.push(Ok(records_to_batch(part, &vectors, self.embedder.dim())?));
        }
        let schema = build_chunk_schema(self.embedder.dim());
        Ok(Box::new(RecordBatchIterator::new(batches.into_iter(), schema)))
    }

    async fn write(&self, records: &[ChunkRecord]) -> Result<()> {
        let reader = self.reader(records)?;
        match self.table().await? {
            Some(table) => {
                table.add(reader).execute().await?;
            }
            None => {
                self.db.create_table(&self.table_name, reader).execute().await?;
            }
        }
        Ok(())
    }
}

fn filepath_predicate(path: &str) -> String {
    format!("filepath = '{}'", path.replace('\'', "''"))
}

#[async_trait]
impl VectorStore for LanceVectorStore {
    async fn query(&self, text: &str, k: usize) -> Result<Vec<Chunk>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let Some(table) = self.table().await? else {
            return Ok(Vec::new());
        };
        let query_vector = self.embed_query(text)?;
        let mut stream = table
            .vector_search(query_vector)?
            .distance_type(DistanceType::Cosine)
            .limit(k)
            .execute()
            .await?;
        let mut chunks = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            chunks.extend(batch_to_chunks(&batch)?);
        }
        chunks.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        chunks.truncate(k);
        debug!(k, returned = chunks.len(), "vector query");
        Ok(chunks)
    }

    async fn add(&self, chunks: &[ChunkRecord]) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }
        self.write(chunks).await?;
        info!(chunks = chunks.len(), table = %self.table_name, "added chunks");
        Ok(chunks.len())
    }

    async fn delete_by_filepath(&self, path: &str) -> Result<usize> {
        let Some(table) = self.table().await? else {
            return Ok(0);
        };
        let predicate = filepath_predicate(path);
        let removed = table.count_rows(Some(predicate.clone())).await?;
        if removed > 0 {
            table.delete(&predicate).await?;
            info!(path, removed, "deleted chunks");
        }
        Ok(removed)
    }

    /// Upsert by `id` and drop this file's rows that the new set no longer
    /// contains, in one merge-insert commit.
    async fn replace_by_filepath(&self, path: &str, chunks: &[ChunkRecord]) -> Result<usize> {
        if chunks.is_empty() {
            return self.delete_by_filepath(path).await;
        }
        let Some(table) = self.table().await? else {
            self.write(chunks).await?;
            return Ok(0);
        };
        let predicate = filepath_predicate(path);
        let previous = table.count_rows(Some(predicate.clone())).await?;
        let reader = self.reader(chunks)?;

        let mut merge = table.merge_insert(&["id"]);
        merge
            .when_matched_update_all(None)
            .when_not_matched_insert_all()
            .when_not_matched_by_source_delete(Some(predicate));
        merge.execute(reader).await?;
        info!(path, previous, chunks = chunks.len(), "replaced chunks");
        Ok(previous)
    }

    async fn count(&self) -> Result<usize> {
        match self.table().await? {
            Some(table) => Ok(table.count_rows(None).await?),
            None => Ok(0),
        }
    }
}
