use anyhow::{ensure, Result};
use arrow_array::types::Float32Type;
use arrow_array::{FixedSizeListArray, Int32Array, RecordBatch, StringArray, TimestampMillisecondArray};
use chrono::Utc;
use std::sync::Arc;

use docqa_core::types::ChunkRecord;

use crate::schema::build_chunk_schema;

/// One Arrow batch from chunk records and their embeddings (same order).
pub fn records_to_batch(records: &[ChunkRecord], vectors: &[Vec<f32>], dim: usize) -> Result<RecordBatch> {
    ensure!(records.len() == vectors.len(), "{} records but {} vectors", records.len(), vectors.len());
    if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
        anyhow::bail!("embedding has {} dims, table expects {}", bad.len(), dim);
    }

    let strings = |f: fn(&ChunkRecord) -> &str| -> StringArray { records.iter().map(|r| Some(f(r))).collect() };
    let now = Utc::now().timestamp_millis();
    let batch = RecordBatch::try_new(
        build_chunk_schema(dim),
        vec![
            Arc::new(strings(|r| r.id.as_str())),
            Arc::new(strings(|r| r.text.as_str())),
            Arc::new(strings(|r| r.filename.as_str())),
            Arc::new(strings(|r| r.filepath.as_str())),
            Arc::new(strings(|r| r.domain.as_str())),
            Arc::new(strings(|r| r.category.as_str())),
            Arc::new(strings(|r| r.file_extension.as_str())),
            Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.chunk_index as i32))),
            Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.total_chunks as i32))),
            Arc::new(TimestampMillisecondArray::from(vec![now; records.len()])),
            Arc::new(FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(
                vectors.iter().map(|v| Some(v.iter().map(|&x| Some(x)).collect::<Vec<_>>())),
                dim as i32,
            )),
        ],
    )?;
    Ok(batch)
}
