use anyhow::{anyhow, Result};
use arrow_array::{Array, Float32Array, RecordBatch, StringArray};

use docqa_core::types::Chunk;

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| anyhow!("column '{}' missing or mistyped", name))
}

/// Cosine distance lies in `[0, 2]`; similarity is its complement clamped to `[0, 1]`.
pub fn similarity_from_distance(distance: f32) -> f32 {
    (1.0 - distance).clamp(0.0, 1.0)
}

/// Convert one result batch of a vector search into chunks, keeping row order.
pub fn batch_to_chunks(batch: &RecordBatch) -> Result<Vec<Chunk>> {
    let id = column::<StringArray>(batch, "id")?;
    let text = column::<StringArray>(batch, "text")?;
    let filename = column::<StringArray>(batch, "filename")?;
    let filepath = column::<StringArray>(batch, "filepath")?;
    let domain = column::<StringArray>(batch, "domain")?;
    let category = column::<StringArray>(batch, "category")?;
    let distance = column::<Float32Array>(batch, "_distance")?;

    Ok((0..batch.num_rows())
        .map(|i| {
            let d = if distance.is_valid(i) { distance.value(i).max(0.0) } else { 2.0 };
            Chunk {
                id: id.value(i).to_string(),
                text: text.value(i).to_string(),
                filename: filename.value(i).to_string(),
                filepath: filepath.value(i).to_string(),
                domain: domain.value(i).to_string(),
                category: category.value(i).to_string(),
                similarity: similarity_from_distance(d),
                distance: d,
                relevance_score: None,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_is_clamped() {
        assert_eq!(similarity_from_distance(0.0), 1.0);
        assert!((similarity_from_distance(0.25) - 0.75).abs() < 1e-6);
        assert_eq!(similarity_from_distance(1.5), 0.0);
        assert_eq!(similarity_from_distance(-0.1), 1.0);
    }
}
