use arrow_schema::{DataType, Field, Schema, TimeUnit};
use std::sync::Arc;

/// Chunk table layout. `dim` is the embedder's output size.
pub fn build_chunk_schema(dim: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("filename", DataType::Utf8, false),
        Field::new("filepath", DataType::Utf8, false),
        Field::new("domain", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("file_extension", DataType::Utf8, false),
        Field::new("chunk_index", DataType::Int32, false),
        Field::new("total_chunks", DataType::Int32, false),
        Field::new("ingested_at", DataType::Timestamp(TimeUnit::Millisecond, None), false),
        Field::new(
            "vector",
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim as i32),
            true,
        ),
    ]))
}
