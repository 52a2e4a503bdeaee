use anyhow::{ensure, Result};
use candle_core::{Device, Tensor};
use tokenizers::Encoding;

/// Model inputs for one padded batch, each `[B,T]`.
pub struct Batch {
    pub input_ids: Tensor,
    pub token_type_ids: Tensor,
    pub attention_mask: Tensor,
}

/// Truncate every encoding to `max_len`, pad to the longest one with `pad_id`
/// and stack into tensors on `device`.
pub fn pad_batch(encodings: &[Encoding], pad_id: u32, max_len: usize, device: &Device) -> Result<Batch> {
    ensure!(!encodings.is_empty(), "cannot build an empty batch");
    let width = encodings.iter().map(|e| e.get_ids().len().min(max_len)).max().unwrap_or(0).max(1);

    let mut ids = Vec::with_capacity(encodings.len() * width);
    let mut type_ids = Vec::with_capacity(encodings.len() * width);
    let mut mask = Vec::with_capacity(encodings.len() * width);
    for enc in encodings {
        let take = enc.get_ids().len().min(width);
        ids.extend_from_slice(&enc.get_ids()[..take]);
        type_ids.extend_from_slice(&enc.get_type_ids()[..take]);
        mask.extend_from_slice(&enc.get_attention_mask()[..take]);
        let pad = width - take;
        ids.extend(std::iter::repeat(pad_id).take(pad));
        type_ids.extend(std::iter::repeat(0).take(pad));
        mask.extend(std::iter::repeat(0).take(pad));
    }

    let shape = (encodings.len(), width);
    Ok(Batch {
        input_ids: Tensor::from_vec(ids, shape, device)?,
        token_type_ids: Tensor::from_vec(type_ids, shape, device)?,
        attention_mask: Tensor::from_vec(mask, shape, device)?,
    })
}
