//! Deterministic text embedding
//!
//! Used when no external embedding model is wired in. Equal text always
//! maps to the same vector, which keeps memory queries reproducible.

/// Dimension used when none is configured
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 5;

/// Fold the character codes of `text` into `dimension` buckets.
///
/// Character `i` is added to bucket `i % dimension`, then every bucket is
/// divided by the character count. Empty text yields a zero vector.
pub fn text_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let mut vector = vec![0.0_f32; dimension];
    if dimension == 0 {
        return vector;
    }

    let mut length = 0usize;
    for (idx, ch) in text.chars().enumerate() {
        vector[idx % dimension] += ch as u32 as f32;
        length += 1;
    }

    if length == 0 {
        return vector;
    }

    let length = length as f32;
    vector.iter_mut().for_each(|v| *v /= length);
    vector
}
