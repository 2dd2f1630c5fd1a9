//! Vector normalization, similarity, and dataset parsing utilities.

use crate::{EmbeddingError, EmbeddingResult};

/// L2 normalize a vector (unit length). Zero vectors are left untouched.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Owned variant of [`normalize_l2`].
pub fn l2_normalized(mut vector: Vec<f32>) -> Vec<f32> {
    normalize_l2(&mut vector);
    vector
}

/// Compute dot product between two vectors.
///
/// For unit-length inputs this is the cosine similarity.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths, empty input, or zero-norm vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot = dot_product(a, b);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Parse an embedding column: comma-separated floats, optionally wrapped in
/// square brackets.
pub fn parse_embedding(raw: &str) -> EmbeddingResult<Vec<f32>> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    if inner.trim().is_empty() {
        return Err(EmbeddingError::InvalidInput("empty embedding".to_string()));
    }

    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f32>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(EmbeddingError::InvalidInput(format!(
                    "not a finite float: {:?}",
                    part
                ))),
            }
        })
        .collect()
}
