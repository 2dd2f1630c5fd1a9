//! Hash-based embedder (no model files, no network).
//!
//! Each word and each adjacent word pair is hashed into a signed bucket of a
//! fixed-dimension vector. The vectors carry no learned semantics; this
//! encoder is only meaningful against a catalog whose embeddings were
//! produced by the same hashing scheme, which makes it the encoder of choice
//! for fixtures and local smoke tests.

use crate::{l2_normalized, Embedder, EmbeddingError, EmbeddingResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Bigrams count for half as much as single words.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Hash-based embedder.
///
/// # Example
///
/// ```rust
/// use pathwise_embeddings::{Embedder, HashEmbedder};
///
/// let embedder = HashEmbedder::new(128);
/// let vec = embedder.embed("linear regression").unwrap();
/// assert_eq!(vec.len(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Bucket index and sign for one feature, both taken from a single hash.
    fn bucket(&self, feature: &[&str]) -> (usize, f32) {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        let h = hasher.finish();
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h as usize) % self.dimension, sign)
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 1)
        .map(str::to_lowercase)
        .collect()
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
        }

        let words = words(text);
        let mut vector = vec![0.0f32; self.dimension];

        for word in &words {
            let (idx, sign) = self.bucket(&[word.as_str()]);
            vector[idx] += sign;
        }
        for pair in words.windows(2) {
            let (idx, sign) = self.bucket(&[pair[0].as_str(), pair[1].as_str()]);
            vector[idx] += sign * BIGRAM_WEIGHT;
        }

        Ok(l2_normalized(vector))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "hash"
    }
}
