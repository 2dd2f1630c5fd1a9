//! # Pathwise Embeddings
//!
//! Query encoders and vector math for Pathwise semantic scoring.
//!
//! Resource embeddings are produced offline and shipped with the catalog.
//! At request time only the per-topic query text has to be encoded, and it
//! must land in the same space as the catalog vectors. This crate provides:
//! - the [`Embedder`] trait implemented by every query encoder
//! - L2 normalization and cosine similarity
//! - parsing of the comma-separated embedding columns of the dataset
//!
//! ## Features
//!
//! - `api`: encode queries through an OpenAI-compatible embeddings endpoint
//!
//! ## Usage
//!
//! ```rust
//! use pathwise_embeddings::{cosine_similarity, Embedder, HashEmbedder};
//!
//! let embedder = HashEmbedder::new(64);
//! let a = embedder.embed("decision trees tutorial").unwrap();
//! let b = embedder.embed("decision trees tutorial").unwrap();
//! assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
//! ```

mod embedder;
mod hash;
mod normalize;
mod precomputed;

pub use embedder::{Embedder, EmbeddingError, EmbeddingResult};
pub use hash::HashEmbedder;
pub use normalize::{cosine_similarity, dot_product, l2_normalized, normalize_l2, parse_embedding};
pub use precomputed::PrecomputedEmbedder;

#[cfg(feature = "api")]
mod api;
#[cfg(feature = "api")]
pub use api::{ApiConfig, ApiEmbedder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cosine_similarity, l2_normalized, normalize_l2, parse_embedding};
    pub use crate::{Embedder, EmbeddingError, EmbeddingResult};
    pub use crate::{HashEmbedder, PrecomputedEmbedder};

    #[cfg(feature = "api")]
    pub use crate::{ApiConfig, ApiEmbedder};
}
