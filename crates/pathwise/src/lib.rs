//! # Pathwise
//!
//! Prerequisite-aware learning paths with ranked resource recommendations.
//!
//! Given a topic the learner already knows and a goal topic, Pathwise finds
//! the shortest chain of prerequisites between them and, for every topic on
//! the chain, recommends the learning resources that best fit the learner's
//! preferences.
//!
//! ## Quick Start
//!
//! ```rust
//! use pathwise::prelude::*;
//!
//! let graph = TopicGraph::default_curriculum();
//! let catalog = ResourceCatalog::from_resources(Vec::new(), &graph);
//! let engine = PathEngine::new(
//!     graph,
//!     catalog,
//!     Box::new(HashEmbedder::new(64)),
//!     None,
//!     SemanticScorer::default(),
//!     BlendConfig::new(0.5, 3).unwrap(),
//! )
//! .unwrap();
//!
//! let path = engine
//!     .recommend("Introduction to Python", "Decision Trees", &Preferences::default())
//!     .unwrap();
//! assert_eq!(path.steps.len(), 5);
//! ```
//!
//! Deployments usually build the engine from `pathwise.toml` instead:
//!
//! ```rust,ignore
//! use pathwise::{build_engine, Config};
//!
//! let config = Config::load()?;
//! let engine = build_engine(&config)?;
//! ```
//!
//! ## Architecture
//!
//! - [`pathwise_core`]: shared types, topic graph and path resolver, resource catalog
//! - [`pathwise_embeddings`]: query encoders and vector math
//! - [`pathwise_rank`]: filtering, semantic and learned scoring, blending, the engine
//!
//! ## Features
//!
//! - `api`: encode queries through an OpenAI-compatible embeddings endpoint

pub mod config;
pub mod context;

pub use config::{find_config_file, Config, EmbedderKind, CONFIG_FILE};
pub use context::build_engine;

// Re-export all subcrates
pub use pathwise_core as core;
pub use pathwise_embeddings as embeddings;
pub use pathwise_rank as rank;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pathwise::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pathwise_core::prelude::*;

    // Query encoders
    pub use pathwise_embeddings::{Embedder, EmbeddingError, HashEmbedder, PrecomputedEmbedder};

    // Ranking
    pub use pathwise_rank::prelude::*;

    // Configuration
    pub use crate::config::Config;
    pub use crate::context::build_engine;
}
