//! # Pathwise Core
//!
//! Shared types and the two load-once data structures of Pathwise:
//!
//! - **Topic graph**: hand-curated DAG of prerequisite edges; resolves the
//!   shortest prerequisite path between a known topic and a goal topic
//! - **Resource catalog**: learning resources indexed by topic, with their
//!   precomputed title/description embeddings and tabular features
//!
//! Both are built once at startup and never mutated, so they can be shared
//! across request handlers without locking.
//!
//! ## Quick Start
//!
//! ```rust
//! use pathwise_core::prelude::*;
//!
//! let graph = TopicGraph::default_curriculum();
//! let path = graph.resolve_path("introduction to python", "Decision Trees").unwrap();
//! assert_eq!(path.first().unwrap().label, "Introduction to Python");
//! assert_eq!(path.last().unwrap().label, "Decision Trees");
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod types;

pub use types::normalize_topic;
