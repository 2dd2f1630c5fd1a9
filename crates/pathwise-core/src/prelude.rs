//! Pathwise Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use pathwise_core::prelude::*;
//! ```

pub use crate::types::{
    normalize_topic, Categorical, Choice, ContentType, Difficulty, Preferences, Resource, Topic,
    TopicId,
};

pub use crate::catalog::{LoadReport, ResourceCatalog};
pub use crate::graph::{TopicGraph, TopicGraphBuilder};

pub use crate::error::{PathwiseError, Result};
