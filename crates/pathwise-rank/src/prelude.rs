//! Pathwise Rank Prelude: the types needed to build and query an engine.

pub use crate::blend::{blend_and_select, BlendConfig, ScoredResource};
pub use crate::engine::{LearningPath, PathEngine, Recommendation, ScoringMode, Step};
pub use crate::filter::filter;
pub use crate::ranker::{FeatureVector, ModelError, Ranker, RegressionModel, FEATURE_COUNT};
pub use crate::semantic::{SemanticScorer, SemanticWeights};
