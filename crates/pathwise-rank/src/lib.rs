//! # Pathwise Rank
//!
//! The resource scoring pipeline. For every topic on a resolved path:
//!
//! 1. **Filter**: keep resources matching the learner's type, difficulty
//!    and length preferences
//! 2. **Semantic score**: cosine similarity between the topic query and each
//!    resource's title and description embeddings
//! 3. **Learned score**: a pretrained regression model over tabular
//!    features, when one is available
//! 4. **Blend**: mix both scores by `alpha`, sort, keep the top K
//!
//! | Ranker loaded | Final score |
//! |---------------|-------------|
//! | yes | `alpha * ml + (1 - alpha) * semantic` |
//! | no  | `semantic` |
//!
//! [`PathEngine`] ties the steps to the topic graph and resource catalog.

pub mod blend;
pub mod engine;
pub mod filter;
pub mod prelude;
pub mod ranker;
pub mod semantic;

pub use blend::{blend_and_select, BlendConfig, ScoredResource};
pub use engine::{LearningPath, PathEngine, Recommendation, ScoringMode, Step};
pub use ranker::{FeatureVector, ModelError, Ranker, RegressionModel};
pub use semantic::{SemanticScorer, SemanticWeights};
