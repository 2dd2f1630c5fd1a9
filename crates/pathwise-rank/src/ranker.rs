//! Learned ranker: a pretrained regression model over tabular features.
//!
//! Feature order is fixed: `[length, difficulty, type, popularity, rating]`.
//! Difficulty encodes easy=1, medium=2, hard=3; type encodes video=1,
//! article=2; unmapped values encode to 0.
//!
//! Models are trained offline and exported as JSON:
//!
//! ```json
//! { "kind": "linear", "coefficients": [-0.01, 0.05, 0.1, 0.0001, 0.2], "intercept": 0.1 }
//! ```
//!
//! or, for forests and boosted ensembles, one flat node array per tree with
//! children stored after their parent:
//!
//! ```json
//! { "kind": "tree_ensemble", "aggregation": "mean", "trees": [
//!     { "nodes": [ { "feature": 0, "threshold": 20.0, "left": 1, "right": 2 },
//!                  { "value": 0.8 }, { "value": 0.3 } ] } ] }
//! ```

use pathwise_core::types::{Categorical, Resource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 5;

/// Feature names, in order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["length", "difficulty", "type", "popularity", "rating"];

/// Model loading errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Tabular features of one resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_resource(resource: &Resource) -> Self {
        Self([
            f64::from(resource.length),
            f64::from(resource.difficulty.map_or(0, |d| d.encoded())),
            f64::from(resource.content_type.map_or(0, |t| t.encoded())),
            resource.popularity,
            resource.rating,
        ])
    }

    pub fn get(&self, feature: usize) -> f64 {
        self.0[feature]
    }
}

/// Feature matrix for a candidate list.
pub fn feature_matrix(candidates: &[&Resource]) -> Vec<FeatureVector> {
    candidates
        .iter()
        .map(|r| FeatureVector::from_resource(r))
        .collect()
}

/// A read-only relevance predictor. Prediction is pure.
pub trait Ranker: Send + Sync {
    /// One prediction per row, in row order.
    fn predict(&self, features: &[FeatureVector]) -> Vec<f64>;

    /// Identifier for logs.
    fn name(&self) -> &str;
}

/// How tree outputs combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Random forest.
    #[default]
    Mean,
    /// Gradient boosting.
    Sum,
}

/// A node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go `left` when `x[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, tree: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {} has no nodes", tree)));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {} splits on feature {} (features are {})",
                            tree,
                            i,
                            feature,
                            FEATURE_NAMES.join(", ")
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {} has a non-finite threshold on {}",
                            tree, i, FEATURE_NAMES[*feature]
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(ModelError::Invalid(format!(
                                "tree {} node {} has child {} out of order",
                                tree, i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {} has a non-finite value",
                            tree, i
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Children always follow their parent, so the walk terminates.
    fn evaluate(&self, x: &FeatureVector) -> f64 {
        let mut i = 0;
        loop {
            match &self.nodes[i] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = if x.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

fn default_learning_rate() -> f64 {
    1.0
}

/// Serialized regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    TreeEnsemble {
        trees: Vec<RegressionTree>,
        #[serde(default)]
        aggregation: Aggregation,
        #[serde(default)]
        base_score: f64,
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
    },
}

impl RegressionModel {
    /// Load and validate a JSON model.
    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let model: RegressionModel = serde_json::from_str(content)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            RegressionModel::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(ModelError::Invalid(format!(
                        "expected {} coefficients ({}), got {}",
                        FEATURE_COUNT,
                        FEATURE_NAMES.join(", "),
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() {
                    return Err(ModelError::Invalid("non-finite intercept".to_string()));
                }
                if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid(format!(
                        "non-finite {} coefficient",
                        FEATURE_NAMES[i]
                    )));
                }
            }
            RegressionModel::TreeEnsemble {
                trees,
                base_score,
                learning_rate,
                ..
            } => {
                if trees.is_empty() {
                    return Err(ModelError::Invalid("ensemble has no trees".to_string()));
                }
                if !base_score.is_finite() || !learning_rate.is_finite() {
                    return Err(ModelError::Invalid(
                        "non-finite base_score or learning_rate".to_string(),
                    ));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(i)?;
                }
            }
        }
        Ok(())
    }

    fn predict_one(&self, x: &FeatureVector) -> f64 {
        match self {
            RegressionModel::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(x.0.iter())
                        .map(|(c, v)| c * v)
                        .sum::<f64>()
            }
            RegressionModel::TreeEnsemble {
                trees,
                aggregation,
                base_score,
                learning_rate,
            } => {
                let total: f64 = trees.iter().map(|t| t.evaluate(x)).sum();
                let combined = match aggregation {
                    Aggregation::Mean => total / trees.len() as f64,
                    Aggregation::Sum => total,
                };
                base_score + learning_rate * combined
            }
        }
    }
}

impl Ranker for RegressionModel {
    fn predict(&self, features: &[FeatureVector]) -> Vec<f64> {
        features.iter().map(|x| self.predict_one(x)).collect()
    }

    fn name(&self) -> &str {
        match self {
            RegressionModel::Linear { .. } => "linear",
            RegressionModel::TreeEnsemble { .. } => "tree_ensemble",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::types::{ContentType, Difficulty, TopicId};

    fn resource(length: u32, difficulty: Option<Difficulty>, content_type: Option<ContentType>) -> Resource {
        Resource {
            title: "r".to_string(),
            url: "https://example.com/r".to_string(),
            topic: TopicId::new("Linear Regression"),
            content_type,
            difficulty,
            length,
            popularity: 1200.0,
            rating: 4.5,
            title_embedding: vec![1.0],
            description_embedding: vec![1.0],
        }
    }

    #[test]
    fn feature_encoding() {
        let r = resource(12, Some(Difficulty::Hard), Some(ContentType::Article));
        assert_eq!(FeatureVector::from_resource(&r).0, [12.0, 3.0, 2.0, 1200.0, 4.5]);

        let unmapped = resource(7, None, None);
        assert_eq!(FeatureVector::from_resource(&unmapped).0, [7.0, 0.0, 0.0, 1200.0, 4.5]);
    }

    #[test]
    fn linear_prediction() {
        let model = RegressionModel::from_json(
            r#"{"kind": "linear", "coefficients": [0.0, 1.0, 0.0, 0.0, 0.5], "intercept": 0.25}"#,
        )
        .unwrap();
        let x = FeatureVector([10.0, 2.0, 1.0, 100.0, 4.0]);
        assert_eq!(model.predict(&[x]), vec![0.25 + 2.0 + 2.0]);
        assert_eq!(model.name(), "linear");
    }

    #[test]
    fn tree_ensemble_prediction() {
        let model = RegressionModel::from_json(
            r#"{
                "kind": "tree_ensemble",
                "aggregation": "mean",
                "trees": [
                    {"nodes": [{"feature": 0, "threshold": 20.0, "left": 1, "right": 2}, {"value": 1.0}, {"value": 0.0}]},
                    {"nodes": [{"value": 0.5}]}
                ]
            }"#,
        )
        .unwrap();

        let short = FeatureVector([10.0, 1.0, 1.0, 0.0, 0.0]);
        let long = FeatureVector([90.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(model.predict(&[short, long]), vec![0.75, 0.25]);
    }

    #[test]
    fn boosted_sum_with_learning_rate() {
        let model = RegressionModel::from_json(
            r#"{
                "kind": "tree_ensemble",
                "aggregation": "sum",
                "base_score": 0.5,
                "learning_rate": 0.1,
                "trees": [{"nodes": [{"value": 1.0}]}, {"nodes": [{"value": 2.0}]}]
            }"#,
        )
        .unwrap();
        let x = FeatureVector([0.0; FEATURE_COUNT]);
        assert!((model.predict(&[x])[0] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn prediction_is_pure() {
        let model = RegressionModel::Linear {
            coefficients: vec![0.1, 0.2, 0.3, 0.4, 0.5],
            intercept: 1.0,
        };
        let rows = vec![FeatureVector([1.0, 2.0, 3.0, 4.0, 5.0]); 3];
        assert_eq!(model.predict(&rows), model.predict(&rows));
    }

    #[test]
    fn invalid_models_are_rejected() {
        assert!(matches!(
            RegressionModel::from_json(r#"{"kind": "linear", "coefficients": [1.0], "intercept": 0}"#),
            Err(ModelError::Invalid(_))
        ));
        assert!(matches!(
            RegressionModel::from_json(
                r#"{"kind": "tree_ensemble", "trees": [{"nodes": [{"feature": 9, "threshold": 1, "left": 1, "right": 2}, {"value": 0}, {"value": 1}]}]}"#
            ),
            Err(ModelError::Invalid(_))
        ));
        assert!(matches!(
            RegressionModel::from_json(
                r#"{"kind": "tree_ensemble", "trees": [{"nodes": [{"feature": 0, "threshold": 1, "left": 0, "right": 0}]}]}"#
            ),
            Err(ModelError::Invalid(_))
        ));
        assert!(matches!(
            RegressionModel::from_json(r#"{"kind": "mystery"}"#),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn validation_names_the_features() {
        let err = RegressionModel::from_json(
            r#"{"kind": "linear", "coefficients": [1.0, 2.0], "intercept": 0}"#,
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("length, difficulty, type, popularity, rating"));

        let model = RegressionModel::Linear {
            coefficients: vec![0.0, 0.0, 0.0, f64::NAN, 0.0],
            intercept: 0.0,
        };
        assert!(model.validate().unwrap_err().to_string().contains("popularity"));
    }
}
