//! Semantic scoring: query-to-resource cosine similarity.
//!
//! score = title_weight * cos(q, title) + description_weight * cos(q, description)
//!
//! Catalog embeddings are unit length, and the query vector is normalized
//! here, so each cosine is a plain dot product.

use pathwise_core::error::{PathwiseError, Result};
use pathwise_core::types::{Resource, Topic};
use pathwise_embeddings::{dot_product, l2_normalized, Embedder, EmbeddingError};
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the topic label in query templates.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Mixing weights between title and description similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticWeights {
    pub title: f64,
    pub description: f64,
}

impl Default for SemanticWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            description: 0.7,
        }
    }
}

/// Scores candidates against a query encoded by an [`Embedder`].
#[derive(Debug, Clone)]
pub struct SemanticScorer {
    weights: SemanticWeights,
    query_template: String,
}

impl SemanticScorer {
    pub fn new(weights: SemanticWeights, query_template: &str) -> Result<Self> {
        if !query_template.contains(TOPIC_PLACEHOLDER) {
            return Err(PathwiseError::invalid_config(
                "query_template",
                query_template,
                "must contain {topic}",
            ));
        }
        for (field, value) in [("title_weight", weights.title), ("description_weight", weights.description)] {
            if !value.is_finite() {
                return Err(PathwiseError::invalid_config(
                    field,
                    value.to_string(),
                    "must be finite",
                ));
            }
        }
        Ok(Self {
            weights,
            query_template: query_template.to_string(),
        })
    }

    pub fn weights(&self) -> SemanticWeights {
        self.weights
    }

    /// The query text used to describe a topic.
    pub fn query_for(&self, topic: &Topic) -> String {
        self.query_template.replace(TOPIC_PLACEHOLDER, &topic.label)
    }

    /// Encode `query_text` and score every candidate.
    pub fn score(
        &self,
        embedder: &dyn Embedder,
        query_text: &str,
        candidates: &[&Resource],
    ) -> Result<Vec<f64>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let query = embedder.embed(query_text)?;
        self.score_vector(&query, candidates)
    }

    /// Score candidates against an already-encoded query.
    pub fn score_vector(&self, query: &[f32], candidates: &[&Resource]) -> Result<Vec<f64>> {
        let query = l2_normalized(query.to_vec());

        candidates
            .iter()
            .map(|resource| {
                let expected = resource.title_embedding.len();
                if query.len() != expected {
                    return Err(PathwiseError::from(EmbeddingError::DimensionMismatch {
                        expected,
                        got: query.len(),
                    }));
                }
                let title = f64::from(dot_product(&query, &resource.title_embedding));
                let description = f64::from(dot_product(&query, &resource.description_embedding));
                let score = self.weights.title * title + self.weights.description * description;
                Ok(score.clamp(-1.0, 1.0))
            })
            .collect()
    }
}

impl Default for SemanticScorer {
    fn default() -> Self {
        Self {
            weights: SemanticWeights::default(),
            query_template: format!("{} tutorial", TOPIC_PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::types::TopicId;

    fn resource(title: Vec<f32>, description: Vec<f32>) -> Resource {
        Resource {
            title: "r".to_string(),
            url: "https://example.com/r".to_string(),
            topic: TopicId::new("Neural Networks"),
            content_type: None,
            difficulty: None,
            length: 10,
            popularity: 0.0,
            rating: 0.0,
            title_embedding: l2_normalized(title),
            description_embedding: l2_normalized(description),
        }
    }

    #[test]
    fn weights_title_and_description() {
        let scorer = SemanticScorer::default();
        let r = resource(vec![1.0, 0.0], vec![0.0, 1.0]);

        let scores = scorer.score_vector(&[1.0, 0.0], &[&r]).unwrap();
        assert!((scores[0] - 0.3).abs() < 1e-6);

        let scores = scorer.score_vector(&[0.0, 5.0], &[&r]).unwrap();
        assert!((scores[0] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn scores_stay_within_cosine_range() {
        let scorer = SemanticScorer::default();
        let same = resource(vec![0.2, 0.9], vec![0.2, 0.9]);
        let opposite = resource(vec![-0.2, -0.9], vec![-0.2, -0.9]);

        let scores = scorer.score_vector(&[0.2, 0.9], &[&same, &opposite]).unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-6);
        assert!((scores[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn query_is_normalized_before_scoring() {
        let scorer = SemanticScorer::default();
        let r = resource(vec![1.0, 1.0], vec![1.0, 1.0]);
        let small = scorer.score_vector(&[0.1, 0.1], &[&r]).unwrap();
        let large = scorer.score_vector(&[10.0, 10.0], &[&r]).unwrap();
        assert!((small[0] - large[0]).abs() < 1e-6);
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let scorer = SemanticScorer::default();
        let r = resource(vec![1.0, 0.0], vec![0.0, 1.0]);
        assert!(matches!(
            scorer.score_vector(&[1.0, 0.0, 0.0], &[&r]),
            Err(PathwiseError::Embedding(_))
        ));
    }

    #[test]
    fn query_template_uses_display_label() {
        let scorer = SemanticScorer::new(SemanticWeights::default(), "Learn {topic} from scratch").unwrap();
        assert_eq!(
            scorer.query_for(&Topic::new("Decision Trees")),
            "Learn Decision Trees from scratch"
        );
        assert!(SemanticScorer::new(SemanticWeights::default(), "no placeholder").is_err());
    }
}
