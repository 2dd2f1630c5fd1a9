//! The request pipeline: resolve the path, then filter, score, and blend
//! resources for every topic on it.

use crate::blend::{blend_and_select, rank, BlendConfig, ScoredResource};
use crate::filter;
use crate::ranker::{feature_matrix, Ranker};
use crate::semantic::SemanticScorer;
use pathwise_core::catalog::ResourceCatalog;
use pathwise_core::error::{PathwiseError, RequestError, Result};
use pathwise_core::graph::TopicGraph;
use pathwise_core::types::{ContentType, Difficulty, Preferences, Resource, Topic, TopicId};
use pathwise_embeddings::Embedder;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Which scores feed the final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Semantic and learned scores, mixed by `alpha`.
    Blended,
    /// No learned ranker available.
    SemanticOnly,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Blended => write!(f, "blended"),
            ScoringMode::SemanticOnly => write!(f, "semantic_only"),
        }
    }
}

/// A ranked resource as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub url: String,
    pub final_score: f64,
    pub semantic_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_score: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub length: u32,
}

impl From<ScoredResource<'_>> for Recommendation {
    fn from(scored: ScoredResource<'_>) -> Self {
        let r = scored.resource;
        Self {
            title: r.title.clone(),
            url: r.url.clone(),
            final_score: scored.final_score,
            semantic_score: scored.semantic_score,
            ml_score: scored.ml_score,
            content_type: r.content_type,
            difficulty: r.difficulty,
            length: r.length,
        }
    }
}

/// One topic of a learning path with its recommended resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub topic: String,
    pub recommended_resources: Vec<Recommendation>,
}

/// Ordered steps from the known topic to the goal topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPath {
    #[serde(rename = "learning_path")]
    pub steps: Vec<Step>,
}

impl LearningPath {
    pub fn topics(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.topic.as_str()).collect()
    }
}

/// Immutable context for serving requests.
///
/// Built once at startup and shared read-only by every request.
pub struct PathEngine {
    graph: TopicGraph,
    catalog: ResourceCatalog,
    embedder: Box<dyn Embedder>,
    ranker: Option<Box<dyn Ranker>>,
    scorer: SemanticScorer,
    blend: BlendConfig,
    /// Query vector of every topic that has resources.
    topic_queries: HashMap<TopicId, Vec<f32>>,
}

impl PathEngine {
    /// Assemble the engine and encode the query of every topic that has
    /// resources. Fails when the query encoder does not produce vectors of
    /// the catalog's dimension, or cannot encode one of those queries.
    pub fn new(
        graph: TopicGraph,
        catalog: ResourceCatalog,
        embedder: Box<dyn Embedder>,
        ranker: Option<Box<dyn Ranker>>,
        scorer: SemanticScorer,
        blend: BlendConfig,
    ) -> Result<Self> {
        if let Some(expected) = catalog.dimension() {
            if embedder.dimension() != expected {
                return Err(PathwiseError::invalid_config(
                    "embedder",
                    format!("{} ({} dimensions)", embedder.model_name(), embedder.dimension()),
                    format!("catalog embeddings have {} dimensions", expected),
                ));
            }
        }

        let topic_queries = encode_topic_queries(&graph, &catalog, embedder.as_ref(), &scorer)?;

        let engine = Self {
            graph,
            catalog,
            embedder,
            ranker,
            scorer,
            blend,
            topic_queries,
        };

        match &engine.ranker {
            Some(ranker) => info!(
                mode = %engine.scoring_mode(),
                ranker = ranker.name(),
                alpha = engine.blend.alpha(),
                top_k = engine.blend.top_k(),
                "Scoring mode"
            ),
            None => warn!(
                mode = %engine.scoring_mode(),
                top_k = engine.blend.top_k(),
                "No learned ranker; ranking by semantic score only"
            ),
        }

        Ok(engine)
    }

    pub fn scoring_mode(&self) -> ScoringMode {
        if self.ranker.is_some() {
            ScoringMode::Blended
        } else {
            ScoringMode::SemanticOnly
        }
    }

    pub fn graph(&self) -> &TopicGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn blend_config(&self) -> &BlendConfig {
        &self.blend
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Build the learning path from `known` to `goal`.
    ///
    /// Both topics must be non-blank. A step whose resources are all
    /// filtered out is returned with an empty list.
    pub fn recommend(&self, known: &str, goal: &str, prefs: &Preferences) -> Result<LearningPath> {
        if known.trim().is_empty() || goal.trim().is_empty() {
            return Err(PathwiseError::missing_topics());
        }

        let path = self.graph.resolve_path(known, goal)?;
        debug!(
            known = known.trim(),
            goal = goal.trim(),
            steps = path.len(),
            "Resolved path"
        );

        let steps = path
            .iter()
            .map(|topic| {
                let recommended_resources = self
                    .rank_topic(topic, prefs)?
                    .into_iter()
                    .map(Recommendation::from)
                    .collect();
                Ok(Step {
                    topic: topic.label.clone(),
                    recommended_resources,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LearningPath { steps })
    }

    /// Filter, score, and blend the resources of one topic.
    pub fn rank_topic(&self, topic: &Topic, prefs: &Preferences) -> Result<Vec<ScoredResource<'_>>> {
        let pool = self.catalog.resources_for(&topic.id);
        let candidates = filter::filter(&pool, prefs);

        if candidates.is_empty() {
            debug!(topic = %topic.label, pool = pool.len(), "No candidates after filtering");
            return Ok(Vec::new());
        }

        let semantic = match self.topic_queries.get(&topic.id) {
            Some(query) => self.scorer.score_vector(query, &candidates)?,
            None => {
                let query = self.scorer.query_for(topic);
                self.scorer
                    .score(self.embedder.as_ref(), &query, &candidates)?
            }
        };
        let ml = self
            .ranker
            .as_ref()
            .map(|ranker| ranker.predict(&feature_matrix(&candidates)));

        let selected = blend_and_select(&candidates, &semantic, ml.as_deref(), &self.blend);
        debug!(
            topic = %topic.label,
            pool = pool.len(),
            candidates = candidates.len(),
            selected = selected.len(),
            "Ranked topic"
        );
        Ok(selected)
    }

    /// Free-text semantic search across the whole catalog.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<Recommendation>> {
        if query.trim().is_empty() {
            return Err(PathwiseError::Request(RequestError::InvalidBody(
                "'query' must not be blank".to_string(),
            )));
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let candidates: Vec<&Resource> = self.catalog.resources().iter().collect();
        let semantic = self
            .scorer
            .score(self.embedder.as_ref(), query.trim(), &candidates)?;

        let scored = candidates
            .iter()
            .zip(semantic)
            .map(|(&resource, score)| ScoredResource {
                resource,
                semantic_score: score,
                ml_score: None,
                final_score: score,
            })
            .collect();

        Ok(rank(scored, top_k)
            .into_iter()
            .map(Recommendation::from)
            .collect())
    }
}

fn encode_topic_queries(
    graph: &TopicGraph,
    catalog: &ResourceCatalog,
    embedder: &dyn Embedder,
    scorer: &SemanticScorer,
) -> Result<HashMap<TopicId, Vec<f32>>> {
    let topics: Vec<&Topic> = graph
        .topics()
        .filter(|topic| !catalog.resources_for(&topic.id).is_empty())
        .collect();
    if topics.is_empty() {
        return Ok(HashMap::new());
    }

    let queries: Vec<String> = topics.iter().map(|topic| scorer.query_for(topic)).collect();
    let texts: Vec<&str> = queries.iter().map(String::as_str).collect();
    let vectors = embedder.embed_batch(&texts).map_err(|e| {
        PathwiseError::invalid_config("embedder", embedder.model_name(), e.to_string())
    })?;
    if vectors.len() != topics.len() {
        return Err(PathwiseError::invalid_config(
            "embedder",
            embedder.model_name(),
            format!("returned {} vectors for {} topic queries", vectors.len(), topics.len()),
        ));
    }

    debug!(topics = topics.len(), "Encoded topic queries");
    Ok(topics
        .into_iter()
        .map(|topic| topic.id.clone())
        .zip(vectors)
        .collect())
}

impl fmt::Debug for PathEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathEngine")
            .field("topics", &self.graph.len())
            .field("resources", &self.catalog.len())
            .field("embedder", &self.embedder.model_name())
            .field("mode", &self.scoring_mode())
            .field("blend", &self.blend)
            .finish()
    }
}
