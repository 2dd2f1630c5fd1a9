//! Construction of the immutable [`PathEngine`] from configuration.
//!
//! The topic graph and resource catalog are required: failing to load
//! either is fatal. The learned ranker is optional; when it is missing or
//! unloadable the engine ranks by semantic score alone.

use crate::config::{Config, EmbedderKind, EmbedderConfig};
use anyhow::{Context, Result};
use pathwise_core::catalog::ResourceCatalog;
use pathwise_core::graph::TopicGraph;
use pathwise_embeddings::{Embedder, HashEmbedder, PrecomputedEmbedder};
use pathwise_rank::{BlendConfig, PathEngine, Ranker, RegressionModel, SemanticScorer, SemanticWeights};
use tracing::{info, warn};

/// Build the engine described by `config`.
pub fn build_engine(config: &Config) -> Result<PathEngine> {
    config.validate()?;

    let graph = load_graph(config)?;
    let catalog = load_catalog(config, &graph)?;
    let embedder = build_embedder(config)?;
    let ranker = load_ranker(config);

    let ranking = &config.ranking;
    let scorer = SemanticScorer::new(
        SemanticWeights {
            title: ranking.title_weight,
            description: ranking.description_weight,
        },
        &ranking.query_template,
    )?;
    let blend = BlendConfig::new(ranking.alpha, ranking.top_k)?;

    let engine = PathEngine::new(graph, catalog, embedder, ranker, scorer, blend)?;
    Ok(engine)
}

/// The configured topic graph, or the built-in curriculum.
pub fn load_graph(config: &Config) -> Result<TopicGraph> {
    match config.resolve_path(&config.data.graph_path) {
        Some(path) => TopicGraph::from_json_file(&path)
            .with_context(|| format!("Failed to load topic graph: {}", path.display())),
        None => {
            let graph = TopicGraph::default_curriculum();
            info!(
                topics = graph.len(),
                prerequisites = graph.edge_count(),
                "Using built-in curriculum"
            );
            Ok(graph)
        }
    }
}

pub fn load_catalog(config: &Config, graph: &TopicGraph) -> Result<ResourceCatalog> {
    let path = config
        .resolve_path(&config.data.catalog_path)
        .context("data.catalog_path must be set")?;
    ResourceCatalog::load_csv(&path, graph)
        .with_context(|| format!("Failed to load resource catalog: {}", path.display()))
}

/// The configured query encoder.
pub fn build_embedder(config: &Config) -> Result<Box<dyn Embedder>> {
    let settings = &config.embedder;
    let embedder: Box<dyn Embedder> = match settings.kind {
        EmbedderKind::Precomputed => {
            let path = config
                .resolve_path(&settings.path)
                .context("embedder.path must be set for precomputed query embeddings")?;
            Box::new(PrecomputedEmbedder::from_json_file(&path).with_context(|| {
                format!("Failed to load query embeddings: {}", path.display())
            })?)
        }
        EmbedderKind::Hash => Box::new(HashEmbedder::new(settings.dimension)),
        EmbedderKind::Api => api_embedder(settings)?,
    };
    info!(
        embedder = embedder.model_name(),
        dimension = embedder.dimension(),
        "Query encoder ready"
    );
    Ok(embedder)
}

#[cfg(feature = "api")]
fn api_embedder(settings: &EmbedderConfig) -> Result<Box<dyn Embedder>> {
    use pathwise_embeddings::{ApiConfig, ApiEmbedder};

    if settings.endpoint.trim().is_empty() {
        anyhow::bail!("embedder.endpoint must be set when embedder.kind = \"api\"");
    }
    let api_key = std::env::var(&settings.api_key_env).ok();
    let api_config = ApiConfig::custom(&settings.endpoint, &settings.model, settings.dimension)
        .with_api_key(api_key);
    let embedder = ApiEmbedder::new(api_config).context("Failed to create API embedder")?;
    Ok(Box::new(embedder))
}

#[cfg(not(feature = "api"))]
fn api_embedder(_settings: &EmbedderConfig) -> Result<Box<dyn Embedder>> {
    anyhow::bail!("embedder.kind = \"api\" requires building with the `api` feature")
}

/// The learned ranker, or `None` when it is not configured or cannot be
/// loaded.
pub fn load_ranker(config: &Config) -> Option<Box<dyn Ranker>> {
    let path = match config.resolve_path(&config.data.model_path) {
        Some(path) => path,
        None => {
            info!("No ranker model configured");
            return None;
        }
    };
    match RegressionModel::from_json_file(&path) {
        Ok(model) => {
            info!(path = %path.display(), kind = model.name(), "Loaded ranker model");
            Some(Box::new(model))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ranker model unavailable");
            None
        }
    }
}
