//! Resource catalog: the dataset snapshot, validated against the topic graph
//! and indexed by topic.
//!
//! Rows that cannot be scored safely never enter the catalog. A row is
//! skipped (with a `warn!`) when its topic is not a graph node, its url is
//! blank, its length is not a positive whole number of minutes, or either
//! embedding is malformed or has the wrong dimension. Unmapped `type` and
//! `difficulty` values are kept as `None`.

use crate::error::{CatalogError, PathwiseError, Result};
use crate::graph::TopicGraph;
use crate::types::{parse_categorical, Resource, TopicId};
use pathwise_embeddings::{l2_normalized, parse_embedding};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Summary of a catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_unknown_topic: usize,
    pub skipped_invalid: usize,
    /// Rows kept with an unmapped type or difficulty.
    pub unmapped_categorical: usize,
}

/// Immutable, topic-indexed table of resources.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
    by_topic: HashMap<TopicId, Vec<usize>>,
    dimension: Option<usize>,
    report: LoadReport,
}

/// One CSV row as written by the embedding pipeline.
#[derive(Debug, Deserialize)]
struct ResourceRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    topic: String,
    #[serde(rename = "type", default)]
    content_type: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    length: String,
    #[serde(default)]
    popularity: String,
    #[serde(default)]
    rating: String,
    #[serde(alias = "embedding_title", default)]
    title_embedding: String,
    #[serde(alias = "embedding_description", default)]
    description_embedding: String,
}

/// Required columns; each entry lists accepted spellings.
const REQUIRED_COLUMNS: &[&[&str]] = &[
    &["title"],
    &["url"],
    &["topic"],
    &["length"],
    &["title_embedding", "embedding_title"],
    &["description_embedding", "embedding_description"],
];

impl ResourceCatalog {
    /// Load the CSV dataset. Unreadable files and missing columns are
    /// errors; bad rows are skipped.
    pub fn load_csv(path: &Path, graph: &TopicGraph) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file, graph)?;
        tracing::info!(
            path = %path.display(),
            loaded = catalog.report.loaded,
            skipped_unknown_topic = catalog.report.skipped_unknown_topic,
            skipped_invalid = catalog.report.skipped_invalid,
            "Loaded resource catalog"
        );
        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "Resource catalog is empty");
        }
        Ok(catalog)
    }

    /// Load CSV from any reader.
    pub fn from_reader<R: std::io::Read>(reader: R, graph: &TopicGraph) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| PathwiseError::Catalog(CatalogError::Csv(e.to_string())))?
            .clone();
        for spellings in REQUIRED_COLUMNS {
            if !spellings
                .iter()
                .any(|name| headers.iter().any(|h| h.trim() == *name))
            {
                return Err(PathwiseError::Catalog(CatalogError::MissingColumn(
                    spellings[0].to_string(),
                )));
            }
        }

        let mut builder = CatalogBuilder::new(graph);
        for (line, record) in csv_reader.deserialize::<ResourceRow>().enumerate() {
            match record {
                Ok(row) => builder.push_row(row, line + 2),
                Err(e) => {
                    tracing::warn!(line = line + 2, error = %e, "Skipping unreadable catalog row");
                    builder.report.skipped_invalid += 1;
                }
            }
        }
        Ok(builder.finish())
    }

    /// Build from already-parsed resources, applying the same validation as
    /// the CSV path.
    pub fn from_resources(resources: Vec<Resource>, graph: &TopicGraph) -> Self {
        let mut builder = CatalogBuilder::new(graph);
        for (row, resource) in resources.into_iter().enumerate() {
            builder.push(resource, row + 1);
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Embedding dimension shared by every resource, `None` when empty.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// All resources in dataset order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Resources of one topic in dataset order.
    pub fn resources_for(&self, topic: &TopicId) -> Vec<&Resource> {
        self.by_topic
            .get(topic)
            .map(|rows| rows.iter().map(|&i| &self.resources[i]).collect())
            .unwrap_or_default()
    }

    /// Resource count per topic key.
    pub fn topic_counts(&self) -> BTreeMap<&str, usize> {
        self.by_topic
            .iter()
            .map(|(topic, rows)| (topic.as_str(), rows.len()))
            .collect()
    }
}

struct CatalogBuilder<'g> {
    graph: &'g TopicGraph,
    resources: Vec<Resource>,
    by_topic: HashMap<TopicId, Vec<usize>>,
    dimension: Option<usize>,
    report: LoadReport,
    warned_topics: HashMap<TopicId, usize>,
}

impl<'g> CatalogBuilder<'g> {
    fn new(graph: &'g TopicGraph) -> Self {
        Self {
            graph,
            resources: Vec::new(),
            by_topic: HashMap::new(),
            dimension: None,
            report: LoadReport::default(),
            warned_topics: HashMap::new(),
        }
    }

    fn push_row(&mut self, row: ResourceRow, line: usize) {
        let length = match parse_length(&row.length) {
            Some(length) => length,
            None => {
                tracing::warn!(line, length = %row.length, "Skipping row with invalid length");
                self.report.skipped_invalid += 1;
                return;
            }
        };

        let embeddings = parse_embedding(&row.title_embedding)
            .and_then(|t| parse_embedding(&row.description_embedding).map(|d| (t, d)));
        let (title_embedding, description_embedding) = match embeddings {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(line, error = %e, "Skipping row with malformed embedding");
                self.report.skipped_invalid += 1;
                return;
            }
        };

        let resource = Resource {
            title: row.title.trim().to_string(),
            url: row.url.trim().to_string(),
            topic: TopicId::new(&row.topic),
            content_type: parse_categorical(&row.content_type),
            difficulty: parse_categorical(&row.difficulty),
            length,
            popularity: parse_numeric(&row.popularity),
            rating: parse_numeric(&row.rating),
            title_embedding,
            description_embedding,
        };
        self.push(resource, line);
    }

    fn push(&mut self, mut resource: Resource, line: usize) {
        if !self.graph.contains(&resource.topic) {
            let seen = self.warned_topics.entry(resource.topic.clone()).or_insert(0);
            if *seen == 0 {
                tracing::warn!(line, topic = %resource.topic, "Skipping rows for topic outside the graph");
            }
            *seen += 1;
            self.report.skipped_unknown_topic += 1;
            return;
        }

        if resource.url.is_empty() || resource.length == 0 {
            tracing::warn!(line, "Skipping row with blank url or zero length");
            self.report.skipped_invalid += 1;
            return;
        }

        let dim = resource.title_embedding.len();
        let expected = *self.dimension.get_or_insert(dim);
        if dim == 0 || dim != expected || resource.description_embedding.len() != expected {
            tracing::warn!(
                line,
                expected,
                title = dim,
                description = resource.description_embedding.len(),
                "Skipping row with mismatched embedding dimension"
            );
            self.report.skipped_invalid += 1;
            if self.resources.is_empty() {
                self.dimension = None;
            }
            return;
        }

        if !resource.popularity.is_finite() {
            resource.popularity = 0.0;
        }
        if !resource.rating.is_finite() {
            resource.rating = 0.0;
        }
        if resource.content_type.is_none() || resource.difficulty.is_none() {
            self.report.unmapped_categorical += 1;
        }

        resource.title_embedding = l2_normalized(std::mem::take(&mut resource.title_embedding));
        resource.description_embedding =
            l2_normalized(std::mem::take(&mut resource.description_embedding));

        let row = self.resources.len();
        self.by_topic
            .entry(resource.topic.clone())
            .or_default()
            .push(row);
        self.resources.push(resource);
        self.report.loaded += 1;
    }

    fn finish(self) -> ResourceCatalog {
        ResourceCatalog {
            resources: self.resources,
            by_topic: self.by_topic,
            dimension: self.dimension,
            report: self.report,
        }
    }
}

/// Positive whole minutes; accepts `"12"` and `"12.0"`.
fn parse_length(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(minutes) = raw.parse::<u32>() {
        return (minutes > 0).then_some(minutes);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Numeric feature; blank or non-finite values become 0.0.
fn parse_numeric(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
