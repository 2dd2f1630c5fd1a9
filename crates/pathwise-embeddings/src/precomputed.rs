//! Query embeddings computed offline alongside the catalog.
//!
//! The query texts a deployment can ask for are known up front (one per
//! topic), so the same pipeline that embeds the catalog can embed them too.
//! The table is a JSON object mapping query text to vector.

use crate::{l2_normalized, Embedder, EmbeddingError, EmbeddingResult};
use std::collections::HashMap;
use std::path::Path;

/// Lookup-table encoder backed by precomputed query vectors.
#[derive(Debug, Clone)]
pub struct PrecomputedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
    name: String,
}

impl PrecomputedEmbedder {
    /// Build from in-memory entries. All vectors must share one dimension.
    pub fn from_entries<I>(name: &str, entries: I) -> EmbeddingResult<Self>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut vectors = HashMap::new();
        let mut dimension = None;

        for (text, vector) in entries {
            if vector.is_empty() || vector.iter().any(|v| !v.is_finite()) {
                return Err(EmbeddingError::Malformed(format!(
                    "vector for {:?} is empty or non-finite",
                    text
                )));
            }
            match dimension {
                None => dimension = Some(vector.len()),
                Some(expected) if expected != vector.len() => {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected,
                        got: vector.len(),
                    });
                }
                Some(_) => {}
            }
            vectors.insert(lookup_key(&text), l2_normalized(vector));
        }

        let dimension = dimension
            .ok_or_else(|| EmbeddingError::Malformed("embedding table is empty".to_string()))?;

        Ok(Self {
            vectors,
            dimension,
            name: name.to_string(),
        })
    }

    /// Load a JSON table `{ "<query text>": [f32, ..], .. }`.
    pub fn from_json_file(path: &Path) -> EmbeddingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let table: HashMap<String, Vec<f32>> = serde_json::from_str(&content)
            .map_err(|e| EmbeddingError::Malformed(format!("{}: {}", path.display(), e)))?;
        let name = format!("precomputed:{}", path.display());
        let embedder = Self::from_entries(&name, table)?;
        tracing::info!(
            queries = embedder.len(),
            dimension = embedder.dimension,
            "Loaded precomputed query embeddings"
        );
        Ok(embedder)
    }

    /// Number of query texts in the table.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Lookups ignore surrounding whitespace and letter case.
fn lookup_key(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Embedder for PrecomputedEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        self.vectors
            .get(&lookup_key(text))
            .cloned()
            .ok_or_else(|| EmbeddingError::UnknownQuery(text.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}
