//! Error types for Pathwise operations.
//!
//! Request-level errors (`Request`, `Graph::UnknownTopic`,
//! `Graph::NoPathFound`) are terminal for one request. Catalog and config
//! errors only arise at startup.

use std::error::Error;
use std::fmt;

/// Result type for Pathwise operations.
pub type Result<T> = std::result::Result<T, PathwiseError>;

/// Errors that can occur during Pathwise operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PathwiseError {
    /// Malformed or incomplete request.
    Request(RequestError),
    /// Topic graph construction or traversal errors.
    Graph(GraphError),
    /// Resource catalog loading errors.
    Catalog(CatalogError),
    /// Configuration errors.
    Config(ConfigError),
    /// Query encoding failed.
    Embedding(String),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for PathwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathwiseError::Request(e) => write!(f, "{}", e),
            PathwiseError::Graph(e) => write!(f, "{}", e),
            PathwiseError::Catalog(e) => write!(f, "Catalog error: {}", e),
            PathwiseError::Config(e) => write!(f, "Config error: {}", e),
            PathwiseError::Embedding(msg) => write!(f, "Embedding error: {}", msg),
            PathwiseError::Io(msg) => write!(f, "I/O error: {}", msg),
            PathwiseError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for PathwiseError {}

impl From<std::io::Error> for PathwiseError {
    fn from(e: std::io::Error) -> Self {
        PathwiseError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PathwiseError {
    fn from(e: serde_json::Error) -> Self {
        PathwiseError::Serialization(e.to_string())
    }
}

impl From<pathwise_embeddings::EmbeddingError> for PathwiseError {
    fn from(e: pathwise_embeddings::EmbeddingError) -> Self {
        PathwiseError::Embedding(e.to_string())
    }
}

/// Request validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// `known_topic` or `goal_topic` missing or blank.
    MissingTopics,
    /// Body could not be decoded.
    InvalidBody(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingTopics => {
                write!(f, "Please provide both 'known_topic' and 'goal_topic'.")
            }
            RequestError::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
        }
    }
}

/// Topic graph errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Topic is not a node of the graph.
    UnknownTopic(String),
    /// No directed prerequisite route between the two topics.
    NoPathFound { from: String, to: String },
    /// Two topics normalize to the same key.
    DuplicateTopic(String),
    /// Prerequisite edge names a topic that was never declared.
    DanglingEdge { from: String, to: String },
    /// Prerequisite edges form a cycle through this topic.
    Cycle(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownTopic(topic) => write!(f, "Topic not found: {}", topic),
            GraphError::NoPathFound { from, to } => {
                write!(f, "No path found between {} and {}.", from, to)
            }
            GraphError::DuplicateTopic(topic) => write!(f, "Duplicate topic: {}", topic),
            GraphError::DanglingEdge { from, to } => {
                write!(f, "Prerequisite {} -> {} names an undeclared topic", from, to)
            }
            GraphError::Cycle(topic) => write!(f, "Prerequisite cycle through {}", topic),
        }
    }
}

/// Resource catalog errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Dataset has no column for a required field.
    MissingColumn(String),
    /// The dataset could not be read as CSV.
    Csv(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MissingColumn(col) => write!(f, "Missing required column: {}", col),
            CatalogError::Csv(msg) => write!(f, "Unreadable dataset: {}", msg),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl PathwiseError {
    pub fn missing_topics() -> Self {
        PathwiseError::Request(RequestError::MissingTopics)
    }

    pub fn unknown_topic(topic: impl Into<String>) -> Self {
        PathwiseError::Graph(GraphError::UnknownTopic(topic.into()))
    }

    pub fn no_path(from: impl Into<String>, to: impl Into<String>) -> Self {
        PathwiseError::Graph(GraphError::NoPathFound {
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PathwiseError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        PathwiseError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    /// Whether the error means "the thing the caller asked about does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PathwiseError::Graph(GraphError::UnknownTopic(_))
                | PathwiseError::Graph(GraphError::NoPathFound { .. })
        )
    }
}
