//! Topic graph and path resolution, backed by petgraph.
//!
//! Nodes are topics, edges are prerequisites (`A -> B`: learn A before B).
//! Node indices follow declaration order, which doubles as the curated
//! display order. Edge indices follow insertion order, which is the
//! tie-break among equally short paths.

use crate::error::{GraphError, PathwiseError, Result};
use crate::types::{Topic, TopicId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// Immutable prerequisite DAG.
#[derive(Debug, Clone)]
pub struct TopicGraph {
    graph: DiGraph<Topic, ()>,
    /// Map from normalized topic key to petgraph's internal index.
    index: HashMap<TopicId, NodeIndex>,
}

/// On-disk graph description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub topics: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<(String, String)>,
}

/// Collects topics and prerequisites, then validates them into a [`TopicGraph`].
#[derive(Debug, Clone, Default)]
pub struct TopicGraphBuilder {
    definition: GraphDefinition,
}

impl TopicGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(mut self, label: &str) -> Self {
        self.definition.topics.push(label.to_string());
        self
    }

    pub fn prerequisite(mut self, before: &str, after: &str) -> Self {
        self.definition
            .prerequisites
            .push((before.to_string(), after.to_string()));
        self
    }

    /// Rejects duplicate topics, edges naming undeclared topics, and cycles.
    /// Repeated edges collapse into one.
    pub fn build(self) -> Result<TopicGraph> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for label in &self.definition.topics {
            let topic = Topic::new(label);
            if topic.id.as_str().is_empty() {
                return Err(PathwiseError::invalid_config(
                    "topics",
                    label.as_str(),
                    "topic label is blank",
                ));
            }
            if index.contains_key(&topic.id) {
                return Err(PathwiseError::Graph(GraphError::DuplicateTopic(
                    topic.label,
                )));
            }
            let id = topic.id.clone();
            let idx = graph.add_node(topic);
            index.insert(id, idx);
        }

        for (before, after) in &self.definition.prerequisites {
            let endpoints = (
                index.get(&TopicId::new(before)),
                index.get(&TopicId::new(after)),
            );
            let (Some(&from), Some(&to)) = endpoints else {
                return Err(PathwiseError::Graph(GraphError::DanglingEdge {
                    from: before.clone(),
                    to: after.clone(),
                }));
            };
            if graph.find_edge(from, to).is_none() {
                graph.add_edge(from, to, ());
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            let label = graph[cycle.node_id()].label.clone();
            return Err(PathwiseError::Graph(GraphError::Cycle(label)));
        }

        Ok(TopicGraph { graph, index })
    }
}

impl TopicGraph {
    pub fn builder() -> TopicGraphBuilder {
        TopicGraphBuilder::new()
    }

    /// The hand-curated curriculum from Python basics to core ML models.
    pub fn default_curriculum() -> Self {
        let graph = Self::builder()
            .topic("Introduction to Python")
            .topic("Data Structures")
            .topic("OOP Concepts")
            .topic("Introduction to ML")
            .topic("Linear Regression")
            .topic("Decision Trees")
            .topic("Neural Networks")
            .prerequisite("Introduction to Python", "Data Structures")
            .prerequisite("Data Structures", "OOP Concepts")
            .prerequisite("OOP Concepts", "Introduction to ML")
            .prerequisite("Introduction to ML", "Linear Regression")
            .prerequisite("Introduction to ML", "Decision Trees")
            .prerequisite("Introduction to ML", "Neural Networks")
            .build();

        match graph {
            Ok(graph) => graph,
            Err(e) => unreachable!("built-in curriculum is a valid DAG: {}", e),
        }
    }

    /// Build from a [`GraphDefinition`].
    pub fn from_definition(definition: GraphDefinition) -> Result<Self> {
        TopicGraphBuilder { definition }.build()
    }

    /// Load `{ "topics": [..], "prerequisites": [[before, after], ..] }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let definition: GraphDefinition = serde_json::from_str(&content)?;
        let graph = Self::from_definition(definition)?;
        tracing::info!(
            topics = graph.len(),
            prerequisites = graph.edge_count(),
            path = %path.display(),
            "Loaded topic graph"
        );
        Ok(graph)
    }

    /// Look up a topic by any spelling that normalizes to its key.
    pub fn get(&self, raw: &str) -> Option<&Topic> {
        self.index
            .get(&TopicId::new(raw))
            .map(|idx| &self.graph[*idx])
    }

    pub fn contains(&self, id: &TopicId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All topics in curated order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.graph.node_weights()
    }

    /// All prerequisite edges in insertion order.
    pub fn prerequisites(&self) -> Vec<(&Topic, &Topic)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
            .collect()
    }

    /// Shortest prerequisite path from `known` to `goal`, both inclusive.
    ///
    /// Breadth-first over outgoing edges in insertion order, so identical
    /// inputs always produce the same path.
    pub fn resolve_path(&self, known: &str, goal: &str) -> Result<Vec<Topic>> {
        let start = self.lookup(known)?;
        let end = self.lookup(goal)?;

        if start == end {
            return Ok(vec![self.graph[start].clone()]);
        }

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for next in self.successors(node) {
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, node);
                if next == end {
                    return Ok(self.reconstruct(&parent, start, end));
                }
                queue.push_back(next);
            }
        }

        Err(PathwiseError::no_path(
            self.graph[start].label.clone(),
            self.graph[end].label.clone(),
        ))
    }

    /// Topics reachable from `raw` (itself included), in curated order.
    pub fn reachable_from(&self, raw: &str) -> Result<Vec<&Topic>> {
        let start = self.lookup(raw)?;

        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for next in self.successors(node) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Ok(self
            .graph
            .node_indices()
            .filter(|idx| visited.contains(idx))
            .map(|idx| &self.graph[idx])
            .collect())
    }

    fn lookup(&self, raw: &str) -> Result<NodeIndex> {
        self.index
            .get(&TopicId::new(raw))
            .copied()
            .ok_or_else(|| PathwiseError::unknown_topic(raw.trim()))
    }

    /// Direct successors ordered by edge insertion.
    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node)
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    fn reconstruct(
        &self,
        parent: &HashMap<NodeIndex, NodeIndex>,
        start: NodeIndex,
        end: NodeIndex,
    ) -> Vec<Topic> {
        let mut path = vec![end];
        let mut current = end;
        while current != start {
            match parent.get(&current) {
                Some(&prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        path.reverse();
        path.into_iter().map(|idx| self.graph[idx].clone()).collect()
    }
}

impl Default for TopicGraph {
    fn default() -> Self {
        Self::default_curriculum()
    }
}
