use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An artist row as persisted by the crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    /// Seeded directly as a crawl root rather than discovered transitively
    pub is_primary: bool,
    pub degree_input: i64,
    pub degree_output: i64,
}

/// Directed similarity ranking. `position` 0 is the most similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarEdge {
    pub from_id: i64,
    pub to_id: i64,
    pub position: i64,
}

/// One side of an edge row, joined with its artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: i64,
    pub name: String,
    pub degree_input: i64,
}

/// A qualifying similarity edge with both endpoints resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub from: Endpoint,
    pub to: Endpoint,
    pub position: i64,
}

/// Edge filter handed to the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeQuery {
    /// Both endpoints must be tagged with at least one of these genres
    pub genre_ids: Vec<i64>,
    pub primary_only: bool,
    /// Exclusive upper bound on `position`
    pub max_position: i64,
    /// Hard cap on returned rows
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopQuery {
    pub genre_ids: Vec<i64>,
    pub exclude: bool,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    pub name: String,
    pub degree_input: i64,
}

/// Exported node. The artist id is the key of the owning node map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub color: String,
    /// Snapshot of `degree_input` at export time
    pub size: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: i64,
    pub target: i64,
}

/// Nodes keyed by artist id in first-seen order, plus edges in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistGraph {
    pub nodes: IndexMap<i64, Node>,
    pub edges: Vec<Edge>,
}

impl ArtistGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge and (re)writes both endpoint nodes.
    ///
    /// Repeated ids overwrite the stored attributes but keep their original
    /// position in the node map.
    pub fn push(&mut self, source: (i64, Node), target: (i64, Node)) {
        let edge = Edge {
            source: source.0,
            target: target.0,
        };
        self.nodes.insert(source.0, source.1);
        self.nodes.insert(target.0, target.1);
        self.edges.push(edge);
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
