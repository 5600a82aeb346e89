// Graph construction over the similarity store

use crate::color::Palette;
use crate::config::{DEFAULT_EXPORT_LIMIT, DEFAULT_MAX_POSITION, ExportConfig};
use crate::error::Result;
use crate::model::{ArtistGraph, EdgeQuery, EdgeRow, Endpoint, Node};
use crate::store::SimilarityStore;
use tracing::debug;

/// Rank cutoff and row cap applied to every graph query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Edges with `position >= max_position` are excluded
    pub max_position: i64,
    /// Rows beyond this are dropped after ordering by (position, from, to)
    pub export_limit: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_position: DEFAULT_MAX_POSITION,
            export_limit: DEFAULT_EXPORT_LIMIT,
        }
    }
}

pub struct GraphQueryEngine<'a, S: SimilarityStore> {
    store: &'a S,
    palette: Palette,
    limits: QueryLimits,
}

fn node(endpoint: &Endpoint, color: &str) -> (i64, Node) {
    (
        endpoint.id,
        Node {
            label: endpoint.name.clone(),
            color: color.to_string(),
            size: endpoint.degree_input,
        },
    )
}

impl<'a, S: SimilarityStore> GraphQueryEngine<'a, S> {
    pub fn new(store: &'a S, palette: Palette, limits: QueryLimits) -> Self {
        Self {
            store,
            palette,
            limits,
        }
    }

    pub fn from_config(store: &'a S, config: &ExportConfig) -> Self {
        Self::new(
            store,
            config.palette.clone(),
            QueryLimits {
                max_position: config.max_position,
                export_limit: config.export_limit,
            },
        )
    }

    /// Edges between primary artists inside the genre set, all nodes in `color`.
    pub fn fetch_primary_graph(&self, genre_ids: &[i64], color: &str) -> Result<ArtistGraph> {
        let rows = self.edges(genre_ids.to_vec(), true)?;
        Ok(single_color_graph(&rows, color))
    }

    /// Same as `fetch_primary_graph` without the primary constraint.
    pub fn fetch_full_graph(&self, genre_ids: &[i64], color: &str) -> Result<ArtistGraph> {
        let rows = self.edges(genre_ids.to_vec(), false)?;
        Ok(single_color_graph(&rows, color))
    }

    /// Edges inside the union of both sets. Each node is colored from its own
    /// rock/metal membership, independently of the other endpoint.
    pub fn fetch_custom_graph(
        &self,
        rock_ids: &[i64],
        metal_ids: &[i64],
        primary_only: bool,
    ) -> Result<ArtistGraph> {
        let mut union: Vec<i64> = rock_ids.iter().chain(metal_ids).copied().collect();
        union.sort_unstable();
        union.dedup();

        let rows = self.edges(union, primary_only)?;
        if rows.is_empty() {
            return Ok(ArtistGraph::new());
        }

        let rock = self.store.genre_members(rock_ids)?;
        let metal = self.store.genre_members(metal_ids)?;
        let color = |e: &Endpoint| {
            self.palette
                .classify(rock.contains(&e.id), metal.contains(&e.id))
                .to_string()
        };

        let mut graph = ArtistGraph::new();
        for row in &rows {
            graph.push(node(&row.from, &color(&row.from)), node(&row.to, &color(&row.to)));
        }
        Ok(graph)
    }

    fn edges(&self, genre_ids: Vec<i64>, primary_only: bool) -> Result<Vec<EdgeRow>> {
        if genre_ids.is_empty() {
            debug!("empty genre set, skipping edge query");
            return Ok(Vec::new());
        }

        self.store.fetch_edges(&EdgeQuery {
            genre_ids,
            primary_only,
            max_position: self.limits.max_position,
            limit: self.limits.export_limit,
        })
    }
}

fn single_color_graph(rows: &[EdgeRow], color: &str) -> ArtistGraph {
    let mut graph = ArtistGraph::new();
    for row in rows {
        graph.push(node(&row.from, color), node(&row.to, color));
    }
    graph
}
