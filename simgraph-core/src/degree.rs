use crate::error::Result;
use crate::model::SimilarEdge;
use crate::store::SimilarityStore;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degrees {
    pub input: i64,
    pub output: i64,
}

/// Inbound/outbound edge counts per artist id. Artists without edges are absent.
pub fn count_degrees(edges: &[SimilarEdge]) -> HashMap<i64, Degrees> {
    let mut degrees: HashMap<i64, Degrees> = HashMap::new();
    for edge in edges {
        degrees.entry(edge.from_id).or_default().output += 1;
        degrees.entry(edge.to_id).or_default().input += 1;
    }
    degrees
}

/// Rewrites the degree columns of every artist from the current edge set.
///
/// Must run before any export that reports node sizes; nothing invalidates
/// the counts automatically when edges change.
pub struct DegreeAggregator<'a, S: SimilarityStore> {
    store: &'a S,
}

impl<'a, S: SimilarityStore> DegreeAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn run(&self) -> Result<usize> {
        let updated = self.store.recompute_degrees()?;
        info!("update degree: {} artists", updated);
        Ok(updated)
    }
}
