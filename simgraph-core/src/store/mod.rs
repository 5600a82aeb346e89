// Storage boundary for artist, genre and similarity data

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::Database;

use crate::error::Result;
use crate::model::{EdgeQuery, EdgeRow, TopEntry, TopQuery};
use std::collections::{HashMap, HashSet};

/// Read/aggregate access to the crawled data.
///
/// The only write the export side performs is `recompute_degrees`.
pub trait SimilarityStore {
    /// Overwrites every artist's degree counts from the current edge set.
    /// Returns the number of artists updated.
    fn recompute_degrees(&self) -> Result<usize>;

    /// Genre name to id.
    fn genre_ids(&self) -> Result<HashMap<String, i64>>;

    /// Ids of artists tagged with at least one of `genre_ids`.
    fn genre_members(&self, genre_ids: &[i64]) -> Result<HashSet<i64>>;

    /// Edge rows matching `query`, ordered by (position, from_id, to_id) and
    /// truncated to `query.limit`.
    fn fetch_edges(&self, query: &EdgeQuery) -> Result<Vec<EdgeRow>>;

    /// Artists ranked by `degree_input` descending, ties by ascending id.
    fn fetch_top(&self, query: &TopQuery) -> Result<Vec<TopEntry>>;
}

/// Numbered SQL placeholders `?start, ?start+1, ...` for an IN list.
pub(crate) fn numbered_placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
