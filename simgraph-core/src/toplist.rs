use crate::error::Result;
use crate::model::{TopEntry, TopQuery};
use crate::store::SimilarityStore;

/// Ranks artists by inbound similarity degree.
pub struct TopListExporter<'a, S: SimilarityStore> {
    store: &'a S,
}

impl<'a, S: SimilarityStore> TopListExporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// At most `limit` artists, highest `degree_input` first.
    ///
    /// An empty `genre_ids` ranks every artist. Otherwise `exclude` selects
    /// artists tagged with none of the genres instead of at least one.
    pub fn top_by_genre(
        &self,
        genre_ids: &[i64],
        exclude: bool,
        limit: usize,
    ) -> Result<Vec<TopEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.store.fetch_top(&TopQuery {
            genre_ids: genre_ids.to_vec(),
            exclude,
            limit,
        })
    }
}
