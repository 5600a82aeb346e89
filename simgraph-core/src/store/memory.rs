use super::SimilarityStore;
use crate::degree::count_degrees;
use crate::error::Result;
use crate::model::{Artist, EdgeQuery, EdgeRow, Endpoint, SimilarEdge, TopEntry, TopQuery};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Default)]
struct Tables {
    artists: BTreeMap<i64, Artist>,
    genres: HashMap<String, i64>,
    artist_genres: HashSet<(i64, i64)>,
    edges: Vec<SimilarEdge>,
}

/// In-memory store with the same semantics as `Database`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_artist(&self, id: i64, name: &str, is_primary: bool) -> bool {
        let mut tables = self.tables.borrow_mut();
        if let Some(existing) = tables.artists.get_mut(&id) {
            if is_primary {
                existing.is_primary = true;
            }
            return false;
        }
        tables.artists.insert(
            id,
            Artist {
                id,
                name: name.to_string(),
                is_primary,
                degree_input: 0,
                degree_output: 0,
            },
        );
        true
    }

    pub fn save_similar_edge(&self, from_id: i64, to_id: i64, position: i64) -> bool {
        let mut tables = self.tables.borrow_mut();
        if tables
            .edges
            .iter()
            .any(|e| e.from_id == from_id && e.to_id == to_id)
        {
            return false;
        }
        tables.edges.push(SimilarEdge {
            from_id,
            to_id,
            position,
        });
        true
    }

    pub fn clear_similar_edges(&self, from_id: i64) -> usize {
        let mut tables = self.tables.borrow_mut();
        let before = tables.edges.len();
        tables.edges.retain(|e| e.from_id != from_id);
        before - tables.edges.len()
    }

    pub fn add_genre(&self, name: &str) -> i64 {
        let mut tables = self.tables.borrow_mut();
        if let Some(id) = tables.genres.get(name) {
            return *id;
        }
        let id = tables.genres.len() as i64 + 1;
        tables.genres.insert(name.to_string(), id);
        id
    }

    pub fn set_artist_genres(&self, artist_id: i64, genre_ids: &[i64]) {
        let mut tables = self.tables.borrow_mut();
        tables.artist_genres.retain(|(a, _)| *a != artist_id);
        for genre_id in genre_ids {
            tables.artist_genres.insert((artist_id, *genre_id));
        }
    }

    pub fn artist(&self, id: i64) -> Option<Artist> {
        self.tables.borrow().artists.get(&id).cloned()
    }
}

impl Tables {
    fn in_any(&self, artist_id: i64, genre_ids: &[i64]) -> bool {
        genre_ids
            .iter()
            .any(|g| self.artist_genres.contains(&(artist_id, *g)))
    }

    fn endpoint(&self, id: i64) -> Option<(&Artist, Endpoint)> {
        self.artists.get(&id).map(|a| {
            (
                a,
                Endpoint {
                    id: a.id,
                    name: a.name.clone(),
                    degree_input: a.degree_input,
                },
            )
        })
    }
}

impl SimilarityStore for MemoryStore {
    fn recompute_degrees(&self) -> Result<usize> {
        let mut tables = self.tables.borrow_mut();
        let degrees = count_degrees(&tables.edges);
        for artist in tables.artists.values_mut() {
            let d = degrees.get(&artist.id).copied().unwrap_or_default();
            artist.degree_input = d.input;
            artist.degree_output = d.output;
        }
        Ok(tables.artists.len())
    }

    fn genre_ids(&self) -> Result<HashMap<String, i64>> {
        Ok(self.tables.borrow().genres.clone())
    }

    fn genre_members(&self, genre_ids: &[i64]) -> Result<HashSet<i64>> {
        let tables = self.tables.borrow();
        Ok(tables
            .artist_genres
            .iter()
            .filter(|(_, g)| genre_ids.contains(g))
            .map(|(a, _)| *a)
            .collect())
    }

    fn fetch_edges(&self, query: &EdgeQuery) -> Result<Vec<EdgeRow>> {
        let tables = self.tables.borrow();

        let mut edges: Vec<&SimilarEdge> = tables
            .edges
            .iter()
            .filter(|e| e.position < query.max_position)
            .filter(|e| {
                tables.in_any(e.from_id, &query.genre_ids)
                    && tables.in_any(e.to_id, &query.genre_ids)
            })
            .collect();
        edges.sort_by_key(|e| (e.position, e.from_id, e.to_id));

        let rows = edges
            .into_iter()
            .filter_map(|e| {
                let (from_artist, from) = tables.endpoint(e.from_id)?;
                let (to_artist, to) = tables.endpoint(e.to_id)?;
                if query.primary_only && !(from_artist.is_primary && to_artist.is_primary) {
                    return None;
                }
                Some(EdgeRow {
                    from,
                    to,
                    position: e.position,
                })
            })
            .take(query.limit)
            .collect();

        Ok(rows)
    }

    fn fetch_top(&self, query: &TopQuery) -> Result<Vec<TopEntry>> {
        let tables = self.tables.borrow();

        let mut artists: Vec<&Artist> = tables
            .artists
            .values()
            .filter(|a| {
                query.genre_ids.is_empty()
                    || tables.in_any(a.id, &query.genre_ids) != query.exclude
            })
            .collect();
        artists.sort_by(|a, b| b.degree_input.cmp(&a.degree_input).then(a.id.cmp(&b.id)));

        Ok(artists
            .into_iter()
            .take(query.limit)
            .map(|a| TopEntry {
                name: a.name.clone(),
                degree_input: a.degree_input,
            })
            .collect())
    }
}
