use super::{SimilarityStore, numbered_placeholders};
use crate::error::Result;
use crate::model::{Artist, EdgeQuery, EdgeRow, Endpoint, TopEntry, TopQuery};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// SQLite-backed store. Owns the connection for the duration of a run.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

fn to_sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl Database {
    pub fn drop(path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = -64000;  -- 64MB cache
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS artist (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,

    -- Crawler bookkeeping
    similar_crawled BOOLEAN NOT NULL DEFAULT 0,
    need_crawl_similar BOOLEAN NOT NULL DEFAULT 0,

    is_primary BOOLEAN NOT NULL DEFAULT 0,

    -- Aggregates, rewritten by the degree pass
    degree_input INTEGER NOT NULL DEFAULT 0,
    degree_output INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_artist_primary ON artist(is_primary);
CREATE INDEX IF NOT EXISTS idx_artist_similar_crawled ON artist(similar_crawled);
CREATE INDEX IF NOT EXISTS idx_artist_need_crawl ON artist(need_crawl_similar);

CREATE TABLE IF NOT EXISTS genre (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    genre TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS artist_genre (
    artist_id INTEGER NOT NULL,
    genre_id INTEGER NOT NULL,
    PRIMARY KEY(artist_id, genre_id)
);

CREATE INDEX IF NOT EXISTS idx_artist_genre_genre ON artist_genre(genre_id);

-- Similarity rankings, position 0 = most similar
CREATE TABLE IF NOT EXISTS \"similar\" (
    from_id INTEGER NOT NULL,
    to_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY(from_id, to_id)
);

CREATE INDEX IF NOT EXISTS idx_similar_to ON \"similar\"(to_id);
CREATE INDEX IF NOT EXISTS idx_similar_position ON \"similar\"(position);
            ",
        )?;
        Ok(())
    }

    // Ingestion, used by the crawler side. Duplicates are skipped.

    /// Returns false if the artist already existed. An existing artist is
    /// promoted to primary when `is_primary` is set.
    pub fn save_artist(&self, id: i64, name: &str, is_primary: bool) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO artist (id, name, is_primary) VALUES (?1, ?2, ?3)",
            params![id, name, is_primary],
        )?;

        if inserted == 0 && is_primary {
            self.conn.execute(
                "UPDATE artist SET is_primary = 1 WHERE id = ?1",
                params![id],
            )?;
        }

        Ok(inserted == 1)
    }

    pub fn save_similar_edge(&self, from_id: i64, to_id: i64, position: i64) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO \"similar\" (from_id, to_id, position) VALUES (?1, ?2, ?3)",
            params![from_id, to_id, position],
        )?;
        Ok(inserted == 1)
    }

    pub fn clear_similar_edges(&self, from_id: i64) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM \"similar\" WHERE from_id = ?1", params![from_id])?;
        Ok(removed)
    }

    /// Get-or-create by name.
    pub fn add_genre(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO genre (genre) VALUES (?1)",
            params![name],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM genre WHERE genre = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Replaces all genre tags of an artist.
    pub fn set_artist_genres(&self, artist_id: i64, genre_ids: &[i64]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM artist_genre WHERE artist_id = ?1",
            params![artist_id],
        )?;
        for genre_id in genre_ids {
            tx.execute(
                "INSERT OR IGNORE INTO artist_genre (artist_id, genre_id) VALUES (?1, ?2)",
                params![artist_id, genre_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn artist(&self, id: i64) -> Result<Option<Artist>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, is_primary, degree_input, degree_output FROM artist WHERE id = ?1",
        )?;

        let artist = stmt
            .query_row(params![id], |row| {
                Ok(Artist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    is_primary: row.get(2)?,
                    degree_input: row.get(3)?,
                    degree_output: row.get(4)?,
                })
            })
            .optional()?;
        Ok(artist)
    }
}

impl SimilarityStore for Database {
    fn recompute_degrees(&self) -> Result<usize> {
        let updated = self.conn.execute(
            "UPDATE artist SET
                degree_output = (SELECT COUNT(*) FROM \"similar\" s WHERE s.from_id = artist.id),
                degree_input = (SELECT COUNT(*) FROM \"similar\" s WHERE s.to_id = artist.id)",
            [],
        )?;
        Ok(updated)
    }

    fn genre_ids(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT genre, id FROM genre")?;
        let genres = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<HashMap<String, i64>>>()?;
        Ok(genres)
    }

    fn genre_members(&self, genre_ids: &[i64]) -> Result<HashSet<i64>> {
        if genre_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let sql = format!(
            "SELECT DISTINCT artist_id FROM artist_genre WHERE genre_id IN ({})",
            numbered_placeholders(1, genre_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let members = stmt
            .query_map(params_from_iter(genre_ids.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<i64>>>()?;
        Ok(members)
    }

    fn fetch_edges(&self, query: &EdgeQuery) -> Result<Vec<EdgeRow>> {
        if query.genre_ids.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        // ?1 cutoff, ?2 primary flag, then the genre list, then the limit
        let genre_in = numbered_placeholders(3, query.genre_ids.len());
        let limit_index = 3 + query.genre_ids.len();
        let sql = format!(
            "SELECT s.from_id, a1.name, a1.degree_input,
                    s.to_id, a2.name, a2.degree_input, s.position
             FROM \"similar\" s
             JOIN artist a1 ON s.from_id = a1.id
             JOIN artist a2 ON s.to_id = a2.id
             WHERE s.position < ?1
               AND (?2 = 0 OR (a1.is_primary = 1 AND a2.is_primary = 1))
               AND s.from_id IN (SELECT artist_id FROM artist_genre WHERE genre_id IN ({genre_in}))
               AND s.to_id IN (SELECT artist_id FROM artist_genre WHERE genre_id IN ({genre_in}))
             ORDER BY s.position, s.from_id, s.to_id
             LIMIT ?{limit_index}"
        );

        let mut values = Vec::with_capacity(query.genre_ids.len() + 3);
        values.push(query.max_position);
        values.push(i64::from(query.primary_only));
        values.extend_from_slice(&query.genre_ids);
        values.push(to_sql_limit(query.limit));

        debug!(
            "fetch_edges genres={:?} primary_only={} max_position={} limit={}",
            query.genre_ids, query.primary_only, query.max_position, query.limit
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(EdgeRow {
                    from: Endpoint {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        degree_input: row.get(2)?,
                    },
                    to: Endpoint {
                        id: row.get(3)?,
                        name: row.get(4)?,
                        degree_input: row.get(5)?,
                    },
                    position: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn fetch_top(&self, query: &TopQuery) -> Result<Vec<TopEntry>> {
        let mut values: Vec<i64> = query.genre_ids.clone();
        values.push(to_sql_limit(query.limit));

        let filter = if query.genre_ids.is_empty() {
            String::new()
        } else {
            let op = if query.exclude { "NOT IN" } else { "IN" };
            format!(
                "WHERE id {} (SELECT DISTINCT artist_id FROM artist_genre WHERE genre_id IN ({}))",
                op,
                numbered_placeholders(1, query.genre_ids.len())
            )
        };
        let sql = format!(
            "SELECT name, degree_input FROM artist {} ORDER BY degree_input DESC, id LIMIT ?{}",
            filter,
            values.len()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(TopEntry {
                    name: row.get(0)?,
                    degree_input: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }
}
