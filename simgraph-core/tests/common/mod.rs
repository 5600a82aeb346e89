// Shared fixture for store-backed tests

#![allow(dead_code)]

use simgraph_core::{Database, MemoryStore};
use tempfile::TempDir;

pub const ROCK: &str = "rock";
pub const METAL: &str = "metal";

/// (id, name, is_primary, genres)
pub const ARTISTS: &[(i64, &str, bool, &[&str])] = &[
    (1, "Led Zeppelin", true, &[ROCK]),
    (2, "Black Sabbath", true, &[ROCK, METAL]),
    (3, "Iron Maiden", true, &[METAL]),
    (4, "Deep Purple", false, &[ROCK]),
    (5, "Miles Davis", true, &[]),
    (6, "Lonely Rocker", true, &[ROCK]),
];

/// (from, to, position)
pub const EDGES: &[(i64, i64, i64)] = &[
    (1, 2, 0),
    (2, 1, 0),
    (2, 3, 1),
    (3, 2, 0),
    (1, 4, 2),
    (4, 1, 5),
    (1, 5, 3),
    (3, 1, 100),
    (3, 4, 99),
];

pub fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();
    (temp_dir, db)
}

/// Returns (rock id, metal id).
pub fn seed_db(db: &Database) -> (i64, i64) {
    let rock = db.add_genre(ROCK).unwrap();
    let metal = db.add_genre(METAL).unwrap();

    for (id, name, is_primary, genres) in ARTISTS {
        db.save_artist(*id, name, *is_primary).unwrap();
        let ids: Vec<i64> = genres
            .iter()
            .map(|g| if *g == ROCK { rock } else { metal })
            .collect();
        db.set_artist_genres(*id, &ids).unwrap();
    }
    for (from, to, position) in EDGES {
        db.save_similar_edge(*from, *to, *position).unwrap();
    }

    (rock, metal)
}

pub fn seed_memory(store: &MemoryStore) -> (i64, i64) {
    let rock = store.add_genre(ROCK);
    let metal = store.add_genre(METAL);

    for (id, name, is_primary, genres) in ARTISTS {
        store.save_artist(*id, name, *is_primary);
        let ids: Vec<i64> = genres
            .iter()
            .map(|g| if *g == ROCK { rock } else { metal })
            .collect();
        store.set_artist_genres(*id, &ids);
    }
    for (from, to, position) in EDGES {
        store.save_similar_edge(*from, *to, *position);
    }

    (rock, metal)
}
