// Tests for the batch export pipeline and its configuration

mod common;

use common::{METAL, ROCK, create_test_db, seed_db, seed_memory};
use simgraph_core::export::{ExportPipeline, graph_file_name, list_file_name};
use simgraph_core::{ExportConfig, GenreExport, GraphError, MemoryStore, Palette};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn test_config(output_dir: &Path) -> ExportConfig {
    ExportConfig {
        output_dir: output_dir.to_path_buf(),
        rock_genres: vec![GenreExport::new(ROCK)],
        metal_genres: vec![GenreExport {
            genre: METAL.to_string(),
            file: Some("heavy".to_string()),
        }],
        palette: Palette {
            rock: "rock".to_string(),
            metal: "metal".to_string(),
            both: "both".to_string(),
            default: "grey".to_string(),
        },
        ..ExportConfig::default()
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_pipeline_writes_all_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let (_db_dir, db) = create_test_db();
    seed_db(&db);
    let config = test_config(&out);

    let summary = ExportPipeline::new(&db, &config).run().unwrap();

    assert_eq!(summary.artists_updated, 6);
    // 2 single genres + 2 combined, each primary and full, plus the custom graph
    assert_eq!(summary.graphs.len(), 9);
    assert_eq!(summary.lists.len(), 4);

    for stem in ["heavy", "rock", "all-rock", "all-metal"] {
        assert!(out.join(graph_file_name(stem, false)).exists(), "{}", stem);
        assert!(out.join(graph_file_name(stem, true)).exists(), "{}", stem);
    }
    assert!(out.join(graph_file_name("rock-and-metal", true)).exists());
    for name in ["rock-top", "metal-top", "summary-top", "outside-top"] {
        assert!(out.join(list_file_name(name)).exists(), "{}", name);
    }
}

#[test]
fn test_pipeline_artifact_contents() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    seed_memory(&store);
    let config = test_config(temp_dir.path());

    ExportPipeline::new(&store, &config).run().unwrap();

    let rock_top = fs::read_to_string(temp_dir.path().join("rock-top.csv")).unwrap();
    assert_eq!(
        rock_top,
        "Led Zeppelin;3\nBlack Sabbath;2\nDeep Purple;2\nLonely Rocker;0\n"
    );

    let outside = fs::read_to_string(temp_dir.path().join("outside-top.csv")).unwrap();
    assert_eq!(outside, "Miles Davis;1\n");

    let custom = fs::read_to_string(temp_dir.path().join("rock-and-metal-full.gml")).unwrap();
    assert!(custom.starts_with("graph [\n    directed 1\n"));
    assert!(custom.contains("label \"Black Sabbath\"\n        color \"both\""));

    let primary_rock = fs::read_to_string(temp_dir.path().join("rock.gml")).unwrap();
    assert_eq!(primary_rock.matches("edge [").count(), 2);
    assert!(primary_rock.contains("color \"rock\""));
}

#[test]
fn test_pipeline_unknown_genre_yields_empty_graphs() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    seed_memory(&store);
    let mut config = test_config(temp_dir.path());
    config.rock_genres.push(GenreExport::new("shoegaze"));

    let summary = ExportPipeline::new(&store, &config).run().unwrap();

    let shoegaze = summary
        .graphs
        .iter()
        .find(|g| g.path.ends_with("shoegaze-full.gml"))
        .unwrap();
    assert_eq!(shoegaze.nodes, 0);
    assert_eq!(shoegaze.edges, 0);
    assert_eq!(
        fs::read_to_string(&shoegaze.path).unwrap(),
        "graph [\n    directed 1\n]"
    );
}

#[test]
fn test_pipeline_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    let config = test_config(temp_dir.path());

    let summary = ExportPipeline::new(&store, &config).run().unwrap();

    assert!(summary.graphs.iter().all(|g| g.edges == 0));
    assert!(summary.lists.iter().all(|l| l.rows == 0));
}

#[test]
fn test_pipeline_reports_progress() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    seed_memory(&store);
    let config = test_config(temp_dir.path());

    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    ExportPipeline::new(&store, &config)
        .with_progress(Arc::new(move |msg: String| {
            sink.lock().unwrap().push(msg);
        }))
        .run()
        .unwrap();

    let messages = messages.lock().unwrap();
    assert_eq!(messages.first().map(String::as_str), Some("Updating degrees"));
    assert!(messages.iter().any(|m| m == "Exporting heavy"));
    assert!(messages.iter().any(|m| m == "Exporting rock-and-metal"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_from_toml() {
    let config = ExportConfig::from_toml(
        r##"
        output_dir = "/tmp/graphs"
        max_position = 50
        top_limit = 25

        [palette]
        rock = "#0000ff"

        [[rock_genres]]
        genre = "classic rock"

        [[metal_genres]]
        genre = "doom metal"
        file = "doom"
        "##,
    )
    .unwrap();

    assert_eq!(config.max_position, 50);
    assert_eq!(config.top_limit, 25);
    assert_eq!(config.export_limit, ExportConfig::default().export_limit);
    assert_eq!(config.palette.rock, "#0000ff");
    assert_eq!(config.palette.default, "grey");
    assert_eq!(config.rock_genres[0].file_stem(), "classic-rock");
    assert_eq!(config.metal_genres[0].file_stem(), "doom");
}

#[test]
fn test_config_rejects_non_positive_cutoff() {
    let result = ExportConfig::from_toml("max_position = 0");
    assert!(matches!(result, Err(GraphError::Config(_))));
}

#[test]
fn test_config_rejects_invalid_toml() {
    let result = ExportConfig::from_toml("max_position = \"lots\"");
    assert!(matches!(result, Err(GraphError::ConfigParse(_))));
}

#[test]
fn test_config_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ExportConfig::load(&temp_dir.path().join("nope.toml"));
    assert!(matches!(result, Err(GraphError::Io(_))));
}

#[test]
fn test_example_config_parses() {
    let config = ExportConfig::from_toml(include_str!("../../simgraph.example.toml")).unwrap();

    assert_eq!(config.rock_genres.len(), 3);
    assert_eq!(config.metal_genres[1].file_stem(), "thrash");
    assert_eq!(config.palette, Palette::default());
}
