// Batch export: degrees, per-genre graphs, combined graphs, top lists

use crate::config::{ExportConfig, GenreExport};
use crate::csv::{CSV_EXTENSION, write_csv};
use crate::degree::DegreeAggregator;
use crate::error::Result;
use crate::gml::{GML_EXTENSION, write_gml};
use crate::model::ArtistGraph;
use crate::query::GraphQueryEngine;
use crate::store::SimilarityStore;
use crate::toplist::TopListExporter;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const ROCK_TOP: &str = "rock-top";
pub const METAL_TOP: &str = "metal-top";
pub const SUMMARY_TOP: &str = "summary-top";
pub const OUTSIDE_TOP: &str = "outside-top";

/// Callback for reporting export progress
pub type ExportProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphArtifact {
    pub path: PathBuf,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArtifact {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub artists_updated: usize,
    pub graphs: Vec<GraphArtifact>,
    pub lists: Vec<ListArtifact>,
}

/// Graph file name for a stem: `<stem>.gml` or `<stem>-full.gml`.
pub fn graph_file_name(stem: &str, full: bool) -> String {
    if full {
        format!("{}-full.{}", stem, GML_EXTENSION)
    } else {
        format!("{}.{}", stem, GML_EXTENSION)
    }
}

pub fn list_file_name(name: &str) -> String {
    format!("{}.{}", name, CSV_EXTENSION)
}

/// Ids of the configured genres that exist in the store, in config order.
pub fn resolve_genre_ids(genres: &HashMap<String, i64>, names: &[&str]) -> Vec<i64> {
    names
        .iter()
        .filter_map(|name| {
            let id = genres.get(*name).copied();
            if id.is_none() {
                warn!("genre '{}' not found in store", name);
            }
            id
        })
        .collect()
}

pub struct ExportPipeline<'a, S: SimilarityStore> {
    store: &'a S,
    config: &'a ExportConfig,
    progress: Option<ExportProgressCallback>,
}

impl<'a, S: SimilarityStore> ExportPipeline<'a, S> {
    pub fn new(store: &'a S, config: &'a ExportConfig) -> Self {
        Self {
            store,
            config,
            progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ExportProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn report(&self, msg: String) {
        if let Some(ref cb) = self.progress {
            cb(msg);
        }
    }

    pub fn run(&self) -> Result<ExportSummary> {
        let config = self.config;
        fs::create_dir_all(&config.output_dir)?;

        let mut summary = ExportSummary::default();

        self.report("Updating degrees".to_string());
        summary.artists_updated = DegreeAggregator::new(self.store).run()?;

        let genres = self.store.genre_ids()?;
        let rock_ids = resolve_genre_ids(&genres, &config.rock_genre_names());
        let metal_ids = resolve_genre_ids(&genres, &config.metal_genre_names());

        let engine = GraphQueryEngine::from_config(self.store, config);
        let palette = &config.palette;

        for genre in &config.metal_genres {
            let ids = self.single_genre_ids(&genres, genre);
            self.export_pair(&engine, &ids, &genre.file_stem(), &palette.metal, &mut summary)?;
        }
        for genre in &config.rock_genres {
            let ids = self.single_genre_ids(&genres, genre);
            self.export_pair(&engine, &ids, &genre.file_stem(), &palette.rock, &mut summary)?;
        }

        self.export_pair(&engine, &rock_ids, &config.all_rock, &palette.rock, &mut summary)?;
        self.export_pair(&engine, &metal_ids, &config.all_metal, &palette.metal, &mut summary)?;

        self.report(format!("Exporting {}", config.rock_and_metal));
        info!(
            "export customs full start {} rock={:?} metal={:?}",
            config.rock_and_metal, rock_ids, metal_ids
        );
        let custom = engine.fetch_custom_graph(&rock_ids, &metal_ids, false)?;
        self.save_graph(&config.rock_and_metal, true, &custom, &mut summary)?;

        self.report("Exporting degree top lists".to_string());
        info!("export degree top");
        let all_ids: Vec<i64> = rock_ids.iter().chain(&metal_ids).copied().collect();
        let top = TopListExporter::new(self.store);
        let lists: [(&str, &[i64], bool); 4] = [
            (ROCK_TOP, rock_ids.as_slice(), false),
            (METAL_TOP, metal_ids.as_slice(), false),
            (SUMMARY_TOP, all_ids.as_slice(), false),
            (OUTSIDE_TOP, all_ids.as_slice(), true),
        ];
        for (name, ids, exclude) in lists {
            let rows = top.top_by_genre(ids, exclude, config.top_limit)?;
            let path = config.output_dir.join(list_file_name(name));
            write_csv(&path, &rows)?;
            summary.lists.push(ListArtifact {
                path,
                rows: rows.len(),
            });
        }

        info!(
            "export done: {} graphs, {} lists",
            summary.graphs.len(),
            summary.lists.len()
        );
        Ok(summary)
    }

    fn single_genre_ids(&self, genres: &HashMap<String, i64>, genre: &GenreExport) -> Vec<i64> {
        resolve_genre_ids(genres, &[genre.genre.as_str()])
    }

    fn export_pair(
        &self,
        engine: &GraphQueryEngine<'_, S>,
        genre_ids: &[i64],
        stem: &str,
        color: &str,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        self.report(format!("Exporting {}", stem));
        info!("export start {} {:?}", stem, genre_ids);

        let primary = engine.fetch_primary_graph(genre_ids, color)?;
        self.save_graph(stem, false, &primary, summary)?;

        let full = engine.fetch_full_graph(genre_ids, color)?;
        self.save_graph(stem, true, &full, summary)?;

        info!("end {}", stem);
        Ok(())
    }

    fn save_graph(
        &self,
        stem: &str,
        full: bool,
        graph: &ArtistGraph,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        info!(
            "save graph {} {} {}",
            stem,
            graph.node_count(),
            graph.edge_count()
        );
        let path = self.config.output_dir.join(graph_file_name(stem, full));
        write_gml(&path, graph)?;
        summary.graphs.push(GraphArtifact {
            path,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        });
        Ok(())
    }
}
