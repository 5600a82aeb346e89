pub mod color;
pub mod config;
pub mod csv;
pub mod degree;
pub mod error;
pub mod export;
pub mod gml;
pub mod model;
pub mod query;
pub mod store;
pub mod toplist;

pub use color::Palette;
pub use config::{ExportConfig, GenreExport};
pub use degree::DegreeAggregator;
pub use error::{GraphError, Result};
pub use export::{ExportPipeline, ExportSummary};
pub use model::{ArtistGraph, Edge, Node, TopEntry};
pub use query::{GraphQueryEngine, QueryLimits};
pub use store::{Database, MemoryStore, SimilarityStore};
pub use toplist::TopListExporter;
