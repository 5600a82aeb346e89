// Export configuration, loaded from TOML

use crate::color::Palette;
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_POSITION: i64 = 100;
pub const DEFAULT_EXPORT_LIMIT: usize = 50_000;
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// A genre exported on its own, and the file stem its graphs are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreExport {
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl GenreExport {
    pub fn new(genre: &str) -> Self {
        Self {
            genre: genre.to_string(),
            file: None,
        }
    }

    /// Explicit file stem, or the genre name with spaces replaced by `-`
    pub fn file_stem(&self) -> String {
        match &self.file {
            Some(file) => file.clone(),
            None => self.genre.trim().replace(' ', "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Exclusive rank cutoff for similarity edges
    pub max_position: i64,
    /// Row cap per graph query
    pub export_limit: usize,
    /// Rows per top list
    pub top_limit: usize,
    pub palette: Palette,
    pub rock_genres: Vec<GenreExport>,
    pub metal_genres: Vec<GenreExport>,
    pub all_rock: String,
    pub all_metal: String,
    pub rock_and_metal: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("graphs"),
            max_position: DEFAULT_MAX_POSITION,
            export_limit: DEFAULT_EXPORT_LIMIT,
            top_limit: DEFAULT_TOP_LIMIT,
            palette: Palette::default(),
            rock_genres: ["rock", "classic rock", "hard rock", "alternative rock", "punk"]
                .iter()
                .map(|g| GenreExport::new(g))
                .collect(),
            metal_genres: ["metal", "heavy metal", "thrash metal", "death metal", "black metal"]
                .iter()
                .map(|g| GenreExport::new(g))
                .collect(),
            all_rock: "all-rock".to_string(),
            all_metal: "all-metal".to_string(),
            rock_and_metal: "rock-and-metal".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ExportConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_position <= 0 {
            return Err(GraphError::Config(format!(
                "max_position must be positive, got {}",
                self.max_position
            )));
        }
        if self.export_limit == 0 {
            return Err(GraphError::Config(
                "export_limit must be positive".to_string(),
            ));
        }

        let stems = self
            .rock_genres
            .iter()
            .chain(self.metal_genres.iter())
            .map(GenreExport::file_stem)
            .chain([
                self.all_rock.clone(),
                self.all_metal.clone(),
                self.rock_and_metal.clone(),
            ]);
        for stem in stems {
            if stem.trim().is_empty() {
                return Err(GraphError::Config("empty output file name".to_string()));
            }
        }

        Ok(())
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn rock_genre_names(&self) -> Vec<&str> {
        self.rock_genres.iter().map(|g| g.genre.as_str()).collect()
    }

    pub fn metal_genre_names(&self) -> Vec<&str> {
        self.metal_genres.iter().map(|g| g.genre.as_str()).collect()
    }
}
