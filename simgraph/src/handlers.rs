use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use simgraph_core::csv::serialize_csv;
use simgraph_core::export::{ExportPipeline, resolve_genre_ids};
use simgraph_core::{
    Database, DegreeAggregator, ExportConfig, ExportSummary, SimilarityStore, TopEntry,
    TopListExporter,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_DB_PATH: &str = "~/.config/simgraph/simgraph.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopFormat {
    Csv,
    Json,
}

impl FromStr for TopFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(TopFormat::Csv),
            "json" => Ok(TopFormat::Json),
            other => Err(anyhow!("Unknown output format: {}", other)),
        }
    }
}

/// Log level for a run. `export` draws a spinner on stderr, so its
/// info-level logs are held back and the summary is printed instead.
pub fn log_level(quiet: bool, subcommand: Option<&str>) -> Level {
    match (quiet, subcommand) {
        (true, _) | (false, Some("export")) => Level::WARN,
        _ => Level::INFO,
    }
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn db_path_from_args(args: &ArgMatches) -> PathBuf {
    let raw = args
        .get_one::<String>("db")
        .map(String::as_str)
        .unwrap_or(DEFAULT_DB_PATH);
    expand_path(raw)
}

/// Opens an existing database; never creates one implicitly.
pub fn open_database(path: &Path) -> Result<Database> {
    if !Database::exists(path) {
        bail!(
            "Database not found at {} (run `simgraph init` first)",
            path.display()
        );
    }
    Database::new(path).with_context(|| format!("Failed to open database {}", path.display()))
}

pub fn render_top(entries: &[TopEntry], format: TopFormat) -> Result<String> {
    match format {
        TopFormat::Csv => Ok(serialize_csv(entries)),
        TopFormat::Json => {
            let mut json = serde_json::to_string_pretty(entries)?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub fn format_summary(summary: &ExportSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Artists updated: {}\n", summary.artists_updated));
    for graph in &summary.graphs {
        out.push_str(&format!(
            "  {} ({} nodes, {} edges)\n",
            graph.path.display(),
            graph.nodes,
            graph.edges
        ));
    }
    for list in &summary.lists {
        out.push_str(&format!("  {} ({} rows)\n", list.path.display(), list.rows));
    }
    out
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    let db_path = db_path_from_args(args);
    let force = args.get_flag("force");

    if Database::exists(&db_path) {
        if !force {
            println!("{}", "⚠ WARNING".yellow().bold());
            println!(
                "Database already exists at {} (use --force to recreate it)",
                db_path.display().to_string().bright_white()
            );
            return Ok(());
        }
        println!(
            "{} Deleting existing database (force mode)",
            "→".yellow().bold()
        );
        Database::drop(&db_path)
            .with_context(|| format!("Failed to remove {}", db_path.display()))?;
    }

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    println!("{} Creating database...", "→".blue());
    Database::new(&db_path)
        .with_context(|| format!("Failed to create database {}", db_path.display()))?;
    println!(
        "{} Database initialized: {}",
        "✓".green().bold(),
        db_path.display().to_string().bright_white()
    );
    Ok(())
}

pub fn handle_degrees(args: &ArgMatches) -> Result<()> {
    let db = open_database(&db_path_from_args(args))?;
    let updated = DegreeAggregator::new(&db)
        .run()
        .context("Degree update failed")?;
    println!("{} Degrees updated for {} artists", "✓".green().bold(), updated);
    Ok(())
}

pub fn load_config(path: Option<&PathBuf>, output: Option<&PathBuf>) -> Result<ExportConfig> {
    let config = match path {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExportConfig::default(),
    };
    Ok(match output {
        Some(dir) => config.with_output_dir(dir.clone()),
        None => config,
    })
}

pub fn handle_export(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let config = load_config(
        args.get_one::<PathBuf>("config"),
        args.get_one::<PathBuf>("output"),
    )?;
    let db = open_database(&db_path_from_args(args))?;

    print_divider();
    println!(
        "{} Exporting to {}",
        "→".blue(),
        config.output_dir.display().to_string().bright_white()
    );
    print_divider();

    let mut pipeline = ExportPipeline::new(&db, &config);
    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };
    if let Some(ref pb) = spinner {
        let pb = pb.clone();
        pipeline = pipeline.with_progress(Arc::new(move |msg: String| pb.set_message(msg)));
    }

    let result = pipeline.run();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let summary = result.context("Export failed")?;

    println!("{} Export complete!", "✓".green().bold());
    if !quiet {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

pub fn handle_top(args: &ArgMatches) -> Result<()> {
    let db = open_database(&db_path_from_args(args))?;
    let names: Vec<&str> = args
        .get_many::<String>("genre")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let exclude = args.get_flag("exclude");
    let limit = *args.get_one::<usize>("limit").unwrap_or(&10);
    let format = match args.get_one::<String>("format") {
        Some(f) => f.parse::<TopFormat>()?,
        None => TopFormat::Csv,
    };

    let genre_ids = if names.is_empty() {
        Vec::new()
    } else {
        let ids = resolve_genre_ids(&db.genre_ids()?, &names);
        if ids.is_empty() {
            bail!("None of the genres {:?} exist in the database", names);
        }
        ids
    };

    let entries = TopListExporter::new(&db).top_by_genre(&genre_ids, exclude, limit)?;
    print!("{}", render_top(&entries, format)?);
    Ok(())
}
