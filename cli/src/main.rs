use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tome_core::{build, rank, Analyzer, Document, IndexConfig};

mod snapshot;
use snapshot::{BookSummary, Catalog, SnapshotPaths};

/// A raw book record as it appears in the input files.
#[derive(Debug, Deserialize)]
struct BookRecord {
    id: Option<u32>,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
}

impl From<BookRecord> for Document {
    fn from(record: BookRecord) -> Self {
        Document {
            id: record.id,
            title: record.title,
            author: record.author,
            description: record.description,
        }
    }
}

#[derive(Parser)]
#[command(name = "tome")]
#[command(about = "Build and query a TF-IDF book index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from JSON/JSONL book records
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output snapshot directory
        #[arg(long)]
        output: String,
        /// Index surface word forms instead of stems
        #[arg(long, default_value_t = false)]
        no_stemming: bool,
        /// Multiplier for title terms (author and description stay at 1.0)
        #[arg(long, default_value_t = 1.0)]
        title_weight: f32,
    },
    /// Query a built index
    Search {
        /// Snapshot directory produced by `build`
        #[arg(long)]
        index: String,
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            no_stemming,
            title_weight,
        } => build_snapshot(&input, &output, no_stemming, title_weight),
        Commands::Search {
            index,
            query,
            top_k,
        } => run_search(&index, &query, top_k),
    }
}

fn build_snapshot(input: &str, output: &str, no_stemming: bool, title_weight: f32) -> Result<()> {
    let mut config = IndexConfig::default();
    if no_stemming {
        config.analyzer.stemming = tome_core::Stemming::Off;
    }
    config.field_weights.title = title_weight;

    let records = read_records(Path::new(input))?;
    tracing::info!(num_records = records.len(), input, "loaded book records");

    let mut catalog = Catalog::new();
    for record in &records {
        if let Some(id) = record.id {
            catalog.entry(id).or_insert_with(|| BookSummary {
                title: record.title.clone(),
                author: record.author.clone(),
            });
        }
    }

    let report = build(records.into_iter().map(Document::from), &config)?;
    for skip in &report.skipped {
        tracing::warn!(ordinal = skip.ordinal, reason = %skip.reason, "record skipped");
    }
    catalog.retain(|id, _| report.index.contains_document(*id));

    let paths = SnapshotPaths::new(output);
    snapshot::save(&paths, &config, &report.index, &catalog)?;
    tracing::info!(
        num_docs = report.index.total_docs(),
        num_terms = report.index.term_count(),
        skipped = report.skipped.len(),
        output,
        "index build complete"
    );
    println!(
        "indexed {} documents ({} skipped) into {}",
        report.index.total_docs(),
        report.skipped.len(),
        output
    );
    Ok(())
}

fn run_search(index_dir: &str, query: &str, top_k: usize) -> Result<()> {
    let paths = SnapshotPaths::new(index_dir);
    let (config, index, catalog) = snapshot::load(&paths)?;
    let analyzer = Analyzer::new(&config.analyzer);

    let hits = rank(&index, &analyzer, &config, query, Some(top_k));
    if hits.is_empty() {
        println!("no matching books");
        return Ok(());
    }
    for (position, hit) in hits.iter().enumerate() {
        match catalog.get(&hit.doc_id) {
            Some(book) => println!(
                "{:>2}. [{}] {} by {} (score {:.4})",
                position + 1,
                hit.doc_id,
                book.title,
                book.author,
                hit.score
            ),
            None => println!(
                "{:>2}. [{}] (score {:.4})",
                position + 1,
                hit.doc_id,
                hit.score
            ),
        }
    }
    Ok(())
}

fn read_records(input: &Path) -> Result<Vec<BookRecord>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(path.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut records = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut records)?;
        } else {
            read_json(&file, &mut records)?;
        }
    }
    Ok(records)
}

fn read_jsonl(file: &Path, records: &mut Vec<BookRecord>) -> Result<()> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("opening {}", file.display()))?,
    );
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json(file: &Path, records: &mut Vec<BookRecord>) -> Result<()> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("opening {}", file.display()))?,
    );
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for value in arr {
                records.push(serde_json::from_value(value)?);
            }
        }
        serde_json::Value::Object(_) => {
            records.push(serde_json::from_value(json)?);
        }
        other => bail!("expected a JSON object or array, got {other}"),
    }
    Ok(())
}
