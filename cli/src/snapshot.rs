//! On-disk snapshot of a built index. The file format belongs to this host,
//! not to the core: a snapshot is just the serialized index plus the
//! configuration it was built with, because an index is only queryable
//! through the analyzer that produced its vocabulary.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tome_core::{DocId, IndexConfig, InvertedIndex};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

/// Display fields kept beside the index so search results can be rendered
/// without reloading the source records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
}

pub type Catalog = HashMap<DocId, BookSummary>;

#[derive(Serialize, Deserialize)]
struct SavedIndex {
    version: u32,
    config: IndexConfig,
    index: InvertedIndex,
}

pub struct SnapshotPaths {
    pub root: PathBuf,
}

impl SnapshotPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn index(&self) -> PathBuf {
        self.root.join("index.bin")
    }
    fn catalog(&self) -> PathBuf {
        self.root.join("catalog.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save(
    paths: &SnapshotPaths,
    config: &IndexConfig,
    index: &InvertedIndex,
    catalog: &Catalog,
) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    let saved = SavedIndex {
        version: FORMAT_VERSION,
        config: config.clone(),
        index: index.clone(),
    };
    fs::write(paths.index(), bincode::serialize(&saved)?)?;
    fs::write(paths.catalog(), bincode::serialize(catalog)?)?;
    let meta = MetaFile {
        num_docs: index.total_docs(),
        created_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    fs::write(paths.meta(), serde_json::to_string_pretty(&meta)?)?;
    Ok(())
}

pub fn load(paths: &SnapshotPaths) -> Result<(IndexConfig, InvertedIndex, Catalog)> {
    let bytes = fs::read(paths.index())
        .with_context(|| format!("reading {}", paths.index().display()))?;
    let saved: SavedIndex = bincode::deserialize(&bytes)?;
    if saved.version != FORMAT_VERSION {
        bail!(
            "unsupported index format version {} (expected {})",
            saved.version,
            FORMAT_VERSION
        );
    }
    let catalog: Catalog = bincode::deserialize(
        &fs::read(paths.catalog())
            .with_context(|| format!("reading {}", paths.catalog().display()))?,
    )?;
    Ok((saved.config, saved.index, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tome_core::{build, rank, Analyzer, Document};

    #[test]
    fn snapshot_round_trip_preserves_ranking() {
        let config = IndexConfig::default();
        let docs = vec![
            Document::new(1, "Moby-Dick", "Herman Melville", "the white whale"),
            Document::new(2, "Garden Almanac", "A. Gardener", "vegetables"),
        ];
        let index = build(docs, &config).unwrap().index;
        let mut catalog = Catalog::new();
        catalog.insert(
            1,
            BookSummary {
                title: "Moby-Dick".into(),
                author: "Herman Melville".into(),
            },
        );

        let dir = tempdir().unwrap();
        let paths = SnapshotPaths::new(dir.path());
        save(&paths, &config, &index, &catalog).unwrap();
        let (loaded_config, loaded_index, loaded_catalog) = load(&paths).unwrap();

        assert_eq!(loaded_index.total_docs(), 2);
        assert_eq!(loaded_catalog.get(&1).unwrap().title, "Moby-Dick");

        let analyzer = Analyzer::new(&loaded_config.analyzer);
        let hits = rank(&loaded_index, &analyzer, &loaded_config, "whale", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 1);
    }
}
