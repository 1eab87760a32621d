use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::benchmark::{BenchmarkRecord, Metric};
use crate::error::{Result, TcError};

const MODELS_DIR: &str = "models";
const MODEL_FILE: &str = "model.json";

/// The on-disk model catalog: `<root>/models/<organization>/<model>/model.json`.
///
/// Nothing is cached. Every call walks the tree again.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every model record, tagged with its organization.
    ///
    /// Model directories without a `model.json` are skipped. A missing
    /// catalog root or a document that is not valid JSON fails the whole
    /// load; off-type fields inside a valid document do not.
    pub fn load_benchmarks(&self) -> Result<Vec<BenchmarkRecord>> {
        let mut records = Vec::new();
        for (org, path) in self.model_files()? {
            let mut rec = read_record(&path)?;
            rec.organization = Some(capitalize(&org).into());
            records.push(rec);
        }
        tracing::debug!(count = records.len(), root = %self.root.display(), "loaded catalog");
        Ok(records)
    }

    /// Benchmark scores of the first model whose name matches, ignoring case.
    /// A `qualitative_metrics` value that is not a list of objects reads as empty.
    pub fn find_benchmarks_by_name(&self, name: &str) -> Result<Vec<Metric>> {
        let wanted = name.to_lowercase();
        for (_, path) in self.model_files()? {
            let rec = read_record(&path)?;
            if rec.key() == wanted {
                return Ok(rec.metrics().to_vec());
            }
        }
        Ok(Vec::new())
    }

    /// `(organization dir name, model.json path)` pairs in file-name order.
    fn model_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let models = self.root.join(MODELS_DIR);
        if !models.is_dir() {
            return Err(TcError::CatalogMissing(models));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&models)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| TcError::Io(e.to_string()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let file = entry.path().join(MODEL_FILE);
            if !file.is_file() {
                continue;
            }
            let org = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            files.push((org, file));
        }
        Ok(files)
    }
}

fn read_record(path: &Path) -> Result<BenchmarkRecord> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TcError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&content).map_err(|source| TcError::Catalog {
        path: path.to_path_buf(),
        source,
    })
}

/// Upper-case the first character, leave the rest alone: "openai" -> "Openai".
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
