use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub mod config;
pub mod table;

use config::{RunConfig, SampleSpec};
use table::{TableOptions, read_table};

use crate::model::table::GeneTable;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Loaded tables of one run, in configuration order.
#[derive(Debug, Clone)]
pub struct InputBundle {
    pub samples: Vec<SampleSpec>,
    pub tables: Vec<GeneTable>,
}

impl InputBundle {
    pub fn sources(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|s| s.path.display().to_string())
            .collect()
    }
}

pub fn load_input(config: &RunConfig, base_dir: &Path) -> Result<InputBundle, InputError> {
    let samples = config.resolve_samples(base_dir)?;
    let options = TableOptions {
        id_column: config.id_column.clone(),
        include_novel: config.include_novel,
    };

    let mut tables = Vec::with_capacity(samples.len());
    for sample in &samples {
        let table = read_table(&sample.path, &sample.name, &options)?;
        info!(
            sample = %sample.name,
            path = %sample.path.display(),
            genes = table.len(),
            columns = table.columns().len(),
            "loaded table"
        );
        tables.push(table);
    }

    Ok(InputBundle { samples, tables })
}

/// Relative paths resolve against `base_dir`.
pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
