use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::input::{InputError, resolve_path};
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage3_partition::{MAX_SETS, MIN_SETS};

pub const DEFAULT_ID_COLUMN: &str = "gene_id";

/// JSON run configuration. `samples` keeps file order, which is the bit
/// order of every region code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub samples: Map<String, Value>,
    #[serde(default)]
    pub thresholds: ThresholdProfile,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default)]
    pub include_novel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSpec {
    pub name: String,
    pub path: PathBuf,
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

impl RunConfig {
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        if !path.is_file() {
            return Err(InputError::MissingInput(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Three-mutant example written by `mkconfig`.
    pub fn example() -> Self {
        let mut samples = Map::new();
        for name in ["mutA", "mutB", "mutC"] {
            samples.insert(name.to_string(), Value::String(format!("{name}.tsv")));
        }
        Self {
            samples,
            thresholds: ThresholdProfile::default_v1(),
            id_column: default_id_column(),
            include_novel: false,
        }
    }

    pub fn to_json(&self) -> Result<String, InputError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn resolve_samples(&self, base_dir: &Path) -> Result<Vec<SampleSpec>, InputError> {
        let n = self.samples.len();
        if !(MIN_SETS..=MAX_SETS).contains(&n) {
            return Err(InputError::InvalidInput(format!(
                "expected {MIN_SETS} to {MAX_SETS} samples, got {n}"
            )));
        }
        let mut out = Vec::with_capacity(n);
        for (name, value) in &self.samples {
            if name.trim().is_empty() {
                return Err(InputError::InvalidInput(
                    "sample name must not be empty".to_string(),
                ));
            }
            if !is_safe_name(name) {
                return Err(InputError::InvalidInput(format!(
                    "sample name {name:?} is used as a directory name and must not contain path separators or \"..\""
                )));
            }
            let Some(path) = value.as_str() else {
                return Err(InputError::InvalidInput(format!(
                    "sample {name}: path must be a string, got {value}"
                )));
            };
            out.push(SampleSpec {
                name: name.clone(),
                path: resolve_path(base_dir, path),
            });
        }
        Ok(out)
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..") && name != "."
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/config.rs"]
mod tests;
