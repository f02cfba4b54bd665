pub mod json;
pub mod text;
pub mod tsv;

use serde::Serialize;

use crate::model::dataset::RegulationCounts;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage6_flows::RegionLabel;

#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub name: String,
    pub input: String,
    pub n_genes: usize,
    pub counts: RegulationCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub code: String,
    pub n_genes: usize,
    pub file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionSummary {
    pub name: String,
    pub labels: Vec<String>,
    pub regions: Vec<RegionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    pub from: String,
    pub to: String,
    pub genes: usize,
    /// Genes called Up in one mutant and Down in the other.
    pub switched: usize,
    pub file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub thresholds: ThresholdProfile,
    pub id_column: String,
    pub samples: Vec<SampleSummary>,
    pub categories: Vec<PartitionSummary>,
    pub regulation_labels: Vec<RegionLabel>,
    pub inverted: Vec<PartitionSummary>,
    pub flows: Vec<FlowSummary>,
}

/// Shortest representation that parses back to the same value.
pub fn format_f64(v: f64) -> String {
    format!("{v}")
}

pub fn format_fraction(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.000000".to_string();
    }
    format!("{:.6}", count as f64 / total as f64)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
