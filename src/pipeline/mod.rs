use thiserror::Error;

use crate::model::dataset::{GeneCategory, MutantDataset, category_order};
use crate::model::region::Partition;
use crate::pipeline::stage3_partition::{NamedSet, partition};
use crate::pipeline::stage4_assemble::{RegionTable, assemble_for_datasets};
use crate::pipeline::stage5_inverted::{
    InvertedComposition, MutantRegulation, enumerate_inverted_regulations,
};
use crate::pipeline::stage6_flows::{FlowTable, RegionLabel, region_labels, regulation_flows};

pub mod stage2_classify;
pub mod stage3_partition;
pub mod stage4_assemble;
pub mod stage5_inverted;
pub mod stage6_flows;
pub mod stage7_report;

/// Fatal conditions of the analysis stages. Empty sets and empty regions are
/// valid results and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("dataset {dataset}: missing required column {column}")]
    MissingColumn { dataset: String, column: String },

    #[error("invalid threshold {field}={value} (expected {expected})")]
    InvalidThreshold {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("partition needs {min}..={max} sets, got {got}")]
    InvalidSetCount { min: usize, max: usize, got: usize },

    #[error("partition got {sets} sets but {given} {what}")]
    SetMismatch {
        sets: usize,
        given: usize,
        what: &'static str,
    },

    #[error("dataset {dataset}: non-numeric value {value:?} in column {column} (gene {id})")]
    NonNumeric {
        dataset: String,
        column: String,
        id: String,
        value: String,
    },

    #[error("dataset {dataset}: duplicate gene identifier {id}")]
    DuplicateIdentifier { dataset: String, id: String },

    #[error("dataset {dataset}: row {id} has {got} values, expected {expected}")]
    RowWidth {
        dataset: String,
        id: String,
        expected: usize,
        got: usize,
    },

    #[error("dataset {dataset}: gene {id} of region {code} has no row")]
    UnknownIdentifier {
        dataset: String,
        id: String,
        code: String,
    },

    #[error("report IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report TSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone)]
pub struct CategoryOverlap {
    pub category: GeneCategory,
    pub partition: Partition,
    pub tables: Vec<RegionTable>,
}

#[derive(Debug, Clone)]
pub struct InvertedOverlap {
    pub composition: InvertedComposition,
    pub tables: Vec<RegionTable>,
}

#[derive(Debug, Clone)]
pub struct OverlapResults {
    pub categories: Vec<CategoryOverlap>,
    pub regulation_labels: Vec<RegionLabel>,
    pub inverted: Vec<InvertedOverlap>,
    pub flows: Vec<FlowTable>,
}

/// Partitions, region tables, inverted compositions and flows for classified
/// mutants, in the given mutant order.
pub fn run_overlaps(datasets: &[MutantDataset]) -> Result<OverlapResults, PipelineError> {
    let refs: Vec<&MutantDataset> = datasets.iter().collect();

    let mut categories = Vec::with_capacity(3);
    for &category in category_order() {
        let sets: Vec<NamedSet> = datasets
            .iter()
            .map(|d| NamedSet::new(d.name.clone(), d.ids_for(category)))
            .collect();
        let partition = partition(&sets)?;
        let tables = assemble_for_datasets(&partition, &refs)?;
        categories.push(CategoryOverlap {
            category,
            partition,
            tables,
        });
    }

    let labels = match (
        categories.first(),
        categories.get(1),
        categories.get(2),
    ) {
        (Some(deg), Some(up), Some(down)) => {
            region_labels(&deg.partition, &up.partition, &down.partition)
        }
        _ => Vec::new(),
    };

    let mutants: Vec<MutantRegulation> = datasets
        .iter()
        .map(|d| MutantRegulation {
            name: d.name.clone(),
            up: d.up_ids(),
            down: d.down_ids(),
        })
        .collect();
    let mut inverted = Vec::with_capacity(mutants.len() * 2);
    for composition in enumerate_inverted_regulations(&mutants)? {
        let tables = assemble_for_datasets(&composition.partition, &refs)?;
        inverted.push(InvertedOverlap {
            composition,
            tables,
        });
    }

    Ok(OverlapResults {
        categories,
        regulation_labels: labels,
        inverted,
        flows: regulation_flows(&refs),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
