use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::dataset::MutantDataset;
use crate::model::region::Partition;
use crate::model::regulation::{Regulation, regulation_order};

/// Regulation transitions between two mutants over the genes that are
/// differentially expressed in at least one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowTable {
    pub from: String,
    pub to: String,
    pub genes: usize,
    /// (state in `from`, state in `to`, count) for all nine transitions.
    pub counts: Vec<(Regulation, Regulation, usize)>,
}

impl FlowTable {
    pub fn count(&self, from: Regulation, to: Regulation) -> usize {
        self.counts
            .iter()
            .find(|(a, b, _)| *a == from && *b == to)
            .map(|(_, _, n)| *n)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionLabel {
    pub code: String,
    pub total: usize,
    pub up: usize,
    pub down: usize,
}

pub fn pair_flow(from: &MutantDataset, to: &MutantDataset) -> FlowTable {
    let genes: BTreeSet<String> = from.deg_ids().union(&to.deg_ids()).cloned().collect();
    let mut counts = Vec::with_capacity(9);
    for &a in regulation_order() {
        for &b in regulation_order() {
            counts.push((a, b, 0usize));
        }
    }
    for id in &genes {
        let a = from.call_for(id);
        let b = to.call_for(id);
        if let Some(slot) = counts.iter_mut().find(|(x, y, _)| *x == a && *y == b) {
            slot.2 += 1;
        }
    }
    FlowTable {
        from: from.name.clone(),
        to: to.name.clone(),
        genes: genes.len(),
        counts,
    }
}

/// Flows for every ordered pair of distinct mutants.
pub fn regulation_flows(datasets: &[&MutantDataset]) -> Vec<FlowTable> {
    let mut out = Vec::new();
    for (i, a) in datasets.iter().enumerate() {
        for (j, b) in datasets.iter().enumerate() {
            if i != j {
                out.push(pair_flow(a, b));
            }
        }
    }
    out
}

/// Per-region Up/Down counts for the DEG diagram, read from the partitions of
/// the Up and Down sets over the same mutant order.
pub fn region_labels(deg: &Partition, up: &Partition, down: &Partition) -> Vec<RegionLabel> {
    deg.regions
        .iter()
        .map(|region| RegionLabel {
            code: region.code.to_string(),
            total: region.ids.len(),
            up: up.get(&region.code).map(|s| s.len()).unwrap_or(0),
            down: down.get(&region.code).map(|s| s.len()).unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_flows.rs"]
mod tests;
