use std::collections::{BTreeSet, HashMap};

use crate::model::region::{Partition, Region, RegionCode};
use crate::pipeline::PipelineError;

pub const MIN_SETS: usize = 2;
pub const MAX_SETS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSet {
    pub name: String,
    pub ids: BTreeSet<String>,
}

impl NamedSet {
    pub fn new(name: impl Into<String>, ids: BTreeSet<String>) -> Self {
        Self {
            name: name.into(),
            ids,
        }
    }
}

/// Splits `sets` into the 2^N - 1 disjoint Venn regions. Every code is present
/// in the result, empty regions included; the all-zero code never is.
pub fn partition(sets: &[NamedSet]) -> Result<Partition, PipelineError> {
    if sets.len() < MIN_SETS || sets.len() > MAX_SETS {
        return Err(PipelineError::InvalidSetCount {
            min: MIN_SETS,
            max: MAX_SETS,
            got: sets.len(),
        });
    }

    let mut membership = vec![false; sets.len()];
    let mut groups: HashMap<RegionCode, BTreeSet<String>> = HashMap::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for set in sets {
        for id in &set.ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            for (slot, other) in membership.iter_mut().zip(sets) {
                *slot = other.ids.contains(id);
            }
            let code = RegionCode::from_membership(&membership);
            groups.entry(code).or_default().insert(id.clone());
        }
    }

    let regions = RegionCode::all(sets.len())
        .into_iter()
        .map(|code| Region {
            code,
            ids: groups.remove(&code).unwrap_or_default(),
        })
        .collect();

    Ok(Partition {
        set_names: sets.iter().map(|s| s.name.clone()).collect(),
        regions,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_partition.rs"]
mod tests;
