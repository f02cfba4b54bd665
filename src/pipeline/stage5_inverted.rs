use std::collections::BTreeSet;

use crate::model::region::Partition;
use crate::model::regulation::Regulation;
use crate::pipeline::PipelineError;
use crate::pipeline::stage3_partition::{NamedSet, partition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutantRegulation {
    pub name: String,
    pub up: BTreeSet<String>,
    pub down: BTreeSet<String>,
}

/// One "pivot against the rest" composition. Sets stay in mutant order, so
/// bit `i` of every region code is mutant `i` regardless of the pivot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedComposition {
    pub pivot: String,
    /// Direction of the pivot; every other mutant takes the opposite one.
    pub direction: Regulation,
    pub name: String,
    pub labels: Vec<String>,
    pub partition: Partition,
}

pub fn direction_arrow(direction: Regulation) -> &'static str {
    match direction {
        Regulation::Up => "↑",
        Regulation::Down => "↓",
        Regulation::NotSig => "",
    }
}

/// For every mutant as pivot: pivot Up / others Down, then pivot Down /
/// others Up. Yields 2N compositions; empty sets are partitioned as usual.
pub fn enumerate_inverted_regulations(
    mutants: &[MutantRegulation],
) -> Result<Vec<InvertedComposition>, PipelineError> {
    let mut out = Vec::with_capacity(mutants.len() * 2);
    for (pivot_idx, pivot) in mutants.iter().enumerate() {
        for direction in [Regulation::Up, Regulation::Down] {
            let opposite = match direction {
                Regulation::Up => Regulation::Down,
                _ => Regulation::Up,
            };
            let mut sets = Vec::with_capacity(mutants.len());
            let mut labels = Vec::with_capacity(mutants.len());
            for (idx, mutant) in mutants.iter().enumerate() {
                let dir = if idx == pivot_idx { direction } else { opposite };
                let ids = match dir {
                    Regulation::Up => mutant.up.clone(),
                    _ => mutant.down.clone(),
                };
                labels.push(format!("{}{}", direction_arrow(dir), mutant.name));
                sets.push(NamedSet::new(mutant.name.clone(), ids));
            }
            out.push(InvertedComposition {
                pivot: pivot.name.clone(),
                direction,
                name: format!(
                    "{}_{}_others_{}",
                    pivot.name,
                    direction.label(),
                    opposite.label()
                ),
                labels,
                partition: partition(&sets)?,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_inverted.rs"]
mod tests;
