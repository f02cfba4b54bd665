use std::collections::BTreeSet;

use crate::model::regulation::Regulation;
use crate::model::table::GeneTable;

/// Resolved names of the statistic columns of one input table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatColumns {
    pub log2_fold_change: Option<String>,
    pub fold_change: Option<String>,
    pub pvalue: Option<String>,
    pub padj: String,
    pub regulation: String,
}

impl StatColumns {
    /// No log2 column: direction comes from a signed ratio (below 1 is Down),
    /// which a magnitude-only fold-change column cannot express.
    pub fn direction_from_ratio(&self) -> bool {
        self.log2_fold_change.is_none()
    }
}

/// One mutant-vs-wild-type comparison with its classified views.
/// `up` and `down` are disjoint subsets of `deg`, which is a subset of `input`.
#[derive(Debug, Clone)]
pub struct MutantDataset {
    pub name: String,
    pub columns: StatColumns,
    pub input: GeneTable,
    pub deg: GeneTable,
    pub up: GeneTable,
    pub down: GeneTable,
}

impl MutantDataset {
    pub fn deg_ids(&self) -> BTreeSet<String> {
        id_set(&self.deg)
    }

    pub fn up_ids(&self) -> BTreeSet<String> {
        id_set(&self.up)
    }

    pub fn down_ids(&self) -> BTreeSet<String> {
        id_set(&self.down)
    }

    pub fn ids_for(&self, category: GeneCategory) -> BTreeSet<String> {
        match category {
            GeneCategory::Deg => self.deg_ids(),
            GeneCategory::Up => self.up_ids(),
            GeneCategory::Down => self.down_ids(),
        }
    }

    pub fn call_for(&self, id: &str) -> Regulation {
        if self.up.row(id).is_some() {
            Regulation::Up
        } else if self.down.row(id).is_some() {
            Regulation::Down
        } else {
            Regulation::NotSig
        }
    }

    /// Counts of the filtered views, so `up + down == deg` and
    /// `deg + not_sig` is the input size.
    pub fn counts(&self) -> RegulationCounts {
        RegulationCounts {
            up: self.up.len(),
            down: self.down.len(),
            not_sig: self.input.len() - self.deg.len(),
            deg: self.deg.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct RegulationCounts {
    pub up: usize,
    pub down: usize,
    pub not_sig: usize,
    pub deg: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneCategory {
    Deg,
    Up,
    Down,
}

impl GeneCategory {
    pub fn label(self) -> &'static str {
        match self {
            GeneCategory::Deg => "DEG",
            GeneCategory::Up => "Up",
            GeneCategory::Down => "Down",
        }
    }
}

pub fn category_order() -> &'static [GeneCategory] {
    &[GeneCategory::Deg, GeneCategory::Up, GeneCategory::Down]
}

fn id_set(table: &GeneTable) -> BTreeSet<String> {
    table.ids().map(|id| id.to_string()).collect()
}
