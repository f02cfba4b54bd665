use std::cmp::Ordering;

use crate::model::dataset::MutantDataset;
use crate::model::region::{Partition, RegionCode};
use crate::model::table::{ColumnKind, GeneRow, GeneTable, parse_numeric_cell};
use crate::pipeline::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    pub code: RegionCode,
    pub table: GeneTable,
}

#[derive(Debug, Clone)]
struct PlannedColumn {
    kind: ColumnKind,
    name: String,
    set: usize,
    source: usize,
}

/// Builds one table per region of `partition` (empty regions included) by
/// joining the region's identifiers against the tables of the sets whose bit
/// is set. Per-comparison columns (statistics, and unrecognised measures such
/// as `baseMean`) are renamed `{prefix}_{column}`; gene annotation and
/// ontology columns are taken once, from the first contributing set that has
/// them.
pub fn assemble_region_tables(
    partition: &Partition,
    tables: &[&GeneTable],
    prefixes: &[&str],
) -> Result<Vec<RegionTable>, PipelineError> {
    let width = partition.width();
    if tables.len() != width {
        return Err(PipelineError::SetMismatch {
            sets: width,
            given: tables.len(),
            what: "tables",
        });
    }
    if prefixes.len() != width {
        return Err(PipelineError::SetMismatch {
            sets: width,
            given: prefixes.len(),
            what: "prefixes",
        });
    }

    let mut out = Vec::with_capacity(partition.regions.len());
    for region in &partition.regions {
        let members: Vec<usize> = region.code.members().collect();
        let plan = plan_columns(&members, tables, prefixes);
        let id_column = members
            .first()
            .map(|&i| tables[i].id_column())
            .unwrap_or("gene_id");

        let mut rows = Vec::with_capacity(region.ids.len());
        for id in &region.ids {
            let mut sources = Vec::with_capacity(members.len());
            for &set in &members {
                let row = tables[set]
                    .row(id)
                    .ok_or_else(|| PipelineError::UnknownIdentifier {
                        dataset: tables[set].name().to_string(),
                        id: id.clone(),
                        code: region.code.to_string(),
                    })?;
                sources.push((set, row));
            }
            let cells = plan
                .iter()
                .map(|col| {
                    sources
                        .iter()
                        .find(|(set, _)| *set == col.set)
                        .map(|(_, row)| row.cells[col.source].clone())
                        .unwrap_or_default()
                })
                .collect();
            rows.push(GeneRow {
                id: id.clone(),
                cells,
            });
        }

        if let Some(sort_col) = plan.iter().position(|c| c.kind == ColumnKind::FoldChange) {
            sort_rows_descending(&mut rows, sort_col);
        }

        let columns = plan.into_iter().map(|c| c.name).collect();
        let table = GeneTable::from_rows(&region.code.to_string(), id_column, columns, rows)?;
        out.push(RegionTable {
            code: region.code,
            table,
        });
    }
    Ok(out)
}

/// Region tables for a partition built from `datasets` (same order), joined
/// against each dataset's DEG view and prefixed with the dataset name.
pub fn assemble_for_datasets(
    partition: &Partition,
    datasets: &[&MutantDataset],
) -> Result<Vec<RegionTable>, PipelineError> {
    let tables: Vec<&GeneTable> = datasets.iter().map(|d| &d.deg).collect();
    let prefixes: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
    assemble_region_tables(partition, &tables, &prefixes)
}

fn plan_columns(members: &[usize], tables: &[&GeneTable], prefixes: &[&str]) -> Vec<PlannedColumn> {
    let mut plan = Vec::new();
    for &set in members {
        let table = tables[set];
        for (source, name) in table.columns().iter().enumerate() {
            let kind = table.column_kind(name);
            if kind.is_statistic() {
                plan.push(PlannedColumn {
                    kind,
                    name: format!("{}_{}", prefixes[set], name),
                    set,
                    source,
                });
            }
        }
    }
    for &set in members {
        let table = tables[set];
        for (source, name) in table.columns().iter().enumerate() {
            let kind = table.column_kind(name);
            if matches!(kind, ColumnKind::Annotation | ColumnKind::Ontology)
                && !plan.iter().any(|c| &c.name == name)
            {
                plan.push(PlannedColumn {
                    kind,
                    name: name.clone(),
                    set,
                    source,
                });
            }
        }
    }
    // stable: set order is kept inside each group
    plan.sort_by_key(|c| c.kind);
    plan
}

// Missing or unparseable values sort last.
fn sort_rows_descending(rows: &mut Vec<GeneRow>, column: usize) {
    let mut keyed: Vec<(Option<f64>, GeneRow)> = rows
        .drain(..)
        .map(|row| {
            let key = parse_numeric_cell(&row.cells[column]).ok().flatten();
            (key, row)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_assemble.rs"]
mod tests;
