use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::input::table::{TableOptions, read_table};
use crate::model::table::{GeneRow, GeneTable};
use crate::pipeline::PipelineError;
use crate::report::tsv::write_gene_table_file;
use crate::tools::ToolError;

#[derive(Debug, Clone, PartialEq)]
pub struct JoinResult {
    /// Every row of the first table, extended with the second table's columns.
    pub joined: GeneTable,
    /// Rows of the second table whose key is absent from the first.
    pub not_joined: GeneTable,
}

/// Where the right-hand table's columns land in the joined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPlacement {
    RightAfter,
    RightFirst,
}

/// Left join of `right` onto `left` by identifier. Right-hand columns whose
/// name is already taken get a `_2` suffix.
pub fn left_join(left: &GeneTable, right: &GeneTable) -> Result<JoinResult, PipelineError> {
    left_join_placed(left, right, ColumnPlacement::RightAfter)
}

/// Same as [`left_join`] with the right-hand columns placed per `placement`.
pub fn left_join_placed(
    left: &GeneTable,
    right: &GeneTable,
    placement: ColumnPlacement,
) -> Result<JoinResult, PipelineError> {
    let mut taken: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    taken.insert(left.id_column());
    let right_columns: Vec<String> = right
        .columns()
        .iter()
        .map(|name| {
            if taken.contains(name.as_str()) {
                format!("{name}_2")
            } else {
                name.clone()
            }
        })
        .collect();
    let columns = match placement {
        ColumnPlacement::RightAfter => [left.columns(), right_columns.as_slice()].concat(),
        ColumnPlacement::RightFirst => [right_columns.as_slice(), left.columns()].concat(),
    };

    let width = right.columns().len();
    let mut joined = GeneTable::new(left.name(), left.id_column(), columns);
    for row in left.rows() {
        let right_cells: Vec<String> = match right.row(&row.id) {
            Some(matched) => matched.cells.clone(),
            None => vec![String::new(); width],
        };
        let cells = match placement {
            ColumnPlacement::RightAfter => [row.cells.as_slice(), right_cells.as_slice()].concat(),
            ColumnPlacement::RightFirst => [right_cells.as_slice(), row.cells.as_slice()].concat(),
        };
        joined.push_row(GeneRow {
            id: row.id.clone(),
            cells,
        })?;
    }

    let keep: Vec<bool> = right.rows().iter().map(|r| left.row(&r.id).is_none()).collect();
    let not_joined = right.filter_rows(right.name(), &keep);

    Ok(JoinResult { joined, not_joined })
}

/// Joins two files on `key` and writes `<table1>_joined.tsv` and
/// `<table2>_notjoined.tsv` into `out_dir`.
pub fn run_join(
    table1: &Path,
    table2: &Path,
    key: &str,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf), ToolError> {
    let options = TableOptions {
        id_column: key.to_string(),
        include_novel: true,
    };
    let left = read_table(table1, &file_name(table1), &options)?;
    let right = read_table(table2, &file_name(table2), &options)?;
    let result = left_join(&left, &right)?;

    fs::create_dir_all(out_dir).map_err(PipelineError::from)?;
    let joined_path = out_dir.join(format!("{}_joined.tsv", left.name()));
    let not_joined_path = out_dir.join(format!("{}_notjoined.tsv", right.name()));
    write_gene_table_file(&result.joined, &joined_path)?;
    write_gene_table_file(&result.not_joined, &not_joined_path)?;

    info!(
        joined = result.joined.len(),
        not_joined = result.not_joined.len(),
        out = %out_dir.display(),
        "join complete"
    );
    Ok((joined_path, not_joined_path))
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/tools/join.rs"]
mod tests;
