use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::input::table::{TableOptions, read_table};
use crate::model::table::{GeneRow, GeneTable};
use crate::pipeline::PipelineError;
use crate::report::tsv::write_gene_table_file;
use crate::tools::ToolError;
use crate::tools::join::{ColumnPlacement, JoinResult, file_name, left_join_placed};

/// Map keys may carry a single trailing `#`; it is not part of the gene id.
pub fn strip_map_keys(map: &GeneTable) -> Result<GeneTable, PipelineError> {
    let mut out = GeneTable::new(map.name(), map.id_column(), map.columns().to_vec());
    let mut seen: HashSet<String> = HashSet::new();
    for row in map.rows() {
        let id = row.id.strip_suffix('#').unwrap_or(&row.id).to_string();
        if !seen.insert(id.clone()) {
            warn!(table = map.name(), id = %id, "key repeats once '#' is stripped; keeping first");
            continue;
        }
        out.push_row(GeneRow {
            id,
            cells: row.cells.clone(),
        })?;
    }
    Ok(out)
}

/// Keeps only `columns` of `table`, in the order given. The key column may be
/// listed and is skipped; an empty list keeps everything.
pub fn select_columns(table: &GeneTable, columns: &[String]) -> Result<GeneTable, PipelineError> {
    if columns.is_empty() {
        return Ok(table.clone());
    }
    let wanted: Vec<&String> = columns
        .iter()
        .filter(|c| c.as_str() != table.id_column())
        .collect();
    let mut indices = Vec::with_capacity(wanted.len());
    for column in &wanted {
        let idx = table
            .column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn {
                dataset: table.name().to_string(),
                column: column.to_string(),
            })?;
        indices.push(idx);
    }

    let mut out = GeneTable::new(
        table.name(),
        table.id_column(),
        wanted.into_iter().cloned().collect(),
    );
    for row in table.rows() {
        out.push_row(GeneRow {
            id: row.id.clone(),
            cells: indices.iter().map(|&i| row.cells[i].clone()).collect(),
        })?;
    }
    Ok(out)
}

/// Annotates every row of `table` with the map's columns, placed first.
/// `not_joined` holds the map rows with no gene in `table`.
pub fn map_genes(
    map: &GeneTable,
    table: &GeneTable,
    map_columns: &[String],
) -> Result<JoinResult, PipelineError> {
    let map = strip_map_keys(&select_columns(map, map_columns)?)?;
    left_join_placed(table, &map, ColumnPlacement::RightFirst)
}

/// Maps `map_path` onto `table_path` by `key` and writes
/// `<table>_mapped.tsv` and `<map>_notmapped.tsv` into `out_dir`.
pub fn run_mapgenes(
    map_path: &Path,
    table_path: &Path,
    key: &str,
    map_columns: &[String],
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf), ToolError> {
    let options = TableOptions {
        id_column: key.to_string(),
        include_novel: true,
    };
    let map = read_table(map_path, &file_name(map_path), &options)?;
    let table = read_table(table_path, &file_name(table_path), &options)?;
    let result = map_genes(&map, &table, map_columns)?;

    fs::create_dir_all(out_dir).map_err(PipelineError::from)?;
    let mapped_path = out_dir.join(format!("{}_mapped.tsv", table.name()));
    let not_mapped_path = out_dir.join(format!("{}_notmapped.tsv", map.name()));
    write_gene_table_file(&result.joined, &mapped_path)?;
    write_gene_table_file(&result.not_joined, &not_mapped_path)?;

    info!(
        rows = result.joined.len(),
        not_mapped = result.not_joined.len(),
        out = %out_dir.display(),
        "mapping complete"
    );
    Ok((mapped_path, not_mapped_path))
}

#[cfg(test)]
#[path = "../../tests/src_inline/tools/mapgenes.rs"]
mod tests;
