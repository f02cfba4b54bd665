use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::input::table::{TableOptions, read_table};
use crate::model::table::GeneTable;
use crate::pipeline::PipelineError;
use crate::report::tsv::write_gene_table_file;
use crate::tools::ToolError;
use crate::tools::join::file_name;

/// Rows whose `column` cell is missing are dropped. The loader has already
/// turned NA tokens into empty cells. Identifiers are never empty, so naming
/// the id column keeps every row.
pub fn drop_missing(table: &GeneTable, column: &str) -> Result<GeneTable, PipelineError> {
    let name = format!("{}_dropNaN", table.name());
    if column == table.id_column() {
        return Ok(table.filter_rows(&name, &vec![true; table.len()]));
    }
    let idx = table
        .column_index(column)
        .ok_or_else(|| PipelineError::MissingColumn {
            dataset: table.name().to_string(),
            column: column.to_string(),
        })?;
    let keep: Vec<bool> = table
        .rows()
        .iter()
        .map(|row| !row.cells[idx].is_empty())
        .collect();
    Ok(table.filter_rows(&name, &keep))
}

/// Writes `<table>_dropNaN.tsv` into `out_dir`.
pub fn run_dropnan(
    table_path: &Path,
    id_column: &str,
    column: &str,
    out_dir: &Path,
) -> Result<PathBuf, ToolError> {
    let options = TableOptions {
        id_column: id_column.to_string(),
        include_novel: true,
    };
    let table = read_table(table_path, &file_name(table_path), &options)?;
    let kept = drop_missing(&table, column)?;

    fs::create_dir_all(out_dir).map_err(PipelineError::from)?;
    let path = out_dir.join(format!("{}.tsv", kept.name()));
    write_gene_table_file(&kept, &path)?;

    info!(
        column,
        kept = kept.len(),
        dropped = table.len() - kept.len(),
        out = %path.display(),
        "missing values dropped"
    );
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/tools/dropnan.rs"]
mod tests;
