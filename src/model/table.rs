use std::collections::HashMap;

use crate::pipeline::PipelineError;

/// Role of a column, derived from its name. Order of the variants is the
/// column order of assembled region tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKind {
    Identifier,
    Log2FoldChange,
    FoldChange,
    Regulation,
    PValue,
    Padj,
    /// Any other per-comparison value (`baseMean`, `lfcSE`, `stat`, ...).
    Measure,
    Annotation,
    Ontology,
}

impl ColumnKind {
    /// Per-comparison columns; these get the dataset prefix when merged.
    pub fn is_statistic(self) -> bool {
        matches!(
            self,
            ColumnKind::Log2FoldChange
                | ColumnKind::FoldChange
                | ColumnKind::Regulation
                | ColumnKind::PValue
                | ColumnKind::Padj
                | ColumnKind::Measure
        )
    }
}

/// Name fragments of columns that describe the gene itself and are identical
/// across comparisons.
pub const GENE_INFO_MARKERS: &[&str] = &[
    "chr",
    "start",
    "end",
    "strand",
    "length",
    "biotype",
    "description",
    "tf_family",
    "gene_name",
    "symbol",
    "product",
];

pub fn column_kind(name: &str, id_column: &str) -> ColumnKind {
    if name == id_column {
        return ColumnKind::Identifier;
    }
    let lower = name.to_ascii_lowercase();
    if lower.contains("log2foldchange") || lower.contains("log2fc") {
        ColumnKind::Log2FoldChange
    } else if lower.contains("foldchange") {
        ColumnKind::FoldChange
    } else if lower.contains("regulation") {
        ColumnKind::Regulation
    } else if lower.contains("padj") {
        ColumnKind::Padj
    } else if lower.contains("pvalue") {
        ColumnKind::PValue
    } else if lower.starts_with("go_")
        || lower.starts_with("goid")
        || lower.contains("_go_")
        || lower.contains("gene ontology")
    {
        ColumnKind::Ontology
    } else if GENE_INFO_MARKERS.iter().any(|m| lower.contains(m)) {
        ColumnKind::Annotation
    } else {
        ColumnKind::Measure
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneRow {
    pub id: String,
    /// One cell per non-identifier column; empty string = missing.
    pub cells: Vec<String>,
}

/// Annotated gene table keyed by a unique identifier column.
#[derive(Debug, Clone)]
pub struct GeneTable {
    name: String,
    id_column: String,
    columns: Vec<String>,
    rows: Vec<GeneRow>,
    index: HashMap<String, usize>,
}

impl PartialEq for GeneTable {
    fn eq(&self, other: &Self) -> bool {
        self.id_column == other.id_column && self.columns == other.columns && self.rows == other.rows
    }
}

impl GeneTable {
    pub fn new(name: &str, id_column: &str, columns: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            id_column: id_column.to_string(),
            columns,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_rows(
        name: &str,
        id_column: &str,
        columns: Vec<String>,
        rows: Vec<GeneRow>,
    ) -> Result<Self, PipelineError> {
        let mut table = Self::new(name, id_column, columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: GeneRow) -> Result<(), PipelineError> {
        if row.cells.len() != self.columns.len() {
            return Err(PipelineError::RowWidth {
                dataset: self.name.clone(),
                id: row.id,
                expected: self.columns.len(),
                got: row.cells.len(),
            });
        }
        if self.index.contains_key(&row.id) {
            return Err(PipelineError::DuplicateIdentifier {
                dataset: self.name.clone(),
                id: row.id,
            });
        }
        self.index.insert(row.id.clone(), self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[GeneRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.id.as_str())
    }

    pub fn row(&self, id: &str) -> Option<&GeneRow> {
        self.index.get(id).map(|&idx| &self.rows[idx])
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn column_kind(&self, column: &str) -> ColumnKind {
        column_kind(column, &self.id_column)
    }

    /// First column of the given role, in table order.
    pub fn find_column(&self, kind: ColumnKind) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| self.column_kind(c) == kind)
            .map(|c| c.as_str())
    }

    /// Parses a column as numbers; empty cells are `None`.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>, PipelineError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn {
                dataset: self.name.clone(),
                column: column.to_string(),
            })?;
        let mut out = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            out.push(parse_numeric_cell(&row.cells[idx]).map_err(|value| {
                PipelineError::NonNumeric {
                    dataset: self.name.clone(),
                    column: column.to_string(),
                    id: row.id.clone(),
                    value,
                }
            })?);
        }
        Ok(out)
    }

    /// Returns a copy with `column` placed right after `anchor` (or appended
    /// when `anchor` is `None`). An existing column of the same name keeps its
    /// position and gets the new values.
    pub fn with_column_after(
        &self,
        anchor: Option<&str>,
        column: &str,
        values: Vec<String>,
    ) -> Result<GeneTable, PipelineError> {
        if values.len() != self.rows.len() {
            return Err(PipelineError::RowWidth {
                dataset: self.name.clone(),
                id: column.to_string(),
                expected: self.rows.len(),
                got: values.len(),
            });
        }
        let mut out = self.clone();
        if let Some(existing) = self.column_index(column) {
            for (row, value) in out.rows.iter_mut().zip(values) {
                row.cells[existing] = value;
            }
            return Ok(out);
        }
        let position = match anchor {
            Some(anchor) => {
                self.column_index(anchor)
                    .ok_or_else(|| PipelineError::MissingColumn {
                        dataset: self.name.clone(),
                        column: anchor.to_string(),
                    })?
                    + 1
            }
            None => self.columns.len(),
        };
        out.columns.insert(position, column.to_string());
        for (row, value) in out.rows.iter_mut().zip(values) {
            row.cells.insert(position, value);
        }
        Ok(out)
    }

    /// Row subset in original order.
    pub fn filter_rows(&self, name: &str, keep: &[bool]) -> GeneTable {
        let mut out = GeneTable::new(name, &self.id_column, self.columns.clone());
        for (row, &k) in self.rows.iter().zip(keep) {
            if k {
                out.index.insert(row.id.clone(), out.rows.len());
                out.rows.push(row.clone());
            }
        }
        out
    }
}

pub fn parse_numeric_cell(cell: &str) -> Result<Option<f64>, String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .map_err(|_| trimmed.to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/table.rs"]
mod tests;
