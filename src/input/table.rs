use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, warn};

use crate::input::InputError;
use crate::model::table::{GeneRow, GeneTable};

/// Cell values read as missing.
pub const NA_TOKENS: &[&str] = &["", "--", "NA", "NaN", "nan"];

/// Identifier fragments of novel transcripts and small RNAs.
pub const NOVEL_MARKERS: &[&str] = &["Novel", "sRNA"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub id_column: String,
    pub include_novel: bool,
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|e| {
        InputError::MissingInput(format!("cannot open {}: {e}", path.display()))
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_table(path: &Path, name: &str, options: &TableOptions) -> Result<GeneTable, InputError> {
    let reader = open_maybe_gz(path)?;
    parse_table(reader, name, options)
        .map_err(|e| match e {
            InputError::Parse(msg) => InputError::Parse(format!("{}: {msg}", path.display())),
            other => other,
        })
}

/// Tab-separated table with a header row. Duplicate identifiers keep the
/// first row.
pub fn parse_table<R: Read>(
    reader: R,
    name: &str,
    options: &TableOptions,
) -> Result<GeneTable, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    let Some(id_idx) = header.iter().position(|h| *h == options.id_column) else {
        return Err(InputError::Parse(format!(
            "identifier column {} not found in header",
            options.id_column
        )));
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != id_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut table = GeneTable::new(name, &options.id_column, columns);
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped_novel = 0usize;

    for record in rdr.records() {
        let record = record?;
        let line_no = record.position().map(|p| p.line()).unwrap_or(0);
        let id = record.get(id_idx).map(str::trim).unwrap_or("");
        if id.is_empty() {
            warn!(table = name, line = line_no, "row has empty identifier; skipping");
            continue;
        }
        if !options.include_novel && is_novel(id) {
            dropped_novel += 1;
            continue;
        }
        if !seen.insert(id.to_string()) {
            warn!(
                table = name,
                line = line_no,
                id,
                "duplicate identifier; keeping first"
            );
            continue;
        }
        if record.len() > header.len() {
            warn!(
                table = name,
                line = line_no,
                fields = record.len(),
                expected = header.len(),
                "extra fields ignored"
            );
        }

        let cells = (0..header.len())
            .filter(|idx| *idx != id_idx)
            .map(|idx| normalize_cell(record.get(idx).unwrap_or("")))
            .collect();
        table
            .push_row(GeneRow {
                id: id.to_string(),
                cells,
            })
            .map_err(|e| InputError::InvalidInput(e.to_string()))?;
    }

    if dropped_novel > 0 {
        debug!(table = name, dropped = dropped_novel, "novel identifiers dropped");
    }
    Ok(table)
}

pub fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if NA_TOKENS.contains(&trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

pub fn is_novel(id: &str) -> bool {
    NOVEL_MARKERS.iter().any(|marker| id.contains(marker))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
