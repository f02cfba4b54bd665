use crate::model::dataset::{MutantDataset, StatColumns};
use crate::model::regulation::{Regulation, classify, fold_change_from_log2};
use crate::model::table::{ColumnKind, GeneTable};
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::PipelineError;
use crate::report::format_f64;

pub const FOLD_CHANGE_COLUMN: &str = "FoldChange";
pub const REGULATION_COLUMN: &str = "Regulation";

/// Locates the statistic columns by name. Missing padj, or a table with
/// neither a log2 nor a linear fold-change column, is a configuration error.
pub fn resolve_stat_columns(
    table: &GeneTable,
    thresholds: &ThresholdProfile,
) -> Result<StatColumns, PipelineError> {
    let missing = |column: &str| PipelineError::MissingColumn {
        dataset: table.name().to_string(),
        column: column.to_string(),
    };

    let log2_fold_change = table
        .find_column(ColumnKind::Log2FoldChange)
        .map(str::to_string);
    let fold_change = table
        .find_column(ColumnKind::FoldChange)
        .map(str::to_string);
    if log2_fold_change.is_none() && fold_change.is_none() {
        return Err(missing("log2FoldChange"));
    }
    let padj = table
        .find_column(ColumnKind::Padj)
        .ok_or_else(|| missing("padj"))?
        .to_string();
    let pvalue = table.find_column(ColumnKind::PValue).map(str::to_string);
    if thresholds.pvalue.is_some() && pvalue.is_none() {
        return Err(missing("pvalue"));
    }
    let regulation = table
        .find_column(ColumnKind::Regulation)
        .unwrap_or(REGULATION_COLUMN)
        .to_string();

    Ok(StatColumns {
        log2_fold_change,
        fold_change,
        pvalue,
        padj,
        regulation,
    })
}

/// Classifies every gene of `table` and derives the DEG / Up / Down views.
/// The returned input view carries a fold-change column (added after the log2
/// column when absent) and a regulation column after the fold-change column.
pub fn run_stage2(
    table: &GeneTable,
    thresholds: &ThresholdProfile,
) -> Result<MutantDataset, PipelineError> {
    thresholds.validate()?;
    let mut columns = resolve_stat_columns(table, thresholds)?;

    let lfc = match &columns.log2_fold_change {
        Some(c) => Some(table.numeric_column(c)?),
        None => None,
    };
    let fc = match &columns.fold_change {
        Some(c) => Some(table.numeric_column(c)?),
        None => None,
    };
    let padj = table.numeric_column(&columns.padj)?;
    let pvalue = match (&columns.pvalue, thresholds.pvalue) {
        (Some(c), Some(_)) => Some(table.numeric_column(c)?),
        _ => None,
    };

    let n = table.len();
    let mut calls = Vec::with_capacity(n);
    for row in 0..n {
        calls.push(classify(
            fc.as_ref().and_then(|v| v[row]),
            lfc.as_ref().and_then(|v| v[row]),
            padj[row],
            thresholds,
        ));
    }

    let mut enriched = table.clone();
    if columns.fold_change.is_none() {
        if let (Some(lfc_column), Some(lfc_values)) = (&columns.log2_fold_change, &lfc) {
            let values = lfc_values
                .iter()
                .map(|v| v.map(|x| format_f64(fold_change_from_log2(x))).unwrap_or_default())
                .collect();
            enriched = enriched.with_column_after(Some(lfc_column), FOLD_CHANGE_COLUMN, values)?;
            columns.fold_change = Some(FOLD_CHANGE_COLUMN.to_string());
        }
    }
    let regulation_values = calls.iter().map(|c| c.label().to_string()).collect();
    let anchor = columns
        .fold_change
        .clone()
        .or_else(|| columns.log2_fold_change.clone());
    enriched = enriched.with_column_after(anchor.as_deref(), &columns.regulation, regulation_values)?;

    let mut deg_mask = Vec::with_capacity(n);
    let mut up_mask = Vec::with_capacity(n);
    let mut down_mask = Vec::with_capacity(n);
    for (row, call) in calls.iter().enumerate() {
        let pvalue_ok = match (&pvalue, thresholds.pvalue) {
            (Some(values), Some(limit)) => values[row].is_some_and(|p| p <= limit),
            _ => true,
        };
        let is_deg = call.is_significant() && pvalue_ok;
        deg_mask.push(is_deg);
        up_mask.push(is_deg && *call == Regulation::Up);
        down_mask.push(is_deg && *call == Regulation::Down);
    }

    let name = table.name().to_string();
    Ok(MutantDataset {
        deg: enriched.filter_rows(&format!("{name}_DEG"), &deg_mask),
        up: enriched.filter_rows(&format!("{name}_UP"), &up_mask),
        down: enriched.filter_rows(&format!("{name}_DOWN"), &down_mask),
        input: enriched,
        name,
        columns,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_classify.rs"]
mod tests;
