use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::model::dataset::MutantDataset;
use crate::model::regulation::Regulation;
use crate::model::table::GeneTable;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage4_assemble::RegionTable;
use crate::pipeline::{OverlapResults, PipelineError};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::tsv::{write_flow_table_file, write_gene_table_file};
use crate::report::{FlowSummary, PartitionSummary, RegionSummary, SampleSummary, SummaryData};

#[derive(Debug, Clone)]
pub struct Stage7Input<'a> {
    pub datasets: &'a [MutantDataset],
    /// Source path per dataset, same order.
    pub inputs: &'a [String],
    pub results: &'a OverlapResults,
    pub thresholds: ThresholdProfile,
    pub id_column: String,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage7Input<'_>, out_dir: &Path) -> Result<SummaryData, PipelineError> {
    fs::create_dir_all(out_dir)?;
    let frames = out_dir.join("dataframes");

    let mut samples = Vec::with_capacity(input.datasets.len());
    for (idx, dataset) in input.datasets.iter().enumerate() {
        let dir = frames.join(&dataset.name);
        fs::create_dir_all(&dir)?;
        for (suffix, table) in [
            ("input", &dataset.input),
            ("DEG", &dataset.deg),
            ("UP", &dataset.up),
            ("DOWN", &dataset.down),
        ] {
            let path = dir.join(format!("{}_{}.tsv", dataset.name, suffix));
            write_table(table, &path)?;
        }
        samples.push(SampleSummary {
            name: dataset.name.clone(),
            input: input.inputs.get(idx).cloned().unwrap_or_default(),
            n_genes: dataset.input.len(),
            counts: dataset.counts(),
        });
    }

    let names: Vec<String> = input.datasets.iter().map(|d| d.name.clone()).collect();

    let mut categories = Vec::with_capacity(input.results.categories.len());
    for category in &input.results.categories {
        let label = category.category.label();
        categories.push(write_region_tables(
            out_dir,
            label,
            names.clone(),
            &category.tables,
        )?);
    }

    let mut inverted = Vec::with_capacity(input.results.inverted.len());
    for overlap in &input.results.inverted {
        inverted.push(write_region_tables(
            out_dir,
            &overlap.composition.name,
            overlap.composition.labels.clone(),
            &overlap.tables,
        )?);
    }

    let flow_dir = out_dir.join("flows");
    fs::create_dir_all(&flow_dir)?;
    let mut flows = Vec::with_capacity(input.results.flows.len());
    for flow in &input.results.flows {
        let file = format!("flows/{}_vs_{}.tsv", flow.from, flow.to);
        write_flow_table_file(flow, &out_dir.join(&file))?;
        flows.push(FlowSummary {
            from: flow.from.clone(),
            to: flow.to.clone(),
            genes: flow.genes,
            switched: flow.count(Regulation::Up, Regulation::Down)
                + flow.count(Regulation::Down, Regulation::Up),
            file,
        });
    }

    let summary = SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        thresholds: input.thresholds,
        id_column: input.id_column.clone(),
        samples,
        categories,
        regulation_labels: input.results.regulation_labels.clone(),
        inverted,
        flows,
    };

    let json = render_summary_json(&summary)?;
    fs::write(out_dir.join("summary.json"), json)?;
    fs::write(out_dir.join("report.txt"), render_report_text(&summary))?;
    info!(out = %out_dir.display(), "reports written");

    Ok(summary)
}

/// Writes `dataframes/{name}/{name}_{code}.tsv` for every region, empty
/// regions included.
fn write_region_tables(
    out_dir: &Path,
    name: &str,
    labels: Vec<String>,
    tables: &[RegionTable],
) -> Result<PartitionSummary, PipelineError> {
    let dir: PathBuf = ["dataframes", name].iter().collect();
    fs::create_dir_all(out_dir.join(&dir))?;
    let mut regions = Vec::with_capacity(tables.len());
    for region in tables {
        let code = region.code.to_string();
        let file = dir.join(format!("{name}_{code}.tsv"));
        write_table(&region.table, &out_dir.join(&file))?;
        regions.push(RegionSummary {
            code,
            n_genes: region.table.len(),
            file: file.to_string_lossy().replace('\\', "/"),
        });
    }
    Ok(PartitionSummary {
        name: name.to_string(),
        labels,
        regions,
    })
}

fn write_table(table: &GeneTable, path: &Path) -> Result<(), PipelineError> {
    debug!(path = %path.display(), rows = table.len(), "writing table");
    write_gene_table_file(table, path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
