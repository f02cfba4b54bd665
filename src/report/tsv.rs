use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::table::GeneTable;
use crate::pipeline::PipelineError;
use crate::pipeline::stage6_flows::FlowTable;

fn tsv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(inner)
}

/// Identifier column first, then the table's columns in order.
pub fn write_gene_table<W: Write>(table: &GeneTable, out: W) -> Result<(), PipelineError> {
    let mut writer = tsv_writer(out);
    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(table.id_column());
    header.extend(table.columns().iter().map(String::as_str));
    writer.write_record(&header)?;
    for row in table.rows() {
        writer.write_field(&row.id)?;
        for cell in &row.cells {
            writer.write_field(cell)?;
        }
        writer.write_record(None::<&[u8]>)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_gene_table_file(table: &GeneTable, path: &Path) -> Result<(), PipelineError> {
    let file = File::create(path)?;
    write_gene_table(table, BufWriter::new(file))
}

/// One row per transition, in Down / Not sig / Up order for both sides.
pub fn write_flow_table<W: Write>(flow: &FlowTable, out: W) -> Result<(), PipelineError> {
    let mut writer = tsv_writer(out);
    writer.write_record([flow.from.as_str(), flow.to.as_str(), "count"])?;
    for (from, to, count) in &flow.counts {
        let count = count.to_string();
        writer.write_record([from.label(), to.label(), count.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_flow_table_file(flow: &FlowTable, path: &Path) -> Result<(), PipelineError> {
    let file = File::create(path)?;
    write_flow_table(flow, BufWriter::new(file))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tsv.rs"]
mod tests;
