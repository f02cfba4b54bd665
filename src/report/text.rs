use crate::model::region::RegionCode;
use crate::report::{PartitionSummary, SummaryData, format_f64, format_fraction};

pub fn render_report_text(summary: &SummaryData) -> String {
    let mut out = String::new();
    let names: Vec<&str> = summary.samples.iter().map(|s| s.name.as_str()).collect();

    out.push_str("Differential Expression Overlap Report\n");
    out.push_str("======================================\n\n");

    out.push_str("1. Thresholds\n");
    out.push_str(&format!(
        "Fold change >= {} (|log2FC| >= {})\n",
        format_f64(summary.thresholds.fold_change),
        format_f64(summary.thresholds.log2_fold_change())
    ));
    out.push_str(&format!("padj <= {}\n", format_f64(summary.thresholds.padj)));
    if let Some(pvalue) = summary.thresholds.pvalue {
        out.push_str(&format!("pvalue <= {}\n", format_f64(pvalue)));
    }
    out.push_str(&format!("Identifier column: {}\n\n", summary.id_column));

    out.push_str("2. Mutants\n");
    for sample in &summary.samples {
        out.push_str(&format!(
            "{}: genes={} DEG={} ({}) Up={} Down={}\n",
            sample.name,
            sample.n_genes,
            sample.counts.deg,
            format_fraction(sample.counts.deg, sample.n_genes),
            sample.counts.up,
            sample.counts.down
        ));
    }
    out.push('\n');

    out.push_str("3. Overlap regions\n");
    for category in &summary.categories {
        render_partition(&mut out, category, &names);
    }
    out.push('\n');

    out.push_str("4. DEG regions by direction\n");
    for label in &summary.regulation_labels {
        out.push_str(&format!(
            "{} [{}]: {} (Up {}, Down {})\n",
            label.code,
            region_members(&label.code, &names),
            label.total,
            label.up,
            label.down
        ));
    }
    out.push('\n');

    out.push_str("5. Inverted regulation\n");
    for composition in &summary.inverted {
        render_partition(&mut out, composition, &names);
    }
    out.push('\n');

    out.push_str("6. Regulation flows\n");
    for flow in &summary.flows {
        out.push_str(&format!(
            "{} -> {}: {} genes, {} switched direction ({})\n",
            flow.from, flow.to, flow.genes, flow.switched, flow.file
        ));
    }

    out
}

fn render_partition(out: &mut String, partition: &PartitionSummary, names: &[&str]) {
    let populated = partition.regions.iter().filter(|r| r.n_genes > 0).count();
    out.push_str(&format!(
        "{} ({}): {} of {} regions populated\n",
        partition.name,
        partition.labels.join(", "),
        populated,
        partition.regions.len()
    ));
    for region in &partition.regions {
        out.push_str(&format!(
            "  {} [{}]: {}\n",
            region.code,
            region_members(&region.code, names),
            region.n_genes
        ));
    }
}

fn region_members(code: &str, names: &[&str]) -> String {
    match RegionCode::parse(code) {
        Some(code) => code
            .members()
            .filter_map(|i| names.get(i).copied())
            .collect::<Vec<_>>()
            .join(" & "),
        None => code.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
