mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod tools;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use crate::input::config::{DEFAULT_ID_COLUMN, RunConfig};
use crate::input::load_input;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::run_overlaps;
use crate::pipeline::stage2_classify::run_stage2;
use crate::pipeline::stage7_report::{Stage7Input, write_reports};
use crate::tools::ToolError;
use crate::tools::dropnan::run_dropnan;
use crate::tools::join::run_join;
use crate::tools::mapgenes::run_mapgenes;
use crate::tools::mkconfig::{DEFAULT_CONFIG_NAME, write_example_config};

const TOOL_NAME: &str = "kira-dgeoverlap";

#[derive(Debug, Parser)]
#[command(name = "kira-dgeoverlap")]
#[command(version)]
#[command(about = "Overlap analysis of differential expression results from several mutants")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify, partition and export 2 to 4 mutant-vs-wild-type tables
    Run {
        /// JSON configuration listing the samples
        config: PathBuf,
        /// Output directory; `_1`, `_2`, ... is appended if it exists
        #[arg(short, long, default_value = "dgeoverlap_output")]
        out: PathBuf,
        /// Linear fold-change threshold
        #[arg(long)]
        fc: Option<f64>,
        /// Adjusted p-value threshold
        #[arg(long)]
        padj: Option<f64>,
        /// Raw p-value threshold for DEG membership
        #[arg(long)]
        pvalue: Option<f64>,
        /// Keep identifiers containing "Novel" or "sRNA"
        #[arg(long)]
        include_novel: bool,
    },
    /// Write an example configuration file
    Mkconfig {
        #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
        out: PathBuf,
    },
    /// Left join of table2 onto table1 by a key column
    Join {
        #[arg(long)]
        table1: PathBuf,
        #[arg(long)]
        table2: PathBuf,
        /// Key column present in both tables
        #[arg(long)]
        on: String,
        #[arg(short, long, default_value = "dgeoverlap_join_output")]
        out: PathBuf,
    },
    /// Annotate a table with the columns of a gene map
    Mapgenes {
        #[arg(long)]
        map: PathBuf,
        /// Map columns to carry over (default: all)
        #[arg(long, num_args = 1..)]
        map_columns: Vec<String>,
        #[arg(long)]
        table: PathBuf,
        /// Key column present in both files; a trailing '#' on map keys is ignored
        #[arg(long)]
        on: String,
        #[arg(short, long, default_value = "dgeoverlap_mapgenes_output")]
        out: PathBuf,
    },
    /// Drop rows whose value in a column is missing
    Dropnan {
        #[arg(long)]
        table: PathBuf,
        #[arg(long)]
        column: String,
        #[arg(long, default_value = DEFAULT_ID_COLUMN)]
        id_column: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ToolError> {
    match cli.command {
        Command::Run {
            config,
            out,
            fc,
            padj,
            pvalue,
            include_novel,
        } => {
            let mut run_config = RunConfig::load(&config)?;
            run_config.thresholds = apply_overrides(run_config.thresholds, fc, padj, pvalue);
            run_config.include_novel |= include_novel;
            let base_dir = config
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            run_analysis(&run_config, &base_dir, &resolve_output_dir(&out))
        }
        Command::Mkconfig { out } => Ok(write_example_config(&out)?),
        Command::Join {
            table1,
            table2,
            on,
            out,
        } => {
            run_join(&table1, &table2, &on, &resolve_output_dir(&out))?;
            Ok(())
        }
        Command::Mapgenes {
            map,
            map_columns,
            table,
            on,
            out,
        } => {
            run_mapgenes(&map, &table, &on, &map_columns, &resolve_output_dir(&out))?;
            Ok(())
        }
        Command::Dropnan {
            table,
            column,
            id_column,
            out,
        } => {
            run_dropnan(&table, &id_column, &column, &out)?;
            Ok(())
        }
    }
}

fn run_analysis(config: &RunConfig, base_dir: &Path, out_dir: &Path) -> Result<(), ToolError> {
    info!(thresholds = %config.thresholds.describe(), "starting analysis");
    let bundle = load_input(config, base_dir)?;

    let mut datasets = Vec::with_capacity(bundle.tables.len());
    for table in &bundle.tables {
        let dataset = run_stage2(table, &config.thresholds)?;
        if dataset.columns.direction_from_ratio() {
            warn!(
                sample = %dataset.name,
                column = dataset.columns.fold_change.as_deref().unwrap_or_default(),
                "no log2 fold change column; fold change read as a signed ratio (values below 1 are Down)"
            );
        }
        let counts = dataset.counts();
        info!(
            sample = %dataset.name,
            deg = counts.deg,
            up = counts.up,
            down = counts.down,
            "classified"
        );
        datasets.push(dataset);
    }

    let results = run_overlaps(&datasets)?;
    for category in &results.categories {
        info!(
            category = category.category.label(),
            genes = category.partition.total_ids(),
            populated = category.partition.non_empty().count(),
            "partitioned"
        );
    }

    let inputs = bundle.sources();
    let stage7 = Stage7Input {
        datasets: &datasets,
        inputs: &inputs,
        results: &results,
        thresholds: config.thresholds,
        id_column: config.id_column.clone(),
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&stage7, out_dir)?;
    Ok(())
}

fn apply_overrides(
    mut thresholds: ThresholdProfile,
    fc: Option<f64>,
    padj: Option<f64>,
    pvalue: Option<f64>,
) -> ThresholdProfile {
    if let Some(fc) = fc {
        thresholds.fold_change = fc;
    }
    if let Some(padj) = padj {
        thresholds.padj = padj;
    }
    if pvalue.is_some() {
        thresholds.pvalue = pvalue;
    }
    thresholds
}

/// First of `base`, `base_1`, `base_2`, ... that does not exist yet.
fn resolve_output_dir(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_path_buf();
    }
    let raw = base.as_os_str().to_string_lossy();
    let stem = raw.trim_end_matches(['/', '\\']);
    let mut n = 1usize;
    loop {
        let candidate = PathBuf::from(format!("{stem}_{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
