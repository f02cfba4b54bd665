use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_dgeoverlap_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_parse_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "kira-dgeoverlap",
        "run",
        "cfg.json",
        "--out",
        "res",
        "--fc",
        "1.5",
        "--pvalue",
        "0.01",
        "--include-novel",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Run {
            config,
            out,
            fc,
            padj,
            pvalue,
            include_novel,
        } => {
            assert_eq!(config, PathBuf::from("cfg.json"));
            assert_eq!(out, PathBuf::from("res"));
            assert_eq!(fc, Some(1.5));
            assert_eq!(padj, None);
            assert_eq!(pvalue, Some(0.01));
            assert!(include_novel);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_join_requires_key() {
    assert!(
        Cli::try_parse_from(["kira-dgeoverlap", "join", "--table1", "a", "--table2", "b"]).is_err()
    );
    let cli = Cli::try_parse_from([
        "kira-dgeoverlap",
        "join",
        "--table1",
        "a.tsv",
        "--table2",
        "b.tsv",
        "--on",
        "gene_id",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Join { ref on, .. } if on == "gene_id"));
}

#[test]
fn test_parse_mapgenes_column_list() {
    let cli = Cli::try_parse_from([
        "kira-dgeoverlap",
        "mapgenes",
        "--map",
        "map.tsv",
        "--map-columns",
        "locus_tag",
        "symbol",
        "--table",
        "degs.tsv",
        "--on",
        "locus_tag",
    ])
    .unwrap();
    match cli.command {
        Command::Mapgenes {
            map,
            map_columns,
            table,
            on,
            out,
        } => {
            assert_eq!(map, PathBuf::from("map.tsv"));
            assert_eq!(map_columns, vec!["locus_tag", "symbol"]);
            assert_eq!(table, PathBuf::from("degs.tsv"));
            assert_eq!(on, "locus_tag");
            assert_eq!(out, PathBuf::from("dgeoverlap_mapgenes_output"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_dropnan_defaults() {
    assert!(Cli::try_parse_from(["kira-dgeoverlap", "dropnan", "--table", "a.tsv"]).is_err());
    let cli = Cli::try_parse_from([
        "kira-dgeoverlap",
        "dropnan",
        "--table",
        "a.tsv",
        "--column",
        "padj",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Dropnan { ref column, ref id_column, ref out, .. }
            if column == "padj" && id_column == "gene_id" && out == Path::new(".")
    ));
}

#[test]
fn test_mkconfig_default_path() {
    let cli = Cli::try_parse_from(["kira-dgeoverlap", "mkconfig"]).unwrap();
    assert!(matches!(cli.command, Command::Mkconfig { ref out } if out == Path::new("config.json")));
}

#[test]
fn test_apply_overrides() {
    let base = ThresholdProfile::default_v1();
    let same = apply_overrides(base, None, None, None);
    assert_eq!(same, base);
    let changed = apply_overrides(base, Some(4.0), Some(0.01), Some(0.05));
    assert_eq!(changed.fold_change, 4.0);
    assert_eq!(changed.padj, 0.01);
    assert_eq!(changed.pvalue, Some(0.05));
}

#[test]
fn test_resolve_output_dir_suffixes() {
    let dir = make_temp_dir();
    let base = dir.join("out");
    assert_eq!(resolve_output_dir(&base), base);
    fs::create_dir_all(&base).unwrap();
    assert_eq!(resolve_output_dir(&base), dir.join("out_1"));
    fs::create_dir_all(dir.join("out_1")).unwrap();
    assert_eq!(resolve_output_dir(&base), dir.join("out_2"));
}

#[test]
fn test_run_analysis_end_to_end() {
    let dir = make_temp_dir();
    fs::write(
        dir.join("a.tsv"),
        "gene_id\tlog2FoldChange\tpvalue\tpadj\tgene_name\n\
         g1\t2\t0.001\t0.01\tAAA\n\
         g2\t-1.2\t0.001\t0.02\tBBB\n\
         g3\t0.3\t0.4\t0.9\tCCC\n\
         Novel01\t5\t0.001\t0.001\t--\n",
    )
    .unwrap();
    fs::write(
        dir.join("b.tsv"),
        "gene_id\tlog2FoldChange\tpvalue\tpadj\tgene_name\n\
         g1\t1\t0.001\t0.05\tAAA\n\
         g2\t3\t0.001\t0.001\tBBB\n\
         g4\t-2\t0.001\t0.001\tDDD\n",
    )
    .unwrap();
    let config = RunConfig::from_json(r#"{"samples": {"mutA": "a.tsv", "mutB": "b.tsv"}}"#).unwrap();
    let out = dir.join("results");
    run_analysis(&config, &dir, &out).unwrap();

    let shared = fs::read_to_string(out.join("dataframes/DEG/DEG_11.tsv")).unwrap();
    assert_eq!(shared.lines().count(), 3);
    assert!(shared.lines().next().unwrap().ends_with("\tgene_name"));
    let input_a = fs::read_to_string(out.join("dataframes/mutA/mutA_input.tsv")).unwrap();
    assert!(!input_a.contains("Novel01"));
    assert!(out.join("flows/mutB_vs_mutA.tsv").is_file());
    assert!(out.join("dataframes/mutB_Up_others_Down/mutB_Up_others_Down_11.tsv").is_file());
}
