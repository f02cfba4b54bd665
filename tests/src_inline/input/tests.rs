use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::config::RunConfig;
use super::{InputError, load_input, resolve_path};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_dgeoverlap_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_resolve_path() {
    assert_eq!(
        resolve_path(Path::new("/cfg"), "a.tsv"),
        PathBuf::from("/cfg/a.tsv")
    );
    assert_eq!(
        resolve_path(Path::new("/cfg"), "/abs/a.tsv"),
        PathBuf::from("/abs/a.tsv")
    );
}

#[test]
fn test_load_input_in_config_order() {
    let dir = make_temp_dir();
    fs::write(
        dir.join("b.tsv"),
        "gene_id\tlog2FoldChange\tpadj\ng1\t2\t0.01\ng2\t0\t1\n",
    )
    .unwrap();
    fs::write(dir.join("a.tsv"), "gene_id\tlog2FoldChange\tpadj\ng1\t-3\t0.001\n").unwrap();

    let config =
        RunConfig::from_json(r#"{"samples": {"mutB": "b.tsv", "mutA": "a.tsv"}}"#).unwrap();
    let bundle = load_input(&config, &dir).unwrap();
    assert_eq!(bundle.tables.len(), 2);
    assert_eq!(bundle.tables[0].name(), "mutB");
    assert_eq!(bundle.tables[0].len(), 2);
    assert_eq!(bundle.tables[1].name(), "mutA");
    assert!(bundle.sources()[1].ends_with("a.tsv"));
}

#[test]
fn test_load_input_missing_sample() {
    let dir = make_temp_dir();
    let config =
        RunConfig::from_json(r#"{"samples": {"a": "a.tsv", "b": "b.tsv"}}"#).unwrap();
    assert!(matches!(
        load_input(&config, &dir),
        Err(InputError::MissingInput(_))
    ));
}
