use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_dgeoverlap_mapgenes_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn table(name: &str, columns: &[&str], rows: &[(&str, &[&str])]) -> GeneTable {
    GeneTable::from_rows(
        name,
        "locus_tag",
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|(id, cells)| GeneRow {
                id: id.to_string(),
                cells: cells.iter().map(|c| c.to_string()).collect(),
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_trailing_hash_stripped_first_kept() {
    let map = table(
        "map",
        &["symbol"],
        &[("b0001#", &["thrL"]), ("b0001", &["dup"]), ("b0002", &["thrA"])],
    );
    let stripped = strip_map_keys(&map).unwrap();
    assert_eq!(stripped.ids().collect::<Vec<_>>(), vec!["b0001", "b0002"]);
    assert_eq!(stripped.row("b0001").unwrap().cells, vec!["thrL"]);
}

#[test]
fn test_map_columns_come_first() {
    let map = table(
        "map",
        &["symbol", "product"],
        &[("b0001#", &["thrL", "leader"]), ("b0099", &["yyy", "unknown"])],
    );
    let degs = table(
        "degs",
        &["log2FoldChange"],
        &[("b0001", &["2"]), ("b0003", &["0.5"])],
    );
    let result = map_genes(&map, &degs, &[]).unwrap();

    assert_eq!(result.joined.columns(), &["symbol", "product", "log2FoldChange"]);
    assert_eq!(result.joined.ids().collect::<Vec<_>>(), vec!["b0001", "b0003"]);
    assert_eq!(result.joined.row("b0001").unwrap().cells, vec!["thrL", "leader", "2"]);
    assert_eq!(result.joined.row("b0003").unwrap().cells, vec!["", "", "0.5"]);
    assert_eq!(result.not_joined.ids().collect::<Vec<_>>(), vec!["b0099"]);
}

#[test]
fn test_selected_map_columns() {
    let map = table("map", &["symbol", "product"], &[("b0001", &["thrL", "leader"])]);
    let degs = table("degs", &["padj"], &[("b0001", &["0.01"])]);

    let columns = vec!["locus_tag".to_string(), "product".to_string()];
    let result = map_genes(&map, &degs, &columns).unwrap();
    assert_eq!(result.joined.columns(), &["product", "padj"]);
    assert_eq!(result.joined.row("b0001").unwrap().cells, vec!["leader", "0.01"]);

    let key_only = vec!["locus_tag".to_string()];
    let result = map_genes(&map, &degs, &key_only).unwrap();
    assert_eq!(result.joined.columns(), &["padj"]);

    let missing = vec!["gene_name".to_string()];
    assert!(matches!(
        map_genes(&map, &degs, &missing),
        Err(PipelineError::MissingColumn { ref column, .. }) if column == "gene_name"
    ));
}

#[test]
fn test_run_mapgenes_writes_files() {
    let dir = make_temp_dir();
    let map = dir.join("ecoli_map.tsv");
    let degs = dir.join("degs.tsv");
    fs::write(
        &map,
        "locus_tag\tsymbol\tproduct\nb0001#\tthrL\tleader\nb0002\tthrA\tkinase\nb0099\tyyy\tNA\n",
    )
    .unwrap();
    fs::write(&degs, "locus_tag\tlog2FoldChange\nb0001\t2\nb0002\t-1\nb0003\t0.5\n").unwrap();

    let out = dir.join("out");
    let columns = vec!["symbol".to_string()];
    let (mapped, not_mapped) = run_mapgenes(&map, &degs, "locus_tag", &columns, &out).unwrap();
    assert_eq!(mapped, out.join("degs.tsv_mapped.tsv"));
    assert_eq!(not_mapped, out.join("ecoli_map.tsv_notmapped.tsv"));
    assert_eq!(
        fs::read_to_string(&mapped).unwrap(),
        "locus_tag\tsymbol\tlog2FoldChange\nb0001\tthrL\t2\nb0002\tthrA\t-1\nb0003\t\t0.5\n"
    );
    assert_eq!(
        fs::read_to_string(&not_mapped).unwrap(),
        "locus_tag\tsymbol\nb0099\tyyy\n"
    );
}
