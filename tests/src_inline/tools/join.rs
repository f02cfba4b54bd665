use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_dgeoverlap_join_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn table(name: &str, columns: &[&str], rows: &[(&str, &[&str])]) -> GeneTable {
    GeneTable::from_rows(
        name,
        "gene_id",
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
fn test_left_join_keeps_left_rows() {
    let left = table("l", &["log2FoldChange"], &[("g1", &["1"]), ("g2", &["-1"])]);
    let right = table(
        "r",
        &["symbol", "log2FoldChange"],
        &[("g2", &["ABC", "5"]), ("g9", &["XYZ", "0"])],
    );
    let result = left_join(&left, &right).unwrap();

    assert_eq!(
        result.joined.columns(),
        &["log2FoldChange", "symbol", "log2FoldChange_2"]
    );
    assert_eq!(result.joined.ids().collect::<Vec<_>>(), vec!["g1", "g2"]);
    assert_eq!(result.joined.row("g1").unwrap().cells, vec!["1", "", ""]);
    assert_eq!(result.joined.row("g2").unwrap().cells, vec!["-1", "ABC", "5"]);

    assert_eq!(result.not_joined.ids().collect::<Vec<_>>(), vec!["g9"]);
    assert_eq!(result.not_joined.columns(), right.columns());
}

#[test]
fn test_run_join_writes_files() {
    let dir = make_temp_dir();
    let t1 = dir.join("degs.tsv");
    let t2 = dir.join("annot.tsv");
    fs::write(&t1, "gene_id\tpadj\ng1\t0.01\ng2\t0.2\n").unwrap();
    fs::write(&t2, "gene_id\tproduct\ng2\tkinase\ng3\tlyase\n").unwrap();

    let out = dir.join("out");
    let (joined, not_joined) = run_join(&t1, &t2, "gene_id", &out).unwrap();
    assert_eq!(joined, out.join("degs.tsv_joined.tsv"));
    assert_eq!(not_joined, out.join("annot.tsv_notjoined.tsv"));
    assert_eq!(
        fs::read_to_string(&joined).unwrap(),
        "gene_id\tpadj\tproduct\ng1\t0.01\t\ng2\t0.2\tkinase\n"
    );
    assert_eq!(
        fs::read_to_string(&not_joined).unwrap(),
        "gene_id\tproduct\ng3\tlyase\n"
    );
}

#[test]
fn test_run_join_missing_key() {
    let dir = make_temp_dir();
    let t1 = dir.join("a.tsv");
    fs::write(&t1, "id\tx\n1\t2\n").unwrap();
    assert!(run_join(&t1, &t1, "gene_id", &dir.join("out")).is_err());
}
