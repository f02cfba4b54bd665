use super::*;

fn profile() -> ThresholdProfile {
    ThresholdProfile {
        fold_change: 2.0,
        padj: 0.05,
        pvalue: None,
    }
}

#[test]
fn test_boundary_is_inclusive() {
    let th = profile();
    assert_eq!(classify(None, Some(1.0), Some(0.01), &th), Regulation::Up);
    assert_eq!(classify(None, Some(-1.0), Some(0.01), &th), Regulation::Down);
    assert_eq!(
        classify(None, Some(0.999999), Some(0.01), &th),
        Regulation::NotSig
    );
    assert_eq!(
        classify(None, Some(-0.999999), Some(0.01), &th),
        Regulation::NotSig
    );
}

#[test]
fn test_padj_boundary_is_inclusive() {
    let th = profile();
    assert_eq!(classify(None, Some(3.0), Some(0.05), &th), Regulation::Up);
    assert_eq!(
        classify(None, Some(3.0), Some(0.0500001), &th),
        Regulation::NotSig
    );
}

#[test]
fn test_missing_padj_is_not_significant() {
    let th = profile();
    assert_eq!(classify(None, Some(12.0), None, &th), Regulation::NotSig);
    assert_eq!(
        classify(Some(4096.0), Some(12.0), Some(f64::NAN), &th),
        Regulation::NotSig
    );
}

#[test]
fn test_linear_fold_change_only() {
    let th = profile();
    assert_eq!(classify(Some(4.0), None, Some(0.001), &th), Regulation::Up);
    assert_eq!(classify(Some(0.25), None, Some(0.001), &th), Regulation::Down);
    assert_eq!(classify(Some(2.0), None, Some(0.001), &th), Regulation::Up);
    assert_eq!(classify(Some(1.5), None, Some(0.001), &th), Regulation::NotSig);
    assert_eq!(classify(None, None, Some(0.001), &th), Regulation::NotSig);
}

#[test]
fn test_log2_wins_over_linear() {
    let th = profile();
    // 2^|lfc| loses the sign; the log2 value decides direction.
    assert_eq!(
        classify(Some(4.0), Some(-2.0), Some(0.001), &th),
        Regulation::Down
    );
}

#[test]
fn test_fold_change_from_log2_is_symmetric() {
    assert_eq!(fold_change_from_log2(2.0), 4.0);
    assert_eq!(fold_change_from_log2(-2.0), 4.0);
    assert_eq!(fold_change_from_log2(0.0), 1.0);
}

#[test]
fn test_labels_in_flow_order() {
    let labels: Vec<&str> = regulation_order().iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Down", "Not sig", "Up"]);
    assert!(!Regulation::NotSig.is_significant());
}
