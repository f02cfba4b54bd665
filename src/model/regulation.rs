use serde::Serialize;

use crate::model::thresholds::ThresholdProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Regulation {
    Down,
    NotSig,
    Up,
}

impl Regulation {
    pub fn label(self) -> &'static str {
        match self {
            Regulation::Up => "Up",
            Regulation::Down => "Down",
            Regulation::NotSig => "Not sig",
        }
    }

    pub fn is_significant(self) -> bool {
        self != Regulation::NotSig
    }
}

/// Flow-diagram order: Down, Not sig, Up.
pub fn regulation_order() -> &'static [Regulation] {
    &[Regulation::Down, Regulation::NotSig, Regulation::Up]
}

/// Regulation call for one gene. Boundaries are inclusive: a log2 fold change
/// exactly at `log2(thresholds.fold_change)` is significant.
///
/// `log2_fold_change` wins over `fold_change` when both are present, since only
/// it carries the direction; a lone linear value is read as a ratio.
pub fn classify(
    fold_change: Option<f64>,
    log2_fold_change: Option<f64>,
    padj: Option<f64>,
    thresholds: &ThresholdProfile,
) -> Regulation {
    let Some(padj) = padj.filter(|v| !v.is_nan()) else {
        return Regulation::NotSig;
    };
    let lfc = match log2_fold_change.filter(|v| !v.is_nan()) {
        Some(v) => v,
        None => match fold_change.filter(|v| !v.is_nan() && *v > 0.0) {
            Some(fc) => fc.log2(),
            None => return Regulation::NotSig,
        },
    };
    let threshold_log2 = thresholds.log2_fold_change();

    if padj > thresholds.padj {
        Regulation::NotSig
    } else if lfc <= -threshold_log2 {
        Regulation::Down
    } else if lfc >= threshold_log2 {
        Regulation::Up
    } else {
        Regulation::NotSig
    }
}

/// Linear fold change magnitude derived from a log2 value.
pub fn fold_change_from_log2(log2_fold_change: f64) -> f64 {
    2f64.powf(log2_fold_change.abs())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/regulation.rs"]
mod tests;
