use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdProfile {
    /// Linear fold-change cutoff; the log2 boundary is `log2(fold_change)`.
    pub fold_change: f64,
    pub padj: f64,
    /// Optional raw p-value cutoff applied on top of the regulation call.
    pub pvalue: Option<f64>,
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ThresholdProfile {
    pub fn default_v1() -> Self {
        Self {
            fold_change: 2.0,
            padj: 0.05,
            pvalue: None,
        }
    }

    pub fn log2_fold_change(&self) -> f64 {
        self.fold_change.log2()
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.fold_change.is_finite() || self.fold_change < 1.0 {
            return Err(PipelineError::InvalidThreshold {
                field: "fold_change",
                value: self.fold_change,
                expected: "finite and >= 1",
            });
        }
        if !(self.padj > 0.0 && self.padj <= 1.0) {
            return Err(PipelineError::InvalidThreshold {
                field: "padj",
                value: self.padj,
                expected: "in (0, 1]",
            });
        }
        if let Some(p) = self.pvalue {
            if !(p > 0.0 && p <= 1.0) {
                return Err(PipelineError::InvalidThreshold {
                    field: "pvalue",
                    value: p,
                    expected: "in (0, 1]",
                });
            }
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self.pvalue {
            Some(p) => format!(
                "padj <= {}, |FC| >= {}, pvalue <= {}",
                self.padj, self.fold_change, p
            ),
            None => format!("padj <= {}, |FC| >= {}", self.padj, self.fold_change),
        }
    }
}
