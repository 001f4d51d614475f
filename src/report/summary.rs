use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One row of the hap.py summary table. Only the columns the plot needs
/// are read; anything else in the file is ignored. hap.py leaves metric
/// cells blank on empty strata, hence the options.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsRow {
    #[serde(rename = "Type")]
    pub variant_type: String,
    #[serde(rename = "Recall")]
    pub recall: Option<f64>,
    #[serde(rename = "Precision")]
    pub precision: Option<f64>,
    #[serde(rename = "F1_Score")]
    pub f1_score: Option<f64>,
}

impl MetricsRow {
    /// Recall, precision, F1 when the row has all three.
    pub fn metrics(&self) -> Option<(f64, f64, f64)> {
        Some((self.recall?, self.precision?, self.f1_score?))
    }
}

/// Read every row of a hap.py summary CSV.
pub fn read_summary(path: &Path) -> Result<Vec<MetricsRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: MetricsRow =
            record.with_context(|| format!("parsing {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// The rows worth plotting: SNP and INDEL entries with all three metrics
/// present.
pub fn snp_indel_rows(rows: &[MetricsRow]) -> Vec<MetricsRow> {
    rows.iter()
        .filter(|row| matches!(row.variant_type.as_str(), "SNP" | "INDEL"))
        .filter(|row| row.metrics().is_some())
        .cloned()
        .collect()
}
