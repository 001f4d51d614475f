use crate::report::{plotter, summary};
use crate::utils::preflight::check_required_file;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

pub fn run(prefix: String, output: String) -> Result<()> {
    let summary_path = PathBuf::from(format!("{prefix}.summary.csv"));
    check_required_file(&summary_path, "hap.py summary CSV")?;

    let rows = summary::read_summary(&summary_path)?;
    let rows = summary::snp_indel_rows(&rows);
    if rows.is_empty() {
        bail!(
            "no SNP or INDEL rows with metrics found in {}",
            summary_path.display()
        );
    }

    plotter::plot_metrics(&rows, Path::new(&output))?;
    println!("Plot saved to {output}");
    Ok(())
}
