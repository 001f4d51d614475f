use crate::error::PipelineError;
use crate::utils::external_tools::{run, ToolInvocation};
use crate::utils::preflight::check_required_files;
use std::path::{Path, PathBuf};

/// The external benchmarking tool comparing query calls to the truth set.
pub const EVAL_TOOL: &str = "hap.py";

/// All hap.py outputs share this prefix inside the output directory.
pub fn happy_prefix(outdir: &Path) -> PathBuf {
    outdir.join("happy")
}

/// The summary table hap.py writes next to its other outputs.
pub fn summary_csv(outdir: &Path) -> PathBuf {
    PathBuf::from(format!("{}.summary.csv", happy_prefix(outdir).display()))
}

/// Builds the hap.py command line.
pub fn invocation(
    truth_vcf: &Path,
    truth_bed: &Path,
    query_vcf: &Path,
    reference: &Path,
    outdir: &Path,
) -> ToolInvocation {
    ToolInvocation::new(EVAL_TOOL)
        .arg(truth_vcf.display().to_string())
        .arg(query_vcf.display().to_string())
        .arg("-f")
        .arg(truth_bed.display().to_string())
        .arg("-r")
        .arg(reference.display().to_string())
        .arg("-o")
        .arg(happy_prefix(outdir).display().to_string())
}

/// Compare the query VCF against the truth VCF/BED pair and return the
/// path of the summary CSV. No result parsing happens here; the plot
/// stage reads the summary independently.
pub fn evaluate(
    truth_vcf: &Path,
    truth_bed: &Path,
    query_vcf: &Path,
    reference: &Path,
    outdir: &Path,
) -> Result<PathBuf, PipelineError> {
    check_required_files([
        (truth_vcf, "truth VCF"),
        (truth_bed, "truth BED"),
        (query_vcf, "query VCF"),
        (reference, "reference FASTA"),
    ])?;
    run(&invocation(truth_vcf, truth_bed, query_vcf, reference, outdir))?;
    Ok(summary_csv(outdir))
}
