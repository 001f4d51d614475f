use crate::error::PipelineError;
use crate::pipeline::{caller, caller::Caller, evaluator};
use crate::utils::preflight::{check_required_files, check_required_tools};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Input and output locations for one pipeline run, supplied once and
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    pub bam: PathBuf,
    pub reference: PathBuf,
    pub truth_vcf: PathBuf,
    pub truth_bed: PathBuf,
    pub outdir: PathBuf,
}

/// Where the interesting outputs of a completed run landed.
#[derive(Debug)]
pub struct PipelineOutputs {
    pub query_vcf: PathBuf,
    pub summary_csv: PathBuf,
}

#[derive(Serialize)]
struct RunManifest<'a> {
    caller: String,
    bam: &'a Path,
    reference: &'a Path,
    truth_vcf: &'a Path,
    truth_bed: &'a Path,
    query_vcf: &'a Path,
    summary_csv: &'a Path,
    completed_at: String,
}

/// Runs validate -> call -> evaluate. Linear, no branching back: the
/// first failing precondition or invocation aborts the whole run.
pub fn run_pipeline(paths: &PipelinePaths, caller: Caller) -> Result<PipelineOutputs> {
    validate(paths, caller).context("validation stage failed")?;

    fs::create_dir_all(&paths.outdir)
        .with_context(|| format!("creating output directory {}", paths.outdir.display()))?;

    info!("Calling variants with {caller}...");
    let query_vcf = caller::call_variants(caller, &paths.bam, &paths.reference, &paths.outdir)
        .context("variant calling stage failed")?;

    info!("Comparing calls against the truth set...");
    let summary_csv = evaluator::evaluate(
        &paths.truth_vcf,
        &paths.truth_bed,
        &query_vcf,
        &paths.reference,
        &paths.outdir,
    )
    .context("evaluation stage failed")?;

    write_manifest(paths, caller, &query_vcf, &summary_csv)?;

    Ok(PipelineOutputs {
        query_vcf,
        summary_csv,
    })
}

/// Everything the run needs must be present before the first child
/// process starts: all four input files, the selected caller executable,
/// and the evaluator.
fn validate(paths: &PipelinePaths, caller: Caller) -> Result<(), PipelineError> {
    check_required_files([
        (paths.bam.as_path(), "input BAM/CRAM"),
        (paths.reference.as_path(), "reference FASTA"),
        (paths.truth_vcf.as_path(), "truth VCF"),
        (paths.truth_bed.as_path(), "truth BED"),
    ])?;
    check_required_tools(&[caller.executable(), evaluator::EVAL_TOOL])?;
    Ok(())
}

fn write_manifest(
    paths: &PipelinePaths,
    caller: Caller,
    query_vcf: &Path,
    summary_csv: &Path,
) -> Result<()> {
    let manifest = RunManifest {
        caller: caller.to_string(),
        bam: &paths.bam,
        reference: &paths.reference,
        truth_vcf: &paths.truth_vcf,
        truth_bed: &paths.truth_bed,
        query_vcf,
        summary_csv,
        completed_at: chrono::Local::now().to_rfc3339(),
    };

    let manifest_path = paths.outdir.join("run_manifest.json");
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("writing {}", manifest_path.display()))?;
    Ok(())
}
