use crate::error::PipelineError;
use crate::utils::external_tools::{run, ToolInvocation};
use crate::utils::preflight::check_required_files;
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// The variant calling backend. Both produce a compressed VCF from a
/// BAM/CRAM and a reference FASTA; exactly one is used per run and there
/// is no fallback to the other on failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Caller {
    Deepvariant,
    Gatk,
}

impl Caller {
    /// Name of the executable expected on PATH.
    pub fn executable(&self) -> &'static str {
        match self {
            Caller::Deepvariant => "run_deepvariant",
            Caller::Gatk => "gatk",
        }
    }

    /// The VCF this backend writes inside `outdir`. Fixed names keep
    /// re-runs overwriting the same outputs.
    pub fn output_vcf(&self, outdir: &Path) -> PathBuf {
        match self {
            Caller::Deepvariant => outdir.join("deepvariant.vcf.gz"),
            Caller::Gatk => outdir.join("gatk.vcf.gz"),
        }
    }

    /// Builds the backend command line.
    pub fn invocation(&self, bam: &Path, reference: &Path, outdir: &Path) -> ToolInvocation {
        let vcf = self.output_vcf(outdir);
        match self {
            Caller::Deepvariant => ToolInvocation::new(self.executable())
                .arg("--model_type=WGS")
                .arg(format!("--ref={}", reference.display()))
                .arg(format!("--reads={}", bam.display()))
                .arg(format!("--output_vcf={}", vcf.display()))
                .arg(format!("--num_shards={}", default_shards())),
            Caller::Gatk => ToolInvocation::new(self.executable())
                .arg("HaplotypeCaller")
                .arg("-R")
                .arg(reference.display().to_string())
                .arg("-I")
                .arg(bam.display().to_string())
                .arg("-O")
                .arg(vcf.display().to_string()),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Caller::Deepvariant => "deepvariant",
            Caller::Gatk => "gatk",
        })
    }
}

/// DeepVariant shard count: one shard per available processing unit.
pub fn default_shards() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Call variants with the selected backend and return the path of the VCF
/// it declared it would produce. Existence of that file is the evaluation
/// stage's concern.
pub fn call_variants(
    caller: Caller,
    bam: &Path,
    reference: &Path,
    outdir: &Path,
) -> Result<PathBuf, PipelineError> {
    check_required_files([(bam, "input BAM/CRAM"), (reference, "reference FASTA")])?;
    run(&caller.invocation(bam, reference, outdir))?;
    Ok(caller.output_vcf(outdir))
}
