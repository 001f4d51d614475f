use crate::pipeline::caller::Caller;
use crate::pipeline::driver::{run_pipeline, PipelinePaths};
use anyhow::Result;
use log::info;

pub fn run(
    bam: String,
    reference: String,
    truth_vcf: String,
    truth_bed: String,
    outdir: String,
    caller: Caller,
) -> Result<()> {
    let paths = PipelinePaths {
        bam: bam.into(),
        reference: reference.into(),
        truth_vcf: truth_vcf.into(),
        truth_bed: truth_bed.into(),
        outdir: outdir.into(),
    };

    let outputs = run_pipeline(&paths, caller)?;
    info!(
        "Benchmark summary written to {}",
        outputs.summary_csv.display()
    );
    Ok(())
}
