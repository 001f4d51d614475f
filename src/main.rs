use clap::Parser;
use log::LevelFilter;

use varbench_tools::cli::{Args, Commands};
use varbench_tools::commands;
use varbench_tools::error::PipelineError;

fn main() {
    let args = Args::parse();

    let filter_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let result = match args.command {
        Commands::Download { outdir, verify } => commands::download::run(outdir, verify),
        Commands::Run {
            bam,
            reference,
            truth_vcf,
            truth_bed,
            outdir,
            caller,
        } => commands::run::run(bam, reference, truth_vcf, truth_bed, outdir, caller),
        Commands::Plot { prefix, output } => commands::plot::run(prefix, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

/// A failing child's exit status is propagated when it had one; every
/// other failure exits 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::InvocationFailure { code, .. }) if *code > 0 => *code,
        _ => 1,
    }
}
