use crate::pipeline::caller::Caller;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the HG002 GIAB benchmark VCF and BED files
    Download {
        /// Output directory for downloaded files
        #[arg(short = 'o', long = "outdir", default_value = "data")]
        outdir: String,

        /// Verify MD5/SHA-256 checksums of downloaded files
        #[arg(long)]
        verify: bool,
    },

    /// Call variants from a BAM/CRAM and evaluate them against the HG002 truth set
    Run {
        /// Input aligned BAM/CRAM file
        #[arg(long)]
        bam: String,

        /// Reference FASTA
        #[arg(long = "ref")]
        reference: String,

        /// Benchmark VCF
        #[arg(
            long = "truth-vcf",
            default_value = "data/HG002_GRCh38_1_22_v4.2.1_benchmark.vcf.gz"
        )]
        truth_vcf: String,

        /// Benchmark BED
        #[arg(
            long = "truth-bed",
            default_value = "data/HG002_GRCh38_1_22_v4.2.1_benchmark.bed"
        )]
        truth_bed: String,

        /// Output directory
        #[arg(short = 'o', long = "outdir", default_value = "results")]
        outdir: String,

        /// Variant caller to use
        #[arg(long, value_enum, default_value_t = Caller::Deepvariant)]
        caller: Caller,
    },

    /// Plot hap.py evaluation metrics as a bar chart
    Plot {
        /// Prefix of hap.py output files (e.g. results/happy)
        prefix: String,

        /// Output image file
        #[arg(short = 'o', long = "output", default_value = "evaluation_metrics.svg")]
        output: String,
    },
}
