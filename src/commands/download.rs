use crate::config::Config;
use crate::giab::{BenchmarkSource, Downloader, HttpFetcher};
use anyhow::Result;
use std::time::Duration;

pub fn run(outdir: String, verify: bool) -> Result<()> {
    let config = Config::load();
    let verify = verify || config.verify_checksums;

    let fetcher = HttpFetcher::new(Duration::from_secs(config.download_timeout))?;
    let downloader = Downloader::new(
        BenchmarkSource::hg002_grch38(),
        outdir,
        verify,
        Box::new(fetcher),
    );
    downloader.download_all()
}
