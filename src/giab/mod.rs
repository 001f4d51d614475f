//! Retrieval of the HG002 Genome in a Bottle benchmark files.
//!
//! The truth set is fixed: the benchmark VCF, its tabix index, and the
//! confident-region BED from the GIAB GRCh38 release. Files already on
//! disk are never re-fetched.

use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ftp.ncbi.nlm.nih.gov/giab/ftp/release/AshkenazimTrio/HG002_NA24385_son/latest/GRCh38";

/// Expected digests for a benchmark file. Both must match when
/// verification is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumPair {
    pub md5: String,
    pub sha256: String,
}

/// One file of the benchmark release: a name relative to the base URL and
/// optionally its published digests.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub name: String,
    pub checksums: Option<ChecksumPair>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        FileDescriptor {
            name: name.into(),
            checksums: None,
        }
    }

    pub fn with_checksums(mut self, md5: impl Into<String>, sha256: impl Into<String>) -> Self {
        self.checksums = Some(ChecksumPair {
            md5: md5.into(),
            sha256: sha256.into(),
        });
        self
    }
}

/// A benchmark release to download: base URL plus file manifest. Built
/// once at the command boundary; nothing here is global or mutable.
#[derive(Debug, Clone)]
pub struct BenchmarkSource {
    pub base_url: String,
    pub files: Vec<FileDescriptor>,
}

impl BenchmarkSource {
    /// The HG002 GRCh38 v4.2.1 small-variant benchmark. GIAB publishes no
    /// stable per-file digests for the `latest` release directory, so the
    /// descriptors carry no checksums.
    pub fn hg002_grch38() -> Self {
        BenchmarkSource {
            base_url: DEFAULT_BASE_URL.to_string(),
            files: vec![
                FileDescriptor::new("HG002_GRCh38_1_22_v4.2.1_benchmark.vcf.gz"),
                FileDescriptor::new("HG002_GRCh38_1_22_v4.2.1_benchmark.vcf.gz.tbi"),
                FileDescriptor::new("HG002_GRCh38_1_22_v4.2.1_benchmark.bed"),
            ],
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

/// Seam between the downloader and the network, so the skip and
/// verification paths are testable without touching it.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("fetching {url}"))?;
        let mut file = File::create(dest)
            .with_context(|| format!("creating {}", dest.display()))?;
        io::copy(&mut response, &mut file)?;
        Ok(())
    }
}

/// What happened to one file of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Destination already existed; nothing was fetched.
    Skipped,
    /// Fetched, checksums not checked (verification off or none known).
    Downloaded,
    /// Fetched and both digests matched.
    Verified,
}

pub struct Downloader {
    source: BenchmarkSource,
    outdir: PathBuf,
    verify: bool,
    fetcher: Box<dyn Fetcher>,
}

impl Downloader {
    pub fn new(
        source: BenchmarkSource,
        outdir: impl Into<PathBuf>,
        verify: bool,
        fetcher: Box<dyn Fetcher>,
    ) -> Self {
        Downloader {
            source,
            outdir: outdir.into(),
            verify,
            fetcher,
        }
    }

    /// Fetch every file of the manifest, in order.
    pub fn download_all(&self) -> Result<()> {
        for descriptor in &self.source.files {
            self.download_file(descriptor)?;
        }
        Ok(())
    }

    /// Fetch one file unless it is already on disk. The download lands in
    /// a temporary file next to the destination and is only persisted
    /// under its final name after any verification passed, so an aborted
    /// or mismatched transfer never leaves a partial file behind.
    pub fn download_file(&self, descriptor: &FileDescriptor) -> Result<DownloadOutcome> {
        fs::create_dir_all(&self.outdir)
            .with_context(|| format!("creating {}", self.outdir.display()))?;

        let dest = self.outdir.join(&descriptor.name);
        if dest.exists() {
            info!("[skip] {} already exists", descriptor.name);
            return Ok(DownloadOutcome::Skipped);
        }

        let url = self.source.url_for(&descriptor.name);
        info!("[download] {} -> {}", url, dest.display());

        let progress = ProgressBarBuilder::new(format!("Downloading {}...", descriptor.name))
            .with_tick()
            .build()?;

        let tmp = tempfile::NamedTempFile::new_in(&self.outdir)
            .context("creating temporary download file")?;
        self.fetcher.fetch(&url, tmp.path())?;

        let outcome = if self.verify {
            match &descriptor.checksums {
                Some(expected) => {
                    verify_checksums(tmp.path(), expected)
                        .with_context(|| format!("verifying {}", descriptor.name))?;
                    info!("[verified] {}", descriptor.name);
                    DownloadOutcome::Verified
                }
                None => {
                    warn!(
                        "no published checksums for {}; skipping verification",
                        descriptor.name
                    );
                    DownloadOutcome::Downloaded
                }
            }
        } else {
            DownloadOutcome::Downloaded
        };

        tmp.persist(&dest)
            .with_context(|| format!("moving download into place at {}", dest.display()))?;
        progress.finish_with_message(format!("{} downloaded", descriptor.name));

        Ok(outcome)
    }
}

fn verify_checksums(path: &Path, expected: &ChecksumPair) -> Result<()> {
    let (md5_sum, sha256_sum) = compute_checksums(path)?;
    if md5_sum != expected.md5 {
        bail!("MD5 mismatch: expected {}, got {}", expected.md5, md5_sum);
    }
    if sha256_sum != expected.sha256 {
        bail!(
            "SHA-256 mismatch: expected {}, got {}",
            expected.sha256,
            sha256_sum
        );
    }
    Ok(())
}

/// Both digests in a single streaming pass over the file.
fn compute_checksums(path: &Path) -> Result<(String, String)> {
    let mut file = File::open(path)?;
    let mut md5 = md5::Context::new();
    let mut sha256 = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let count = file.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        md5.consume(&buffer[..count]);
        sha256.update(&buffer[..count]);
    }

    Ok((
        format!("{:x}", md5.compute()),
        format!("{:x}", sha256.finalize()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_handles_trailing_slash() {
        let mut source = BenchmarkSource::hg002_grch38();
        source.base_url = "https://example.org/giab/".to_string();
        assert_eq!(source.url_for("a.bed"), "https://example.org/giab/a.bed");
        source.base_url = "https://example.org/giab".to_string();
        assert_eq!(source.url_for("a.bed"), "https://example.org/giab/a.bed");
    }

    #[test]
    fn default_manifest_lists_vcf_index_and_bed() {
        let source = BenchmarkSource::hg002_grch38();
        let names: Vec<&str> = source.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "HG002_GRCh38_1_22_v4.2.1_benchmark.vcf.gz",
                "HG002_GRCh38_1_22_v4.2.1_benchmark.vcf.gz.tbi",
                "HG002_GRCh38_1_22_v4.2.1_benchmark.bed",
            ]
        );
    }
}
