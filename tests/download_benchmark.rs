use anyhow::Result;
use std::fs;
use std::path::Path;
use varbench_tools::giab::{
    BenchmarkSource, DownloadOutcome, Downloader, Fetcher, FileDescriptor,
};

/// Fails the test if the downloader reaches for the network at all.
struct PanickingFetcher;

impl Fetcher for PanickingFetcher {
    fn fetch(&self, _url: &str, _dest: &Path) -> Result<()> {
        panic!("fetch must not be called for existing files");
    }
}

/// Serves fixed bytes instead of going to the network.
struct StaticFetcher(&'static [u8]);

impl Fetcher for StaticFetcher {
    fn fetch(&self, _url: &str, dest: &Path) -> Result<()> {
        fs::write(dest, self.0)?;
        Ok(())
    }
}

fn single_file_source(descriptor: FileDescriptor) -> BenchmarkSource {
    BenchmarkSource {
        base_url: "http://benchmark.invalid/release".to_string(),
        files: vec![descriptor],
    }
}

// Digests of b"hello world".
const HELLO_MD5: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";
const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

#[test]
fn existing_file_is_skipped_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = FileDescriptor::new("dummy.txt");
    fs::write(dir.path().join("dummy.txt"), "existing").unwrap();

    let downloader = Downloader::new(
        single_file_source(descriptor.clone()),
        dir.path(),
        false,
        Box::new(PanickingFetcher),
    );
    let outcome = downloader.download_file(&descriptor).unwrap();

    assert_eq!(outcome, DownloadOutcome::Skipped);
    assert_eq!(fs::read(dir.path().join("dummy.txt")).unwrap(), b"existing");
}

#[test]
fn missing_file_is_fetched_under_its_fixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = FileDescriptor::new("benchmark.bed");

    let downloader = Downloader::new(
        single_file_source(descriptor.clone()),
        dir.path(),
        false,
        Box::new(StaticFetcher(b"hello world")),
    );
    let outcome = downloader.download_file(&descriptor).unwrap();

    assert_eq!(outcome, DownloadOutcome::Downloaded);
    assert_eq!(
        fs::read(dir.path().join("benchmark.bed")).unwrap(),
        b"hello world"
    );
}

#[test]
fn matching_checksums_verify() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = FileDescriptor::new("benchmark.bed").with_checksums(HELLO_MD5, HELLO_SHA256);

    let downloader = Downloader::new(
        single_file_source(descriptor.clone()),
        dir.path(),
        true,
        Box::new(StaticFetcher(b"hello world")),
    );
    let outcome = downloader.download_file(&descriptor).unwrap();

    assert_eq!(outcome, DownloadOutcome::Verified);
    assert!(dir.path().join("benchmark.bed").exists());
}

#[test]
fn mismatched_checksums_discard_the_download() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = FileDescriptor::new("benchmark.bed")
        .with_checksums(HELLO_MD5, "0000000000000000000000000000000000000000000000000000000000000000");

    let downloader = Downloader::new(
        single_file_source(descriptor.clone()),
        dir.path(),
        true,
        Box::new(StaticFetcher(b"hello world")),
    );
    let err = downloader.download_file(&descriptor).unwrap_err();

    assert!(err.to_string().contains("verifying benchmark.bed"));
    assert!(!dir.path().join("benchmark.bed").exists());
    // the temporary file must be cleaned up as well
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn verification_without_known_checksums_still_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = FileDescriptor::new("benchmark.bed");

    let downloader = Downloader::new(
        single_file_source(descriptor.clone()),
        dir.path(),
        true,
        Box::new(StaticFetcher(b"hello world")),
    );
    let outcome = downloader.download_file(&descriptor).unwrap();

    assert_eq!(outcome, DownloadOutcome::Downloaded);
    assert!(dir.path().join("benchmark.bed").exists());
}
