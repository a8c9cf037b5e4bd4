use anyhow::{bail, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::aggregate::{Aggregator, IngestStats, SharedAggregator};
use crate::config::Config;
use crate::error::{LoadError, SkippedFile};
use crate::record::Record;
use crate::utils::archive::{extract_zip, is_zip_archive};
use crate::utils::io::{discover_text_files, read_text_lossy};
use crate::utils::system::resolve_worker_threads;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub lines_read: usize,
    pub records_extracted: usize,
    pub records_inserted: usize,
    pub records_replaced: usize,
    pub records_discarded: usize,
    pub processing_time_ms: u64,
}

impl RunStats {
    fn absorb(&mut self, ingest: IngestStats) {
        self.records_extracted += ingest.records_extracted;
        self.records_inserted += ingest.inserted;
        self.records_replaced += ingest.replaced;
        self.records_discarded += ingest.discarded;
    }
}

/// Everything one run produced. The aggregator is final; a new run builds a new one.
#[derive(Debug)]
pub struct RunOutcome {
    pub aggregator: Aggregator,
    pub stats: RunStats,
    pub skipped: Vec<SkippedFile>,
}

/// Records parsed out of one file, with no shared state touched.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub lines_read: usize,
    pub records: Vec<Record>,
}

pub fn parse_file(path: &Path) -> Result<ParsedFile, LoadError> {
    let text = read_text_lossy(path)?;
    let mut lines_read = 0;
    let mut records = Vec::new();

    for line in text.lines() {
        lines_read += 1;
        if let Some(record) = Record::from_line(line) {
            records.push(record);
        }
    }

    Ok(ParsedFile {
        path: path.to_path_buf(),
        lines_read,
        records,
    })
}

fn log_parsed(file: &ParsedFile) {
    debug!(
        "Parsed {}: {} lines, {} records",
        file.path.display(),
        file.lines_read,
        file.records.len()
    );
}

pub struct SortProcessor {
    config: Config,
}

impl SortProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run over a directory, or over a ZIP archive unpacked into a temporary
    /// directory that is removed once the run finishes.
    pub fn process_input(&self, input: &Path) -> Result<RunOutcome> {
        if input.is_dir() {
            return self.process(input);
        }
        if !is_zip_archive(input) {
            bail!("Input must be a directory or a .zip archive: {}", input.display());
        }

        info!("Extracting archive {}", input.display());
        let extracted = extract_zip(input)?;
        self.process(extracted.path())
    }

    /// Parse every eligible file under `input_dir` into a fresh aggregator.
    /// Files that cannot be walked, opened or read are reported in
    /// `RunOutcome::skipped` and do not fail the run.
    pub fn process(&self, input_dir: &Path) -> Result<RunOutcome> {
        let start_time = Instant::now();
        let (files, walk_errors) = discover_text_files(input_dir, &self.config.io.file_extensions);

        let mut stats = RunStats {
            files_discovered: files.len(),
            ..RunStats::default()
        };
        let mut skipped: Vec<SkippedFile> = walk_errors.iter().map(SkippedFile::from).collect();
        for error in &walk_errors {
            warn!("Skipping {}", error);
        }

        let threads = resolve_worker_threads(self.config.processing.max_threads);
        info!("Found {} text files under {}", files.len(), input_dir.display());
        debug!("Parsing with {} worker threads", threads);

        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        let case_sensitive = self.config.dedup.case_sensitive_identities;

        let aggregator = if self.config.processing.ordered_merge {
            let parsed: Vec<Result<ParsedFile, LoadError>> =
                pool.install(|| files.par_iter().map(|path| parse_file(path)).collect());

            let mut aggregator = Aggregator::with_case_sensitivity(case_sensitive);
            for result in parsed {
                match result {
                    Ok(file) => {
                        log_parsed(&file);
                        stats.files_processed += 1;
                        stats.lines_read += file.lines_read;
                        stats.absorb(aggregator.merge_all(file.records));
                    }
                    Err(e) => {
                        warn!("Skipping {}", e);
                        skipped.push(SkippedFile::from(&e));
                    }
                }
            }
            aggregator
        } else {
            let shared = SharedAggregator::new(Aggregator::with_case_sensitivity(case_sensitive));
            let totals = Mutex::new((RunStats::default(), Vec::<SkippedFile>::new()));

            pool.install(|| {
                files.par_iter().for_each(|path| match parse_file(path) {
                    Ok(file) => {
                        log_parsed(&file);
                        let lines_read = file.lines_read;
                        let ingest = shared.merge_all(file.records);

                        let mut guard = totals.lock();
                        guard.0.files_processed += 1;
                        guard.0.lines_read += lines_read;
                        guard.0.absorb(ingest);
                    }
                    Err(e) => {
                        warn!("Skipping {}", e);
                        totals.lock().1.push(SkippedFile::from(&e));
                    }
                })
            });

            let (streamed, mut streamed_skips) = totals.into_inner();
            stats.files_processed += streamed.files_processed;
            stats.lines_read += streamed.lines_read;
            stats.records_extracted += streamed.records_extracted;
            stats.records_inserted += streamed.records_inserted;
            stats.records_replaced += streamed.records_replaced;
            stats.records_discarded += streamed.records_discarded;
            streamed_skips.sort_by(|a, b| a.path.cmp(&b.path));
            skipped.extend(streamed_skips);

            shared.into_inner()
        };

        stats.files_skipped = skipped.len();
        stats.processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Processed {} files ({} skipped): {} lines, {} records, {} unique accounts",
            stats.files_processed,
            stats.files_skipped,
            stats.lines_read,
            stats.records_extracted,
            aggregator.len()
        );

        Ok(RunOutcome {
            aggregator,
            stats,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file_counts_lines() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        fs::write(
            &path,
            "# export\n====\na@b.com:p | Vbucks: 10\n\ngarbage\nc@d.com:q | FA: Yes\n",
        )
        .unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.lines_read, 6);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].identity, "a@b.com");
    }

    #[test]
    fn test_parse_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = parse_file(&temp_dir.path().join("gone.txt"));

        assert!(matches!(result, Err(LoadError::Open { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = tempdir().unwrap();
        let outcome = SortProcessor::new(Config::default()).process(temp_dir.path()).unwrap();

        assert!(outcome.aggregator.is_empty());
        assert_eq!(outcome.stats.files_discovered, 0);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_missing_input_directory_is_reported() {
        let temp_dir = tempdir().unwrap();
        let outcome = SortProcessor::new(Config::default())
            .process(&temp_dir.path().join("nope"))
            .unwrap();

        assert!(outcome.aggregator.is_empty());
        assert_eq!(outcome.stats.files_skipped, 1);
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_process_input_reads_zip_archive() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let temp_dir = tempdir().unwrap();
        let zip_path = temp_dir.path().join("upload.zip");
        let mut writer = zip::ZipWriter::new(fs::File::create(&zip_path).unwrap());
        writer.start_file("logs/hits.txt", SimpleFileOptions::default()).unwrap();
        writer
            .write_all(b"a@b.com:pw | Vbucks: 10
a@b.com:better | Vbucks: 30
")
            .unwrap();
        writer.finish().unwrap();

        let outcome = SortProcessor::new(Config::default()).process_input(&zip_path).unwrap();

        assert_eq!(outcome.stats.files_processed, 1);
        assert_eq!(outcome.aggregator.get("a@b.com").unwrap().secret, "better");
    }

    #[test]
    fn test_process_input_rejects_plain_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        fs::write(&path, "a@b.com:pw").unwrap();

        assert!(SortProcessor::new(Config::default()).process_input(&path).is_err());
    }
}
