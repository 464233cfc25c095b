//! Batch PNG to DDS conversion.
//!
//! Walks an input tree, runs the encoder on every PNG into a shared staging
//! directory, and moves each result to the same relative path under the
//! output root. A failure on one file never stops the batch.

pub mod job;
pub mod walker;

use ddsforge_common::paths::resolve_path;
use ddsforge_common::{Error, Result};
use ddsforge_tools::staging::DEFAULT_STAGING_DIR;
use ddsforge_tools::{Encoder, StagingArea};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

pub use job::ConversionJob;
pub use walker::{DiscoveredFile, ImageWalker};

/// Per-file progress notifications.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The encoder is about to run for this job.
    Converting(&'a ConversionJob),
    /// The result was moved into place.
    Converted(&'a ConversionJob),
    /// The encoder returned but left no output where expected.
    OutputMissing(&'a ConversionJob),
    /// The job failed for any other reason.
    Failed(&'a ConversionJob, &'a Error),
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(BatchEvent<'_>) + Send + Sync>;

/// What happened to one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: ConversionJob,
    /// Final destination on success.
    pub result: Result<PathBuf>,
}

/// Outcomes of every attempted job, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    /// Number of files that reached their destination.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of files that did not.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether no PNG files were found.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Jobs that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&ConversionJob, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.job, e)))
    }
}

/// Sequential batch converter.
pub struct BatchConverter {
    encoder: Arc<dyn Encoder>,
    staging_dir: PathBuf,
    progress_callback: Option<ProgressCallback>,
}

impl BatchConverter {
    /// Create a converter that stages into [`DEFAULT_STAGING_DIR`].
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self {
            encoder,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            progress_callback: None,
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report(&self, event: BatchEvent<'_>) {
        if let Some(ref cb) = self.progress_callback {
            cb(event);
        }
    }

    /// Convert every PNG under `input_root` into `output_root`.
    ///
    /// # Errors
    ///
    /// Only setup fails the run, and it creates nothing when it does:
    ///
    /// - [`Error::InputDirMissing`] if the input root is not a directory.
    /// - [`Error::UnsafeStagingDir`] if the staging directory is, or contains,
    ///   the input or output root, or already holds anything but stale `.dds`
    ///   files. Cleanup removes the whole staging tree.
    /// - I/O errors creating the staging directory or output root.
    ///
    /// Per-file errors are recorded in the returned [`BatchReport`].
    pub fn run(&self, input_root: &Path, output_root: &Path) -> Result<BatchReport> {
        let walker = ImageWalker::new(input_root)?;
        check_staging_overlap(&self.staging_dir, input_root, output_root)?;

        let staging = StagingArea::create(&self.staging_dir)?;
        if let Err(e) = std::fs::create_dir_all(output_root) {
            staging.cleanup();
            return Err(e.into());
        }
        info!(
            "Converting PNG files from {:?} to {:?} with {}",
            input_root,
            output_root,
            self.encoder.name()
        );

        let mut report = BatchReport::default();
        for file in walker {
            let job = match ConversionJob::new(&file.path, &file.relative_dir, output_root) {
                Ok(job) => job,
                Err(e) => {
                    error!("Error processing image {:?}: {}", file.path, e);
                    continue;
                }
            };
            let result = self.convert_one(&staging, &job);
            report.outcomes.push(JobOutcome { job, result });
        }

        staging.cleanup();

        debug!(
            "Batch finished: {} converted, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    fn convert_one(&self, staging: &StagingArea, job: &ConversionJob) -> Result<PathBuf> {
        self.report(BatchEvent::Converting(job));

        let result = self.encode_and_relocate(staging, job);
        match &result {
            Ok(_) => self.report(BatchEvent::Converted(job)),
            Err(e @ Error::StagedOutputMissing { .. }) => {
                error!("Failed to find output DDS for {:?}: {}", job.source_path, e);
                self.report(BatchEvent::OutputMissing(job));
            }
            Err(e) => {
                error!("Error processing image {:?}: {}", job.source_path, e);
                self.report(BatchEvent::Failed(job, e));
            }
        }
        result
    }

    fn encode_and_relocate(&self, staging: &StagingArea, job: &ConversionJob) -> Result<PathBuf> {
        std::fs::create_dir_all(job.destination_dir())?;

        let staged = match self.encoder.convert(&job.source_path, staging.path()) {
            Ok(staged) => staged,
            Err(e) => {
                // Never let a failed run's leftovers reach the output tree.
                if let Ok(expected) = staging.staged_path(&job.source_path) {
                    staging.discard(&expected);
                }
                return Err(e);
            }
        };

        staging.relocate(&staged, &job.destination_path)
    }
}

/// Refuse a staging directory whose cleanup would take a root with it.
fn check_staging_overlap(staging_dir: &Path, input_root: &Path, output_root: &Path) -> Result<()> {
    let staging = resolve_path(staging_dir)?;
    for (root, what) in [(input_root, "input"), (output_root, "output")] {
        if resolve_path(root)?.starts_with(&staging) {
            return Err(Error::unsafe_staging_dir(
                staging_dir,
                format!("it is or contains the {} folder {:?}", what, root),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    /// Copies the source bytes to `<stem>.dds` in the output dir.
    struct CopyEncoder;

    impl Encoder for CopyEncoder {
        fn name(&self) -> &str {
            "copy"
        }

        fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
            let staged = output_dir.join(ddsforge_common::paths::dds_file_name(input).unwrap());
            fs::copy(input, &staged)?;
            Ok(staged)
        }
    }

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_report_counts() {
        let job = ConversionJob::new(Path::new("/in/x.png"), Path::new(""), Path::new("/out"))
            .unwrap();
        let report = BatchReport {
            outcomes: vec![
                JobOutcome {
                    job: job.clone(),
                    result: Ok(PathBuf::from("/out/x.dds")),
                },
                JobOutcome {
                    job,
                    result: Err(Error::tool_failed("texconv", "exit 1")),
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let staging = dir.path().join("stage");

        let converter = BatchConverter::new(Arc::new(CopyEncoder)).with_staging_dir(&staging);
        let err = converter
            .run(&dir.path().join("missing"), &output)
            .unwrap_err();

        assert!(matches!(err, Error::InputDirMissing { .. }));
        assert!(!output.exists());
        assert!(!staging.exists());
    }

    #[test]
    fn test_events_are_reported_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        touch(&input.join("x.png"), "x");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let converter = BatchConverter::new(Arc::new(CopyEncoder))
            .with_staging_dir(dir.path().join("stage"))
            .with_progress_callback(Box::new(move |event: BatchEvent<'_>| {
                let tag = match event {
                    BatchEvent::Converting(_) => "converting",
                    BatchEvent::Converted(_) => "converted",
                    BatchEvent::OutputMissing(_) => "missing",
                    BatchEvent::Failed(..) => "failed",
                };
                sink.lock().unwrap().push(tag);
            }));

        converter.run(&input, &dir.path().join("out")).unwrap();
        assert_eq!(*events.lock().unwrap(), vec!["converting", "converted"]);
    }

    #[test]
    fn test_output_inside_staging_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        touch(&input.join("x.png"), "x");
        let staging = dir.path().join("stage");

        let converter = BatchConverter::new(Arc::new(CopyEncoder)).with_staging_dir(&staging);
        let err = converter.run(&input, &staging.join("out")).unwrap_err();
        assert!(matches!(err, Error::UnsafeStagingDir { .. }));
        // Rejected before anything is created
        assert!(!staging.exists());
        assert!(input.join("x.png").exists());
    }

    #[test]
    fn test_staging_overlap_checks() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let input = base.join("assets/textures");
        let output = base.join("out");

        // Staging may sit inside either root
        check_staging_overlap(&input.join("temp_dds"), &input, &output).unwrap();
        check_staging_overlap(&output.join("temp_dds"), &input, &output).unwrap();
        check_staging_overlap(&base.join("temp_dds"), &input, &output).unwrap();

        for staging in [
            input.clone(),
            base.join("assets"),
            input.join(".."),
            output.clone(),
            base.to_path_buf(),
        ] {
            let err = check_staging_overlap(&staging, &input, &output).unwrap_err();
            assert!(
                matches!(err, Error::UnsafeStagingDir { .. }),
                "{:?} should be refused",
                staging
            );
        }
    }
}
