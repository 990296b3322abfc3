use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{AvifSettings, BatchResult, BatchSettings, ConversionResult, Scheduling};
use crate::processing::converter::Converter;
use crate::processing::encoder::SharedEncoder;
use crate::processing::scanner::DirectoryScanner;
use crate::utils::{ConverterError, ConverterResult, output_path_for, validate_batch_settings};

/// One input file and where its AVIF goes.
#[derive(Debug, Clone)]
struct Job {
    input: PathBuf,
    output: PathBuf,
}

type Outcome = ConverterResult<ConversionResult>;

/// Converts every matching file under a directory with bounded concurrency.
pub struct BatchProcessor {
    converter: Converter,
}

impl BatchProcessor {
    pub fn new(encoder: SharedEncoder) -> Self {
        Self {
            converter: Converter::new(encoder),
        }
    }

    /// Converts every file under `input_dir` matching the settings' pattern.
    ///
    /// The input directory is checked before `output_dir` is created. Per-file
    /// failures land in [`BatchResult::errors`]; only setup problems (bad
    /// settings, missing input, unwritable output root) return `Err`.
    pub async fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        settings: &BatchSettings,
    ) -> ConverterResult<BatchResult> {
        validate_batch_settings(settings)?;
        let scanner = DirectoryScanner::open(input_dir)?;

        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            ConverterError::io(format!("Cannot create output directory {}: {e}", output_dir.display()))
        })?;

        let pattern = settings.pattern.clone();
        let walker = scanner.clone();
        let files = tokio::task::spawn_blocking(move || walker.scan(&pattern))
            .await
            .map_err(|e| ConverterError::io(format!("Directory scan panicked: {e}")))??;

        if files.is_empty() {
            info!("No files matching '{}' in {}", settings.pattern, input_dir.display());
            return Ok(BatchResult::new(0));
        }

        let jobs: Vec<Job> = files
            .into_iter()
            .map(|input| {
                let output = output_path_for(scanner.root(), output_dir, &input);
                Job { input, output }
            })
            .collect();

        info!(
            "Converting {} files with concurrency {} ({:?})",
            jobs.len(),
            settings.concurrency,
            settings.scheduling
        );

        let outcomes = match settings.scheduling {
            Scheduling::Pooled => self.run_pooled(&jobs, settings).await?,
            Scheduling::Chunked => self.run_chunked(&jobs, settings).await,
        };

        let result = aggregate(jobs, outcomes);
        log_summary(&result);
        Ok(result)
    }

    /// At most `concurrency` conversions in flight; the next one starts as soon
    /// as a permit is released.
    async fn run_pooled(&self, jobs: &[Job], settings: &BatchSettings) -> ConverterResult<Vec<Outcome>> {
        // More permits than jobs is never useful, and tokio caps the count at MAX_PERMITS.
        let permits = settings.concurrency.min(jobs.len()).max(1);
        let semaphore = Arc::new(Semaphore::new(permits));
        let mut handles = Vec::with_capacity(jobs.len());

        for job in jobs {
            let permit = semaphore.clone().acquire_owned().await.map_err(|e| {
                warn!("Failed to acquire semaphore: {}", e);
                ConverterError::io(format!("Failed to acquire conversion slot: {e}"))
            })?;
            handles.push(self.spawn_job(job, settings.avif, Some(permit)));
        }

        Ok(join_in_order(handles).await)
    }

    /// Consecutive chunks of `concurrency` files, each awaited in full before
    /// the next chunk starts.
    async fn run_chunked(&self, jobs: &[Job], settings: &BatchSettings) -> Vec<Outcome> {
        let total_chunks = jobs.len().div_ceil(settings.concurrency);
        let mut outcomes = Vec::with_capacity(jobs.len());

        for (chunk_index, chunk) in jobs.chunks(settings.concurrency).enumerate() {
            debug!("Processing chunk {}/{} ({} files)", chunk_index + 1, total_chunks, chunk.len());
            let handles: Vec<_> = chunk
                .iter()
                .map(|job| self.spawn_job(job, settings.avif, None))
                .collect();
            outcomes.extend(join_in_order(handles).await);
        }

        outcomes
    }

    fn spawn_job(
        &self,
        job: &Job,
        avif: AvifSettings,
        permit: Option<OwnedSemaphorePermit>,
    ) -> JoinHandle<Outcome> {
        let converter = self.converter.clone();
        let job = job.clone();
        tokio::spawn(async move {
            let _permit = permit;
            converter.convert(&job.input, &job.output, avif).await
        })
    }
}

/// Awaits every handle, keeping submission order. A panicked task becomes an error.
async fn join_in_order(handles: Vec<JoinHandle<Outcome>>) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let outcome = handle
            .await
            .map_err(|e| ConverterError::encode(format!("Task panicked: {e}")))
            .and_then(|result| result);
        outcomes.push(outcome);
    }
    outcomes
}

fn aggregate(jobs: Vec<Job>, outcomes: Vec<Outcome>) -> BatchResult {
    let mut result = BatchResult::new(jobs.len());

    for (job, outcome) in jobs.into_iter().zip(outcomes) {
        match outcome {
            Ok(converted) => result.record_success(&converted),
            Err(e) => {
                warn!("Conversion failed for {}: {}", job.input.display(), e);
                result.record_failure(job.input, e.to_string());
            }
        }
    }

    result
}

fn log_summary(result: &BatchResult) {
    if result.failed > 0 {
        warn!(
            "Batch completed with {} failed files out of {}",
            result.failed,
            result.total
        );
    } else {
        info!(
            "Batch completed successfully: {} files converted ({:.2}% saved)",
            result.success,
            result.compression_ratio()
        );
    }
}
