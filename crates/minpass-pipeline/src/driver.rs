//! Minification-and-report driver.
//!
//! For every script artifact, in order: read it from the output directory,
//! minify it, overwrite it, measure raw and compressed sizes and hand an
//! [`ArtifactReport`] to the [`ProgressSink`].
//!
//! Reports always reach the sink in input order. In
//! [`ConcurrencyMode::Ordered`] artifacts are processed by a bounded set of
//! tasks and completed reports wait in a reorder buffer until every earlier
//! artifact has been reported.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{ConcurrencyMode, FailurePolicy};
use crate::minify::Minify;
use crate::report::{ArtifactReport, ProgressSink, SizeReport};
use crate::size::{SizeEstimator, raw_size};
use crate::{Error, Result, writer};

/// An artifact skipped under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct ArtifactFailure {
    pub index: usize,
    pub file_name: String,
    pub error: Error,
}

/// Everything the driver did in one run.
#[derive(Debug, Default)]
pub struct DriverSummary {
    pub reports: Vec<ArtifactReport>,
    pub failures: Vec<ArtifactFailure>,
}

impl DriverSummary {
    pub fn processed(&self) -> usize {
        self.reports.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Sum of all per-artifact sizes.
    pub fn totals(&self) -> SizeReport {
        self.reports.iter().fold(
            SizeReport {
                from_size: 0,
                to_size: 0,
                from_brotli: 0,
                to_brotli: 0,
            },
            |acc, r| SizeReport {
                from_size: acc.from_size + r.sizes.from_size,
                to_size: acc.to_size + r.sizes.to_size,
                from_brotli: acc.from_brotli + r.sizes.from_brotli,
                to_brotli: acc.to_brotli + r.sizes.to_brotli,
            },
        )
    }
}

/// Processes script artifacts below one output directory.
#[derive(Clone)]
pub struct Driver {
    out_dir: PathBuf,
    minifier: Arc<dyn Minify>,
    estimator: Arc<dyn SizeEstimator>,
    failure_policy: FailurePolicy,
    concurrency: ConcurrencyMode,
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("out_dir", &self.out_dir)
            .field("failure_policy", &self.failure_policy)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl Driver {
    pub fn new(
        out_dir: impl Into<PathBuf>,
        minifier: Arc<dyn Minify>,
        estimator: Arc<dyn SizeEstimator>,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            minifier,
            estimator,
            failure_policy: FailurePolicy::default(),
            concurrency: ConcurrencyMode::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_concurrency(mut self, concurrency: ConcurrencyMode) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Minify every artifact in `file_names`, reporting to `sink` in order.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`] the first failing artifact stops the
    /// run and its error is returned; artifacts after it are not started.
    pub async fn process(
        &self,
        file_names: &[String],
        sink: &mut dyn ProgressSink,
    ) -> Result<DriverSummary> {
        let total = file_names.len();
        tracing::info!(
            artifacts = total,
            concurrency = ?self.concurrency,
            "Starting minification pass"
        );

        let mut summary = DriverSummary::default();
        match self.concurrency {
            ConcurrencyMode::Sequential => {
                for (position, file_name) in file_names.iter().enumerate() {
                    let index = position + 1;
                    let result = self.task(index, total, file_name.clone()).await;
                    self.deliver(index, total, file_name, result, sink, &mut summary)?;
                }
            }
            ConcurrencyMode::Ordered { limit } => {
                self.process_ordered(file_names, limit, sink, &mut summary)
                    .await?;
            }
        }

        Ok(summary)
    }

    async fn process_ordered(
        &self,
        file_names: &[String],
        limit: usize,
        sink: &mut dyn ProgressSink,
        summary: &mut DriverSummary,
    ) -> Result<()> {
        let total = file_names.len();
        let semaphore = Arc::new(Semaphore::new(limit.max(1)));
        let mut join_set = JoinSet::new();

        for (position, file_name) in file_names.iter().enumerate() {
            let index = position + 1;
            let driver = self.clone();
            let file_name = file_name.clone();
            let permits = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => driver.task(index, total, file_name).await,
                    Err(e) => Err(Error::Task(e.to_string())),
                };
                (index, result)
            });
        }

        let mut pending: BTreeMap<usize, Result<ArtifactReport>> = BTreeMap::new();
        let mut next = 1;
        while let Some(joined) = join_set.join_next().await {
            let (index, result) = joined.map_err(|e| Error::Task(e.to_string()))?;
            pending.insert(index, result);

            while let Some(result) = pending.remove(&next) {
                self.deliver(next, total, &file_names[next - 1], result, sink, summary)?;
                next += 1;
            }
        }

        Ok(())
    }

    fn deliver(
        &self,
        index: usize,
        total: usize,
        file_name: &str,
        result: Result<ArtifactReport>,
        sink: &mut dyn ProgressSink,
        summary: &mut DriverSummary,
    ) -> Result<()> {
        match result {
            Ok(report) => {
                sink.on_report(&report);
                summary.reports.push(report);
                Ok(())
            }
            Err(error) => {
                let error = error.for_artifact(file_name);
                match self.failure_policy {
                    FailurePolicy::Abort => Err(error),
                    FailurePolicy::Continue => {
                        tracing::warn!(
                            file = file_name,
                            index,
                            total,
                            error = %error,
                            "Skipping artifact"
                        );
                        sink.on_failure(index, total, file_name, &error);
                        summary.failures.push(ArtifactFailure {
                            index,
                            file_name: file_name.to_string(),
                            error,
                        });
                        Ok(())
                    }
                }
            }
        }
    }

    async fn task(&self, index: usize, total: usize, file_name: String) -> Result<ArtifactReport> {
        let path = writer::validate_output_path(&self.out_dir, &file_name)?;
        tracing::debug!(file = %file_name, index, total, "Reading artifact");
        let original = tokio::fs::read_to_string(&path).await?;

        let minifier = Arc::clone(&self.minifier);
        let estimator = Arc::clone(&self.estimator);
        tokio::task::spawn_blocking(move || {
            let minified = minifier.minify(&file_name, &original)?;
            let sizes = SizeReport {
                from_size: raw_size(&original),
                to_size: raw_size(&minified),
                from_brotli: estimator.compressed_size(original.as_bytes())?,
                to_brotli: estimator.compressed_size(minified.as_bytes())?,
            };

            // A failed artifact is left untouched on disk.
            writer::write_file_atomic(&path, minified.as_bytes())?;

            Ok(ArtifactReport {
                index,
                total,
                file_name,
                sizes,
            })
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))?
    }
}
