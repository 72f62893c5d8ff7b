use std::fmt::Display;

use rayon::prelude::*;

/// Outcome counts for one batch, reported to the operator at batch end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// `"<input>: <error>"`, submission order.
    pub failures: Vec<String>,
}

impl BatchReport {
    pub fn log(&self, stage: &str) {
        tracing::info!(
            stage,
            submitted = self.submitted,
            succeeded = self.succeeded,
            failed = self.failed,
            "batch complete"
        );
        for failure in &self.failures {
            tracing::warn!(stage, "{failure}");
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutput<T> {
    /// One slot per input, `None` where the task failed.
    pub results: Vec<Option<T>>,
    pub report: BatchReport,
}

impl<T> BatchOutput<T> {
    pub fn successes(self) -> impl Iterator<Item = T> {
        self.results.into_iter().flatten()
    }
}

fn build_pool(width: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(width.max(1))
        .build()
        .ok()
}

fn with_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}

/// Run `task` over `inputs` on a pool of `width` threads. Results keep
/// submission order; a failed task leaves `None` in its slot and never
/// affects its siblings.
pub fn run_batch<I, T, E, F>(width: usize, inputs: &[I], task: F) -> BatchOutput<T>
where
    I: Sync + Display,
    T: Send,
    E: Display + Send,
    F: Fn(&I) -> Result<T, E> + Sync + Send,
{
    let pool = build_pool(width);
    let outcomes: Vec<Result<T, E>> =
        with_pool(&pool, || inputs.par_iter().map(|input| task(input)).collect());

    let mut report = BatchReport {
        submitted: inputs.len(),
        ..BatchReport::default()
    };
    let results = outcomes
        .into_iter()
        .zip(inputs)
        .map(|(outcome, input)| match outcome {
            Ok(value) => {
                report.succeeded += 1;
                Some(value)
            }
            Err(err) => {
                report.failed += 1;
                report.failures.push(format!("{input}: {err}"));
                None
            }
        })
        .collect();

    BatchOutput { results, report }
}

/// Host core count, the default width for CPU-bound stages.
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
