//! Renders a contiguous range of token ids on a worker pool
//!
//! Tokens are independent: each one seeds its own random stream from the batch
//! seed and its id, so the output of a batch does not depend on the number of
//! workers or on the order in which tokens finish.

use crate::batch::token::TokenRenderer;
use crate::catalog::store::Catalog;
use crate::compose::rules::RuleBook;
use crate::io::configuration::{
    DEFAULT_JOBS, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, DEFAULT_START_TOKEN, DEFAULT_TOKEN_COUNT,
};
use crate::io::error::{GenerationError, Result, WithToken, invalid_parameter};
use crate::io::image::export_canvas_png;
use crate::io::metadata::TokenMetadata;
use crate::io::progress::BatchProgress;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use std::ops::Range;
use std::path::PathBuf;

/// What to do when one token fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the batch on the first failure
    #[default]
    FailFast,
    /// Record the failure and keep rendering the other tokens
    KeepGoing,
}

/// Parameters of one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// First token id
    pub start: u64,
    /// Number of tokens
    pub count: u64,
    /// Batch seed shared by every token
    pub seed: u64,
    /// Number of worker threads
    pub jobs: usize,
    /// Directory receiving `<id>.png` and `<id>.json`
    pub output_dir: PathBuf,
    /// Failure handling
    pub policy: FailurePolicy,
    /// Whether to write the metadata document of each token
    pub write_metadata: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_TOKEN,
            count: DEFAULT_TOKEN_COUNT,
            seed: DEFAULT_SEED,
            jobs: DEFAULT_JOBS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            policy: FailurePolicy::FailFast,
            write_metadata: true,
        }
    }
}

impl BatchConfig {
    /// Token ids covered by the batch
    ///
    /// # Errors
    ///
    /// Returns an error if the range runs past `u64::MAX`
    pub fn token_range(&self) -> Result<Range<u64>> {
        let end = self.start.checked_add(self.count).ok_or_else(|| {
            invalid_parameter(
                "count",
                &self.count,
                &format!("range starting at {} overflows token ids", self.start),
            )
        })?;
        Ok(self.start..end)
    }

    /// Path of a token's image
    pub fn image_path(&self, token_id: u64) -> PathBuf {
        self.output_dir.join(format!("{token_id}.png"))
    }

    /// Path of a token's metadata document
    pub fn metadata_path(&self, token_id: u64) -> PathBuf {
        self.output_dir.join(format!("{token_id}.json"))
    }

    /// Check the configuration before any work starts
    ///
    /// # Errors
    ///
    /// Returns an error if the worker count is zero or the id range overflows
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(invalid_parameter(
                "jobs",
                &self.jobs,
                &"at least one worker is required",
            ));
        }
        self.token_range().map(|_| ())
    }
}

/// Token that could not be produced
#[derive(Debug)]
pub struct TokenFailure {
    /// Failing token
    pub token_id: u64,
    /// Why it failed
    pub error: GenerationError,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Ids of the tokens written, ascending
    pub rendered: Vec<u64>,
    /// Failed tokens, ascending by id
    pub failures: Vec<TokenFailure>,
}

impl BatchReport {
    /// Number of tokens attempted
    pub fn attempted(&self) -> u64 {
        (self.rendered.len() + self.failures.len()) as u64
    }

    /// Whether every token was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn a report with failures into an error
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BatchIncomplete`] if any token failed
    pub fn into_result(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(GenerationError::BatchIncomplete {
                failed: self.failures.len(),
                attempted: self.attempted(),
            })
        }
    }
}

/// Render and write every token of a batch
///
/// The rule book is checked against the catalog before the first token is
/// drawn, so authoring mistakes abort the batch up front.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid or the worker pool cannot start
/// - The rule book references assets the catalog lacks
/// - A token fails under [`FailurePolicy::FailFast`]
pub fn run_batch(
    catalog: &Catalog,
    rules: &RuleBook,
    config: &BatchConfig,
    progress: Option<&BatchProgress>,
) -> Result<BatchReport> {
    config.validate()?;
    rules.validate(catalog)?;
    let range = config.token_range()?;
    let pool = build_thread_pool(config.jobs)?;
    let renderer = TokenRenderer::new(catalog, rules, config.seed);

    tracing::info!(
        start = config.start,
        count = config.count,
        jobs = config.jobs,
        seed = config.seed,
        output = %config.output_dir.display(),
        "starting batch"
    );

    let report = pool.install(|| match config.policy {
        FailurePolicy::FailFast => render_fail_fast(&renderer, config, range, progress),
        FailurePolicy::KeepGoing => Ok(render_keep_going(&renderer, config, range, progress)),
    })?;

    tracing::info!(
        rendered = report.rendered.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

fn render_fail_fast(
    renderer: &TokenRenderer<'_>,
    config: &BatchConfig,
    range: Range<u64>,
    progress: Option<&BatchProgress>,
) -> Result<BatchReport> {
    let rendered = range
        .into_par_iter()
        .map(|token_id| -> Result<u64> {
            produce(renderer, config, token_id)?;
            if let Some(progress) = progress {
                progress.token_done();
            }
            Ok(token_id)
        })
        .collect::<Result<Vec<u64>>>()?;

    Ok(BatchReport {
        rendered,
        failures: Vec::new(),
    })
}

fn render_keep_going(
    renderer: &TokenRenderer<'_>,
    config: &BatchConfig,
    range: Range<u64>,
    progress: Option<&BatchProgress>,
) -> BatchReport {
    let outcomes: Vec<(u64, Result<()>)> = range
        .into_par_iter()
        .map(|token_id| {
            let outcome = produce(renderer, config, token_id);
            if let Some(progress) = progress {
                if outcome.is_ok() {
                    progress.token_done();
                } else {
                    progress.token_failed(token_id);
                }
            }
            (token_id, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (token_id, outcome) in outcomes {
        match outcome {
            Ok(()) => report.rendered.push(token_id),
            Err(error) => {
                tracing::warn!(token_id, kind = ?error.kind(), %error, "token failed");
                report.failures.push(TokenFailure { token_id, error });
            }
        }
    }
    report
}

fn produce(renderer: &TokenRenderer<'_>, config: &BatchConfig, token_id: u64) -> Result<()> {
    let token = renderer.render(token_id)?;
    export_canvas_png(&token.canvas, &config.image_path(token_id)).for_token(token_id)?;
    if config.write_metadata {
        TokenMetadata::from(&token.assignment)
            .write(&config.metadata_path(token_id))
            .for_token(token_id)?;
    }
    tracing::debug!(token_id, "token written");
    Ok(())
}

fn build_thread_pool(jobs: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| GenerationError::WorkerPool { source: e })
}
