//! Batch progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tokens: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the tokens of one batch
///
/// Safe to share between workers; indicatif bars are internally synchronized.
#[derive(Clone)]
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Create a visible progress bar for `total` tokens
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar }
    }

    /// Create a progress bar that never draws
    pub fn hidden(total: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total);
        Self { bar }
    }

    /// Record one finished token
    pub fn token_done(&self) {
        self.bar.inc(1);
    }

    /// Record one failed token
    pub fn token_failed(&self, token_id: u64) {
        self.bar.inc(1);
        self.bar.set_message(format!("last failure: token {token_id}"));
    }

    /// Number of tokens recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a summary message
    pub fn finish(&self, rendered: usize, failed: usize) {
        self.bar
            .finish_with_message(format!("{rendered} rendered, {failed} failed"));
    }
}
