//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for a batch of images
///
/// Small batches get one bar per image; larger batches additionally show a
/// batch bar and reuse a rolling window of per-image bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// (`file name`, `current step`, `step budget`) for every started file
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template(&format!(
        "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
    ))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create progress bars for `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(STEP_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register an image about to be refined with `step_budget` steps
    pub fn start_file(&mut self, index: usize, path: &Path, step_budget: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, step_budget);
        }
        self.update_bars();
    }

    /// Report the refinement step just completed
    pub fn update_step(&mut self, index: usize, step: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark an image as finished
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            // The queue may drain before the budget is spent
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started images on the available bars
    fn update_bars(&self) {
        let active: Vec<_> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();
        let start = active.len().saturating_sub(self.file_bars.len());
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_idx, bar) in self.file_bars.iter().enumerate() {
            if let Some((name, current, max)) = visible.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(name.clone());
            } else {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
