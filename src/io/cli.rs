//! Command-line interface for approximating images with quadtree refinement

use crate::algorithm::{EmptyReason, Refinement, RefinementConfig, refine_with_observer};
use crate::io::configuration::{
    ANIMATION_EXTENSION, ANIMATION_SUFFIX, DEFAULT_FRAME_DELAY_MS, DEFAULT_SAMPLE_PERIOD,
    DEFAULT_STEPS, FINAL_EXTENSION, FINAL_SUFFIX, JPEG_QUALITY, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{ArtError, Result, invalid_parameter, io_error};
use crate::io::image::{export_canvas, load_source};
use crate::io::progress::ProgressManager;
use crate::io::visualization::Animation;
use crate::math::ErrorMetric;
use crate::spatial::PartitionTree;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Error metric selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Mean squared per-channel deviation
    Squared,
    /// Mean absolute per-channel deviation
    Absolute,
}

impl From<MetricArg> for ErrorMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Squared => Self::Squared,
            MetricArg::Absolute => Self::Absolute,
        }
    }
}

#[derive(Parser)]
#[command(name = "quadart")]
#[command(
    author,
    version,
    about = "Approximate images with error-driven quadtree refinement"
)]
/// Command-line arguments for the approximation tool
pub struct Cli {
    /// Input image file or directory of images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of refinement steps before stopping
    #[arg(short, long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Also write an animated GIF of the refinement
    #[arg(short, long)]
    pub animate: bool,

    /// Capture an animation frame every N steps
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_PERIOD)]
    pub period: usize,

    /// Delay between animation frames in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    pub delay: u32,

    /// Per-channel deviation used to rank regions
    #[arg(short, long, value_enum, default_value_t = MetricArg::Squared)]
    pub metric: MetricArg,

    /// JPEG quality of the final image
    #[arg(long, default_value_t = JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process images even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Refinement parameters selected on the command line
    pub const fn refinement_config(&self) -> RefinementConfig {
        if self.animate {
            RefinementConfig::animated(self.steps, self.period)
        } else {
            RefinementConfig::new(self.steps)
        }
    }
}

/// Orchestrates batch processing of images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an `InvalidParameter` error naming `steps` or `period` if the
    /// refinement settings are unusable, and other errors if the target is
    /// invalid, or any image fails to load, refine or export
    pub fn process(&mut self) -> Result<()> {
        if let Err(reason) = self.cli.refinement_config().validate() {
            return Err(match reason {
                EmptyReason::ZeroStepBudget => {
                    invalid_parameter("steps", &self.cli.steps, &reason)
                }
                EmptyReason::ZeroSamplePeriod => {
                    invalid_parameter("period", &self.cli.period, &reason)
                }
            });
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to process in {}", self.cli.target.display());
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if has_supported_extension(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a PNG, JPEG, GIF, BMP or TIFF image"))
            }
        } else if self.cli.target.is_dir() {
            let read_dir = std::fs::read_dir(&self.cli.target).map_err(|e| ArtError::FileSystem {
                path: self.cli.target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in read_dir {
                let path = entry?.path();
                if path.is_file()
                    && has_supported_extension(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let final_exists = Self::get_output_path(input_path).exists();
        let animation_exists =
            !self.cli.animate || Self::get_animation_path(input_path).exists();

        if final_exists && animation_exists {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.refinement_config();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.step_budget);
        }

        let source = load_source(input_path)?;
        log::info!(
            "Building partition tree for {} ({}x{})",
            input_path.display(),
            source.width(),
            source.height()
        );
        let tree = PartitionTree::with_metric(&source, self.cli.metric.into())?;
        log::debug!(
            "Tree has {} nodes over {} levels",
            tree.node_count(),
            tree.depth()
        );

        log::info!(
            "Refining with {} steps (animate: {}, period: {})",
            config.step_budget,
            config.animate,
            config.sample_period
        );
        let progress = &mut self.progress_manager;
        let refinement = refine_with_observer(&tree, &config, |step, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_step(index, step);
            }
        });

        if let Some(reason) = refinement.empty_reason() {
            return Err(reason.into());
        }

        let final_canvas = refinement.last().ok_or_else(|| ArtError::InvalidSourceData {
            reason: "Refinement produced no image".to_string(),
        })?;
        let output_path = Self::get_output_path(input_path);
        export_canvas(final_canvas, &output_path, self.cli.quality)?;
        log::info!("Wrote {}", output_path.display());

        if let Refinement::Animated { frames, .. } = &refinement {
            let mut animation = Animation::new();
            for frame in frames {
                animation.push_canvas(frame.canvas());
            }
            animation.push_image(image::DynamicImage::ImageRgba16(source).to_rgba8());

            let animation_path = Self::get_animation_path(input_path);
            animation.export_gif(&animation_path, self.cli.delay)?;
            log::info!(
                "Wrote {} ({} frames)",
                animation_path.display(),
                animation.len()
            );
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        log::debug!(
            "Finished {} in {:.2?} after {} steps",
            input_path.display(),
            start_time.elapsed(),
            refinement.steps()
        );

        Ok(())
    }

    /// Path of the final still image written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, FINAL_SUFFIX, FINAL_EXTENSION)
    }

    /// Path of the animation written for `input_path`
    pub fn get_animation_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, ANIMATION_SUFFIX, ANIMATION_EXTENSION)
    }
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

// Outputs of earlier runs sit next to their inputs in directory mode
fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(FINAL_SUFFIX) || stem.ends_with(ANIMATION_SUFFIX))
}
