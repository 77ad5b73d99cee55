//! Error-driven refinement of a partition tree into raster snapshots
//!
//! Starting from the root, the node with the largest error is repeatedly
//! popped, painted onto the canvas and replaced in the queue by its children.
//! Later pops always cover a sub-region of an earlier pop, so each paint
//! refines what was there before.

use crate::algorithm::queue::PriorityQueue;
use crate::math::Color;
use crate::spatial::{Canvas, PartitionNode, PartitionTree};
use std::fmt;

/// Parameters of one refinement run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefinementConfig {
    /// Maximum number of pop-paint-push steps
    pub step_budget: usize,
    /// Capture a frame sequence instead of a single final canvas
    pub animate: bool,
    /// Steps between captured frames when animating
    pub sample_period: usize,
    /// Color the canvas starts with
    pub fill: Color,
}

impl RefinementConfig {
    /// Static refinement producing only the final canvas
    pub const fn new(step_budget: usize) -> Self {
        Self {
            step_budget,
            animate: false,
            sample_period: 1,
            fill: Color::TRANSPARENT,
        }
    }

    /// Animated refinement sampling a frame every `sample_period` steps
    pub const fn animated(step_budget: usize, sample_period: usize) -> Self {
        Self {
            step_budget,
            animate: true,
            sample_period,
            fill: Color::TRANSPARENT,
        }
    }

    /// Replace the initial canvas color
    #[must_use]
    pub const fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Check that the run has anything to do
    ///
    /// # Errors
    ///
    /// Returns the reason the run would produce nothing: a zero step budget,
    /// or a zero sample period while animating
    pub const fn validate(&self) -> Result<(), EmptyReason> {
        if self.step_budget == 0 {
            return Err(EmptyReason::ZeroStepBudget);
        }
        if self.animate && self.sample_period == 0 {
            return Err(EmptyReason::ZeroSamplePeriod);
        }
        Ok(())
    }

    /// Whether the 1-indexed `step` is captured as a frame
    ///
    /// Frames are taken at steps `1, 1 + P, 1 + 2P, ...` so the first pop is
    /// always visible.
    /// A run of `N` steps that does not drain early yields `(N - 1) / P + 1` frames.
    pub const fn is_sample_step(&self, step: usize) -> bool {
        self.animate && self.sample_period > 0 && step > 0 && (step - 1) % self.sample_period == 0
    }
}

/// Why a refinement run produced nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyReason {
    /// The step budget was zero
    ZeroStepBudget,
    /// Animation was requested with a zero sample period
    ZeroSamplePeriod,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStepBudget => write!(f, "step budget must be at least 1"),
            Self::ZeroSamplePeriod => {
                write!(f, "sample period must be at least 1 when animating")
            }
        }
    }
}

/// Canvas snapshot captured after a refinement step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    step: usize,
    canvas: Canvas,
}

impl Frame {
    /// 1-indexed step after which the snapshot was taken
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Captured raster
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

/// Result of a refinement run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Refinement {
    /// Invalid configuration; nothing was painted
    Empty(EmptyReason),
    /// Static mode: the canvas after the last step
    Final {
        /// Painted raster
        canvas: Canvas,
        /// Steps actually performed
        steps: usize,
    },
    /// Animated mode: sampled frames in capture order
    Animated {
        /// Captured snapshots
        frames: Vec<Frame>,
        /// Steps actually performed
        steps: usize,
    },
}

impl Refinement {
    /// True for [`Refinement::Empty`] and for an animation without frames
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty(_) => true,
            Self::Final { .. } => false,
            Self::Animated { frames, .. } => frames.is_empty(),
        }
    }

    /// Reason for an empty result
    pub const fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Empty(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Number of refinement steps performed
    pub const fn steps(&self) -> usize {
        match self {
            Self::Empty(_) => 0,
            Self::Final { steps, .. } | Self::Animated { steps, .. } => *steps,
        }
    }

    /// Output rasters in order
    pub fn canvases(&self) -> Vec<&Canvas> {
        match self {
            Self::Empty(_) => Vec::new(),
            Self::Final { canvas, .. } => vec![canvas],
            Self::Animated { frames, .. } => frames.iter().map(Frame::canvas).collect(),
        }
    }

    /// Most refined raster, if any
    pub fn last(&self) -> Option<&Canvas> {
        match self {
            Self::Empty(_) => None,
            Self::Final { canvas, .. } => Some(canvas),
            Self::Animated { frames, .. } => frames.last().map(Frame::canvas),
        }
    }
}

/// Lazy sequence of refinement steps over a partition tree
///
/// Each call to `next` pops the pending node with the largest error and
/// queues its children. The iterator ends once every leaf has been visited.
pub struct RefinementSteps<'a> {
    queue: PriorityQueue<&'a PartitionNode>,
}

impl<'a> RefinementSteps<'a> {
    /// Start from the root of `tree`
    pub fn new(tree: &'a PartitionTree) -> Self {
        let mut queue = PriorityQueue::new();
        queue.push(tree.root());
        Self { queue }
    }

    /// Nodes waiting to be popped, in arbitrary order
    pub fn pending(&self) -> impl Iterator<Item = &'a PartitionNode> + '_ {
        self.queue.iter().copied()
    }

    /// Number of nodes waiting to be popped
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

impl<'a> Iterator for RefinementSteps<'a> {
    type Item = &'a PartitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop()?;
        self.queue.extend(node.children());
        Some(node)
    }
}

/// Run refinement and return the final canvas or the sampled frames
pub fn refine(tree: &PartitionTree, config: &RefinementConfig) -> Refinement {
    refine_with_observer(tree, config, |_, _| {})
}

/// Run refinement, calling `observer` with the step number and node after every paint
pub fn refine_with_observer<F>(
    tree: &PartitionTree,
    config: &RefinementConfig,
    mut observer: F,
) -> Refinement
where
    F: FnMut(usize, &PartitionNode),
{
    if let Err(reason) = config.validate() {
        log::warn!("Refinement skipped: {reason}");
        return Refinement::Empty(reason);
    }

    let mut canvas = Canvas::new(tree.bounds(), config.fill);
    let mut frames = Vec::new();
    let mut step = 0;

    for node in RefinementSteps::new(tree).take(config.step_budget) {
        canvas.paint(node.rect(), node.color());
        step += 1;
        log::trace!("step {step}: {node}");

        if config.is_sample_step(step) {
            frames.push(Frame {
                step,
                canvas: canvas.clone(),
            });
        }

        observer(step, node);
    }

    log::debug!(
        "Refinement finished after {step} of {} steps",
        config.step_budget
    );

    if config.animate {
        Refinement::Animated {
            frames,
            steps: step,
        }
    } else {
        Refinement::Final {
            canvas,
            steps: step,
        }
    }
}
