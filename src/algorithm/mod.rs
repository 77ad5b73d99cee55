/// Max-priority queue keyed by node error
pub mod queue;
/// Refinement loop, sampling policy and frame capture
pub mod refinement;

pub use queue::{Prioritized, PriorityQueue};
pub use refinement::{
    EmptyReason, Frame, Refinement, RefinementConfig, RefinementSteps, refine, refine_with_observer,
};
