mod optimizer;
mod pairwise;
mod recursion;

pub use optimizer::{ChiOptimizer, OptimizerRun};
pub use pairwise::compute_pairwise_optimal;
