#![doc = "Covpart public API"]

mod cost;
mod decomposition;
mod geom;
mod optimizer;

pub mod cli;
pub mod commands;
pub mod presets;

#[doc(inline)]
pub use decomposition::{Adjacency, Decomposition};

#[doc(inline)]
pub use cost::{compute_chi, ChiParams};

#[doc(inline)]
pub use geom::{polygon_split, CanonicalPolygon};

#[doc(inline)]
pub use optimizer::{compute_pairwise_optimal, ChiOptimizer, OptimizerRun};
