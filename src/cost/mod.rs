mod chi;

pub use chi::{compute_chi, ChiParams};
