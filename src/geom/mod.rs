mod bbox;
mod polygon;
mod ring;
mod split;

pub(crate) use bbox::CellEnvelope;
pub(crate) use polygon::{classify_overlap, erode, union_single, Overlap};
pub(crate) use ring::sample_perimeter;

pub use polygon::CanonicalPolygon;
pub use split::polygon_split;

/// Absolute coordinate tolerance for unit-scale inputs.
pub(crate) const EPS: f64 = 1e-9;
