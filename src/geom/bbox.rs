use geo::Rect;
use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, associated with a cell by id.
#[derive(Debug, Clone)]
pub(crate) struct CellEnvelope {
    id: usize,
    bbox: Rect<f64>,
}

impl CellEnvelope {
    pub(crate) fn new(id: usize, bbox: Rect<f64>) -> Self {
        Self { id, bbox }
    }

    /// Get the id of the corresponding cell.
    pub(crate) fn id(&self) -> usize {
        self.id
    }
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}
