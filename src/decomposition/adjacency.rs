use geo::BoundingRect;
use rstar::{RTree, AABB};

use crate::decomposition::Decomposition;
use crate::geom::{self, CellEnvelope, Overlap};

/// Symmetric shares-an-edge relation over the cells of a decomposition.
///
/// Two cells are adjacent iff their boundaries share arcs of positive length;
/// touching in isolated points does not count. The matrix is rebuilt from
/// scratch after every committed mutation.
#[derive(Clone, Debug)]
pub struct Adjacency {
    matrix: Vec<Vec<bool>>,
}

impl Adjacency {
    /// Compute the adjacency relation for the current cells.
    pub fn build(decomposition: &Decomposition) -> Self {
        let n = decomposition.len();
        let mut matrix = vec![vec![false; n]; n];

        let rtree = RTree::bulk_load(
            (0..n)
                .map(|id| {
                    CellEnvelope::new(id, decomposition.polygon(id).bounding_rect().unwrap())
                })
                .collect(),
        );

        for id_a in 0..n {
            let Some(rect) = decomposition.polygon(id_a).bounding_rect() else {
                continue;
            };
            let search = AABB::from_corners(
                [rect.min().x - geom::EPS, rect.min().y - geom::EPS],
                [rect.max().x + geom::EPS, rect.max().y + geom::EPS],
            );

            for candidate in rtree.locate_in_envelope_intersecting(&search) {
                let id_b = candidate.id();
                if id_b <= id_a {
                    continue;
                }
                let overlap =
                    geom::classify_overlap(decomposition.polygon(id_a), decomposition.polygon(id_b));
                if matches!(overlap, Overlap::Edge(_)) {
                    matrix[id_a][id_b] = true;
                    matrix[id_b][id_a] = true;
                }
            }
        }

        Self { matrix }
    }

    /// Number of cells covered by the relation.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Check if the relation covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Whether two cells share an edge.
    #[inline]
    pub fn are_adjacent(&self, id_a: usize, id_b: usize) -> bool {
        self.matrix[id_a][id_b]
    }

    /// Neighbors of a cell, ascending by id.
    pub fn neighbors(&self, cell_id: usize) -> impl Iterator<Item = usize> + '_ {
        self.matrix[cell_id]
            .iter()
            .enumerate()
            .filter_map(|(id, &adjacent)| adjacent.then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use crate::geom::CanonicalPolygon;

    use super::*;

    /// A 2x2 grid of unit squares; diagonal pairs only touch at a corner.
    fn grid() -> Decomposition {
        let workspace = CanonicalPolygon::new(
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)],
            vec![],
        );
        let mut decomposition = Decomposition::new(workspace.to_polygon()).unwrap();
        for (x0, y0) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            let cell = CanonicalPolygon::new(
                vec![(x0, y0), (x0 + 1.0, y0), (x0 + 1.0, y0 + 1.0), (x0, y0 + 1.0)],
                vec![],
            );
            let id = decomposition.add_cell(cell.to_polygon()).unwrap();
            decomposition.add_site(id, Point::new(x0 + 0.5, y0 + 0.5)).unwrap();
        }
        decomposition
    }

    #[test]
    fn side_neighbors_are_adjacent() {
        let adjacency = Adjacency::build(&grid());
        assert!(adjacency.are_adjacent(0, 1));
        assert!(adjacency.are_adjacent(0, 2));
        assert!(adjacency.are_adjacent(1, 3));
        assert!(adjacency.are_adjacent(2, 3));
    }

    #[test]
    fn corner_contact_is_not_adjacency() {
        let adjacency = Adjacency::build(&grid());
        assert!(!adjacency.are_adjacent(0, 3));
        assert!(!adjacency.are_adjacent(1, 2));
    }

    #[test]
    fn matrix_is_symmetric_with_empty_diagonal() {
        let adjacency = Adjacency::build(&grid());
        for a in 0..adjacency.len() {
            assert!(!adjacency.are_adjacent(a, a));
            for b in 0..adjacency.len() {
                assert_eq!(adjacency.are_adjacent(a, b), adjacency.are_adjacent(b, a));
            }
        }
    }

    #[test]
    fn neighbors_come_back_in_id_order() {
        let adjacency = Adjacency::build(&grid());
        assert_eq!(adjacency.neighbors(3).collect::<Vec<_>>(), vec![1, 2]);
    }
}
