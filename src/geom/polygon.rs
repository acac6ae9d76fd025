use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon, Relate, Winding};
use geo_validity_check::Valid;
use serde::{Deserialize, Serialize};

use super::ring;
use super::EPS;

/// Vertex-list form of a polygon: exterior ring counter-clockwise, hole rings
/// clockwise, closing vertex not repeated, no consecutive collinear vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPolygon {
    pub exterior: Vec<(f64, f64)>,
    pub holes: Vec<Vec<(f64, f64)>>,
}

impl CanonicalPolygon {
    pub fn new(exterior: Vec<(f64, f64)>, holes: Vec<Vec<(f64, f64)>>) -> Self {
        Self { exterior, holes }
    }

    pub fn from_polygon(polygon: &Polygon<f64>) -> Self {
        let mut exterior = polygon.exterior().clone();
        exterior.make_ccw_winding();

        let holes = polygon
            .interiors()
            .iter()
            .map(|hole| {
                let mut hole = hole.clone();
                hole.make_cw_winding();
                ring_to_open(&hole)
            })
            .collect();

        Self { exterior: ring_to_open(&exterior), holes }
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(
            LineString::from(self.exterior.clone()),
            self.holes.iter().map(|hole| LineString::from(hole.clone())).collect(),
        )
    }
}

/// Open coordinate list of a closed ring, with collinear vertices removed.
fn ring_to_open(ring: &LineString<f64>) -> Vec<(f64, f64)> {
    let mut coords: Vec<Coord<f64>> = ring.0.clone();
    if coords.len() > 1 && ring::close(coords[0], *coords.last().unwrap()) {
        coords.pop();
    }
    ring::drop_collinear(coords).into_iter().map(|c| (c.x, c.y)).collect()
}

/// How two polygonal regions meet, classified by the dimension of the overlap.
#[derive(Clone, Debug)]
pub(crate) enum Overlap {
    /// The regions are disjoint.
    Empty,
    /// The boundaries meet only in isolated points.
    Point,
    /// The boundaries share arcs of the given total length.
    Edge(f64),
    /// The interiors overlap.
    Area(MultiPolygon<f64>),
}

/// Classify the intersection of two polygons.
///
/// 1-dimensional contact is detected through the perimeter identity
/// `shared = (perim(a) + perim(b) - perim(a ∪ b)) / 2`, which is zero for
/// pure point contact.
pub(crate) fn classify_overlap(a: &Polygon<f64>, b: &Polygon<f64>) -> Overlap {
    let im = a.relate(b);
    if !im.is_intersects() {
        return Overlap::Empty;
    }
    if !im.is_touches() {
        // Hairline slivers below the tolerance are boundary contact, not a
        // real overlap.
        let overlap = a.intersection(b);
        if overlap.unsigned_area() > EPS {
            return Overlap::Area(overlap);
        }
    }

    let shared =
        (polygon_perimeter(a) + polygon_perimeter(b) - multi_polygon_perimeter(&a.union(b))) / 2.0;
    if shared > EPS {
        Overlap::Edge(shared)
    } else {
        Overlap::Point
    }
}

/// Union of two polygons, constrained to a single valid polygon.
pub(crate) fn union_single(a: &Polygon<f64>, b: &Polygon<f64>) -> Option<Polygon<f64>> {
    let mut union = a.union(b);
    if union.0.len() != 1 {
        return None;
    }
    let polygon = union.0.pop()?;
    polygon.is_valid().then_some(polygon)
}

/// Minkowski erosion by `depth` with rounded joins. The result may be empty
/// or fall apart into several components.
pub(crate) fn erode(polygon: &Polygon<f64>, depth: f64) -> MultiPolygon<f64> {
    geo_buf::buffer_polygon_rounded(polygon, -depth)
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    ring::perimeter(polygon.exterior())
        + polygon.interiors().iter().map(ring::perimeter).sum::<f64>()
}

fn multi_polygon_perimeter(polygons: &MultiPolygon<f64>) -> f64 {
    polygons.0.iter().map(polygon_perimeter).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{Area, Polygon};

    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        CanonicalPolygon::new(
            vec![(x0, y0), (x0 + side, y0), (x0 + side, y0 + side), (x0, y0 + side)],
            vec![],
        )
        .to_polygon()
    }

    #[test]
    fn canonical_round_trip_normalizes_winding() {
        // Clockwise input exterior comes back counter-clockwise.
        let canonical = CanonicalPolygon::new(
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            vec![],
        );
        let round_trip = CanonicalPolygon::from_polygon(&canonical.to_polygon());
        assert_eq!(round_trip.exterior.len(), 4);
        assert_relative_eq!(canonical.to_polygon().unsigned_area(), 1.0, epsilon = 1e-9);

        let shoelace: f64 = round_trip
            .exterior
            .iter()
            .zip(round_trip.exterior.iter().cycle().skip(1))
            .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
            .sum();
        assert!(shoelace > 0.0);
    }

    #[test]
    fn canonical_form_keeps_holes_clockwise() {
        let polygon = CanonicalPolygon::new(
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            vec![vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]],
        )
        .to_polygon();
        let canonical = CanonicalPolygon::from_polygon(&polygon);
        assert_eq!(canonical.holes.len(), 1);

        let hole = &canonical.holes[0];
        let shoelace: f64 = hole
            .iter()
            .zip(hole.iter().cycle().skip(1))
            .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
            .sum();
        assert!(shoelace < 0.0);
    }

    #[test]
    fn disjoint_squares_do_not_overlap() {
        assert!(matches!(
            classify_overlap(&square(0.0, 0.0, 1.0), &square(2.0, 0.0, 1.0)),
            Overlap::Empty
        ));
    }

    #[test]
    fn corner_contact_is_a_point() {
        assert!(matches!(
            classify_overlap(&square(0.0, 0.0, 1.0), &square(1.0, 1.0, 1.0)),
            Overlap::Point
        ));
    }

    #[test]
    fn side_contact_is_an_edge() {
        match classify_overlap(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)) {
            Overlap::Edge(shared) => assert_relative_eq!(shared, 1.0, epsilon = 1e-6),
            other => panic!("expected edge contact, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_squares_share_area() {
        match classify_overlap(&square(0.0, 0.0, 2.0), &square(1.0, 0.0, 2.0)) {
            Overlap::Area(overlap) => {
                assert_relative_eq!(overlap.unsigned_area(), 2.0, epsilon = 1e-6)
            }
            other => panic!("expected area overlap, got {other:?}"),
        }
    }

    #[test]
    fn union_of_neighbors_is_single() {
        let union = union_single(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(union.unsigned_area(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn union_of_disjoint_squares_fails() {
        assert!(union_single(&square(0.0, 0.0, 1.0), &square(2.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn erosion_shrinks_and_drains() {
        let shrunk = erode(&square(0.0, 0.0, 1.0), 0.2);
        assert_eq!(shrunk.0.len(), 1);
        assert_relative_eq!(shrunk.unsigned_area(), 0.36, epsilon = 1e-3);

        assert!(erode(&square(0.0, 0.0, 1.0), 0.7).0.is_empty());
    }
}
