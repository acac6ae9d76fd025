use geo::{Area, BoundingRect, Distance, Euclidean, Point, Polygon};
use log::warn;

use crate::geom;

/// Polygons below this area are treated as degenerate: they cost nothing to
/// sweep, only to reach.
const DEGENERATE_AREA: f64 = 1e-9;

/// Parameters of the coverage cost χ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChiParams {
    /// Radius of the robot's coverage footprint.
    pub radius: f64,
    /// Weight of the access-distance and sweep-length terms.
    pub linear_penalty: f64,
    /// Weight of the turning term.
    pub angular_penalty: f64,
}

impl Default for ChiParams {
    fn default() -> Self {
        Self { radius: 0.2, linear_penalty: 1.0, angular_penalty: 100.0 / 360.0 }
    }
}

/// Approximate cost for one robot to cover one polygon from its start
/// location.
///
/// Three ingredients: the round trip to the polygon (`2 · distance`, zero if
/// the site is inside), the total sweep length (`area / radius`), and the
/// turning effort (`360°` per nested contour). The same inputs always produce
/// bit-identical results.
pub fn compute_chi(polygon: &Polygon<f64>, site: Point<f64>, params: &ChiParams) -> f64 {
    let access = 2.0 * Euclidean::distance(&site, polygon);
    let area = polygon.unsigned_area();

    let (sweep, turning) = if area <= DEGENERATE_AREA {
        (0.0, 0.0)
    } else {
        (
            area / params.radius,
            360.0 * contour_count(polygon, params.radius) as f64,
        )
    };

    params.linear_penalty * (access + sweep) + params.angular_penalty * turning
}

/// Number of nested contours a sweep of the given footprint radius traces
/// inside the polygon.
///
/// At step k the polygon is eroded by the absolute depth `(2k + 1) · r / 2`
/// (the centerline depth of the k-th pass); every non-empty erosion
/// contributes one contour per connected component, and the count stops at
/// the first empty result. A polygon with positive area that vanishes at the
/// very first erosion is a single sweep, so the count is never zero for a
/// non-degenerate polygon.
pub(crate) fn contour_count(polygon: &Polygon<f64>, radius: f64) -> usize {
    let Some(rect) = polygon.bounding_rect() else {
        return 0;
    };
    // Erosion past the bounding-box diagonal is necessarily empty.
    let max_depth = rect.width().hypot(rect.height());

    let mut count = 0;
    for level in 0.. {
        let depth = (2 * level + 1) as f64 * radius / 2.0;
        let shrunk = geom::erode(polygon, depth);
        if shrunk.0.is_empty() {
            break;
        }
        count += shrunk.0.len();
        if depth > max_depth {
            warn!("erosion at depth {depth} failed to drain the polygon");
            break;
        }
    }

    if count == 0 && polygon.unsigned_area() > DEGENERATE_AREA {
        1
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{Point, Polygon};

    use crate::geom::CanonicalPolygon;

    use super::*;

    fn unit_square() -> Polygon<f64> {
        CanonicalPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], vec![])
            .to_polygon()
    }

    #[test]
    fn square_contours_follow_the_schedule() {
        // Depths 0.15 and 0.45 leave material, 0.75 drains it.
        assert_eq!(contour_count(&unit_square(), 0.3), 2);
    }

    #[test]
    fn thin_strip_counts_a_single_sweep() {
        let strip = CanonicalPolygon::new(
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 0.1), (0.0, 0.1)],
            vec![],
        )
        .to_polygon();
        assert_eq!(contour_count(&strip, 0.5), 1);
    }

    #[test]
    fn chi_matches_hand_computation() {
        // Site one unit away, footprint as wide as the square: one sweep.
        let params = ChiParams { radius: 1.0, linear_penalty: 1.0, angular_penalty: 1.0 };
        let chi = compute_chi(&unit_square(), Point::new(-1.0, 0.0), &params);
        assert_relative_eq!(chi, 2.0 + 1.0 + 360.0, epsilon = 1e-6);
    }

    #[test]
    fn halving_the_radius_does_not_cheapen_coverage() {
        let coarse = ChiParams { radius: 1.0, linear_penalty: 1.0, angular_penalty: 1.0 };
        let fine = ChiParams { radius: 0.5, ..coarse };
        let site = Point::new(-1.0, 0.0);
        assert!(compute_chi(&unit_square(), site, &fine)
            > compute_chi(&unit_square(), site, &coarse));
    }

    #[test]
    fn chi_is_monotone_in_area() {
        let inset = CanonicalPolygon::new(
            vec![(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)],
            vec![],
        )
        .to_polygon();
        let params = ChiParams { radius: 1.0, linear_penalty: 1.0, angular_penalty: 1.0 };
        let site = Point::new(0.5, 0.5);
        assert!(compute_chi(&unit_square(), site, &params) > compute_chi(&inset, site, &params));
    }

    #[test]
    fn site_inside_the_polygon_has_no_access_cost() {
        let params = ChiParams { radius: 1.0, linear_penalty: 1.0, angular_penalty: 0.0 };
        let chi = compute_chi(&unit_square(), Point::new(0.5, 0.5), &params);
        assert_relative_eq!(chi, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_polygon_costs_only_access() {
        let flat = CanonicalPolygon::new(
            vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
            vec![],
        )
        .to_polygon();
        let params = ChiParams::default();
        let chi = compute_chi(&flat, Point::new(0.0, 1.0), &params);
        assert_relative_eq!(chi, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn chi_is_deterministic() {
        let params = ChiParams::default();
        let site = Point::new(-0.3, 0.4);
        let a = compute_chi(&unit_square(), site, &params);
        let b = compute_chi(&unit_square(), site, &params);
        assert!(a == b);
        assert!(a >= 0.0);
    }
}
