use geo::{Line, Point, Polygon};
use geo_validity_check::Valid;
use log::{debug, warn};

use crate::cost::{compute_chi, ChiParams};
use crate::geom::{self, polygon_split, Overlap};

/// A candidate cut must beat the original pair maximum by more than this to
/// be reported; equal-cost cuts would make the driver thrash.
const IMPROVEMENT_MARGIN: f64 = 1e-9;

/// Search for a cut through the union of two adjacent cells that lowers the
/// pair's maximum χ.
///
/// `num_samples` boundary points are spaced evenly along the union's exterior
/// and every ordered pair of samples is tried as a chord. Each successful
/// split is costed under both possible robot assignments and the cheaper one
/// is kept, ties preserving the original assignment. Returns the improved
/// pair oriented so the first polygon belongs to `site_a`, or `None` when no
/// cut beats the current assignment.
pub fn compute_pairwise_optimal(
    polygon_a: &Polygon<f64>,
    polygon_b: &Polygon<f64>,
    site_a: Point<f64>,
    site_b: Point<f64>,
    num_samples: usize,
    params: &ChiParams,
) -> Option<(Polygon<f64>, Polygon<f64>)> {
    if !polygon_a.is_valid() || !polygon_b.is_valid() {
        warn!("pairwise reoptimization requested on invalid polygons");
        return None;
    }
    if !matches!(geom::classify_overlap(polygon_a, polygon_b), Overlap::Edge(_)) {
        warn!("pairwise reoptimization requested on cells that do not share an edge");
        return None;
    }

    let union = match geom::union_single(polygon_a, polygon_b) {
        Some(union) => union,
        None => {
            warn!("union of the cell pair is not a single valid polygon");
            return None;
        }
    };
    if union.interiors().len() != polygon_a.interiors().len() + polygon_b.interiors().len() {
        // The pair meets along more than one arc and the union walled off a
        // void between them.
        warn!("union of the cell pair enclosed a void");
        return None;
    }

    let samples = geom::sample_perimeter(union.exterior(), num_samples);

    let original_max = compute_chi(polygon_a, site_a, params)
        .max(compute_chi(polygon_b, site_b, params));

    let mut best_cost = f64::INFINITY;
    let mut best_pair: Option<(Polygon<f64>, Polygon<f64>)> = None;

    for start in &samples {
        for end in &samples {
            let cut = Line::new(start.0, end.0);
            let Some((first, second)) = polygon_split(&union, cut) else {
                continue;
            };

            let keep = compute_chi(&first, site_a, params)
                .max(compute_chi(&second, site_b, params));
            let flip = compute_chi(&second, site_a, params)
                .max(compute_chi(&first, site_b, params));

            let (cost, pair) = if flip < keep {
                (flip, (second, first))
            } else {
                (keep, (first, second))
            };

            // First-discovered wins on ties, so the fixed sample order makes
            // the search reproducible.
            if cost < best_cost {
                best_cost = cost;
                best_pair = Some(pair);
            }
        }
    }

    if best_cost + IMPROVEMENT_MARGIN < original_max {
        debug!("found cut lowering pair max chi from {original_max:.3} to {best_cost:.3}");
        best_pair
    } else {
        None
    }
}
