use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, Coord, Intersects, Line, LineString, Polygon, Relate};
use geo_validity_check::Valid;
use log::warn;

use super::ring;
use super::EPS;

/// Cut a simple polygon (possibly with holes) into two simple polygons along
/// a straight chord.
///
/// The chord must meet the exterior ring in exactly two points and otherwise
/// stay inside the polygon, clear of every hole. `None` is returned for every
/// ill-formed cut; during a cut search this is the common outcome, not an
/// error. The split is area-preserving and each hole ends up on the side
/// whose mask covers it. The first polygon of the pair is the one whose
/// boundary runs through the exterior ring's first vertex.
pub fn polygon_split(polygon: &Polygon<f64>, cut: Line<f64>) -> Option<(Polygon<f64>, Polygon<f64>)> {
    if ring::close(cut.start, cut.end) {
        return None;
    }
    if !polygon.is_valid() {
        return None;
    }

    let exterior = polygon.exterior();

    // The chord has to cross the exterior ring in exactly two distinct
    // points; a chord running along a boundary edge is rejected outright.
    let mut hits: Vec<Coord<f64>> = Vec::new();
    for edge in exterior.lines() {
        match line_intersection(cut, edge) {
            Some(LineIntersection::Collinear { .. }) => return None,
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                if !hits.iter().any(|hit| ring::close(*hit, intersection)) {
                    hits.push(intersection);
                }
            }
            None => {}
        }
    }
    let &[p, q] = hits.as_slice() else {
        return None;
    };

    // Interior-inclusive containment: endpoints may sit on the boundary but
    // no part of the chord may leave the polygon or meet a hole.
    let cut_string = LineString::new(vec![cut.start, cut.end]);
    if !cut_string.relate(polygon).is_within() {
        return None;
    }
    if polygon.interiors().iter().any(|hole| cut_string.intersects(hole)) {
        return None;
    }

    let arcs = ring::ring_difference(exterior, p, q)?;
    let (mask_a, mask_b) = match arcs.len() {
        2 => (arcs[0].0.clone(), arcs[1].0.clone()),
        3 => {
            let first = &arcs[0].0;
            let last = &arcs[2].0;
            if !ring::close(*last.last()?, *first.first()?) {
                warn!("ring difference arcs do not reconnect at the seam");
                return None;
            }
            // Splice the arc running through the seam back together.
            let mut spliced = last.clone();
            spliced.extend(first.iter().skip(1).copied());
            (spliced, arcs[1].0.clone())
        }
        _ => return None,
    };

    let mask_a = close_mask(mask_a)?;
    let mask_b = close_mask(mask_b)?;

    let first = clip_to(polygon, &mask_a)?;
    let second = clip_to(polygon, &mask_b)?;
    Some((first, second))
}

/// Close an exterior arc with the chord to form a candidate mask.
fn close_mask(coords: Vec<Coord<f64>>) -> Option<Polygon<f64>> {
    if coords.len() < 3 {
        return None;
    }
    let mask = Polygon::new(LineString::new(coords), vec![]);
    (mask.is_valid() && mask.unsigned_area() > EPS).then_some(mask)
}

/// Intersect a mask with the polygon, attaching the hole set of the covered
/// side. The result must be a single valid polygon of positive area.
fn clip_to(polygon: &Polygon<f64>, mask: &Polygon<f64>) -> Option<Polygon<f64>> {
    let mut clipped = polygon.intersection(mask);
    if clipped.0.len() != 1 {
        return None;
    }
    let piece = clipped.0.pop()?;
    (piece.is_valid() && piece.unsigned_area() > EPS && piece.exterior().0.len() >= 4)
        .then_some(piece)
}
