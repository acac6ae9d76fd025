use geo::{Coord, Euclidean, Length, LineInterpolatePoint, LineString, Point};
use smallvec::SmallVec;

use super::EPS;

/// True if two coordinates coincide within the geometric tolerance.
#[inline]
pub(crate) fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).hypot(a.y - b.y) <= EPS
}

/// Length of a line string; the perimeter when the line string is a closed ring.
#[inline]
pub(crate) fn perimeter(ring: &LineString<f64>) -> f64 {
    ring.length::<Euclidean>()
}

/// The point exactly `distance` units along the ring from its first vertex.
pub(crate) fn point_at_distance(ring: &LineString<f64>, distance: f64) -> Option<Point<f64>> {
    let total = perimeter(ring);
    if total <= EPS {
        return ring.points().next();
    }
    ring.line_interpolate_point((distance / total).clamp(0.0, 1.0))
}

/// `count` points equally spaced along the ring by arc length. Both endpoints
/// of the sweep are emitted, so on a closed ring the seam point appears twice.
pub(crate) fn sample_perimeter(ring: &LineString<f64>, count: usize) -> Vec<Point<f64>> {
    let total = perimeter(ring);
    match count {
        0 => Vec::new(),
        1 => point_at_distance(ring, 0.0).into_iter().collect(),
        _ => (0..count)
            .filter_map(|i| point_at_distance(ring, total * i as f64 / (count - 1) as f64))
            .collect(),
    }
}

/// Locate a point on the ring as (segment index, parameter along the segment).
fn locate(ring: &LineString<f64>, point: Coord<f64>) -> Option<(usize, f64)> {
    for (index, segment) in ring.lines().enumerate() {
        let d = segment.end - segment.start;
        let len2 = d.x * d.x + d.y * d.y;
        let t = if len2 <= EPS * EPS {
            0.0
        } else {
            (((point.x - segment.start.x) * d.x + (point.y - segment.start.y) * d.y) / len2)
                .clamp(0.0, 1.0)
        };
        let foot = Coord {
            x: segment.start.x + t * d.x,
            y: segment.start.y + t * d.y,
        };
        if close(foot, point) {
            return Some((index, t));
        }
    }
    None
}

fn push_distinct(arc: &mut Vec<Coord<f64>>, coord: Coord<f64>) {
    if arc.last().is_none_or(|&last| !close(last, coord)) {
        arc.push(coord);
    }
}

/// Split a closed ring at two boundary points into its sub-arcs.
///
/// Arcs are returned in traversal order from the ring's first vertex. A cut
/// point sitting on the ring seam yields 2 arcs; otherwise there are 3, with
/// the last and first arc meeting at the seam (the caller splices them).
/// Returns `None` when either point does not lie on the ring.
pub(crate) fn ring_difference(
    ring: &LineString<f64>,
    p: Coord<f64>,
    q: Coord<f64>,
) -> Option<SmallVec<[LineString<f64>; 3]>> {
    let mut cuts = [(locate(ring, p)?, p), (locate(ring, q)?, q)];
    cuts.sort_by(|a, b| a.0 .0.cmp(&b.0 .0).then(a.0 .1.total_cmp(&b.0 .1)));
    let [((seg_a, _), point_a), ((seg_b, _), point_b)] = cuts;

    let coords = &ring.0;
    let mut arcs: SmallVec<[LineString<f64>; 3]> = SmallVec::new();
    let mut push_arc = |arc: Vec<Coord<f64>>| {
        if arc.len() >= 2 {
            arcs.push(LineString::new(arc));
        }
    };

    // Ring start up to the first cut point.
    let mut arc = Vec::new();
    for &c in &coords[..=seg_a] {
        push_distinct(&mut arc, c);
    }
    push_distinct(&mut arc, point_a);
    push_arc(arc);

    // Between the two cut points.
    let mut arc = vec![point_a];
    for &c in &coords[seg_a + 1..=seg_b] {
        push_distinct(&mut arc, c);
    }
    push_distinct(&mut arc, point_b);
    push_arc(arc);

    // Second cut point back to the seam.
    let mut arc = vec![point_b];
    for &c in &coords[seg_b + 1..] {
        push_distinct(&mut arc, c);
    }
    push_arc(arc);

    Some(arcs)
}

/// Remove consecutive duplicate and collinear vertices from an open ring.
pub(crate) fn drop_collinear(mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    let mut changed = true;
    while changed && coords.len() > 3 {
        changed = false;
        let mut i = 0;
        while i < coords.len() && coords.len() > 3 {
            let n = coords.len();
            let prev = coords[(i + n - 1) % n];
            let cur = coords[i];
            let next = coords[(i + 1) % n];
            let cross = (cur.x - prev.x) * (next.y - prev.y) - (cur.y - prev.y) * (next.x - prev.x);
            if close(prev, cur) || cross.abs() <= EPS {
                coords.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    coords
}
