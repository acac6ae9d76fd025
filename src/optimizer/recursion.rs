use log::{debug, warn};

use crate::cost::{compute_chi, ChiParams};
use crate::decomposition::{Adjacency, Decomposition};

use super::pairwise::compute_pairwise_optimal;

/// Depth-first improvement pass starting at `pivot`, normally the cell with
/// the globally maximum χ.
///
/// Neighbors are visited cheapest-first (ties by id) and only while they cost
/// strictly less than the pivot. A successful pairwise cut is committed into
/// the decomposition, the adjacency is rebuilt and the recursion unwinds with
/// `true`. A failed pair turns the neighbor into the next pivot: descending
/// into the neighborhood of the neighborhood perturbs the search out of local
/// minima. `depth` caps the descent at the cell count.
pub(crate) fn dft_recursion(
    decomposition: &mut Decomposition,
    adjacency: &mut Adjacency,
    pivot: usize,
    depth: usize,
    num_samples: usize,
    params: &ChiParams,
) -> bool {
    if depth >= decomposition.len() {
        warn!("recursion depth cap reached while perturbing around cell {pivot}");
        return false;
    }

    let pivot_cost = compute_chi(decomposition.polygon(pivot), decomposition.site(pivot), params);
    debug!("pivot cell {pivot} has cost {pivot_cost:.3}");

    let mut neighbor_costs: Vec<(usize, f64)> = adjacency
        .neighbors(pivot)
        .map(|id| (id, compute_chi(decomposition.polygon(id), decomposition.site(id), params)))
        .collect();
    neighbor_costs.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    for (neighbor, neighbor_cost) in neighbor_costs {
        if neighbor_cost >= pivot_cost {
            continue;
        }
        debug!("attempting to reoptimize cells {pivot} and {neighbor}");

        let result = compute_pairwise_optimal(
            decomposition.polygon(pivot),
            decomposition.polygon(neighbor),
            decomposition.site(pivot),
            decomposition.site(neighbor),
            num_samples,
            params,
        );

        if let Some((pivot_polygon, neighbor_polygon)) = result {
            if let Err(error) =
                decomposition.replace_cells(pivot, pivot_polygon, neighbor, neighbor_polygon)
            {
                warn!("discarding cut for cells {pivot} and {neighbor}: {error}");
                continue;
            }
            *adjacency = Adjacency::build(decomposition);
            debug!("cells {pivot} and {neighbor} reoptimized");
            return true;
        }

        if dft_recursion(decomposition, adjacency, neighbor, depth + 1, num_samples, params) {
            return true;
        }
    }

    false
}
